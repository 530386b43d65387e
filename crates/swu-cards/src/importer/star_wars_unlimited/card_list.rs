//! Module for importer for https://admin.starwarsunlimited.com/api/card-list
//!
//! Upstream wraps every related record in `{ "data": { "attributes": ... } }`
//! (or `{ "data": [...] }` for collections). [`Single`] and [`Collection`]
//! are the one place that shape is unwrapped, so a change to the upstream
//! envelope surfaces here and nowhere else.

use std::collections::BTreeMap;
use std::io::Read;

use serde::Deserialize;
use serde_json::Result;

/// One page of the paginated card-list endpoint.
#[derive(Debug, Deserialize, Clone)]
pub struct CardListPage {
    pub data: Vec<RawCard>,
    pub meta: Meta,
}

/// Parses one card-list page from the provided JSON reader.
/// Fails if the response envelope or any modeled attribute has an
/// unexpected shape.
pub fn read_card_list_page(page_reader: impl Read) -> Result<CardListPage> {
    let result: CardListPage = serde_json::from_reader(page_reader)?;
    Ok(result)
}

#[derive(Debug, Deserialize, Clone)]
pub struct Meta {
    pub pagination: Pagination,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub page: u32,
    pub page_count: u32,
}

/// One record of a page's `data` array.
#[derive(Debug, Deserialize, Clone)]
pub struct RawCard {
    pub id: u64,
    pub attributes: RawCardAttributes,
}

/// The `{ "data": ... }` wrapper around a single related record.
/// A null `data` means the relation is absent.
#[derive(Debug, Deserialize, Clone)]
pub struct Single<T> {
    pub data: Option<Entry<T>>,
}

impl<T> Single<T> {
    pub fn attributes(&self) -> Option<&T> {
        self.data.as_ref().map(|entry| &entry.attributes)
    }
}

impl<T> Default for Single<T> {
    fn default() -> Self {
        Single { data: None }
    }
}

/// The `{ "data": [...] }` wrapper around a related collection.
#[derive(Debug, Deserialize, Clone)]
pub struct Collection<T> {
    pub data: Vec<Entry<T>>,
}

impl<T> Collection<T> {
    pub fn attributes(&self) -> impl Iterator<Item = &T> {
        self.data.iter().map(|entry| &entry.attributes)
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

impl<T> Default for Collection<T> {
    fn default() -> Self {
        Collection { data: Vec::new() }
    }
}

/// One wrapped record. Upstream also carries an `id` here; only the card
/// record itself has a use for it.
#[derive(Debug, Deserialize, Clone)]
pub struct Entry<T> {
    pub attributes: T,
}

/// A relation where only presence matters, e.g. `variantOf`: its target is
/// not always populated with attributes, so nothing beyond `data` being
/// null or not can be relied on.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct Reference {
    pub data: Option<serde_json::Value>,
}

impl Reference {
    pub fn is_present(&self) -> bool {
        self.data.is_some()
    }
}

/// The card attributes this importer consumes. Upstream carries many more
/// (locale bookkeeping, deck-building metadata, timestamps); serde drops
/// whatever is not listed here. Scalars are optional at this layer — the
/// normalizer decides which ones are actually mandatory.
#[derive(Debug, Deserialize, Clone, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct RawCardAttributes {
    pub title: Option<String>,
    pub subtitle: Option<String>,
    pub artist: Option<String>,
    pub card_number: Option<u32>,
    pub card_count: Option<u32>,
    pub cost: Option<i64>,
    pub hp: Option<i64>,
    pub power: Option<i64>,
    pub unique: Option<bool>,
    pub hyperspace: Option<bool>,
    pub showcase: Option<bool>,
    pub art_front_horizontal: Option<bool>,
    pub art_front: Single<RawArt>,
    pub art_back: Single<RawArt>,
    pub art_thumbnail: Single<RawArt>,
    pub aspects: Collection<RawNamed>,
    pub aspect_duplicates: Collection<RawNamed>,
    pub traits: Collection<RawNamed>,
    pub arenas: Collection<RawNamed>,
    #[serde(rename = "type")]
    pub card_type: Single<RawTypeValue>,
    pub rarity: Single<RawNamed>,
    pub expansion: Single<RawExpansion>,
    pub variant_of: Reference,
    pub variants: Collection<RawCardAttributes>,
}

/// A related record whose only payload is a display name (aspects, traits,
/// arenas, rarities).
#[derive(Debug, Deserialize, Clone)]
pub struct RawNamed {
    pub name: String,
}

/// The card type relation keeps its label in `value` rather than `name`.
#[derive(Debug, Deserialize, Clone)]
pub struct RawTypeValue {
    pub value: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct RawExpansion {
    pub code: String,
}

/// One art block: a map of format name to pre-rendered image size.
#[derive(Debug, Deserialize, Clone)]
pub struct RawArt {
    // BTreeMap so an UnknownArtFormat error lists the keys deterministically.
    #[serde(default)]
    pub formats: BTreeMap<String, RawArtFormat>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct RawArtFormat {
    pub name: String,
    pub url: String,
}

#[cfg(test)]
mod tests;

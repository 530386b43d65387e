//! The canonical flat card model, and its normalization from the upstream
//! card-list shape.
//!
//! Everything upstream is nested, inconsistently populated, and padded with
//! rows that are not standalone cards (alternate-art variants, unreleased
//! records). This module flattens all of that into [`Card`] values: one per
//! printed card identity, with its alternate arts folded into an ordered
//! [`CardArt`] list.

use std::collections::BTreeMap;
use std::io::Read;
use std::ops::Deref;
use std::path::PathBuf;

use derive_getters::Getters;
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString, VariantNames};

use crate::importer::star_wars_unlimited::{
    self, ApiEndpoint, ClientBuilder, RawArt, RawCard, RawCardAttributes, Single,
};
use crate::{Error, Result};

/// The printed card category.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    AsRefStr,
    EnumString,
    VariantNames,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum CardType {
    Base,
    Event,
    Leader,
    Unit,
    Upgrade,
}

/// One of the six colour/identity icons a card can carry, possibly more
/// than once: a repeated aspect is a doubled cost-reduction icon, not noise.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    AsRefStr,
    EnumString,
    VariantNames,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Aspect {
    Aggression,
    Command,
    Cunning,
    Heroism,
    Villainy,
    Vigilance,
}

/// The board zone a unit deploys to.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    AsRefStr,
    EnumString,
    VariantNames,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Rarity {
    Common,
    Uncommon,
    Rare,
    Legendary,
    Special,
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    AsRefStr,
    EnumString,
    VariantNames,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Arena {
    Ground,
    Space,
}

/// The visual treatment of one art rendition.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    AsRefStr,
    EnumString,
    VariantNames,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum CardStyle {
    Standard,
    Hyperspace,
    Showcase,
}

/// Resolves an upstream free-text label against a closed enum member set,
/// case-insensitively. Anything outside the set is fatal: a new upstream
/// category means the schema moved and the member list needs review.
fn resolve<T>(enum_name: &'static str, label: &str) -> Result<T>
where
    T: std::str::FromStr,
{
    label
        .to_lowercase()
        .parse()
        .map_err(|_| Error::UnknownEnumValue {
            enum_name,
            label: label.to_string(),
        })
}

/// One printed card identity in the flat output schema.
///
/// Immutable once constructed; `(set, number)` is unique within a catalog.
/// `art` is never empty — index 0 is the card's primary artwork, the rest
/// are alternate-art variants in upstream order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
#[serde(deny_unknown_fields)]
pub struct Card {
    set: String,
    number: u32,
    rarity: Rarity,
    #[serde(rename = "type")]
    card_type: CardType,
    title: String,
    sub_title: Option<String>,
    artist: String,
    cost: Option<u32>,
    hp: Option<u32>,
    power: Option<u32>,
    unique: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    arena: Option<Arena>,
    aspects: Vec<Aspect>,
    traits: Vec<String>,
    horizontal: bool,
    art: Vec<CardArt>,
}

/// One distinct visual rendition of a card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
#[serde(deny_unknown_fields)]
pub struct CardArt {
    style: CardStyle,
    front: CardArtDetails,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    back: Option<CardArtDetails>,
    thumbnail: CardArtDetails,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
#[serde(deny_unknown_fields)]
pub struct CardArtDetails {
    name: String,
    url: String,
}

/// Preferred image format keys within an art block, best first.
const ART_FORMATS: [&str; 2] = ["card", "xxsmall"];

/// First candidate key present in the map, in candidate order. Keeps the
/// fallback order in one visible place rather than a conditional chain.
fn preferred<'a, V>(map: &'a BTreeMap<String, V>, candidates: &[&str]) -> Option<&'a V> {
    candidates.iter().find_map(|key| map.get(*key))
}

/// Extracts one image slot, or None when the relation's `data` is null.
/// A present block without a usable format is fatal: it means upstream
/// renamed its pre-rendered image sizes.
fn art_details(art: &Single<RawArt>) -> Result<Option<CardArtDetails>> {
    let Some(raw) = art.attributes() else {
        return Ok(None);
    };
    let format = preferred(&raw.formats, &ART_FORMATS).ok_or_else(|| Error::UnknownArtFormat {
        available: raw.formats.keys().cloned().collect(),
    })?;
    Ok(Some(CardArtDetails {
        name: format.name.clone(),
        url: format.url.clone(),
    }))
}

/// Flattens the three art blocks of a card (or of one of its variant rows)
/// into a [`CardArt`]. Front and thumbnail are mandatory; a missing back
/// just means the card is single-sided. Showcase beats hyperspace when a
/// record claims both.
fn extract_art(attributes: &RawCardAttributes) -> Result<CardArt> {
    let style = if attributes.showcase.unwrap_or(false) {
        CardStyle::Showcase
    } else if attributes.hyperspace.unwrap_or(false) {
        CardStyle::Hyperspace
    } else {
        CardStyle::Standard
    };

    let front = art_details(&attributes.art_front)?.ok_or(Error::MissingRequiredField("artFront"))?;
    let back = art_details(&attributes.art_back)?;
    let thumbnail =
        art_details(&attributes.art_thumbnail)?.ok_or(Error::MissingRequiredField("artThumbnail"))?;

    Ok(CardArt {
        style,
        front,
        back,
        thumbnail,
    })
}

/// Required-field unwrap. Absence is a fatal schema violation, because a
/// partially-populated catalog must never be written out.
fn required<T>(value: Option<T>, field: &'static str) -> Result<T> {
    value.ok_or(Error::MissingRequiredField(field))
}

/// Optional stat coercion: upstream uses null where a card type has no such
/// stat, and the occasional out-of-domain value is treated the same way.
fn stat(value: Option<i64>) -> Option<u32> {
    value.and_then(|v| u32::try_from(v).ok())
}

/// Normalizes one raw card-list record into a [`Card`].
///
/// Returns None for the two record shapes that are intentionally not
/// standalone cards: variant rows (folded into their parent's art list via
/// the parent's `variants` collection) and records with no expansion
/// (unreleased data).
fn normalize(attributes: &RawCardAttributes) -> Result<Option<Card>> {
    if attributes.variant_of.is_present() {
        return Ok(None);
    }
    let Some(expansion) = attributes.expansion.attributes() else {
        return Ok(None);
    };

    let title = required(
        attributes.title.as_deref().filter(|title| !title.is_empty()),
        "title",
    )?;
    let artist = required(attributes.artist.as_deref(), "artist")?;
    let number = required(attributes.card_number, "cardNumber")?;
    // Not part of the output schema, but its absence is the same upstream
    // drift signal as any other mandatory field.
    required(attributes.card_count, "cardCount")?;

    let card_type = required(attributes.card_type.attributes(), "type")?;
    let rarity = required(attributes.rarity.attributes(), "rarity")?;

    // Duplicated aspects are appended after the primary list, never
    // deduplicated: consumers count icons.
    let mut aspects =
        Vec::with_capacity(attributes.aspects.len() + attributes.aspect_duplicates.len());
    for named in attributes
        .aspects
        .attributes()
        .chain(attributes.aspect_duplicates.attributes())
    {
        aspects.push(resolve("Aspect", &named.name)?);
    }

    let traits = attributes
        .traits
        .attributes()
        .map(|named| named.name.to_lowercase())
        .collect();

    let arena = match attributes.arenas.attributes().next() {
        Some(named) => Some(resolve("Arena", &named.name)?),
        None => None,
    };

    let mut art = Vec::with_capacity(1 + attributes.variants.len());
    art.push(extract_art(attributes)?);
    for variant in attributes.variants.attributes() {
        art.push(extract_art(variant)?);
    }

    Ok(Some(Card {
        set: expansion.code.to_lowercase(),
        number,
        rarity: resolve("Rarity", &rarity.name)?,
        card_type: resolve("CardType", &card_type.value)?,
        title: title.to_string(),
        sub_title: attributes.subtitle.clone().filter(|s| !s.is_empty()),
        artist: artist.to_string(),
        cost: stat(attributes.cost),
        hp: stat(attributes.hp),
        power: stat(attributes.power),
        unique: attributes.unique.unwrap_or(false),
        arena,
        aspects,
        traits,
        horizontal: attributes.art_front_horizontal.unwrap_or(false),
        art,
    }))
}

// Based on https://rust-lang.github.io/api-guidelines/type-safety.html#builders-enable-construction-of-complex-values-c-builder
pub struct CardsBuilder {
    pages: Vec<Box<dyn Read>>,
    api_client_builder: Option<ClientBuilder>,
}

impl CardsBuilder {
    pub fn new() -> CardsBuilder {
        CardsBuilder {
            pages: Vec::new(),
            api_client_builder: None,
        }
    }

    /// Feed one raw card-list page from a reader instead of the network.
    /// Pages are consumed in the order they were added; when any pages are
    /// provided the API client is not consulted at all.
    pub fn page_from_reader<R>(mut self, reader: R) -> CardsBuilder
    where
        R: Read + 'static,
    {
        self.pages.push(Box::new(reader));
        self
    }

    pub fn endpoint(mut self, endpoint: String) -> CardsBuilder {
        self.api_client_builder = Some(
            self.api_client_builder
                .unwrap_or_default()
                .endpoint(endpoint),
        );
        self
    }

    pub fn cache_dir(mut self, cache_dir: PathBuf) -> CardsBuilder {
        self.api_client_builder = Some(
            self.api_client_builder
                .unwrap_or_default()
                .cache_dir(cache_dir),
        );
        self
    }

    /// Fetch and normalize the full card list.
    ///
    /// Pages are fetched sequentially starting at 1 until the page count
    /// reported by the response envelope is reached; each page is fetched
    /// exactly once.
    pub async fn build(self) -> Result<Cards> {
        let mut raw_cards: Vec<RawCard> = Vec::new();

        if self.pages.is_empty() {
            let client = self.api_client_builder.unwrap_or_default().build()?;
            let mut page = 1;
            loop {
                let reader = client.fetch(&ApiEndpoint::CardList { page }).await?;
                let parsed = star_wars_unlimited::read_card_list_page(reader)?;
                let page_count = parsed.meta.pagination.page_count;
                raw_cards.extend(parsed.data);
                if page >= page_count {
                    break;
                }
                page += 1;
            }
        } else {
            for reader in self.pages {
                let parsed = star_wars_unlimited::read_card_list_page(reader)?;
                raw_cards.extend(parsed.data);
            }
        }

        Cards::new(raw_cards)
    }
}

impl Default for CardsBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// A normalized card catalog, in upstream page order.
#[derive(Debug)]
pub struct Cards {
    cards: Vec<Card>,
    skipped: usize,
}

impl Cards {
    fn new(raw_cards: Vec<RawCard>) -> Result<Self> {
        let mut cards = Vec::with_capacity(raw_cards.len());
        let mut skipped = 0;

        for raw in &raw_cards {
            match normalize(&raw.attributes)? {
                Some(card) => cards.push(card),
                None => skipped += 1,
            }
        }

        if let Some((set, number)) = cards
            .iter()
            .map(|card| (card.set(), card.number()))
            .duplicates()
            .next()
        {
            return Err(Error::DuplicateCard {
                set: set.clone(),
                number: *number,
            });
        }

        cards.shrink_to_fit();
        Ok(Cards { cards, skipped })
    }

    /// Upstream rows that were folded or skipped rather than normalized:
    /// variant rows and unreleased records. Not errors.
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    pub fn into_cards(self) -> Vec<Card> {
        self.cards
    }
}

// Implementing Deref but not DerefMut so it can't be mutated.
impl Deref for Cards {
    type Target = Vec<Card>;

    fn deref(&self) -> &Self::Target {
        &self.cards
    }
}

/// Parses a flat card array, e.g. a previous scrape's output file.
pub fn read_cards(cards_reader: impl Read) -> Result<Vec<Card>> {
    serde_json::from_reader(cards_reader).map_err(Error::MalformedInput)
}

/// Serializes cards to the flat JSON array format. Exact inverse of
/// [`read_cards`] for every valid card.
pub fn write_cards(cards: &[Card]) -> Result<String> {
    Ok(serde_json::to_string(cards)?)
}

//! Target layout for bulk-downloaded card art.

use std::path::{Path, PathBuf};

use crate::cards::{Card, CardArtDetails, CardStyle};

/// One image to download: source URL and destination file path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtAsset {
    pub url: String,
    pub path: PathBuf,
}

/// Enumerates every image of every card as
/// `<front|back|thumb>/<style>/<set>-<NNN>.png` under the given output
/// root. Collector numbers are zero-padded to three digits. Paths are
/// disjoint per card, slot and style, so downloads can run concurrently
/// without write-write conflicts.
pub fn art_assets(cards: &[Card], output: &Path) -> Vec<ArtAsset> {
    let mut assets = Vec::new();
    for card in cards {
        for art in card.art() {
            push_asset(&mut assets, output, "front", *art.style(), card, art.front());
            if let Some(back) = art.back() {
                push_asset(&mut assets, output, "back", *art.style(), card, back);
            }
            push_asset(&mut assets, output, "thumb", *art.style(), card, art.thumbnail());
        }
    }
    assets
}

fn push_asset(
    assets: &mut Vec<ArtAsset>,
    output: &Path,
    slot: &str,
    style: CardStyle,
    card: &Card,
    details: &CardArtDetails,
) {
    // Local filenames use set and collector number rather than the upstream
    // asset name, so files sort usefully.
    assets.push(ArtAsset {
        url: details.url().clone(),
        path: output
            .join(slot)
            .join(style.as_ref())
            .join(format!("{}-{:03}.png", card.set(), card.number())),
    });
}

//! Partition of the cellar into Champagne, Dessert and Regular wines
//!
//! Checks run in a fixed order: Champagne, then Dessert, then Regular. A wine
//! from the Champagne region stays under Champagne even when it also looks
//! like a dessert wine.

use cellar_common::WineRecord;
use once_cell::sync::Lazy;

use crate::hierarchy::field_value;

/// Region value that files a wine under Champagne
pub const CHAMPAGNE_REGION: &str = "Champagne";

/// Declared color that files a wine under Dessert
pub const DESSERT_COLOR: &str = "Dessert";

const DESSERT_SUBREGIONS: &[&str] = &[
    "Sauternes",
    "Barsac",
    "Loupiac",
    "Cadillac",
    "Sainte-Croix-du-Mont",
    "Monbazillac",
    "Coteaux du Layon",
    "Quarts de Chaume",
    "Bonnezeaux",
    "Tokaj",
];

const DESSERT_KEYWORDS: &[&str] = &[
    "Vendanges Tardives",
    "Sélection de Grains Nobles",
    "Selection de Grains Nobles",
    "Late Harvest",
    "Eiswein",
    "Icewine",
    "Ice Wine",
    "Tokaji",
    "Beerenauslese",
    "Trockenbeerenauslese",
    "Vin Santo",
    "Passito",
    "Recioto",
    "Vin de Paille",
    "Sauternes",
];

static LOWERCASE_KEYWORDS: Lazy<Vec<String>> =
    Lazy::new(|| DESSERT_KEYWORDS.iter().map(|k| k.to_lowercase()).collect());

/// Which part of the catalog a wine belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WineCategory {
    Champagne,
    Dessert,
    Regular,
}

/// Disjoint partition of an input collection, input order preserved
#[derive(Debug, Default)]
pub struct Classified<'a> {
    pub champagne: Vec<&'a WineRecord>,
    pub dessert: Vec<&'a WineRecord>,
    pub regular: Vec<&'a WineRecord>,
}

impl<'a> Classified<'a> {
    pub fn len(&self) -> usize {
        self.champagne.len() + self.dessert.len() + self.regular.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Fields are read trimmed, the same way the hierarchy groups them
pub fn categorize(wine: &WineRecord) -> WineCategory {
    if field_value(wine.region.as_deref()) == Some(CHAMPAGNE_REGION) {
        WineCategory::Champagne
    } else if is_dessert(wine) {
        WineCategory::Dessert
    } else {
        WineCategory::Regular
    }
}

fn is_dessert(wine: &WineRecord) -> bool {
    if field_value(wine.color.as_deref()) == Some(DESSERT_COLOR) {
        return true;
    }
    if let Some(subregion) = field_value(wine.subregion.as_deref()) {
        if DESSERT_SUBREGIONS.contains(&subregion) {
            return true;
        }
    }
    match field_value(wine.appellation.as_deref()) {
        Some(appellation) => {
            let appellation = appellation.to_lowercase();
            LOWERCASE_KEYWORDS.iter().any(|k| appellation.contains(k.as_str()))
        }
        None => false,
    }
}

pub fn classify(wines: &[WineRecord]) -> Classified<'_> {
    let mut classified = Classified::default();
    for wine in wines {
        match categorize(wine) {
            WineCategory::Champagne => classified.champagne.push(wine),
            WineCategory::Dessert => classified.dessert.push(wine),
            WineCategory::Regular => classified.regular.push(wine),
        }
    }
    classified
}

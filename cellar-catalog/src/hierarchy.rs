//! Grouping of wines into a color → country → region → subregion → commune →
//! cru tree
//!
//! Each wine lands in exactly one leaf bucket, addressed by its own taxonomic
//! fields. Absent fields map to [`GroupKey::None`]; a missing region becomes
//! `"Unknown"` and a region without a known country files under `"Other"`.

use cellar_common::WineRecord;
use once_cell::sync::Lazy;
use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;

use crate::ordering::compare_alpha;

/// Region label for wines without a region
pub const UNKNOWN_REGION: &str = "Unknown";

/// Country label for regions missing from the lookup table
pub const OTHER_COUNTRY: &str = "Other";

const REGION_COUNTRIES: &[(&str, &str)] = &[
    // France
    ("Burgundy", "France"),
    ("Bordeaux", "France"),
    ("Champagne", "France"),
    ("Rhône Valley", "France"),
    ("Loire Valley", "France"),
    ("Alsace", "France"),
    ("Beaujolais", "France"),
    ("Provence", "France"),
    ("Languedoc-Roussillon", "France"),
    ("Languedoc", "France"),
    ("Roussillon", "France"),
    ("Jura", "France"),
    ("Savoie", "France"),
    ("Sud-Ouest", "France"),
    ("Corsica", "France"),
    // Italy
    ("Piedmont", "Italy"),
    ("Tuscany", "Italy"),
    ("Veneto", "Italy"),
    ("Friuli-Venezia Giulia", "Italy"),
    ("Trentino-Alto Adige", "Italy"),
    ("Lombardy", "Italy"),
    ("Campania", "Italy"),
    ("Sicily", "Italy"),
    ("Sardinia", "Italy"),
    // Spain
    ("Rioja", "Spain"),
    ("Ribera del Duero", "Spain"),
    ("Priorat", "Spain"),
    ("Rías Baixas", "Spain"),
    ("Jerez", "Spain"),
    ("Penedès", "Spain"),
    // Germany
    ("Mosel", "Germany"),
    ("Rheingau", "Germany"),
    ("Rheinhessen", "Germany"),
    ("Pfalz", "Germany"),
    ("Nahe", "Germany"),
    ("Franken", "Germany"),
    // Portugal
    ("Douro", "Portugal"),
    ("Porto", "Portugal"),
    ("Madeira", "Portugal"),
    ("Alentejo", "Portugal"),
    ("Dão", "Portugal"),
    // USA
    ("California", "USA"),
    ("Napa Valley", "USA"),
    ("Sonoma", "USA"),
    ("Oregon", "USA"),
    ("Washington", "USA"),
    // Australia
    ("Barossa Valley", "Australia"),
    ("McLaren Vale", "Australia"),
    ("Margaret River", "Australia"),
    ("Hunter Valley", "Australia"),
    ("Yarra Valley", "Australia"),
    ("Clare Valley", "Australia"),
    // New Zealand
    ("Marlborough", "New Zealand"),
    ("Central Otago", "New Zealand"),
    ("Hawke's Bay", "New Zealand"),
    // Argentina
    ("Mendoza", "Argentina"),
    ("Salta", "Argentina"),
    // Chile
    ("Maipo Valley", "Chile"),
    ("Colchagua Valley", "Chile"),
    ("Casablanca Valley", "Chile"),
    // South Africa
    ("Stellenbosch", "South Africa"),
    ("Swartland", "South Africa"),
    ("Constantia", "South Africa"),
    // Austria
    ("Wachau", "Austria"),
    ("Kamptal", "Austria"),
    ("Burgenland", "Austria"),
    // Hungary
    ("Tokaj", "Hungary"),
];

static COUNTRY_BY_REGION: Lazy<HashMap<&'static str, &'static str>> =
    Lazy::new(|| REGION_COUNTRIES.iter().copied().collect());

/// Country a region belongs to, or [`OTHER_COUNTRY`]
pub fn country_for_region(region: &str) -> &'static str {
    COUNTRY_BY_REGION.get(region).copied().unwrap_or(OTHER_COUNTRY)
}

/// Trimmed field value; absent, empty and whitespace-only fields are `None`
pub fn field_value(field: Option<&str>) -> Option<&str> {
    field.map(str::trim).filter(|value| !value.is_empty())
}

/// One grouping value, or the absent-field sentinel
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum GroupKey {
    Value(String),
    None,
}

impl GroupKey {
    /// Absent, empty and whitespace-only fields all map to `None`
    pub fn from_field(field: Option<&str>) -> Self {
        match field_value(field) {
            Some(value) => GroupKey::Value(value.to_string()),
            None => GroupKey::None,
        }
    }

    pub fn value(value: &str) -> Self {
        GroupKey::Value(value.to_string())
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            GroupKey::Value(value) => Some(value.as_str()),
            GroupKey::None => None,
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, GroupKey::None)
    }
}

impl fmt::Display for GroupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GroupKey::Value(value) => f.write_str(value),
            GroupKey::None => f.write_str("NONE"),
        }
    }
}

/// Hierarchy levels, outermost first
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Color,
    Country,
    Region,
    Subregion,
    Commune,
    Cru,
}

impl Level {
    /// Grouping key of `wine` at this level
    pub fn key_of(self, wine: &WineRecord) -> GroupKey {
        match self {
            Level::Color => GroupKey::from_field(wine.color.as_deref()),
            Level::Country => GroupKey::value(country_for_region(&region_name(wine))),
            Level::Region => GroupKey::Value(region_name(wine)),
            Level::Subregion => GroupKey::from_field(wine.subregion.as_deref()),
            Level::Commune => GroupKey::from_field(wine.commune.as_deref()),
            Level::Cru => GroupKey::from_field(wine.cru.as_deref()),
        }
    }
}

fn region_name(wine: &WineRecord) -> String {
    match GroupKey::from_field(wine.region.as_deref()) {
        GroupKey::Value(region) => region,
        GroupKey::None => UNKNOWN_REGION.to_string(),
    }
}

const FULL_LEVELS: &[Level] = &[
    Level::Color,
    Level::Country,
    Level::Region,
    Level::Subregion,
    Level::Commune,
    Level::Cru,
];

/// A grouping node; children are kept in first-seen order
#[derive(Debug, Clone, PartialEq)]
pub struct HierarchyNode<'a> {
    pub key: GroupKey,
    pub children: Vec<HierarchyNode<'a>>,
    /// Populated only on cru-level (leaf) nodes
    pub wines: Vec<&'a WineRecord>,
}

impl<'a> HierarchyNode<'a> {
    fn new(key: GroupKey) -> Self {
        Self {
            key,
            children: Vec::new(),
            wines: Vec::new(),
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    fn child_mut(&mut self, key: GroupKey) -> &mut HierarchyNode<'a> {
        let index = match self.children.iter().position(|c| c.key == key) {
            Some(index) => index,
            None => {
                self.children.push(HierarchyNode::new(key));
                self.children.len() - 1
            }
        };
        &mut self.children[index]
    }

    fn sort_leaves(&mut self) {
        if self.is_leaf() {
            self.wines.sort_by(|a, b| compare_wines(a, b));
        } else {
            for child in &mut self.children {
                child.sort_leaves();
            }
        }
    }

    fn collect_leaves<'s>(
        &'s self,
        path: &mut Vec<&'s GroupKey>,
        out: &mut Vec<(Vec<&'s GroupKey>, &'s [&'a WineRecord])>,
    ) {
        path.push(&self.key);
        if self.is_leaf() {
            out.push((path.clone(), self.wines.as_slice()));
        } else {
            for child in &self.children {
                child.collect_leaves(path, out);
            }
        }
        path.pop();
    }
}

/// Leaf ordering: vintage descending (missing as 0), then producer, then
/// appellation (missing as empty)
pub fn compare_wines(a: &WineRecord, b: &WineRecord) -> Ordering {
    b.vintage
        .unwrap_or(0)
        .cmp(&a.vintage.unwrap_or(0))
        .then_with(|| {
            compare_alpha(
                a.producer.as_deref().unwrap_or(""),
                b.producer.as_deref().unwrap_or(""),
            )
        })
        .then_with(|| {
            compare_alpha(
                a.appellation.as_deref().unwrap_or(""),
                b.appellation.as_deref().unwrap_or(""),
            )
        })
}

/// Root nodes plus the level each depth represents
#[derive(Debug, Clone, PartialEq)]
pub struct HierarchyForest<'a> {
    pub levels: Vec<Level>,
    pub roots: Vec<HierarchyNode<'a>>,
}

impl<'a> HierarchyForest<'a> {
    /// Every leaf bucket with its key path, in first-seen order
    pub fn leaves(&self) -> Vec<(Vec<&GroupKey>, &[&'a WineRecord])> {
        let mut out = Vec::new();
        let mut path = Vec::with_capacity(self.levels.len());
        for root in &self.roots {
            root.collect_leaves(&mut path, &mut out);
        }
        out
    }

    pub fn wine_count(&self) -> usize {
        self.leaves().iter().map(|(_, wines)| wines.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }
}

/// Key path of `wine` through the levels `build` uses
pub fn key_path(wine: &WineRecord, include_color: bool) -> Vec<GroupKey> {
    levels(include_color).iter().map(|level| level.key_of(wine)).collect()
}

fn levels(include_color: bool) -> &'static [Level] {
    if include_color {
        FULL_LEVELS
    } else {
        &FULL_LEVELS[1..]
    }
}

pub fn build<'a, I>(wines: I, include_color: bool) -> HierarchyForest<'a>
where
    I: IntoIterator<Item = &'a WineRecord>,
{
    let levels = levels(include_color);
    let mut root = HierarchyNode::new(GroupKey::None);

    for wine in wines {
        let mut node = &mut root;
        for level in levels {
            node = node.child_mut(level.key_of(wine));
        }
        node.wines.push(wine);
    }

    root.sort_leaves();

    HierarchyForest {
        levels: levels.to_vec(),
        roots: root.children,
    }
}

//! Prestige ordering for countries, regions, subregions and crus
//!
//! Each table gives a rank equal to the entry's position. Values missing from
//! a table share [`UNKNOWN_RANK`] and fall back to case-insensitive
//! alphabetical order among themselves. An absent value (`None`) ranks
//! [`NONE_RANK`], after everything else.

use once_cell::sync::Lazy;
use std::cmp::Ordering;
use std::collections::HashMap;

/// Rank shared by values that no table lists
pub const UNKNOWN_RANK: i32 = 1000;

/// Rank of an absent value at levels where absence is possible
pub const NONE_RANK: i32 = 9999;

/// France precedes every country in the international table
pub const FRANCE_RANK: i32 = -1;

/// Rank for subregions of regions without a dedicated table
pub const UNRANKED_SUBREGION: i32 = 0;

const SECTION_COLORS: &[&str] = &["Red", "White", "Rosé", "Orange", "Sparkling"];

const INTERNATIONAL_COUNTRIES: &[&str] = &[
    "Italy",
    "Spain",
    "Germany",
    "Portugal",
    "USA",
    "Australia",
    "New Zealand",
    "Argentina",
    "Chile",
    "South Africa",
    "Austria",
];

const FRENCH_REGIONS: &[&str] = &[
    "Burgundy",
    "Bordeaux",
    "Rhône Valley",
    "Loire Valley",
    "Alsace",
    "Beaujolais",
    "Provence",
    "Languedoc-Roussillon",
    "Languedoc",
    "Jura",
    "Savoie",
    "Sud-Ouest",
];

const BURGUNDY_SUBREGIONS: &[&str] = &[
    "Côte de Nuits",
    "Côte de Beaune",
    "Chablis",
    "Côte Chalonnaise",
    "Mâconnais",
];

const BORDEAUX_SUBREGIONS: &[&str] = &[
    "Left Bank",
    "Médoc",
    "Haut-Médoc",
    "Margaux",
    "Saint-Julien",
    "Pauillac",
    "Saint-Estèphe",
    "Pessac-Léognan",
    "Graves",
    "Right Bank",
    "Saint-Émilion",
    "Pomerol",
    "Fronsac",
    "Côtes de Bordeaux",
    "Entre-Deux-Mers",
    "Sauternes",
    "Barsac",
];

const CRU_TIERS: &[&str] = &[
    // Burgundy
    "Grand Cru",
    "Premier Cru",
    "1er Cru",
    "Village",
    "Régional",
    // Bordeaux: Saint-Émilion
    "Premier Grand Cru Classé A",
    "Premier Grand Cru Classé B",
    "Premier Grand Cru Classé",
    "Grand Cru Classé",
    // Bordeaux: 1855 classification
    "Premier Cru Classé",
    "Premier Cru Supérieur",
    "Deuxième Cru Classé",
    "Troisième Cru Classé",
    "Quatrième Cru Classé",
    "Cinquième Cru Classé",
    "Cru Classé",
    // Bordeaux: Cru Bourgeois
    "Cru Bourgeois Exceptionnel",
    "Cru Bourgeois Supérieur",
    "Cru Bourgeois",
    // Alsace
    "Alsace Grand Cru",
    // Beaujolais
    "Beaujolais Cru",
    "Beaujolais-Villages",
    // Champagne
    "Grand Cru Champagne",
    "Premier Cru Champagne",
    "Autre Cru",
    // Quality tiers
    "AOC",
    "AOP",
    "IGP",
    "Vin de Pays",
    "Vin de France",
];

/// Build a key → rank map where rank is the first position of the key
fn rank_table(entries: &'static [&'static str]) -> HashMap<&'static str, i32> {
    let mut table = HashMap::with_capacity(entries.len());
    for (position, entry) in entries.iter().enumerate() {
        table.entry(*entry).or_insert(position as i32);
    }
    table
}

static COLOR_RANKS: Lazy<HashMap<&'static str, i32>> = Lazy::new(|| rank_table(SECTION_COLORS));
static COUNTRY_RANKS: Lazy<HashMap<&'static str, i32>> =
    Lazy::new(|| rank_table(INTERNATIONAL_COUNTRIES));
static FRENCH_REGION_RANKS: Lazy<HashMap<&'static str, i32>> =
    Lazy::new(|| rank_table(FRENCH_REGIONS));
static BURGUNDY_SUBREGION_RANKS: Lazy<HashMap<&'static str, i32>> =
    Lazy::new(|| rank_table(BURGUNDY_SUBREGIONS));
static BORDEAUX_SUBREGION_RANKS: Lazy<HashMap<&'static str, i32>> =
    Lazy::new(|| rank_table(BORDEAUX_SUBREGIONS));
static CRU_RANKS: Lazy<HashMap<&'static str, i32>> = Lazy::new(|| rank_table(CRU_TIERS));

pub fn color_rank(color: Option<&str>) -> i32 {
    match color {
        None => NONE_RANK,
        Some(color) => COLOR_RANKS.get(color).copied().unwrap_or(UNKNOWN_RANK),
    }
}

/// Section colors in prestige order
///
/// Unlisted colors compare equal to each other; with a stable sort they keep
/// the order in which they were first seen.
pub fn compare_colors(a: Option<&str>, b: Option<&str>) -> Ordering {
    color_rank(a).cmp(&color_rank(b))
}

pub fn country_rank(country: &str) -> i32 {
    if country == "France" {
        return FRANCE_RANK;
    }
    COUNTRY_RANKS.get(country).copied().unwrap_or(UNKNOWN_RANK)
}

/// Rank of a French region; callers only consult this under France
pub fn french_region_rank(region: &str) -> i32 {
    FRENCH_REGION_RANKS.get(region).copied().unwrap_or(UNKNOWN_RANK)
}

pub fn subregion_rank(region: &str, subregion: Option<&str>) -> i32 {
    let Some(subregion) = subregion else {
        return NONE_RANK;
    };
    let table = match region {
        "Burgundy" => &*BURGUNDY_SUBREGION_RANKS,
        "Bordeaux" => &*BORDEAUX_SUBREGION_RANKS,
        _ => return UNRANKED_SUBREGION,
    };
    table.get(subregion).copied().unwrap_or(UNKNOWN_RANK)
}

pub fn cru_rank(cru: Option<&str>) -> i32 {
    match cru {
        None => NONE_RANK,
        Some(cru) => CRU_RANKS.get(cru).copied().unwrap_or(UNKNOWN_RANK),
    }
}

/// Case-insensitive alphabetical order, exact comparison breaking ties
pub fn compare_alpha(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

/// Rank first, then alphabetical; `None` after every value
fn compare_ranked(a: Option<&str>, b: Option<&str>, rank: impl Fn(Option<&str>) -> i32) -> Ordering {
    rank(a).cmp(&rank(b)).then_with(|| match (a, b) {
        (Some(a), Some(b)) => compare_alpha(a, b),
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
    })
}

pub fn compare_countries(a: &str, b: &str) -> Ordering {
    compare_ranked(Some(a), Some(b), |c| c.map_or(NONE_RANK, country_rank))
}

/// Regions under `country`; only French regions have a prestige table
pub fn compare_regions(country: &str, a: &str, b: &str) -> Ordering {
    if country == "France" {
        compare_ranked(Some(a), Some(b), |r| r.map_or(NONE_RANK, french_region_rank))
    } else {
        compare_alpha(a, b)
    }
}

pub fn compare_subregions(region: &str, a: Option<&str>, b: Option<&str>) -> Ordering {
    compare_ranked(a, b, |s| subregion_rank(region, s))
}

/// Communes have no prestige table
pub fn compare_communes(a: Option<&str>, b: Option<&str>) -> Ordering {
    compare_ranked(a, b, |c| if c.is_some() { 0 } else { NONE_RANK })
}

pub fn compare_crus(a: Option<&str>, b: Option<&str>) -> Ordering {
    compare_ranked(a, b, cru_rank)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_prestige_then_first_seen() {
        // Unlisted colors arrive in reverse alphabetical order
        let mut colors = vec![
            Some("Tawny"),
            None,
            Some("Sparkling"),
            Some("Red"),
            Some("Amber"),
            Some("Rosé"),
            Some("White"),
        ];
        colors.sort_by(|a, b| compare_colors(*a, *b));
        assert_eq!(
            colors,
            vec![
                Some("Red"),
                Some("White"),
                Some("Rosé"),
                Some("Sparkling"),
                Some("Tawny"),
                Some("Amber"),
                None,
            ]
        );
    }

    #[test]
    fn test_france_first() {
        assert_eq!(country_rank("France"), FRANCE_RANK);
        assert!(country_rank("France") < country_rank("Italy"));
        assert_eq!(compare_countries("France", "Argentina"), Ordering::Less);
    }

    #[test]
    fn test_international_table_order() {
        assert_eq!(country_rank("Italy"), 0);
        assert_eq!(country_rank("Austria"), 10);
        assert_eq!(compare_countries("Spain", "Italy"), Ordering::Greater);
        assert_eq!(compare_countries("Chile", "USA"), Ordering::Greater);
    }

    #[test]
    fn test_unknown_countries_sort_alphabetically_after_known() {
        assert_eq!(country_rank("Lebanon"), UNKNOWN_RANK);
        assert_eq!(compare_countries("Austria", "Georgia"), Ordering::Less);
        assert_eq!(compare_countries("Lebanon", "Georgia"), Ordering::Greater);
        assert_eq!(compare_countries("Other", "Hungary"), Ordering::Greater);
    }

    #[test]
    fn test_french_regions() {
        assert_eq!(french_region_rank("Burgundy"), 0);
        assert_eq!(french_region_rank("Sud-Ouest"), 11);
        assert_eq!(french_region_rank("Champagne"), UNKNOWN_RANK);
        assert_eq!(compare_regions("France", "Bordeaux", "Burgundy"), Ordering::Greater);
        assert_eq!(compare_regions("France", "Alsace", "Corsica"), Ordering::Less);
    }

    #[test]
    fn test_non_french_regions_are_alphabetical() {
        assert_eq!(compare_regions("Italy", "Tuscany", "Piedmont"), Ordering::Greater);
        assert_eq!(compare_regions("Italy", "piedmont", "Tuscany"), Ordering::Less);
    }

    #[test]
    fn test_subregion_tables() {
        assert_eq!(subregion_rank("Burgundy", None), NONE_RANK);
        assert_eq!(subregion_rank("Burgundy", Some("Côte de Nuits")), 0);
        assert_eq!(subregion_rank("Bordeaux", Some("Pauillac")), 5);
        assert_eq!(subregion_rank("Bordeaux", Some("Blaye")), UNKNOWN_RANK);
        assert_eq!(subregion_rank("Rhône Valley", Some("Hermitage")), UNRANKED_SUBREGION);
    }

    #[test]
    fn test_cote_de_nuits_before_chablis() {
        assert_eq!(
            compare_subregions("Burgundy", Some("Côte de Nuits"), Some("Chablis")),
            Ordering::Less
        );
    }

    #[test]
    fn test_unranked_subregions_alphabetical() {
        assert_eq!(
            compare_subregions("Rhône Valley", Some("Northern Rhône"), Some("Southern Rhône")),
            Ordering::Less
        );
    }

    #[test]
    fn test_none_sorts_last_everywhere() {
        assert_eq!(compare_subregions("Burgundy", None, Some("Unlisted")), Ordering::Greater);
        assert_eq!(compare_subregions("Rhône Valley", None, Some("Zzz")), Ordering::Greater);
        assert_eq!(compare_communes(None, Some("Zonnebloem")), Ordering::Greater);
        assert_eq!(compare_crus(None, Some("Mystery Tier")), Ordering::Greater);
        assert_eq!(compare_crus(None, None), Ordering::Equal);
    }

    #[test]
    fn test_cru_prestige() {
        assert_eq!(cru_rank(Some("Grand Cru")), 0);
        assert_eq!(compare_crus(Some("Grand Cru"), Some("Premier Cru")), Ordering::Less);
        assert_eq!(
            compare_crus(Some("Premier Cru Classé"), Some("Cru Bourgeois")),
            Ordering::Less
        );
        assert_eq!(compare_crus(Some("Vin de France"), Some("IGP")), Ordering::Greater);
        assert_eq!(cru_rank(Some("Hors Classe")), UNKNOWN_RANK);
    }

    #[test]
    fn test_compare_alpha_case_insensitive_and_total() {
        assert_eq!(compare_alpha("alsace", "Bordeaux"), Ordering::Less);
        assert_ne!(compare_alpha("Pomerol", "pomerol"), Ordering::Equal);
        assert_eq!(compare_alpha("Pomerol", "Pomerol"), Ordering::Equal);
    }

    #[test]
    fn test_resorting_is_noop() {
        let mut crus = vec![None, Some("IGP"), Some("Grand Cru"), Some("zeta"), Some("Alpha")];
        crus.sort_by(|a, b| compare_crus(*a, *b));
        let once = crus.clone();
        crus.sort_by(|a, b| compare_crus(*a, *b));
        assert_eq!(crus, once);
        assert_eq!(once, vec![Some("Grand Cru"), Some("IGP"), Some("Alpha"), Some("zeta"), None]);
    }
}

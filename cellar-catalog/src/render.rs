//! Depth-first traversal of a hierarchy into render blocks
//!
//! A [`TraversalPlan`] holds one [`LevelSpec`] per hierarchy level: which
//! block a header becomes, how siblings are ordered and when the header is
//! printed. The same recursive visitor serves the color-keyed Regular forest
//! and the flat Champagne and Dessert forests.

use cellar_common::WineRecord;
use std::cmp::Ordering;

use crate::hierarchy::{field_value, GroupKey, HierarchyForest, HierarchyNode, Level};
use crate::layout::{BlockLevel, PageLayout, RenderBlock};
use crate::ordering;

/// Label printed for a section whose color is absent
pub const UNNAMED_SECTION: &str = "Other";

/// Keys of the enclosing nodes that level comparators depend on
#[derive(Debug, Clone, Copy, Default)]
pub struct Ancestors<'k> {
    pub country: Option<&'k str>,
    pub region: Option<&'k str>,
}

impl<'k> Ancestors<'k> {
    fn descend(self, level: Level, key: &'k GroupKey) -> Self {
        match level {
            Level::Country => Self {
                country: key.as_str(),
                ..self
            },
            Level::Region => Self {
                region: key.as_str(),
                ..self
            },
            _ => self,
        }
    }
}

/// Orders two sibling keys given their ancestors
pub type KeyComparator = fn(&Ancestors<'_>, &GroupKey, &GroupKey) -> Ordering;

/// When a level's header block is printed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderRule {
    Always,
    /// Only for real values, never for the `NONE` bucket
    WhenPresent,
    /// Suppressed when this value is the only sibling
    UnlessOnly(&'static str),
}

impl HeaderRule {
    fn shows(self, key: &GroupKey, sibling_count: usize) -> bool {
        match self {
            HeaderRule::Always => true,
            HeaderRule::WhenPresent => !key.is_none(),
            HeaderRule::UnlessOnly(value) => !(sibling_count == 1 && key.as_str() == Some(value)),
        }
    }
}

#[derive(Clone, Copy)]
pub struct LevelSpec {
    pub level: Level,
    pub block: BlockLevel,
    pub compare: KeyComparator,
    pub header: HeaderRule,
}

fn compare_color_keys(_: &Ancestors<'_>, a: &GroupKey, b: &GroupKey) -> Ordering {
    ordering::compare_colors(a.as_str(), b.as_str())
}

fn compare_country_keys(_: &Ancestors<'_>, a: &GroupKey, b: &GroupKey) -> Ordering {
    ordering::compare_countries(a.as_str().unwrap_or_default(), b.as_str().unwrap_or_default())
}

fn compare_region_keys(ancestors: &Ancestors<'_>, a: &GroupKey, b: &GroupKey) -> Ordering {
    ordering::compare_regions(
        ancestors.country.unwrap_or(""),
        a.as_str().unwrap_or_default(),
        b.as_str().unwrap_or_default(),
    )
}

fn compare_subregion_keys(ancestors: &Ancestors<'_>, a: &GroupKey, b: &GroupKey) -> Ordering {
    ordering::compare_subregions(ancestors.region.unwrap_or(""), a.as_str(), b.as_str())
}

fn compare_commune_keys(_: &Ancestors<'_>, a: &GroupKey, b: &GroupKey) -> Ordering {
    ordering::compare_communes(a.as_str(), b.as_str())
}

fn compare_cru_keys(_: &Ancestors<'_>, a: &GroupKey, b: &GroupKey) -> Ordering {
    ordering::compare_crus(a.as_str(), b.as_str())
}

impl LevelSpec {
    fn new(level: Level, block: BlockLevel, compare: KeyComparator, header: HeaderRule) -> Self {
        Self {
            level,
            block,
            compare,
            header,
        }
    }

    /// Default spec for a level; colors become section headers
    pub fn for_level(level: Level) -> Self {
        use HeaderRule::{Always, WhenPresent};
        match level {
            Level::Color => Self::new(level, BlockLevel::Section, compare_color_keys, Always),
            Level::Country => Self::new(level, BlockLevel::Country, compare_country_keys, Always),
            Level::Region => Self::new(level, BlockLevel::Region, compare_region_keys, WhenPresent),
            Level::Subregion => {
                Self::new(level, BlockLevel::Subregion, compare_subregion_keys, WhenPresent)
            }
            Level::Commune => {
                Self::new(level, BlockLevel::Commune, compare_commune_keys, WhenPresent)
            }
            Level::Cru => Self::new(level, BlockLevel::Cru, compare_cru_keys, WhenPresent),
        }
    }
}

/// One spec per forest level, outermost first
#[derive(Clone)]
pub struct TraversalPlan {
    pub specs: Vec<LevelSpec>,
}

impl TraversalPlan {
    pub fn for_forest(forest: &HierarchyForest<'_>) -> Self {
        Self {
            specs: forest.levels.iter().map(|level| LevelSpec::for_level(*level)).collect(),
        }
    }

    /// Replace the header rule at `level`, if the plan has that level
    pub fn with_header(mut self, level: Level, header: HeaderRule) -> Self {
        for spec in &mut self.specs {
            if spec.level == level {
                spec.header = header;
            }
        }
        self
    }
}

/// Wine line formatting options
#[derive(Debug, Clone)]
pub struct LineStyle {
    /// Bottle size left off wine lines
    pub default_bottle_size: String,
}

impl Default for LineStyle {
    fn default() -> Self {
        Self {
            default_bottle_size: "750ml".to_string(),
        }
    }
}

impl LineStyle {
    fn is_default_size(&self, size: &str) -> bool {
        normalize_size(size) == normalize_size(&self.default_bottle_size)
    }
}

fn normalize_size(size: &str) -> String {
    size.chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

/// Condensed wine line: vintage, producer, appellation, "vineyard", cru
/// (unless already a header above this wine), non-default bottle size
pub fn format_wine_line(wine: &WineRecord, cru_in_header: bool, style: &LineStyle) -> String {
    let mut parts: Vec<String> = Vec::with_capacity(6);

    parts.push(match wine.vintage {
        Some(vintage) => vintage.to_string(),
        None => "NV".to_string(),
    });
    if let Some(producer) = present(&wine.producer) {
        parts.push(producer.to_string());
    }
    if let Some(appellation) = present(&wine.appellation) {
        parts.push(appellation.to_string());
    }
    if let Some(vineyard) = present(&wine.vineyard) {
        parts.push(format!("\"{}\"", vineyard));
    }
    if !cru_in_header {
        if let Some(cru) = present(&wine.cru) {
            parts.push(cru.to_string());
        }
    }
    if let Some(size) = present(&wine.size) {
        if !style.is_default_size(size) {
            parts.push(format!("({})", size));
        }
    }

    parts.join(" ")
}

fn present(field: &Option<String>) -> Option<&str> {
    field_value(field.as_deref())
}

/// Walks a forest according to a plan and emits blocks in reading order
pub struct Renderer<'r> {
    layout: &'r PageLayout,
    style: &'r LineStyle,
}

impl<'r> Renderer<'r> {
    pub fn new(layout: &'r PageLayout, style: &'r LineStyle) -> Self {
        Self { layout, style }
    }

    pub fn render(&self, forest: &HierarchyForest<'_>, plan: &TraversalPlan) -> Vec<RenderBlock> {
        let mut out = Vec::new();
        self.visit(&forest.roots, plan, 0, Ancestors::default(), &mut out);
        out
    }

    fn visit<'k>(
        &self,
        nodes: &'k [HierarchyNode<'_>],
        plan: &TraversalPlan,
        depth: usize,
        ancestors: Ancestors<'k>,
        out: &mut Vec<RenderBlock>,
    ) {
        let Some(spec) = plan.specs.get(depth) else {
            return;
        };

        let mut siblings: Vec<&HierarchyNode<'_>> = nodes.iter().collect();
        siblings.sort_by(|a, b| (spec.compare)(&ancestors, &a.key, &b.key));
        let sibling_count = siblings.len();
        let is_last_level = depth + 1 == plan.specs.len();

        for node in siblings {
            let shown = spec.header.shows(&node.key, sibling_count);
            if shown {
                let text = match node.key.as_str() {
                    Some(value) => value,
                    None => UNNAMED_SECTION,
                };
                out.push(self.layout.block(spec.block, text));
            }

            if is_last_level {
                let cru_in_header = spec.level == Level::Cru && shown;
                for wine in &node.wines {
                    let line = format_wine_line(wine, cru_in_header, self.style);
                    out.push(self.layout.block(BlockLevel::WineLine, line));
                }
            } else {
                let next = ancestors.descend(spec.level, &node.key);
                self.visit(&node.children, plan, depth + 1, next, out);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hierarchy::build;

    fn texts(blocks: &[RenderBlock]) -> Vec<(BlockLevel, &str)> {
        blocks.iter().map(|b| (b.level, b.text.as_str())).collect()
    }

    fn render_with(
        wines: &[WineRecord],
        include_color: bool,
        plan_edit: impl Fn(TraversalPlan) -> TraversalPlan,
    ) -> Vec<RenderBlock> {
        let layout = PageLayout::default();
        let style = LineStyle::default();
        let forest = build(wines, include_color);
        let plan = plan_edit(TraversalPlan::for_forest(&forest));
        Renderer::new(&layout, &style).render(&forest, &plan)
    }

    #[test]
    fn test_wine_line_full() {
        let wine = WineRecord::new()
            .with_vintage(2016)
            .with_producer("Domaine Dujac")
            .with_appellation("Clos de la Roche")
            .with_vineyard("Vieilles Vignes")
            .with_cru("Grand Cru")
            .with_size("1.5L");
        let style = LineStyle::default();

        assert_eq!(
            format_wine_line(&wine, false, &style),
            "2016 Domaine Dujac Clos de la Roche \"Vieilles Vignes\" Grand Cru (1.5L)"
        );
        assert_eq!(
            format_wine_line(&wine, true, &style),
            "2016 Domaine Dujac Clos de la Roche \"Vieilles Vignes\" (1.5L)"
        );
    }

    #[test]
    fn test_wine_line_hides_default_size_and_marks_nv() {
        let wine = WineRecord::new().with_producer("Krug").with_size("750 ML");
        assert_eq!(format_wine_line(&wine, false, &LineStyle::default()), "NV Krug");
    }

    #[test]
    fn test_regular_traversal_headers() {
        let wines = vec![WineRecord::new()
            .with_color("Red")
            .with_region("Burgundy")
            .with_subregion("Côte de Nuits")
            .with_commune("Chambolle-Musigny")
            .with_cru("Premier Cru")
            .with_vintage(2017)
            .with_producer("Roumier")];

        let blocks = render_with(&wines, true, |plan| plan);
        assert_eq!(
            texts(&blocks),
            vec![
                (BlockLevel::Section, "Red"),
                (BlockLevel::Country, "France"),
                (BlockLevel::Region, "Burgundy"),
                (BlockLevel::Subregion, "Côte de Nuits"),
                (BlockLevel::Commune, "Chambolle-Musigny"),
                (BlockLevel::Cru, "Premier Cru"),
                (BlockLevel::WineLine, "2017 Roumier"),
            ]
        );
    }

    #[test]
    fn test_none_levels_have_no_header() {
        let wines = vec![WineRecord::new()
            .with_color("White")
            .with_region("Mosel")
            .with_vintage(2019)
            .with_producer("Egon Müller")];

        let blocks = render_with(&wines, true, |plan| plan);
        assert_eq!(
            texts(&blocks),
            vec![
                (BlockLevel::Section, "White"),
                (BlockLevel::Country, "Germany"),
                (BlockLevel::Region, "Mosel"),
                (BlockLevel::WineLine, "2019 Egon Müller"),
            ]
        );
    }

    #[test]
    fn test_subregion_prestige_order() {
        let wines = vec![
            WineRecord::new().with_color("Red").with_region("Burgundy").with_subregion("Chablis"),
            WineRecord::new().with_color("Red").with_region("Burgundy").with_subregion("Côte de Nuits"),
            WineRecord::new().with_color("Red").with_region("Burgundy"),
        ];

        let blocks = render_with(&wines, true, |plan| plan);
        let subregions: Vec<_> = blocks
            .iter()
            .filter(|b| b.level == BlockLevel::Subregion)
            .map(|b| b.text.as_str())
            .collect();
        assert_eq!(subregions, vec!["Côte de Nuits", "Chablis"]);
        // NONE bucket's wine comes last
        assert_eq!(blocks.last().map(|b| b.level), Some(BlockLevel::WineLine));
        let last_header = blocks.iter().rev().find(|b| b.level != BlockLevel::WineLine).unwrap();
        assert_eq!(last_header.text, "Chablis");
    }

    #[test]
    fn test_unless_only_suppresses_sole_france() {
        let wines = vec![WineRecord::new().with_region("Champagne").with_producer("Krug")];
        let blocks = render_with(&wines, false, |plan| {
            plan.with_header(Level::Country, HeaderRule::UnlessOnly("France"))
        });
        assert_eq!(
            texts(&blocks),
            vec![(BlockLevel::Region, "Champagne"), (BlockLevel::WineLine, "NV Krug")]
        );
    }

    #[test]
    fn test_unless_only_keeps_multiple_countries() {
        let wines = vec![
            WineRecord::new().with_region("Champagne"),
            WineRecord::new().with_region("Marlborough"),
        ];
        let blocks = render_with(&wines, false, |plan| {
            plan.with_header(Level::Country, HeaderRule::UnlessOnly("France"))
        });
        let countries: Vec<_> = blocks
            .iter()
            .filter(|b| b.level == BlockLevel::Country)
            .map(|b| b.text.as_str())
            .collect();
        assert_eq!(countries, vec!["France", "New Zealand"]);
    }

    #[test]
    fn test_missing_color_section_is_last_and_named() {
        let wines = vec![
            WineRecord::new().with_region("Rioja"),
            WineRecord::new().with_color("White").with_region("Rioja"),
        ];
        let blocks = render_with(&wines, true, |plan| plan);
        let sections: Vec<_> = blocks
            .iter()
            .filter(|b| b.level == BlockLevel::Section)
            .map(|b| b.text.as_str())
            .collect();
        assert_eq!(sections, vec!["White", UNNAMED_SECTION]);
    }

    #[test]
    fn test_render_is_deterministic() {
        let wines = vec![
            WineRecord::new().with_color("Red").with_region("Tuscany"),
            WineRecord::new().with_color("Red").with_region("Piedmont"),
            WineRecord::new().with_color("Orange").with_region("Jura"),
        ];
        let first = render_with(&wines, true, |plan| plan);
        let second = render_with(&wines, true, |plan| plan);
        assert_eq!(first, second);
    }
}

//! Catalog composition: classify, group, render, paginate, number
//!
//! Section order is fixed: Champagne, then one section per Regular color in
//! prestige order, then Dessert. Empty sections are left out; an empty cellar
//! still yields a one-page document holding the title and date.

use cellar_common::config::CatalogConfig;
use cellar_common::{Result, WineRecord};
use chrono::NaiveDate;
use tracing::{debug, info};

use crate::classifier::classify;
use crate::document::Document;
use crate::hierarchy::{build, Level};
use crate::layout::{paginate, BlockLevel, PageLayout, RenderBlock};
use crate::pagination::number_pages;
use crate::render::{HeaderRule, LineStyle, Renderer, TraversalPlan};

/// Section title for wines from the Champagne region
pub const CHAMPAGNE_SECTION: &str = "Champagne";

/// Section title for dessert wines
pub const DESSERT_SECTION: &str = "Dessert";

pub const DEFAULT_TITLE: &str = "Wine List";

/// Turns a wine collection into a paginated [`Document`]
#[derive(Debug, Clone)]
pub struct CatalogComposer {
    layout: PageLayout,
    title: String,
    style: LineStyle,
}

impl Default for CatalogComposer {
    fn default() -> Self {
        // The default A4 geometry always validates
        Self {
            layout: PageLayout::default(),
            title: DEFAULT_TITLE.to_string(),
            style: LineStyle::default(),
        }
    }
}

impl CatalogComposer {
    /// Rejects geometry where some block could never fit on a page
    pub fn new(layout: PageLayout, title: impl Into<String>, style: LineStyle) -> Result<Self> {
        layout.validate()?;
        Ok(Self {
            layout,
            title: title.into(),
            style,
        })
    }

    /// Build from the `[catalog]` config table
    pub fn from_config(config: &CatalogConfig) -> Result<Self> {
        Self::new(
            PageLayout::new(&config.page, &config.heights),
            config.title.clone(),
            LineStyle {
                default_bottle_size: config.default_bottle_size.clone(),
            },
        )
    }

    pub fn layout(&self) -> &PageLayout {
        &self.layout
    }

    /// Ordered block stream for the whole catalog, title block first
    pub fn render_blocks(&self, wines: &[WineRecord], generated_on: NaiveDate) -> Vec<RenderBlock> {
        let renderer = Renderer::new(&self.layout, &self.style);
        let mut blocks = vec![
            self.layout.block(BlockLevel::Title, self.title.as_str()),
            self.layout.block(
                BlockLevel::Date,
                format!("Generated {}", generated_on.format("%Y-%m-%d")),
            ),
        ];

        let classified = classify(wines);
        debug!(
            "Classified {} wines: {} champagne, {} regular, {} dessert",
            classified.len(),
            classified.champagne.len(),
            classified.regular.len(),
            classified.dessert.len()
        );

        if !classified.champagne.is_empty() {
            let forest = build(classified.champagne.iter().copied(), false);
            let plan = TraversalPlan::for_forest(&forest)
                .with_header(Level::Country, HeaderRule::UnlessOnly("France"));
            blocks.push(self.layout.block(BlockLevel::Section, CHAMPAGNE_SECTION));
            blocks.extend(renderer.render(&forest, &plan));
        }

        if !classified.regular.is_empty() {
            // Color is the top level here, so each color renders as a section
            let forest = build(classified.regular.iter().copied(), true);
            let plan = TraversalPlan::for_forest(&forest);
            blocks.extend(renderer.render(&forest, &plan));
        }

        if !classified.dessert.is_empty() {
            let forest = build(classified.dessert.iter().copied(), false);
            let plan = TraversalPlan::for_forest(&forest);
            blocks.push(self.layout.block(BlockLevel::Section, DESSERT_SECTION));
            blocks.extend(renderer.render(&forest, &plan));
        }

        blocks
    }

    pub fn compose(&self, wines: &[WineRecord], generated_on: NaiveDate) -> Document {
        let blocks = self.render_blocks(wines, generated_on);
        let sections: Vec<String> = blocks
            .iter()
            .filter(|block| block.level == BlockLevel::Section)
            .map(|block| block.text.clone())
            .collect();

        let pages = number_pages(paginate(blocks, self.layout));
        info!(
            "Composed catalog: {} wines, {} section(s), {} page(s)",
            wines.len(),
            sections.len(),
            pages.len()
        );

        Document {
            title: self.title.clone(),
            generated_on,
            sections,
            page_count: pages.len(),
            pages,
        }
    }
}

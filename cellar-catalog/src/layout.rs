//! Vertical layout of render blocks onto fixed-height pages
//!
//! Blocks are placed top to bottom. Before placing a block the cursor checks
//! whether it still fits above the bottom margin; if not, the current page
//! is closed and the block opens the next page. A block is never split.
//!
//! Hierarchy headers are kept with the run of headers below them and the
//! first wine line that follows, so a page never ends on a dangling header.

use cellar_common::config::{BlockHeights, PageSettings};
use cellar_common::{Error, Result};
use serde::Serialize;
use tracing::debug;

/// Kind of block, from document title down to a single wine line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockLevel {
    Title,
    Date,
    Section,
    Country,
    Region,
    Subregion,
    Commune,
    Cru,
    WineLine,
}

impl BlockLevel {
    /// Section through cru headers; title and date are not kept with content
    pub fn is_header(self) -> bool {
        !matches!(self, BlockLevel::Title | BlockLevel::Date | BlockLevel::WineLine)
    }
}

/// One unbreakable line of output with its reserved height
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderBlock {
    pub text: String,
    pub level: BlockLevel,
    pub height: f64,
}

/// Page geometry plus the height of every block level
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageLayout {
    pub page_height: f64,
    pub top_margin: f64,
    pub bottom_margin: f64,
    pub heights: BlockHeights,
}

impl Default for PageLayout {
    fn default() -> Self {
        Self::new(&PageSettings::default(), &BlockHeights::default())
    }
}

impl PageLayout {
    pub fn new(page: &PageSettings, heights: &BlockHeights) -> Self {
        Self {
            page_height: page.height,
            top_margin: page.top_margin,
            bottom_margin: page.bottom_margin,
            heights: *heights,
        }
    }

    /// Lowest y a block may reach
    pub fn printable_bottom(&self) -> f64 {
        self.page_height - self.bottom_margin
    }

    pub fn printable_height(&self) -> f64 {
        self.printable_bottom() - self.top_margin
    }

    pub fn height_of(&self, level: BlockLevel) -> f64 {
        let h = &self.heights;
        match level {
            BlockLevel::Title => h.title,
            BlockLevel::Date => h.date,
            BlockLevel::Section => h.section,
            BlockLevel::Country => h.country,
            BlockLevel::Region => h.region,
            BlockLevel::Subregion => h.subregion,
            BlockLevel::Commune => h.commune,
            BlockLevel::Cru => h.cru,
            BlockLevel::WineLine => h.wine_line,
        }
    }

    pub fn block(&self, level: BlockLevel, text: impl Into<String>) -> RenderBlock {
        RenderBlock {
            text: text.into(),
            level,
            height: self.height_of(level),
        }
    }

    /// Reject geometry where some block could never fit on an empty page
    pub fn validate(&self) -> Result<()> {
        if !(self.top_margin >= 0.0 && self.bottom_margin >= 0.0) {
            return Err(Error::Config("Page margins must be non-negative".to_string()));
        }
        let printable = self.printable_height();
        if !(printable > 0.0) {
            return Err(Error::Config(format!(
                "Page height {} leaves no printable area between margins {} and {}",
                self.page_height, self.top_margin, self.bottom_margin
            )));
        }
        let h = &self.heights;
        let all = [
            ("title", h.title),
            ("date", h.date),
            ("section", h.section),
            ("country", h.country),
            ("region", h.region),
            ("subregion", h.subregion),
            ("commune", h.commune),
            ("cru", h.cru),
            ("wine_line", h.wine_line),
        ];
        for (name, height) in all {
            if !(height > 0.0) {
                return Err(Error::Config(format!("Block height '{}' must be positive", name)));
            }
            if height > printable {
                return Err(Error::Config(format!(
                    "Block height '{}' ({}) exceeds printable page height ({})",
                    name, height, printable
                )));
            }
        }
        Ok(())
    }
}

/// A block with the y it was placed at on its page
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlacedBlock {
    #[serde(flatten)]
    pub block: RenderBlock,
    pub y: f64,
}

/// A page produced by the layout pass, not yet numbered
#[derive(Debug, Clone, PartialEq)]
pub struct LaidOutPage {
    pub index: usize,
    pub blocks: Vec<PlacedBlock>,
}

/// Vertical position on the current page
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutCursor {
    pub y: f64,
    pub page_index: usize,
}

/// Consumes a block stream and cuts it into pages
#[derive(Debug)]
pub struct Paginator {
    layout: PageLayout,
    cursor: LayoutCursor,
    current: Vec<PlacedBlock>,
    pages: Vec<LaidOutPage>,
}

impl Paginator {
    pub fn new(layout: PageLayout) -> Self {
        Self {
            cursor: LayoutCursor {
                y: layout.top_margin,
                page_index: 0,
            },
            layout,
            current: Vec::new(),
            pages: Vec::new(),
        }
    }

    pub fn cursor(&self) -> LayoutCursor {
        self.cursor
    }

    pub fn place(&mut self, block: RenderBlock) {
        let overflows = self.cursor.y + block.height > self.layout.printable_bottom();
        // An empty page takes the block regardless, so oversized blocks cannot
        // produce an endless run of blank pages
        if overflows && !self.current.is_empty() {
            self.break_page();
        }
        let y = self.cursor.y;
        self.cursor.y += block.height;
        self.current.push(PlacedBlock { block, y });
    }

    /// Open a new page unless `height` more still fits on this one
    ///
    /// A group taller than a whole page is left to break naturally.
    pub fn keep_together(&mut self, height: f64) {
        let overflows = self.cursor.y + height > self.layout.printable_bottom();
        if overflows && !self.current.is_empty() && height <= self.layout.printable_height() {
            self.break_page();
        }
    }

    fn break_page(&mut self) {
        debug!(
            "Page {} closed with {} blocks",
            self.cursor.page_index + 1,
            self.current.len()
        );
        self.pages.push(LaidOutPage {
            index: self.cursor.page_index,
            blocks: std::mem::take(&mut self.current),
        });
        self.cursor.page_index += 1;
        self.cursor.y = self.layout.top_margin;
    }

    /// Close the last page; an empty stream yields no pages
    pub fn finish(mut self) -> Vec<LaidOutPage> {
        if !self.current.is_empty() {
            self.break_page();
        }
        self.pages
    }
}

/// Height each header must keep together: itself, the headers below it
/// and the first non-header block after them
fn keep_heights(blocks: &[RenderBlock]) -> Vec<Option<f64>> {
    let mut heights = vec![None; blocks.len()];
    let mut below = 0.0;
    for (i, block) in blocks.iter().enumerate().rev() {
        if block.level.is_header() {
            below += block.height;
            heights[i] = Some(below);
        } else {
            below = block.height;
        }
    }
    heights
}

pub fn paginate(blocks: impl IntoIterator<Item = RenderBlock>, layout: PageLayout) -> Vec<LaidOutPage> {
    let blocks: Vec<RenderBlock> = blocks.into_iter().collect();
    let keep = keep_heights(&blocks);

    let mut paginator = Paginator::new(layout);
    for (block, keep) in blocks.into_iter().zip(keep) {
        if let Some(height) = keep {
            paginator.keep_together(height);
        }
        paginator.place(block);
    }
    paginator.finish()
}

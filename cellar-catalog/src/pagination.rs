//! Page numbering for laid-out pages
//!
//! Runs after layout: the total page count is only known once every block
//! has been placed, so numbering is a separate pass over finished pages.

use serde::Serialize;

use crate::layout::{LaidOutPage, PlacedBlock};

/// Position of one page within the document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageNumber {
    /// Current page number (1-indexed)
    pub page: usize,
    /// Total number of pages
    pub total_pages: usize,
}

impl PageNumber {
    /// Footer text, e.g. `page 2 / 5`
    pub fn label(&self) -> String {
        format!("page {} / {}", self.page, self.total_pages)
    }
}

/// A finished, numbered page
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page {
    pub number: PageNumber,
    pub blocks: Vec<PlacedBlock>,
    pub footer: String,
}

/// Stamp every page with its position out of the total
///
/// Pages are numbered by their position in `pages`.
///
/// # Examples
/// ```
/// use cellar_catalog::layout::LaidOutPage;
/// use cellar_catalog::pagination::number_pages;
///
/// let pages = number_pages(vec![
///     LaidOutPage { index: 0, blocks: Vec::new() },
///     LaidOutPage { index: 1, blocks: Vec::new() },
/// ]);
/// assert_eq!(pages[1].footer, "page 2 / 2");
/// ```
pub fn number_pages(pages: Vec<LaidOutPage>) -> Vec<Page> {
    let total_pages = pages.len();
    pages
        .into_iter()
        .enumerate()
        .map(|(position, laid_out)| {
            let number = PageNumber {
                page: position + 1,
                total_pages,
            };
            Page {
                footer: number.label(),
                number,
                blocks: laid_out.blocks,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn blank_pages(count: usize) -> Vec<LaidOutPage> {
        (0..count)
            .map(|index| LaidOutPage {
                index,
                blocks: Vec::new(),
            })
            .collect()
    }

    #[test]
    fn test_single_page() {
        let pages = number_pages(blank_pages(1));
        assert_eq!(pages.len(), 1);
        assert_eq!(pages[0].number, PageNumber { page: 1, total_pages: 1 });
        assert_eq!(pages[0].footer, "page 1 / 1");
    }

    #[test]
    fn test_numbers_match_positions() {
        let pages = number_pages(blank_pages(4));
        for (position, page) in pages.iter().enumerate() {
            assert_eq!(page.number.page, position + 1);
            assert_eq!(page.number.total_pages, 4);
            assert_eq!(page.footer, format!("page {} / 4", position + 1));
        }
    }

    #[test]
    fn test_empty() {
        assert!(number_pages(Vec::new()).is_empty());
    }
}

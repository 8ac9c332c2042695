//! The assembled wine list and its on-disk forms

use cellar_common::{Error, Result};
use chrono::NaiveDate;
use serde::Serialize;
use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::info;

use crate::layout::BlockLevel;
use crate::pagination::Page;

/// Filename prefix of every exported wine list
pub const FILE_STEM: &str = "wine-list";

/// A composed, paginated wine list
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Document {
    pub title: String,
    pub generated_on: NaiveDate,
    /// Section titles in print order
    pub sections: Vec<String>,
    pub page_count: usize,
    pub pages: Vec<Page>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Markdown,
    Json,
}

impl OutputFormat {
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Text => "txt",
            OutputFormat::Markdown => "md",
            OutputFormat::Json => "json",
        }
    }
}

impl FromStr for OutputFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "text" | "txt" => Ok(OutputFormat::Text),
            "markdown" | "md" => Ok(OutputFormat::Markdown),
            "json" => Ok(OutputFormat::Json),
            other => Err(Error::Config(format!("Unknown output format '{}'", other))),
        }
    }
}

/// `wine-list-<YYYY-MM-DD>.<ext>`
pub fn file_name(date: NaiveDate, format: OutputFormat) -> String {
    format!("{}-{}.{}", FILE_STEM, date.format("%Y-%m-%d"), format.extension())
}

fn indent(level: BlockLevel) -> usize {
    match level {
        BlockLevel::Title | BlockLevel::Date | BlockLevel::Section => 0,
        BlockLevel::Country => 2,
        BlockLevel::Region => 4,
        BlockLevel::Subregion => 6,
        BlockLevel::Commune => 8,
        BlockLevel::Cru => 10,
        BlockLevel::WineLine => 12,
    }
}

impl Document {
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Plain text; pages are separated by a form feed
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        for (i, page) in self.pages.iter().enumerate() {
            if i > 0 {
                out.push('\u{c}');
            }
            for placed in &page.blocks {
                let block = &placed.block;
                let text = match block.level {
                    BlockLevel::Section => block.text.to_uppercase(),
                    _ => block.text.clone(),
                };
                let _ = writeln!(out, "{:width$}{}", "", text, width = indent(block.level));
            }
            let _ = writeln!(out);
            let _ = writeln!(out, "{}", page.footer);
        }
        out
    }

    pub fn to_markdown(&self) -> String {
        let mut out = String::new();
        for page in &self.pages {
            for placed in &page.blocks {
                let text = &placed.block.text;
                let _ = match placed.block.level {
                    BlockLevel::Title => writeln!(out, "# {}\n", text),
                    BlockLevel::Date => writeln!(out, "_{}_\n", text),
                    BlockLevel::Section => writeln!(out, "## {}\n", text),
                    BlockLevel::Country => writeln!(out, "### {}\n", text),
                    BlockLevel::Region => writeln!(out, "#### {}\n", text),
                    BlockLevel::Subregion => writeln!(out, "##### {}\n", text),
                    BlockLevel::Commune => writeln!(out, "###### {}\n", text),
                    BlockLevel::Cru => writeln!(out, "**{}**\n", text),
                    BlockLevel::WineLine => writeln!(out, "- {}", text),
                };
            }
            let _ = writeln!(out, "\n*{}*\n\n---\n", page.footer);
        }
        out
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn render(&self, format: OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Text => Ok(self.to_text()),
            OutputFormat::Markdown => Ok(self.to_markdown()),
            OutputFormat::Json => self.to_json(),
        }
    }

    pub fn file_name(&self, format: OutputFormat) -> String {
        file_name(self.generated_on, format)
    }
}

/// Write the document into `dir` (created if missing); returns the file path
pub fn write_document(document: &Document, dir: &Path, format: OutputFormat) -> Result<PathBuf> {
    std::fs::create_dir_all(dir)?;
    let path = dir.join(document.file_name(format));
    std::fs::write(&path, document.render(format)?)?;
    info!(
        "Wrote {} page(s) to {}",
        document.page_count,
        path.display()
    );
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{PlacedBlock, RenderBlock};
    use crate::pagination::PageNumber;

    fn placed(level: BlockLevel, text: &str, y: f64) -> PlacedBlock {
        PlacedBlock {
            block: RenderBlock {
                text: text.to_string(),
                level,
                height: 10.0,
            },
            y,
        }
    }

    fn sample() -> Document {
        let page = |n: usize, blocks: Vec<PlacedBlock>| Page {
            number: PageNumber {
                page: n,
                total_pages: 2,
            },
            blocks,
            footer: format!("page {} / 2", n),
        };
        Document {
            title: "Wine List".to_string(),
            generated_on: NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
            sections: vec!["Red".to_string()],
            page_count: 2,
            pages: vec![
                page(
                    1,
                    vec![
                        placed(BlockLevel::Title, "Wine List", 56.0),
                        placed(BlockLevel::Section, "Red", 66.0),
                        placed(BlockLevel::Country, "France", 76.0),
                    ],
                ),
                page(2, vec![placed(BlockLevel::WineLine, "2010 Leroy", 56.0)]),
            ],
        }
    }

    #[test]
    fn test_file_name() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 7).unwrap();
        assert_eq!(file_name(date, OutputFormat::Text), "wine-list-2024-01-07.txt");
        assert_eq!(file_name(date, OutputFormat::Markdown), "wine-list-2024-01-07.md");
        assert_eq!(file_name(date, OutputFormat::Json), "wine-list-2024-01-07.json");
    }

    #[test]
    fn test_format_from_str() {
        assert_eq!("Markdown".parse::<OutputFormat>().unwrap(), OutputFormat::Markdown);
        assert_eq!("txt".parse::<OutputFormat>().unwrap(), OutputFormat::Text);
        assert!("pdf".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_text_layout() {
        let text = sample().to_text();
        let pages: Vec<&str> = text.split('\u{c}').collect();
        assert_eq!(pages.len(), 2);
        assert!(pages[0].starts_with("Wine List\nRED\n  France\n"));
        assert!(pages[0].trim_end().ends_with("page 1 / 2"));
        assert!(pages[1].starts_with("            2010 Leroy\n"));
        assert!(pages[1].trim_end().ends_with("page 2 / 2"));
    }

    #[test]
    fn test_markdown_layout() {
        let md = sample().to_markdown();
        assert!(md.starts_with("# Wine List\n"));
        assert!(md.contains("## Red\n"));
        assert!(md.contains("### France\n"));
        assert!(md.contains("- 2010 Leroy\n"));
        assert!(md.contains("*page 2 / 2*"));
    }

    #[test]
    fn test_json_layout() {
        let value: serde_json::Value = serde_json::from_str(&sample().to_json().unwrap()).unwrap();
        assert_eq!(value["generated_on"], "2024-05-01");
        assert_eq!(value["page_count"], 2);
        assert_eq!(value["pages"][1]["footer"], "page 2 / 2");
        assert_eq!(value["pages"][0]["blocks"][1]["level"], "section");
        assert_eq!(value["pages"][0]["blocks"][1]["text"], "Red");
    }

    #[test]
    fn test_write_document() {
        let dir = tempfile::TempDir::new().unwrap();
        let out_dir = dir.path().join("exports");

        let path = write_document(&sample(), &out_dir, OutputFormat::Markdown).unwrap();
        assert_eq!(path, out_dir.join("wine-list-2024-05-01.md"));
        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.starts_with("# Wine List"));
    }
}

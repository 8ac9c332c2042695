//! cellar-catalog library - printed wine list composition
//!
//! Pipeline, leaves first:
//! - [`classifier`]: Champagne / Dessert / Regular partition
//! - [`ordering`]: prestige ranks for colors, countries, regions, subregions and crus
//! - [`hierarchy`]: color → country → region → subregion → commune → cru grouping
//! - [`render`]: depth-first traversal into header and wine-line blocks
//! - [`layout`] and [`pagination`]: page breaking, then "page i / N" stamping
//! - [`composer`]: the three sections in order, assembled into a [`Document`]

pub mod classifier;
pub mod composer;
pub mod document;
pub mod hierarchy;
pub mod layout;
pub mod ordering;
pub mod pagination;
pub mod render;

pub use composer::CatalogComposer;
pub use document::{write_document, Document, OutputFormat};

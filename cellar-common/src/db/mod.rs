//! Database initialization and wine queries

pub mod init;
pub mod wines;

pub use init::*;
pub use wines::*;

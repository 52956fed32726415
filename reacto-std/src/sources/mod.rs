//! Plugin sources.
//!
//! - [`StaticSource`]: definitions assembled in code
//! - [`DirectorySource`]: TOML manifests on disk bound to compiled actions

pub mod directory;
pub mod memory;

pub use directory::{ActionCatalog, DirectorySource, MANIFEST_EXTENSION};
pub use memory::StaticSource;

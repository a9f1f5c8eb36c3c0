//! Command implementations for the fwcat CLI

mod index;
mod manifest;

pub use index::execute as update_index;
pub use manifest::execute as generate_manifest;

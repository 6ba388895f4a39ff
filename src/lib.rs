//! Species coordinate assignment library - shared modules for the CLI and tests.

pub mod assign;
pub mod columns;
pub mod master;
pub mod models;
pub mod normalize;
pub mod pipeline;
pub mod progress;
pub mod report;
pub mod safety;
pub mod table;

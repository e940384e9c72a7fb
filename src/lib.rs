//! Blockfall (workspace facade crate).
//!
//! The implementation lives in dedicated crates under `crates/`; this
//! package re-exports them under the `blockfall::{core,types}` paths.

pub use blockfall_core as core;
pub use blockfall_types as types;

//! snipsheet_engine - Formula engine over document snippets + Rhai integration.

pub(crate) mod builtins;
pub mod engine;

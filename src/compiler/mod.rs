//! Locale catalog compilation pipeline.
//!
//! Fragment discovery → load → deep-merge → output, run as one batch per
//! [`CompileTask::run`] call.
pub mod discover;
pub mod fragment;
pub mod merge;
pub mod output;
mod task;
mod types;

pub use task::CompileTask;
pub use types::{
    CompileError,
    CompileManifest,
    CompiledCatalog,
    LocaleFragment,
};

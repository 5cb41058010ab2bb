//! Refactoring passes over event trees.
//!
//! [`EventsRefactorer`] offers four whole-tree operations:
//!
//! - **rename** an object, in object parameters and wherever it receives a
//!   call inside a math or string expression;
//! - **remove** every condition and action that references an object;
//! - **replace** text in parameters, without parsing them;
//! - **search** parameters for text, yielding one [`SearchResult`] per
//!   matching event.
//!
//! Rename and remove are driven by instruction metadata: each parameter is
//! handled according to the kind its instruction declares, and expression
//! parameters are parsed with [`evt_parse`]. Replace and search treat every
//! parameter as plain text.
//!
//! # Failure
//!
//! There is no operation-level error. A parameter that fails to parse is
//! left untouched, logged at `debug` level, and the walk continues.
//!
//! # Logging
//!
//! Operations open `debug` spans. Call [`init_tracing`] and set `RUST_LOG`
//! (for instance `RUST_LOG=evt_refactor=trace`) to see them.

use std::sync::Once;

mod instructions;
mod presence;
mod refactorer;
mod rename;
mod search;
mod text;
mod walker;

#[cfg(test)]
mod fixtures;

pub use presence::{math_references_object, string_references_object, PresenceVisitor};
pub use refactorer::EventsRefactorer;
pub use rename::{rename_in_math, rename_in_string, RenameVisitor};
pub use search::{SearchResult, TextSearchOptions};
pub use text::{fold_case, replace_all, TextPattern};

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for debug output.
///
/// Call this once at startup. Safe to call multiple times.
/// Enable with `RUST_LOG=evt_refactor=debug` or `RUST_LOG=evt_refactor=trace`.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(filter)
                .init();
        }
    });
}

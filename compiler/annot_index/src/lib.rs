//! Annotation index for the type checker.
//!
//! The parser hands over each scope's inline annotations as a flat list.
//! [`AnnotationIndex`] classifies them by kind and answers lookups such as
//! "what is the declared type of local `x`?" or "what does this scope
//! declare as its return type?". Stored type expressions stay unresolved
//! until queried and are canonicalized through a [`TypeResolver`] under
//! the index's [`ResolutionScope`].
//!
//! # Block scopes
//!
//! Entering a block derives a new index with
//! [`AnnotationIndex::merge_block_scope`]. The enclosing scope's `block:`
//! and `break:` annotations are discarded; all other annotations remain
//! visible and are shadowed per key by the block's own.
//!
//! # Logging
//!
//! Construction and merging emit `tracing` events under the
//! `annot_index` target. Call [`init_tracing`] and set
//! `RUST_LOG=annot_index=debug` (or `trace` for per-annotation events).

mod error;
mod index;
mod merge;
mod resolver;

#[cfg(test)]
mod testing;

pub use error::{IndexError, ScopeMismatch};
pub use index::{AnnotationIndex, VariableRef};
pub use resolver::{ResolutionScope, TypeResolver};

use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for debug output.
///
/// Safe to call multiple times. Does nothing unless `RUST_LOG` is set.
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

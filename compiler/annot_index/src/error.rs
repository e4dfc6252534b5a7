//! Errors raised by the annotation index.
//!
//! Both are caller bugs rather than user-facing diagnostics: a missing
//! annotation is `None`, never an error.

use std::fmt;

use annot_ir::ModuleContext;

/// Annotation index error.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum IndexError {
    /// Merging indexes built under different resolution scopes.
    #[error("cannot merge annotations from an incompatible scope: {mismatch}")]
    IncompatibleScope { mismatch: ScopeMismatch },
}

/// What differed between two resolution scopes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ScopeMismatch {
    /// The scopes hold different resolver instances.
    Resolver,
    /// Same resolver, different enclosing modules.
    Context {
        outer: ModuleContext,
        inner: ModuleContext,
    },
}

impl fmt::Display for ScopeMismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScopeMismatch::Resolver => f.write_str("resolver instances differ"),
            ScopeMismatch::Context { outer, inner } => write!(
                f,
                "module contexts differ (outer: {:?}, inner: {:?})",
                outer.module(),
                inner.module()
            ),
        }
    }
}

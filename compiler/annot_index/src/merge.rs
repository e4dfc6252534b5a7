//! Deriving a nested block's index from its enclosing scope.

use annot_ir::Annotation;

use crate::{AnnotationIndex, IndexError, TypeResolver};

impl<R: TypeResolver + ?Sized> AnnotationIndex<R> {
    /// Index for a block nested in `self`, whose own annotations are `inner`.
    ///
    /// The result holds `self`'s annotations minus every `block:` and
    /// `break:` annotation, followed by `inner`'s, reclassified from
    /// scratch. The outer block/break types are dropped even when `inner`
    /// declares none; everything else from `self` stays visible unless
    /// `inner` redeclares the same key.
    ///
    /// Both indexes must share a resolution scope, otherwise this fails
    /// with [`IndexError::IncompatibleScope`]. Neither input is modified.
    #[tracing::instrument(level = "debug", skip_all, fields(
        outer = self.len(),
        inner = inner.len(),
    ))]
    pub fn merge_block_scope(&self, inner: &AnnotationIndex<R>) -> Result<Self, IndexError> {
        if let Err(err) = self.scope.check_compatible(&inner.scope) {
            tracing::debug!(%err, "rejected block scope merge");
            return Err(err);
        }

        let (dropped, retained): (Vec<&Annotation>, Vec<&Annotation>) = self
            .annotations
            .iter()
            .partition(|annotation| annotation.kind().is_block_scoped());

        if !dropped.is_empty() {
            tracing::debug!(
                dropped = dropped.len(),
                "dropping outer block-scoped annotations"
            );
        }

        let merged: Vec<Annotation> = retained
            .into_iter()
            .chain(&inner.annotations)
            .cloned()
            .collect();

        Ok(AnnotationIndex::build(merged, self.scope.clone()))
    }
}

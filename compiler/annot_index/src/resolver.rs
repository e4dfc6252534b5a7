//! The type resolver seam and the scope an index is resolved under.

use std::fmt;
use std::sync::Arc;

use annot_ir::{Annotation, MethodTypeExpr, ModuleContext, TypeExpr};

use crate::{AnnotationIndex, IndexError, ScopeMismatch};

/// Canonicalizes annotation type expressions.
///
/// Implemented by the type checker's type builder. Both methods must be
/// pure for a fixed `current` context: the index resolves lazily on every
/// query and relies on repeated calls agreeing.
pub trait TypeResolver {
    /// Canonical (absolute) type.
    type Type;
    /// Canonical method signature.
    type MethodType;

    /// Resolve `expr` as written inside `current`.
    fn resolve_type(&self, expr: &TypeExpr, current: &ModuleContext) -> Self::Type;

    /// Resolve a method type as a unit (parameters, block and return type).
    fn resolve_method_type(&self, expr: &MethodTypeExpr, current: &ModuleContext)
        -> Self::MethodType;
}

/// The resolver handle and module context an index was built under.
///
/// Two scopes are the same when they share the resolver *instance*
/// (pointer identity of the `Arc`) and have equal module contexts. Only
/// indexes with the same scope can be merged.
pub struct ResolutionScope<R: ?Sized> {
    resolver: Arc<R>,
    context: ModuleContext,
}

impl<R: TypeResolver + ?Sized> ResolutionScope<R> {
    pub fn new(resolver: Arc<R>, context: ModuleContext) -> Self {
        ResolutionScope { resolver, context }
    }

    /// Index `annotations` under this scope.
    pub fn build(&self, annotations: impl IntoIterator<Item = Annotation>) -> AnnotationIndex<R> {
        AnnotationIndex::build(annotations, self.clone())
    }

    pub fn resolver(&self) -> &Arc<R> {
        &self.resolver
    }

    pub fn context(&self) -> &ModuleContext {
        &self.context
    }

    /// Same resolver instance and equal module context.
    pub fn same_as(&self, other: &Self) -> bool {
        self.check_compatible(other).is_ok()
    }

    /// Fails with `IncompatibleScope` unless `other` is the same scope.
    pub fn check_compatible(&self, other: &Self) -> Result<(), IndexError> {
        let mismatch = if !Arc::ptr_eq(&self.resolver, &other.resolver) {
            ScopeMismatch::Resolver
        } else if self.context != other.context {
            ScopeMismatch::Context {
                outer: self.context.clone(),
                inner: other.context.clone(),
            }
        } else {
            return Ok(());
        };
        Err(IndexError::IncompatibleScope { mismatch })
    }

    #[inline]
    pub(crate) fn resolve_type(&self, expr: &TypeExpr) -> R::Type {
        self.resolver.resolve_type(expr, &self.context)
    }

    #[inline]
    pub(crate) fn resolve_method_type(&self, expr: &MethodTypeExpr) -> R::MethodType {
        self.resolver.resolve_method_type(expr, &self.context)
    }
}

impl<R: ?Sized> Clone for ResolutionScope<R> {
    fn clone(&self) -> Self {
        ResolutionScope {
            resolver: Arc::clone(&self.resolver),
            context: self.context.clone(),
        }
    }
}

impl<R: ?Sized> fmt::Debug for ResolutionScope<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResolutionScope")
            .field("resolver", &Arc::as_ptr(&self.resolver).cast::<()>())
            .field("context", &self.context)
            .finish()
    }
}

//! Test resolver and fixtures shared by the unit tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use annot_ir::{
    Annotation, BlockTypeExpr, DynamicName, MethodTypeExpr, ModuleContext, Name, QualifiedName,
    StringInterner, TypeExpr,
};

use crate::{AnnotationIndex, ResolutionScope, TypeResolver};

/// Anchors relative names under the current module and counts calls.
///
/// `Foo` resolved in `::App` becomes `::App::Foo`; absolute names and
/// builtins are left alone.
#[derive(Default)]
pub(crate) struct PrefixResolver {
    calls: AtomicUsize,
}

impl PrefixResolver {
    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::Relaxed)
    }

    fn absolute(expr: &TypeExpr, current: &ModuleContext) -> TypeExpr {
        match expr {
            TypeExpr::Named { name, args } => {
                let name = if name.is_absolute() {
                    name.clone()
                } else {
                    let mut namespace: Vec<Name> =
                        current.module().map(|m| m.segments().collect()).unwrap_or_default();
                    namespace.extend_from_slice(name.namespace());
                    QualifiedName::absolute(namespace, name.name())
                };
                let args = args.iter().map(|arg| Self::absolute(arg, current)).collect();
                TypeExpr::Named { name, args }
            }
            TypeExpr::Tuple(elems) => {
                TypeExpr::Tuple(elems.iter().map(|e| Self::absolute(e, current)).collect())
            }
            TypeExpr::Union(members) => {
                TypeExpr::Union(members.iter().map(|m| Self::absolute(m, current)).collect())
            }
            TypeExpr::Optional(inner) => TypeExpr::optional(Self::absolute(inner, current)),
            TypeExpr::Proc(method) => TypeExpr::proc(Self::absolute_method(method, current)),
            other => other.clone(),
        }
    }

    fn absolute_method(expr: &MethodTypeExpr, current: &ModuleContext) -> MethodTypeExpr {
        MethodTypeExpr {
            type_params: expr.type_params.clone(),
            params: expr.params.iter().map(|p| Self::absolute(p, current)).collect(),
            block: expr.block.as_ref().map(|block| BlockTypeExpr {
                params: block.params.iter().map(|p| Self::absolute(p, current)).collect(),
                ret: Self::absolute(&block.ret, current),
                required: block.required,
            }),
            ret: Self::absolute(&expr.ret, current),
        }
    }
}

impl TypeResolver for PrefixResolver {
    type Type = TypeExpr;
    type MethodType = MethodTypeExpr;

    fn resolve_type(&self, expr: &TypeExpr, current: &ModuleContext) -> TypeExpr {
        self.calls.fetch_add(1, Ordering::Relaxed);
        Self::absolute(expr, current)
    }

    fn resolve_method_type(&self, expr: &MethodTypeExpr, current: &ModuleContext) -> MethodTypeExpr {
        self.calls.fetch_add(1, Ordering::Relaxed);
        Self::absolute_method(expr, current)
    }
}

/// Interner, resolver and `::App` context for building test indexes.
pub(crate) struct Fixture {
    pub(crate) interner: StringInterner,
    pub(crate) resolver: Arc<PrefixResolver>,
    pub(crate) context: ModuleContext,
}

impl Fixture {
    pub(crate) fn new() -> Self {
        let interner = StringInterner::new();
        let context = ModuleContext::root().enter(interner.intern("App"));
        Fixture {
            interner,
            resolver: Arc::new(PrefixResolver::default()),
            context,
        }
    }

    pub(crate) fn name(&self, s: &str) -> Name {
        self.interner.intern(s)
    }

    /// `s` as written in an annotation: a relative named type.
    pub(crate) fn ty(&self, s: &str) -> TypeExpr {
        TypeExpr::named(QualifiedName::simple(self.name(s)))
    }

    /// What the resolver turns `self.ty(s)` into: `::App::s`.
    pub(crate) fn resolved(&self, s: &str) -> TypeExpr {
        TypeExpr::named(QualifiedName::absolute(vec![self.name("App")], self.name(s)))
    }

    pub(crate) fn scope(&self) -> ResolutionScope<PrefixResolver> {
        ResolutionScope::new(Arc::clone(&self.resolver), self.context.clone())
    }

    pub(crate) fn build(&self, annotations: Vec<Annotation>) -> AnnotationIndex<PrefixResolver> {
        self.scope().build(annotations)
    }

    pub(crate) fn var(&self, name: &str, ty: &str) -> Annotation {
        Annotation::VarType {
            name: self.name(name),
            ty: self.ty(ty),
        }
    }

    pub(crate) fn ivar(&self, name: &str, ty: &str) -> Annotation {
        Annotation::IvarType {
            name: self.name(name),
            ty: self.ty(ty),
        }
    }

    pub(crate) fn constant(&self, name: &str, ty: &str) -> Annotation {
        Annotation::ConstType {
            name: QualifiedName::simple(self.name(name)),
            ty: self.ty(ty),
        }
    }

    /// `name: () -> ret`
    pub(crate) fn method(&self, name: &str, ret: &str) -> Annotation {
        Annotation::MethodType {
            name: self.name(name),
            ty: MethodTypeExpr::new(Vec::new(), self.ty(ret)),
        }
    }

    pub(crate) fn dynamic(&self, names: &[(&str, bool)]) -> Annotation {
        Annotation::Dynamic(
            names
                .iter()
                .map(|&(name, instance)| {
                    if instance {
                        DynamicName::instance(self.name(name))
                    } else {
                        DynamicName::module(self.name(name))
                    }
                })
                .collect(),
        )
    }
}

//! Per-scope annotation index.
//!
//! Classifies a flat list of annotations into per-kind storage once, then
//! answers the type checker's lookups by resolving the stored expressions
//! on demand.

use std::fmt;

use annot_ir::{Annotation, DynamicName, MethodTypeExpr, Name, QualifiedName, TypeExpr};
use rustc_hash::FxHashMap;

use crate::{ResolutionScope, TypeResolver};

/// Which variable namespace a lookup targets.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum VariableRef<'a> {
    /// Local variable: `x`
    Local(Name),
    /// Instance variable: `@x`
    Instance(Name),
    /// Constant: `Foo::BAR`
    Constant(&'a QualifiedName),
}

/// Annotations classified by kind.
///
/// Keyed maps and singleton slots follow last-write-wins: a later
/// annotation for the same key or slot replaces the earlier one.
#[derive(Default)]
struct Classified {
    var_types: FxHashMap<Name, TypeExpr>,
    ivar_types: FxHashMap<Name, TypeExpr>,
    const_types: FxHashMap<QualifiedName, TypeExpr>,
    method_types: FxHashMap<Name, MethodTypeExpr>,
    block_type: Option<TypeExpr>,
    break_type: Option<TypeExpr>,
    return_type: Option<TypeExpr>,
    self_type: Option<TypeExpr>,
    instance_type: Option<TypeExpr>,
    module_type: Option<TypeExpr>,
    implements: Option<QualifiedName>,
    /// Every `@dynamic` declaration, in input order. Never overwritten.
    dynamics: Vec<Vec<DynamicName>>,
}

impl Classified {
    fn classify(&mut self, annotation: &Annotation) {
        tracing::trace!(kind = annotation.kind().as_str(), "classify annotation");

        // No wildcard arm: a new annotation kind must be routed here.
        match annotation {
            Annotation::VarType { name, ty } => {
                self.var_types.insert(*name, ty.clone());
            }
            Annotation::IvarType { name, ty } => {
                self.ivar_types.insert(*name, ty.clone());
            }
            Annotation::ConstType { name, ty } => {
                self.const_types.insert(name.clone(), ty.clone());
            }
            Annotation::MethodType { name, ty } => {
                self.method_types.insert(*name, ty.clone());
            }
            Annotation::BlockType(ty) => self.block_type = Some(ty.clone()),
            Annotation::BreakType(ty) => self.break_type = Some(ty.clone()),
            Annotation::ReturnType(ty) => self.return_type = Some(ty.clone()),
            Annotation::SelfType(ty) => self.self_type = Some(ty.clone()),
            Annotation::InstanceType(ty) => self.instance_type = Some(ty.clone()),
            Annotation::ModuleType(ty) => self.module_type = Some(ty.clone()),
            Annotation::Implements(module) => self.implements = Some(module.clone()),
            Annotation::Dynamic(names) => self.dynamics.push(names.clone()),
        }
    }
}

/// Queryable index over one scope's annotations.
///
/// Built once per annotation scope (a method body, a block) and immutable
/// afterwards. Queries resolve through the [`ResolutionScope`] every time
/// they are called; nothing is cached. A nested block gets its own index
/// through [`AnnotationIndex::merge_block_scope`].
///
/// # Usage
///
/// ```ignore
/// let scope = ResolutionScope::new(resolver, ModuleContext::root());
/// let index = scope.build(annotations);
///
/// if let Some(ty) = index.local_variable_type(x) {
///     // `x` is declared with `ty`
/// }
/// ```
pub struct AnnotationIndex<R: ?Sized> {
    pub(crate) annotations: Vec<Annotation>,
    pub(crate) scope: ResolutionScope<R>,
    classified: Classified,
}

impl<R: TypeResolver + ?Sized> AnnotationIndex<R> {
    /// Classify `annotations` in order. Never calls the resolver.
    #[tracing::instrument(level = "debug", skip_all)]
    pub fn build(
        annotations: impl IntoIterator<Item = Annotation>,
        scope: ResolutionScope<R>,
    ) -> Self {
        let annotations: Vec<Annotation> = annotations.into_iter().collect();

        let mut classified = Classified::default();
        for annotation in &annotations {
            classified.classify(annotation);
        }

        tracing::debug!(count = annotations.len(), "indexed annotations");

        AnnotationIndex {
            annotations,
            scope,
            classified,
        }
    }

    fn resolve(&self, ty: Option<&TypeExpr>) -> Option<R::Type> {
        ty.map(|ty| self.scope.resolve_type(ty))
    }

    /// Declared type of a local, instance variable or constant.
    pub fn variable_type(&self, var: VariableRef<'_>) -> Option<R::Type> {
        let ty = match var {
            VariableRef::Local(name) => self.classified.var_types.get(&name),
            VariableRef::Instance(name) => self.classified.ivar_types.get(&name),
            VariableRef::Constant(name) => self.classified.const_types.get(name),
        };
        self.resolve(ty)
    }

    #[inline]
    pub fn local_variable_type(&self, name: Name) -> Option<R::Type> {
        self.variable_type(VariableRef::Local(name))
    }

    #[inline]
    pub fn instance_variable_type(&self, name: Name) -> Option<R::Type> {
        self.variable_type(VariableRef::Instance(name))
    }

    #[inline]
    pub fn constant_type(&self, name: &QualifiedName) -> Option<R::Type> {
        self.variable_type(VariableRef::Constant(name))
    }

    /// Declared signature of method `name`, resolved as a whole.
    pub fn method_type(&self, name: Name) -> Option<R::MethodType> {
        self.classified
            .method_types
            .get(&name)
            .map(|ty| self.scope.resolve_method_type(ty))
    }

    /// Type of the block passed to the method being checked.
    pub fn block_type(&self) -> Option<R::Type> {
        self.resolve(self.classified.block_type.as_ref())
    }

    /// Type of values passed to `break` inside the current block.
    pub fn break_type(&self) -> Option<R::Type> {
        self.resolve(self.classified.break_type.as_ref())
    }

    pub fn return_type(&self) -> Option<R::Type> {
        self.resolve(self.classified.return_type.as_ref())
    }

    pub fn self_type(&self) -> Option<R::Type> {
        self.resolve(self.classified.self_type.as_ref())
    }

    pub fn instance_type(&self) -> Option<R::Type> {
        self.resolve(self.classified.instance_type.as_ref())
    }

    pub fn module_type(&self) -> Option<R::Type> {
        self.resolve(self.classified.module_type.as_ref())
    }

    /// The module named by `@implements`, as written.
    ///
    /// This is a module identity, not a type expression, so it is not
    /// passed through the resolver.
    pub fn declared_implemented_module(&self) -> Option<&QualifiedName> {
        self.classified.implements.as_ref()
    }

    /// Every annotated local, resolved.
    pub fn all_local_variable_types(&self) -> FxHashMap<Name, R::Type> {
        self.classified
            .var_types
            .iter()
            .map(|(&name, ty)| (name, self.scope.resolve_type(ty)))
            .collect()
    }

    /// Every annotated instance variable, resolved.
    pub fn all_instance_variable_types(&self) -> FxHashMap<Name, R::Type> {
        self.classified
            .ivar_types
            .iter()
            .map(|(&name, ty)| (name, self.scope.resolve_type(ty)))
            .collect()
    }

    /// Every annotated constant, resolved.
    pub fn all_constant_types(&self) -> FxHashMap<QualifiedName, R::Type> {
        self.classified
            .const_types
            .iter()
            .map(|(name, ty)| (name.clone(), self.scope.resolve_type(ty)))
            .collect()
    }
}

impl<R: ?Sized> AnnotationIndex<R> {
    /// Instance-side names from every `@dynamic`, in declaration order.
    /// Duplicates are kept.
    pub fn dynamic_instance_method_names(&self) -> Vec<Name> {
        self.dynamic_names(DynamicName::is_instance)
    }

    /// Module-side names from every `@dynamic`, in declaration order.
    pub fn dynamic_module_method_names(&self) -> Vec<Name> {
        self.dynamic_names(DynamicName::is_module)
    }

    fn dynamic_names(&self, keep: fn(DynamicName) -> bool) -> Vec<Name> {
        self.classified
            .dynamics
            .iter()
            .flatten()
            .copied()
            .filter(|&dynamic| keep(dynamic))
            .map(|dynamic| dynamic.name)
            .collect()
    }

    /// Whether `annotation` was among the inputs, shadowed or not.
    pub fn contains(&self, annotation: &Annotation) -> bool {
        self.annotations.contains(annotation)
    }

    /// Number of input annotations.
    pub fn len(&self) -> usize {
        self.annotations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.annotations.is_empty()
    }

    pub fn any(&self, predicate: impl FnMut(&Annotation) -> bool) -> bool {
        self.annotations.iter().any(predicate)
    }

    /// Input annotations, in order.
    pub fn iter(&self) -> std::slice::Iter<'_, Annotation> {
        self.annotations.iter()
    }

    /// Input annotations, in order.
    pub fn annotations(&self) -> &[Annotation] {
        &self.annotations
    }

    pub fn scope(&self) -> &ResolutionScope<R> {
        &self.scope
    }

    // Raw accessors: the winning unresolved expression for each key/slot.

    pub fn local_variable_annotation(&self, name: Name) -> Option<&TypeExpr> {
        self.classified.var_types.get(&name)
    }

    pub fn instance_variable_annotation(&self, name: Name) -> Option<&TypeExpr> {
        self.classified.ivar_types.get(&name)
    }

    pub fn constant_annotation(&self, name: &QualifiedName) -> Option<&TypeExpr> {
        self.classified.const_types.get(name)
    }

    pub fn method_annotation(&self, name: Name) -> Option<&MethodTypeExpr> {
        self.classified.method_types.get(&name)
    }

    pub fn block_type_annotation(&self) -> Option<&TypeExpr> {
        self.classified.block_type.as_ref()
    }

    pub fn break_type_annotation(&self) -> Option<&TypeExpr> {
        self.classified.break_type.as_ref()
    }

    pub fn return_type_annotation(&self) -> Option<&TypeExpr> {
        self.classified.return_type.as_ref()
    }

    pub fn self_type_annotation(&self) -> Option<&TypeExpr> {
        self.classified.self_type.as_ref()
    }

    pub fn instance_type_annotation(&self) -> Option<&TypeExpr> {
        self.classified.instance_type.as_ref()
    }

    pub fn module_type_annotation(&self) -> Option<&TypeExpr> {
        self.classified.module_type.as_ref()
    }

    /// Each `@dynamic` declaration's names, in input order.
    pub fn dynamic_annotations(&self) -> &[Vec<DynamicName>] {
        &self.classified.dynamics
    }
}

impl<'a, R: ?Sized> IntoIterator for &'a AnnotationIndex<R> {
    type Item = &'a Annotation;
    type IntoIter = std::slice::Iter<'a, Annotation>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<R: ?Sized> fmt::Debug for AnnotationIndex<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnnotationIndex")
            .field("annotations", &self.annotations)
            .field("scope", &self.scope)
            .finish_non_exhaustive()
    }
}

//! Inline type annotations.
//!
//! The parser extracts annotations such as `@type var x: Integer` or
//! `@type break: String` from comments and hands them over as a flat,
//! ordered list of [`Annotation`] values. The set of kinds is closed: code
//! that classifies annotations matches exhaustively, so a new kind cannot
//! be added without every consumer deciding where it goes.

use crate::{MethodTypeExpr, Name, QualifiedName, TypeExpr};

/// One annotation declaration.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum Annotation {
    /// `@type var x: T`
    VarType { name: Name, ty: TypeExpr },
    /// `@type ivar @x: T`
    IvarType { name: Name, ty: TypeExpr },
    /// `@type const Foo::Bar: T`
    ConstType { name: QualifiedName, ty: TypeExpr },
    /// `@type method foo: (A) -> B`
    MethodType { name: Name, ty: MethodTypeExpr },
    /// `@type block: T`
    BlockType(TypeExpr),
    /// `@type break: T`
    BreakType(TypeExpr),
    /// `@type return: T`
    ReturnType(TypeExpr),
    /// `@type self: T`
    SelfType(TypeExpr),
    /// `@type instance: T`
    InstanceType(TypeExpr),
    /// `@type module: T`
    ModuleType(TypeExpr),
    /// `@implements Foo`
    Implements(QualifiedName),
    /// `@dynamic foo, self.bar`
    Dynamic(Vec<DynamicName>),
}

impl Annotation {
    /// The kind tag of this annotation.
    pub fn kind(&self) -> AnnotationKind {
        match self {
            Annotation::VarType { .. } => AnnotationKind::VarType,
            Annotation::IvarType { .. } => AnnotationKind::IvarType,
            Annotation::ConstType { .. } => AnnotationKind::ConstType,
            Annotation::MethodType { .. } => AnnotationKind::MethodType,
            Annotation::BlockType(_) => AnnotationKind::BlockType,
            Annotation::BreakType(_) => AnnotationKind::BreakType,
            Annotation::ReturnType(_) => AnnotationKind::ReturnType,
            Annotation::SelfType(_) => AnnotationKind::SelfType,
            Annotation::InstanceType(_) => AnnotationKind::InstanceType,
            Annotation::ModuleType(_) => AnnotationKind::ModuleType,
            Annotation::Implements(_) => AnnotationKind::Implements,
            Annotation::Dynamic(_) => AnnotationKind::Dynamic,
        }
    }
}

/// Fieldless mirror of [`Annotation`]'s variants.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
pub enum AnnotationKind {
    VarType,
    IvarType,
    ConstType,
    MethodType,
    BlockType,
    BreakType,
    ReturnType,
    SelfType,
    InstanceType,
    ModuleType,
    Implements,
    Dynamic,
}

impl AnnotationKind {
    /// Every kind, in declaration order.
    pub const ALL: [AnnotationKind; 12] = [
        AnnotationKind::VarType,
        AnnotationKind::IvarType,
        AnnotationKind::ConstType,
        AnnotationKind::MethodType,
        AnnotationKind::BlockType,
        AnnotationKind::BreakType,
        AnnotationKind::ReturnType,
        AnnotationKind::SelfType,
        AnnotationKind::InstanceType,
        AnnotationKind::ModuleType,
        AnnotationKind::Implements,
        AnnotationKind::Dynamic,
    ];

    /// Annotations that describe the block currently being checked.
    ///
    /// These belong to exactly one block and are dropped, not shadowed,
    /// when a nested block's annotations are merged in.
    pub fn is_block_scoped(self) -> bool {
        matches!(self, AnnotationKind::BlockType | AnnotationKind::BreakType)
    }

    /// Short name used in logs.
    pub fn as_str(self) -> &'static str {
        match self {
            AnnotationKind::VarType => "var",
            AnnotationKind::IvarType => "ivar",
            AnnotationKind::ConstType => "const",
            AnnotationKind::MethodType => "method",
            AnnotationKind::BlockType => "block",
            AnnotationKind::BreakType => "break",
            AnnotationKind::ReturnType => "return",
            AnnotationKind::SelfType => "self",
            AnnotationKind::InstanceType => "instance",
            AnnotationKind::ModuleType => "module",
            AnnotationKind::Implements => "implements",
            AnnotationKind::Dynamic => "dynamic",
        }
    }
}

/// Which side of a module a dynamically defined method lives on.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum DynamicScope {
    /// `foo`: an instance method.
    Instance,
    /// `self.foo`: a singleton (module-level) method.
    Module,
}

/// One name listed in a `@dynamic` declaration.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct DynamicName {
    pub name: Name,
    pub scope: DynamicScope,
}

impl DynamicName {
    pub fn instance(name: Name) -> Self {
        DynamicName {
            name,
            scope: DynamicScope::Instance,
        }
    }

    pub fn module(name: Name) -> Self {
        DynamicName {
            name,
            scope: DynamicScope::Module,
        }
    }

    #[inline]
    pub fn is_instance(self) -> bool {
        self.scope == DynamicScope::Instance
    }

    #[inline]
    pub fn is_module(self) -> bool {
        self.scope == DynamicScope::Module
    }
}

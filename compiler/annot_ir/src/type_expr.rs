//! Unresolved type expressions as written in annotations.
//!
//! `TypeExpr` preserves the structure of an annotation's type exactly as
//! the parser produced it. Named types may still be relative to the
//! enclosing module; turning them into canonical types is the resolver's
//! job, not this crate's.

use crate::{Name, QualifiedName};

/// A type expression, before resolution.
///
/// Examples:
/// - `Integer` → `Named { name: Integer, args: [] }`
/// - `Array[String]` → `Named { name: Array, args: [Named(String)] }`
/// - `String?` → `Optional(Named(String))`
/// - `^(Integer) -> void` → `Proc(MethodTypeExpr { .. })`
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum TypeExpr {
    /// `untyped`
    Any,
    /// `void`
    Void,
    /// `nil`
    Nil,
    /// `bool`
    Bool,
    /// `self`
    SelfType,
    /// `instance`
    Instance,
    /// `class`
    Class,
    /// A type variable bound by a generic method or module: `T`
    Var(Name),
    /// A class, module or alias reference with optional type arguments.
    Named {
        name: QualifiedName,
        args: Vec<TypeExpr>,
    },
    /// `[A, B]`
    Tuple(Vec<TypeExpr>),
    /// `A | B`
    Union(Vec<TypeExpr>),
    /// `A?`
    Optional(Box<TypeExpr>),
    /// A proc type: `^(A) -> B`
    Proc(Box<MethodTypeExpr>),
}

impl TypeExpr {
    /// A named type without type arguments.
    #[inline]
    pub fn named(name: QualifiedName) -> Self {
        TypeExpr::Named {
            name,
            args: Vec::new(),
        }
    }

    /// A named type with type arguments.
    #[inline]
    pub fn named_with_args(name: QualifiedName, args: Vec<TypeExpr>) -> Self {
        TypeExpr::Named { name, args }
    }

    #[inline]
    pub fn tuple(elems: Vec<TypeExpr>) -> Self {
        TypeExpr::Tuple(elems)
    }

    #[inline]
    pub fn union(members: Vec<TypeExpr>) -> Self {
        TypeExpr::Union(members)
    }

    #[inline]
    pub fn optional(inner: TypeExpr) -> Self {
        TypeExpr::Optional(Box::new(inner))
    }

    #[inline]
    pub fn proc(method: MethodTypeExpr) -> Self {
        TypeExpr::Proc(Box::new(method))
    }

    /// Whether any named type inside this expression is relative, i.e.
    /// resolving it depends on the module context.
    pub fn is_relative(&self) -> bool {
        match self {
            TypeExpr::Any
            | TypeExpr::Void
            | TypeExpr::Nil
            | TypeExpr::Bool
            | TypeExpr::SelfType
            | TypeExpr::Instance
            | TypeExpr::Class
            | TypeExpr::Var(_) => false,
            TypeExpr::Named { name, args } => {
                !name.is_absolute() || args.iter().any(TypeExpr::is_relative)
            }
            TypeExpr::Tuple(elems) | TypeExpr::Union(elems) => {
                elems.iter().any(TypeExpr::is_relative)
            }
            TypeExpr::Optional(inner) => inner.is_relative(),
            TypeExpr::Proc(method) => method.is_relative(),
        }
    }
}

/// The block part of a method type: `{ (A) -> B }`.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct BlockTypeExpr {
    pub params: Vec<TypeExpr>,
    pub ret: TypeExpr,
    /// `false` for `?{ ... }` blocks the caller may omit.
    pub required: bool,
}

/// A method type: `[T] (A, B) { (C) -> D } -> R`.
///
/// Kept separate from [`TypeExpr`] because the resolver canonicalizes the
/// parameters, block and return type together.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct MethodTypeExpr {
    pub type_params: Vec<Name>,
    pub params: Vec<TypeExpr>,
    pub block: Option<BlockTypeExpr>,
    pub ret: TypeExpr,
}

impl MethodTypeExpr {
    /// `(params) -> ret` with no type parameters and no block.
    pub fn new(params: Vec<TypeExpr>, ret: TypeExpr) -> Self {
        MethodTypeExpr {
            type_params: Vec::new(),
            params,
            block: None,
            ret,
        }
    }

    #[must_use]
    pub fn with_type_params(mut self, type_params: Vec<Name>) -> Self {
        self.type_params = type_params;
        self
    }

    #[must_use]
    pub fn with_block(mut self, block: BlockTypeExpr) -> Self {
        self.block = Some(block);
        self
    }

    pub fn is_relative(&self) -> bool {
        self.params.iter().any(TypeExpr::is_relative)
            || self.ret.is_relative()
            || self.block.as_ref().is_some_and(|block| {
                block.params.iter().any(TypeExpr::is_relative) || block.ret.is_relative()
            })
    }
}

//! Annotation IR
//!
//! Data types shared by the annotation parser, the annotation index and
//! the type checker:
//! - `Name` handles for interned identifiers
//! - `QualifiedName` and `ModuleContext` for namespaced references
//! - `TypeExpr` / `MethodTypeExpr` for unresolved type expressions
//! - `Annotation`, the closed set of inline annotation kinds
//!
//! Every type is `Clone + Eq + Hash + Debug` so annotations can be compared
//! for membership and used as map keys.

mod annotation;
mod interner;
mod name;
mod path;
mod type_expr;

pub use annotation::{Annotation, AnnotationKind, DynamicName, DynamicScope};
pub use interner::{InternError, SharedInterner, StringInterner, StringLookup};
pub use name::Name;
pub use path::{ModuleContext, QualifiedName};
pub use type_expr::{BlockTypeExpr, MethodTypeExpr, TypeExpr};

//! Qualified names and module contexts.
//!
//! Constant and module references in annotations may be written relative
//! to the enclosing module (`Foo::Bar`) or anchored at the root
//! (`::Foo::Bar`). The resolver turns the former into the latter using the
//! [`ModuleContext`] an index was built under.

use crate::{Name, StringLookup};

/// A possibly-namespaced name such as `Foo::Bar` or `::Foo::Bar`.
///
/// Always has at least one segment: the final `name`.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct QualifiedName {
    namespace: Vec<Name>,
    name: Name,
    absolute: bool,
}

impl QualifiedName {
    /// A bare relative name: `Foo`.
    #[inline]
    pub fn simple(name: Name) -> Self {
        QualifiedName {
            namespace: Vec::new(),
            name,
            absolute: false,
        }
    }

    /// A relative name inside `namespace`: `A::B::name`.
    pub fn relative(namespace: Vec<Name>, name: Name) -> Self {
        QualifiedName {
            namespace,
            name,
            absolute: false,
        }
    }

    /// A root-anchored name: `::A::B::name`.
    pub fn absolute(namespace: Vec<Name>, name: Name) -> Self {
        QualifiedName {
            namespace,
            name,
            absolute: true,
        }
    }

    /// The last segment.
    #[inline]
    pub fn name(&self) -> Name {
        self.name
    }

    /// Every segment but the last.
    #[inline]
    pub fn namespace(&self) -> &[Name] {
        &self.namespace
    }

    #[inline]
    pub fn is_absolute(&self) -> bool {
        self.absolute
    }

    /// All segments, outermost first.
    pub fn segments(&self) -> impl Iterator<Item = Name> + '_ {
        self.namespace
            .iter()
            .copied()
            .chain(std::iter::once(self.name))
    }

    /// The same path, anchored at the root.
    #[must_use]
    pub fn to_absolute(&self) -> Self {
        QualifiedName {
            absolute: true,
            ..self.clone()
        }
    }

    /// `self::name`, keeping `self`'s anchoring.
    #[must_use]
    pub fn child(&self, name: Name) -> Self {
        let mut namespace = self.namespace.clone();
        namespace.push(self.name);
        QualifiedName {
            namespace,
            name,
            absolute: self.absolute,
        }
    }

    /// Render as source text, e.g. `::Foo::Bar`.
    pub fn display(&self, lookup: &impl StringLookup) -> String {
        let mut out = String::new();
        for (i, segment) in self.segments().enumerate() {
            if i > 0 || self.absolute {
                out.push_str("::");
            }
            out.push_str(lookup.lookup(segment));
        }
        out
    }
}

/// The enclosing module that relative type names are resolved against.
///
/// `ModuleContext::root()` is the top level. Any other context holds an
/// absolute module path.
#[derive(Clone, Eq, PartialEq, Hash, Debug, Default)]
pub struct ModuleContext {
    module: Option<QualifiedName>,
}

impl ModuleContext {
    /// The top-level context.
    pub fn root() -> Self {
        ModuleContext { module: None }
    }

    /// Context for `module`. Relative paths are anchored at the root.
    pub fn new(module: QualifiedName) -> Self {
        ModuleContext {
            module: Some(module.to_absolute()),
        }
    }

    /// Context for a module nested directly inside this one.
    #[must_use]
    pub fn enter(&self, name: Name) -> Self {
        let module = match &self.module {
            Some(outer) => outer.child(name),
            None => QualifiedName::absolute(Vec::new(), name),
        };
        ModuleContext {
            module: Some(module),
        }
    }

    /// The enclosing module, or `None` at the top level.
    pub fn module(&self) -> Option<&QualifiedName> {
        self.module.as_ref()
    }

    pub fn is_root(&self) -> bool {
        self.module.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::StringInterner;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_segments_outermost_first() {
        let interner = StringInterner::new();
        let a = interner.intern("A");
        let b = interner.intern("B");
        let c = interner.intern("C");
        let path = QualifiedName::relative(vec![a, b], c);
        assert_eq!(path.segments().collect::<Vec<_>>(), vec![a, b, c]);
        assert_eq!(path.name(), c);
        assert_eq!(path.namespace(), &[a, b]);
    }

    #[test]
    fn test_display() {
        let interner = StringInterner::new();
        let foo = interner.intern("Foo");
        let bar = interner.intern("Bar");

        assert_eq!(QualifiedName::simple(foo).display(&interner), "Foo");
        assert_eq!(
            QualifiedName::relative(vec![foo], bar).display(&interner),
            "Foo::Bar"
        );
        assert_eq!(
            QualifiedName::absolute(vec![foo], bar).display(&interner),
            "::Foo::Bar"
        );
    }

    #[test]
    fn test_absolute_and_relative_differ() {
        let name = Name::from_raw(3);
        let relative = QualifiedName::simple(name);
        let absolute = relative.to_absolute();
        assert!(!relative.is_absolute());
        assert!(absolute.is_absolute());
        assert_ne!(relative, absolute);
    }

    #[test]
    fn test_child_keeps_anchoring() {
        let a = Name::from_raw(1);
        let b = Name::from_raw(2);
        let child = QualifiedName::absolute(Vec::new(), a).child(b);
        assert_eq!(child, QualifiedName::absolute(vec![a], b));
    }

    #[test]
    fn test_module_context_enter() {
        let a = Name::from_raw(1);
        let b = Name::from_raw(2);

        let root = ModuleContext::root();
        assert!(root.is_root());
        assert_eq!(root.module(), None);

        let inner = root.enter(a).enter(b);
        assert!(!inner.is_root());
        assert_eq!(inner.module(), Some(&QualifiedName::absolute(vec![a], b)));
    }

    #[test]
    fn test_module_context_anchors_relative_paths() {
        let a = Name::from_raw(1);
        let from_relative = ModuleContext::new(QualifiedName::simple(a));
        let from_absolute = ModuleContext::new(QualifiedName::absolute(Vec::new(), a));
        assert_eq!(from_relative, from_absolute);
        assert_eq!(from_relative, ModuleContext::root().enter(a));
    }
}

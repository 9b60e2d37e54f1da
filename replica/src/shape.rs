//! Static type descriptors.
//!
//! Every reflected type exposes a [`Shape`]: its name, its coarse [`Kind`],
//! and — for aggregates — the ordered field table the derive macro emits.
//! Shapes are `&'static` and constructed once per type, either as promoted
//! constants (built-in impls) or as hidden statics (derived impls).

use crate::reflect::Reflect;

/// Static descriptor for a reflected type.
pub struct Shape {
    /// Short type name, without path or generic arguments.
    pub name: &'static str,

    /// Coarse category of the type, with per-kind payload where needed.
    pub kind: Kind,

    /// Capability hook, registered by `#[reflect(cloneable)]`.
    ///
    /// When present, top-level dispatch invokes this instead of the
    /// reflective walker. The hook downcasts to the concrete type and
    /// returns `None` if the value is of a different dynamic type.
    pub cloneable: Option<fn(&dyn Reflect) -> Option<Box<dyn Reflect>>>,
}

impl Shape {
    /// Whether values of this shape are copied by value rather than
    /// recursively cloned when they appear as aggregate fields.
    pub fn is_copy_kind(&self) -> bool {
        matches!(
            self.kind,
            Kind::Scalar | Kind::Function | Kind::Channel | Kind::Address
        )
    }
}

impl core::fmt::Debug for Shape {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Shape")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .finish_non_exhaustive()
    }
}

/// The coarse category of a reflected type.
#[derive(Debug)]
pub enum Kind {
    /// Copy-by-value leaf: numbers, booleans, characters, text.
    Scalar,
    /// Ordered sequence with a length and a capacity (`Vec<T>`).
    List,
    /// Keyed mapping (`HashMap<K, V>`, `BTreeMap<K, V>`).
    Map,
    /// Aggregate with a fixed ordered field list.
    Struct(StructDef),
    /// Fixed-length sequence (`[T; N]`).
    Array,
    /// Shared, identity-bearing reference (`Rc<RefCell<T>>` and friends).
    Reference,
    /// Uniquely owned pointer (`Box<T>`).
    Unique,
    /// Nilable wrapper (`Option<T>`).
    Optional,
    /// Erased value carrying its dynamic type (`Box<dyn Reflect>`).
    Any,
    /// Function pointer. Copied as-is: an identity, not data.
    Function,
    /// Thread-communication handle (`mpsc::Sender`). Copied as a handle.
    Channel,
    /// Raw address (`*const T` / `*mut T`). Copied as-is.
    Address,
}

/// Payload of [`Kind::Struct`]: the ordered field table.
#[derive(Debug)]
pub struct StructDef {
    /// Fields in declaration order.
    pub fields: &'static [FieldDef],
}

/// One aggregate field, as recorded by `#[derive(Reflect)]`.
pub struct FieldDef {
    /// Field name (`"0"`, `"1"`, … for tuple structs).
    pub name: &'static str,

    /// Declared shape of the field's type.
    pub shape: fn() -> &'static Shape,

    /// Whether the field participates in cloning. Private and
    /// `#[reflect(skip)]` fields are left at their default value.
    pub public: bool,

    /// Moves an erased clone into this field of `parent`.
    ///
    /// Returns `false` (leaving the field at its default) when either
    /// downcast fails.
    pub set: fn(parent: &mut dyn Reflect, value: Box<dyn Reflect>) -> bool,
}

impl core::fmt::Debug for FieldDef {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("FieldDef")
            .field("name", &self.name)
            .field("public", &self.public)
            .finish_non_exhaustive()
    }
}

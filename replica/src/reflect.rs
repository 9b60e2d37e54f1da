//! The introspection surface: the [`Reflect`] trait, kind-classified
//! [`View`]s, and the per-kind operation traits the walker drives.
//!
//! `Reflect` is object-safe; erased values travel as `Box<dyn Reflect>` and
//! are read through `&dyn Reflect`. The static side (`Reflect::shape`) is
//! gated on `Self: Sized` so the same trait serves both worlds.

use core::any::{Any, TypeId};
use core::mem::{self, ManuallyDrop};

use crate::shape::{FieldDef, Shape};

/// Runtime introspection over a value.
///
/// Implemented by the built-in impls for scalars, containers, references and
/// opaque kinds, and by `#[derive(Reflect)]` for user aggregates.
pub trait Reflect: Any {
    /// The shape of the implementing type.
    fn shape() -> &'static Shape
    where
        Self: Sized;

    /// The shape of this value's declared type, usable on erased values.
    fn value_shape(&self) -> &'static Shape;

    /// A kind-classified read-only view of this value.
    fn view(&self) -> View<'_>;

    /// Boxed shallow copy for copy-by-value kinds (scalars, text, function
    /// pointers, addresses, channel handles). Container kinds return `None`.
    fn copy_value(&self) -> Option<Box<dyn Reflect>> {
        None
    }

    /// Upcast to [`Any`] for downcasting by reference.
    fn as_any(&self) -> &dyn Any;

    /// Upcast to [`Any`] for downcasting by mutable reference.
    fn as_any_mut(&mut self) -> &mut dyn Any;

    /// Upcast to [`Any`] for downcasting by value.
    fn into_any(self: Box<Self>) -> Box<dyn Any>;
}

/// Opt-in custom deep clone.
///
/// A type registers the capability with `#[derive(Reflect)]` plus
/// `#[reflect(cloneable)]`; top-level [`deep_clone`](crate::deep_clone) then
/// delegates to [`clone_value`](Cloneable::clone_value) instead of the
/// reflective walker. If the returned value's dynamic type differs from the
/// requested one, dispatch falls through to the walker.
///
/// The engine's visited-object table is *not* shared with this method: a
/// self-cloning type that can contain reference cycles must detect and
/// reproduce them itself.
pub trait Cloneable {
    /// Returns an erased deep copy of the receiver.
    fn clone_value(&self) -> Box<dyn Reflect>;
}

/// A read-only view of a value, classified by kind.
pub enum View<'a> {
    /// Copy-by-value leaf; clone through [`Reflect::copy_value`].
    Leaf,
    /// Ordered sequence.
    List(&'a dyn ListOps),
    /// Keyed mapping.
    Map(&'a dyn MapOps),
    /// Fixed-length sequence.
    Array(&'a dyn ArrayOps),
    /// Aggregate with named fields.
    Struct(&'a dyn StructOps),
    /// Shared, identity-bearing reference.
    Reference(&'a dyn RefOps),
    /// Uniquely owned pointer.
    Unique(&'a dyn UniqueOps),
    /// Nilable wrapper.
    Optional(&'a dyn OptionOps),
    /// Erased value; the payload is the inner concrete value.
    Any(&'a dyn Reflect),
}

/// Operations over an ordered sequence.
pub trait ListOps {
    /// Number of elements.
    fn len(&self) -> usize;

    /// Whether the sequence is empty.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Allocated capacity. Always `>= len()`.
    fn capacity(&self) -> usize;

    /// Shape of the declared element type.
    fn element_shape(&self) -> &'static Shape;

    /// Borrows the element at `index`.
    fn get(&self, index: usize) -> &dyn Reflect;

    /// A fresh, empty sequence of the same declared type with the given
    /// capacity.
    fn make(&self, capacity: usize) -> Box<dyn Reflect>;

    /// Appends an erased element to `dst` (a sequence produced by
    /// [`make`](ListOps::make)). Returns `false` and drops the element when
    /// either downcast fails.
    fn push(&self, dst: &mut dyn Reflect, element: Box<dyn Reflect>) -> bool;
}

/// Operations over a keyed mapping.
pub trait MapOps {
    /// Number of entries.
    fn len(&self) -> usize;

    /// Whether the mapping is empty.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Shape of the declared key type.
    fn key_shape(&self) -> &'static Shape;

    /// Shape of the declared value type.
    fn value_shape(&self) -> &'static Shape;

    /// Iterates entries in no particular order.
    fn entries(&self) -> Box<dyn Iterator<Item = (&dyn Reflect, &dyn Reflect)> + '_>;

    /// A fresh, empty mapping of the same declared type, sized for
    /// `capacity` entries where the container supports a hint.
    fn make(&self, capacity: usize) -> Box<dyn Reflect>;

    /// Inserts an erased entry into `dst`. Returns `false` and drops the
    /// entry when either downcast fails.
    fn insert(&self, dst: &mut dyn Reflect, key: Box<dyn Reflect>, value: Box<dyn Reflect>)
    -> bool;
}

/// Operations over a fixed-length sequence.
pub trait ArrayOps {
    /// The fixed length.
    fn len(&self) -> usize;

    /// Whether the array has zero length.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Shape of the declared element type.
    fn element_shape(&self) -> &'static Shape;

    /// Borrows the element at `index`.
    fn get(&self, index: usize) -> &dyn Reflect;

    /// Reassembles an array of the same declared type from cloned elements.
    /// Returns `None` if any element fails to downcast or the count is off.
    fn assemble(&self, elements: Vec<Box<dyn Reflect>>) -> Option<Box<dyn Reflect>>;
}

/// Operations over an aggregate, implemented by `#[derive(Reflect)]`.
pub trait StructOps {
    /// Runtime-interned identity of the aggregate type; the field-action
    /// cache key.
    fn type_key(&self) -> TypeId;

    /// The static field table.
    fn fields(&self) -> &'static [FieldDef];

    /// A fresh aggregate of the same type with every field at its default.
    fn make(&self) -> Box<dyn Reflect>;

    /// Borrows the field at `index` (declaration order).
    fn field(&self, index: usize) -> &dyn Reflect;
}

/// Operations over a shared reference.
pub trait RefOps {
    /// Stable address of the backing allocation, unique for as long as the
    /// source value is borrowed.
    fn address(&self) -> usize;

    /// Shape of the declared pointee type.
    fn pointee_shape(&self) -> &'static Shape;

    /// A new handle to the *same* allocation (the visited-table hit path).
    fn alias(&self) -> Box<dyn Reflect>;

    /// A fresh reference of the same declared type seeded with the
    /// pointee's default value. Registered in the visited table before the
    /// pointee is walked, then written through [`fill`](RefOps::fill); every
    /// reference flavor is interior-mutable precisely so this two-step
    /// order is possible.
    fn placeholder(&self) -> Box<dyn Reflect>;

    /// Walks the pointee through `walk` and stores the result into
    /// `target`, a reference produced by [`placeholder`](RefOps::placeholder).
    fn fill(
        &self,
        target: &mut dyn Reflect,
        walk: &mut dyn FnMut(&dyn Reflect) -> Box<dyn Reflect>,
    );
}

/// Operations over a uniquely owned pointer.
pub trait UniqueOps {
    /// Borrows the pointed-to value.
    fn target(&self) -> &dyn Reflect;

    /// Wraps a cloned target back into a pointer of the same declared type.
    fn rebox(&self, value: Box<dyn Reflect>) -> Option<Box<dyn Reflect>>;
}

/// Operations over a nilable wrapper.
pub trait OptionOps {
    /// Borrows the payload, or `None` for the empty case.
    fn inner(&self) -> Option<&dyn Reflect>;

    /// The empty value of the same declared type.
    fn empty(&self) -> Box<dyn Reflect>;

    /// Wraps a cloned payload back into the non-empty case. `None` if the
    /// payload fails to downcast.
    fn wrap(&self, value: Box<dyn Reflect>) -> Option<Box<dyn Reflect>>;
}

impl dyn Reflect {
    /// Whether the concrete value is a `T`.
    pub fn is<T: Any>(&self) -> bool {
        self.as_any().is::<T>()
    }

    /// Borrows the concrete value if it is a `T`.
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.as_any().downcast_ref()
    }

    /// Mutably borrows the concrete value if it is a `T`.
    pub fn downcast_mut<T: Any>(&mut self) -> Option<&mut T> {
        self.as_any_mut().downcast_mut()
    }
}

/// Moves an erased clone into a typed slot.
///
/// The ordinary path is a plain downcast. When the destination slot is
/// itself `Box<dyn Reflect>` — an erased-any field, element, or value — the
/// erased clone *is* the slot value and is retagged rather than unwrapped,
/// preserving the payload's dynamic type.
pub fn take<T: Reflect>(value: Box<dyn Reflect>) -> Option<T> {
    if TypeId::of::<T>() == TypeId::of::<Box<dyn Reflect>>() {
        return Some(retag(value));
    }
    value.into_any().downcast::<T>().ok().map(|boxed| *boxed)
}

/// Reinterprets `value` as `Dst`.
///
/// Callers must have established `TypeId::of::<Src>() == TypeId::of::<Dst>()`
/// first; the types are then identical and the copy is a move.
pub(crate) fn retag<Src: 'static, Dst: 'static>(value: Src) -> Dst {
    debug_assert_eq!(TypeId::of::<Src>(), TypeId::of::<Dst>());
    let value = ManuallyDrop::new(value);
    // Same type on both sides, source ownership released via ManuallyDrop.
    unsafe { mem::transmute_copy::<ManuallyDrop<Src>, Dst>(&value) }
}

/// Borrows `value` as `Dst` when the types are identical.
pub(crate) fn reify<Src: 'static, Dst: 'static>(value: &Src) -> Option<&Dst> {
    if TypeId::of::<Src>() == TypeId::of::<Dst>() {
        // Identical types, so the pointee layout matches exactly.
        Some(unsafe { &*(value as *const Src).cast::<Dst>() })
    } else {
        None
    }
}

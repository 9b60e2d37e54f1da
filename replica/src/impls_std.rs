//! `Reflect` implementations for `std` types: hashed and ordered mappings,
//! `Arc`-based shared references, and channel handles.

use std::collections::{BTreeMap, HashMap};
use std::hash::Hash;
use std::sync::mpsc::Sender;
use std::sync::{Arc, Mutex, PoisonError, RwLock};

use crate::macros::any_accessors;
use crate::reflect::{MapOps, RefOps, Reflect, View, take};
use crate::shape::{Kind, Shape};

// ── HashMap ─────────────────────────────────────────────────────────

impl<K, V> Reflect for HashMap<K, V>
where
    K: Reflect + Eq + Hash,
    V: Reflect,
{
    fn shape() -> &'static Shape {
        const {
            &Shape {
                name: "HashMap",
                kind: Kind::Map,
                cloneable: None,
            }
        }
    }

    fn value_shape(&self) -> &'static Shape {
        <Self as Reflect>::shape()
    }

    fn view(&self) -> View<'_> {
        View::Map(self)
    }

    any_accessors!();
}

impl<K, V> MapOps for HashMap<K, V>
where
    K: Reflect + Eq + Hash,
    V: Reflect,
{
    fn len(&self) -> usize {
        HashMap::len(self)
    }

    fn key_shape(&self) -> &'static Shape {
        K::shape()
    }

    fn value_shape(&self) -> &'static Shape {
        V::shape()
    }

    fn entries(&self) -> Box<dyn Iterator<Item = (&dyn Reflect, &dyn Reflect)> + '_> {
        Box::new(
            self.iter()
                .map(|(key, value)| (key as &dyn Reflect, value as &dyn Reflect)),
        )
    }

    fn make(&self, capacity: usize) -> Box<dyn Reflect> {
        Box::new(HashMap::<K, V>::with_capacity(capacity))
    }

    fn insert(
        &self,
        dst: &mut dyn Reflect,
        key: Box<dyn Reflect>,
        value: Box<dyn Reflect>,
    ) -> bool {
        let Some(dst) = dst.as_any_mut().downcast_mut::<HashMap<K, V>>() else {
            return false;
        };
        let (Some(key), Some(value)) = (take::<K>(key), take::<V>(value)) else {
            return false;
        };
        dst.insert(key, value);
        true
    }
}

// ── BTreeMap ────────────────────────────────────────────────────────

impl<K, V> Reflect for BTreeMap<K, V>
where
    K: Reflect + Ord,
    V: Reflect,
{
    fn shape() -> &'static Shape {
        const {
            &Shape {
                name: "BTreeMap",
                kind: Kind::Map,
                cloneable: None,
            }
        }
    }

    fn value_shape(&self) -> &'static Shape {
        <Self as Reflect>::shape()
    }

    fn view(&self) -> View<'_> {
        View::Map(self)
    }

    any_accessors!();
}

impl<K, V> MapOps for BTreeMap<K, V>
where
    K: Reflect + Ord,
    V: Reflect,
{
    fn len(&self) -> usize {
        BTreeMap::len(self)
    }

    fn key_shape(&self) -> &'static Shape {
        K::shape()
    }

    fn value_shape(&self) -> &'static Shape {
        V::shape()
    }

    fn entries(&self) -> Box<dyn Iterator<Item = (&dyn Reflect, &dyn Reflect)> + '_> {
        Box::new(
            self.iter()
                .map(|(key, value)| (key as &dyn Reflect, value as &dyn Reflect)),
        )
    }

    fn make(&self, _capacity: usize) -> Box<dyn Reflect> {
        // B-trees take no size hint.
        Box::new(BTreeMap::<K, V>::new())
    }

    fn insert(
        &self,
        dst: &mut dyn Reflect,
        key: Box<dyn Reflect>,
        value: Box<dyn Reflect>,
    ) -> bool {
        let Some(dst) = dst.as_any_mut().downcast_mut::<BTreeMap<K, V>>() else {
            return false;
        };
        let (Some(key), Some(value)) = (take::<K>(key), take::<V>(value)) else {
            return false;
        };
        dst.insert(key, value);
        true
    }
}

// ── Arc<RwLock<T>> and Arc<Mutex<T>> ────────────────────────────────
//
// The thread-safe shared references. Lock poisoning is recovered so the
// clone operation stays total.

macro_rules! impl_arc_reference {
    ($cell:ident, $name:literal, $read:ident, $write:ident) => {
        impl<T: Reflect + Default> Reflect for Arc<$cell<T>> {
            fn shape() -> &'static Shape {
                const {
                    &Shape {
                        name: $name,
                        kind: Kind::Reference,
                        cloneable: None,
                    }
                }
            }

            fn value_shape(&self) -> &'static Shape {
                <Self as Reflect>::shape()
            }

            fn view(&self) -> View<'_> {
                View::Reference(self)
            }

            any_accessors!();
        }

        impl<T: Reflect + Default> RefOps for Arc<$cell<T>> {
            fn address(&self) -> usize {
                Arc::as_ptr(self) as *const () as usize
            }

            fn pointee_shape(&self) -> &'static Shape {
                T::shape()
            }

            fn alias(&self) -> Box<dyn Reflect> {
                Box::new(Arc::clone(self))
            }

            fn placeholder(&self) -> Box<dyn Reflect> {
                Box::new(Arc::new($cell::new(T::default())))
            }

            fn fill(
                &self,
                target: &mut dyn Reflect,
                walk: &mut dyn FnMut(&dyn Reflect) -> Box<dyn Reflect>,
            ) {
                let cloned = {
                    let guard = self.$read().unwrap_or_else(PoisonError::into_inner);
                    walk(&*guard)
                };
                let Some(target) = target.as_any_mut().downcast_mut::<Arc<$cell<T>>>() else {
                    return;
                };
                if let Some(value) = take::<T>(cloned) {
                    *target.$write().unwrap_or_else(PoisonError::into_inner) = value;
                }
            }
        }
    };
}

impl_arc_reference!(RwLock, "Arc<RwLock>", read, write);
impl_arc_reference!(Mutex, "Arc<Mutex>", lock, lock);

// ── Channel handles ─────────────────────────────────────────────────
//
// A sender is an identity, not data: the clone shares the channel.

impl<T: 'static> Reflect for Sender<T> {
    fn shape() -> &'static Shape {
        const {
            &Shape {
                name: "Sender",
                kind: Kind::Channel,
                cloneable: None,
            }
        }
    }

    fn value_shape(&self) -> &'static Shape {
        <Self as Reflect>::shape()
    }

    fn view(&self) -> View<'_> {
        View::Leaf
    }

    fn copy_value(&self) -> Option<Box<dyn Reflect>> {
        Some(Box::new(self.clone()))
    }

    any_accessors!();
}

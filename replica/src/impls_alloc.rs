//! `Reflect` implementations for `alloc` types: owned text, vectors, boxes,
//! erased-any boxes, and `Rc`-based shared references.

use std::cell::RefCell;
use std::rc::Rc;

use crate::macros::{any_accessors, impl_leaf};
use crate::reflect::{ListOps, RefOps, Reflect, UniqueOps, View, take};
use crate::shape::{Kind, Shape};

impl_leaf! { Scalar:
    String => "String",
}

// ── Vec ─────────────────────────────────────────────────────────────

impl<T: Reflect> Reflect for Vec<T> {
    fn shape() -> &'static Shape {
        const {
            &Shape {
                name: "Vec",
                kind: Kind::List,
                cloneable: None,
            }
        }
    }

    fn value_shape(&self) -> &'static Shape {
        <Self as Reflect>::shape()
    }

    fn view(&self) -> View<'_> {
        View::List(self)
    }

    any_accessors!();
}

impl<T: Reflect> ListOps for Vec<T> {
    fn len(&self) -> usize {
        Vec::len(self)
    }

    fn capacity(&self) -> usize {
        Vec::capacity(self)
    }

    fn element_shape(&self) -> &'static Shape {
        T::shape()
    }

    fn get(&self, index: usize) -> &dyn Reflect {
        &self[index]
    }

    fn make(&self, capacity: usize) -> Box<dyn Reflect> {
        Box::new(Vec::<T>::with_capacity(capacity))
    }

    fn push(&self, dst: &mut dyn Reflect, element: Box<dyn Reflect>) -> bool {
        let Some(dst) = dst.as_any_mut().downcast_mut::<Vec<T>>() else {
            return false;
        };
        let Some(element) = take::<T>(element) else {
            return false;
        };
        dst.push(element);
        true
    }
}

// ── Box<T> ──────────────────────────────────────────────────────────

impl<T: Reflect> Reflect for Box<T> {
    fn shape() -> &'static Shape {
        const {
            &Shape {
                name: "Box",
                kind: Kind::Unique,
                cloneable: None,
            }
        }
    }

    fn value_shape(&self) -> &'static Shape {
        <Self as Reflect>::shape()
    }

    fn view(&self) -> View<'_> {
        View::Unique(self)
    }

    any_accessors!();
}

impl<T: Reflect> UniqueOps for Box<T> {
    fn target(&self) -> &dyn Reflect {
        &**self
    }

    fn rebox(&self, value: Box<dyn Reflect>) -> Option<Box<dyn Reflect>> {
        take::<T>(value).map(|value| Box::new(Box::new(value)) as Box<dyn Reflect>)
    }
}

// ── Box<dyn Reflect>: the erased-any value ──────────────────────────

impl Reflect for Box<dyn Reflect> {
    fn shape() -> &'static Shape {
        const {
            &Shape {
                name: "dyn Reflect",
                kind: Kind::Any,
                cloneable: None,
            }
        }
    }

    fn value_shape(&self) -> &'static Shape {
        <Self as Reflect>::shape()
    }

    fn view(&self) -> View<'_> {
        View::Any(&**self)
    }

    any_accessors!();
}

// ── Rc<RefCell<T>>: the shared mutable reference ────────────────────
//
// `Default` on the pointee seeds the placeholder that makes cycles and
// self-references cloneable: the placeholder is registered in the visited
// table before the pointee is walked.

impl<T: Reflect + Default> Reflect for Rc<RefCell<T>> {
    fn shape() -> &'static Shape {
        const {
            &Shape {
                name: "Rc<RefCell>",
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

impl<T: Reflect + Default> RefOps for Rc<RefCell<T>> {
    fn address(&self) -> usize {
        Rc::as_ptr(self) as *const () as usize
    }

    fn pointee_shape(&self) -> &'static Shape {
        T::shape()
    }

    fn alias(&self) -> Box<dyn Reflect> {
        Box::new(Rc::clone(self))
    }

    fn placeholder(&self) -> Box<dyn Reflect> {
        Box::new(Rc::new(RefCell::new(T::default())))
    }

    fn fill(
        &self,
        target: &mut dyn Reflect,
        walk: &mut dyn FnMut(&dyn Reflect) -> Box<dyn Reflect>,
    ) {
        let cloned = walk(&*self.borrow());
        let Some(target) = target.as_any_mut().downcast_mut::<Rc<RefCell<T>>>() else {
            return;
        };
        if let Some(value) = take::<T>(cloned) {
            *target.borrow_mut() = value;
        }
    }
}

//! `Reflect` implementations for `core` types: scalars, function pointers,
//! raw addresses, fixed-length arrays, and `Option`.

use crate::macros::{any_accessors, impl_leaf};
use crate::reflect::{ArrayOps, OptionOps, Reflect, View, take};
use crate::shape::{Kind, Shape};

impl_leaf! { Scalar:
    bool => "bool",
    char => "char",
    () => "()",
    i8 => "i8",
    i16 => "i16",
    i32 => "i32",
    i64 => "i64",
    i128 => "i128",
    isize => "isize",
    u8 => "u8",
    u16 => "u16",
    u32 => "u32",
    u64 => "u64",
    u128 => "u128",
    usize => "usize",
    f32 => "f32",
    f64 => "f64",
    &'static str => "str",
}

// ── Function pointers ───────────────────────────────────────────────
//
// Identities, not data: copied as-is. Stamped for arities 0 through 3,
// which covers the function-valued fields that realistically occur in
// cloneable aggregates.

macro_rules! impl_fn_pointer {
    ($($($arg:ident),* ;)+) => {
        $(
            impl<$($arg: 'static,)* Ret: 'static> Reflect for fn($($arg),*) -> Ret {
                fn shape() -> &'static Shape {
                    const {
                        &Shape {
                            name: "fn",
                            kind: Kind::Function,
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
                    Some(Box::new(*self))
                }

                any_accessors!();
            }
        )+
    };
}

impl_fn_pointer! {
    ;
    A1;
    A1, A2;
    A1, A2, A3;
}

// ── Raw addresses ───────────────────────────────────────────────────

impl<T: 'static> Reflect for *const T {
    fn shape() -> &'static Shape {
        const {
            &Shape {
                name: "ptr",
                kind: Kind::Address,
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
        Some(Box::new(*self))
    }

    any_accessors!();
}

impl<T: 'static> Reflect for *mut T {
    fn shape() -> &'static Shape {
        const {
            &Shape {
                name: "ptr",
                kind: Kind::Address,
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
        Some(Box::new(*self))
    }

    any_accessors!();
}

// ── Fixed-length arrays ─────────────────────────────────────────────

impl<T: Reflect, const N: usize> Reflect for [T; N] {
    fn shape() -> &'static Shape {
        const {
            &Shape {
                name: "array",
                kind: Kind::Array,
                cloneable: None,
            }
        }
    }

    fn value_shape(&self) -> &'static Shape {
        <Self as Reflect>::shape()
    }

    fn view(&self) -> View<'_> {
        View::Array(self)
    }

    any_accessors!();
}

impl<T: Reflect, const N: usize> ArrayOps for [T; N] {
    fn len(&self) -> usize {
        N
    }

    fn element_shape(&self) -> &'static Shape {
        T::shape()
    }

    fn get(&self, index: usize) -> &dyn Reflect {
        &self[index]
    }

    fn assemble(&self, elements: Vec<Box<dyn Reflect>>) -> Option<Box<dyn Reflect>> {
        if elements.len() != N {
            return None;
        }
        let mut out = Vec::with_capacity(N);
        for element in elements {
            out.push(take::<T>(element)?);
        }
        let array: [T; N] = out.try_into().ok()?;
        Some(Box::new(array))
    }
}

// ── Option ──────────────────────────────────────────────────────────

impl<T: Reflect> Reflect for Option<T> {
    fn shape() -> &'static Shape {
        const {
            &Shape {
                name: "Option",
                kind: Kind::Optional,
                cloneable: None,
            }
        }
    }

    fn value_shape(&self) -> &'static Shape {
        <Self as Reflect>::shape()
    }

    fn view(&self) -> View<'_> {
        View::Optional(self)
    }

    any_accessors!();
}

impl<T: Reflect> OptionOps for Option<T> {
    fn inner(&self) -> Option<&dyn Reflect> {
        self.as_ref().map(|value| value as &dyn Reflect)
    }

    fn empty(&self) -> Box<dyn Reflect> {
        Box::new(None::<T>)
    }

    fn wrap(&self, value: Box<dyn Reflect>) -> Option<Box<dyn Reflect>> {
        take::<T>(value).map(|value| Box::new(Some(value)) as Box<dyn Reflect>)
    }
}

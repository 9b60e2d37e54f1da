//! Impl-stamping macros shared by the built-in `Reflect` implementations.

/// The three `Any` bridge methods every `Reflect` impl needs verbatim.
macro_rules! any_accessors {
    () => {
        fn as_any(&self) -> &dyn ::core::any::Any {
            self
        }

        fn as_any_mut(&mut self) -> &mut dyn ::core::any::Any {
            self
        }

        fn into_any(self: Box<Self>) -> Box<dyn ::core::any::Any> {
            self
        }
    };
}

/// Stamps a full `Reflect` impl for a copy-by-value leaf type.
///
/// `$kind` is the shape kind (`Scalar`, `Function`, …); the copy is made
/// with `Clone`, which for these types is a bitwise or handle copy.
macro_rules! impl_leaf {
    ($kind:ident: $($ty:ty => $name:literal),+ $(,)?) => {
        $(
            impl $crate::Reflect for $ty {
                fn shape() -> &'static $crate::Shape {
                    const {
                        &$crate::Shape {
                            name: $name,
                            kind: $crate::Kind::$kind,
                            cloneable: None,
                        }
                    }
                }

                fn value_shape(&self) -> &'static $crate::Shape {
                    <Self as $crate::Reflect>::shape()
                }

                fn view(&self) -> $crate::View<'_> {
                    $crate::View::Leaf
                }

                fn copy_value(&self) -> Option<Box<dyn $crate::Reflect>> {
                    Some(Box::new(self.clone()))
                }

                $crate::macros::any_accessors!();
            }
        )+
    };
}

pub(crate) use {any_accessors, impl_leaf};

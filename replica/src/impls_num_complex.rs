//! `Reflect` implementations for `num_complex` scalars, enabled by the
//! `num-complex` feature.

use num_complex::{Complex32, Complex64};

use crate::macros::impl_leaf;

impl_leaf! { Scalar:
    Complex32 => "Complex32",
    Complex64 => "Complex64",
}

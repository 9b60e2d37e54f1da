#![warn(missing_docs)]
#![doc = include_str!("../README.md")]

pub(crate) mod macros;

mod shape;
pub use shape::{FieldDef, Kind, Shape, StructDef};

mod reflect;
pub use reflect::{
    ArrayOps, Cloneable, ListOps, MapOps, OptionOps, RefOps, Reflect, StructOps, UniqueOps, View,
    take,
};

// Built-in impls for `core` types
mod impls_core;

// Built-in impls for `alloc` types
mod impls_alloc;

// Built-in impls for `std` types (that aren't in `alloc` or `core`)
mod impls_std;

#[cfg(feature = "num-complex")]
mod impls_num_complex;

mod cache;
pub use cache::{CacheStats, cache_stats, reset_cache};

mod walker;

mod clone;
pub use clone::deep_clone;

/// Derives [`Reflect`] for a struct.
///
/// Requires the type to implement [`Default`] (zero-valued aggregates seed
/// placeholders and backfill skipped fields). Supported attributes:
///
/// - `#[reflect(cloneable)]` on the struct registers the [`Cloneable`]
///   capability hook.
/// - `#[reflect(skip)]` on a field keeps it at its default value in every
///   clone, like a private field.
pub use replica_macros::Reflect;

//! Top-level dispatch: typed fast paths, capability hook, and the
//! reflective fallback.

use core::any::TypeId;
use std::collections::HashMap;
use std::hash::Hash;

use crate::reflect::{Reflect, View, reify, retag, take};
use crate::walker::Walker;

/// Creates a deep copy of `src`, preserving the complete object graph
/// including shared references and cycles.
///
/// Dispatch is hierarchical; the first layer that applies handles the call:
///
/// - Scalars (`i64`, `bool`, `String`, …) are copied directly, with no
///   reflection and — for `Copy` types — no allocation.
/// - Common sequence types (`Vec<i64>`, `Vec<String>`, …) take a bulk copy
///   that preserves both length and capacity.
/// - Common mapping types (`HashMap<String, String>`, …) take a size-hinted
///   rebuild.
/// - Types registering the [`Cloneable`](crate::Cloneable) capability
///   delegate to their own method.
/// - Everything else goes through the reflective walker with cycle
///   detection.
///
/// The operation is total: degenerate inputs (`None` options, channel
/// handles, function pointers, raw addresses) resolve to defined outputs
/// rather than errors.
///
/// ```
/// use replica::deep_clone;
///
/// let source = vec![vec![1i64, 2], vec![3]];
/// let mut clone = deep_clone(&source);
/// clone[0][0] = 99;
/// assert_eq!(source[0][0], 1);
/// ```
pub fn deep_clone<T: Reflect>(src: &T) -> T {
    if let Some(clone) = clone_scalar(src) {
        return clone;
    }
    if let Some(clone) = clone_sequence(src) {
        return clone;
    }
    if let Some(clone) = clone_mapping(src) {
        return clone;
    }

    // Capability hook: accepted only when the returned dynamic type matches
    // the requested one, otherwise dispatch falls through to the walker.
    if let Some(hook) = T::shape().cloneable {
        if let Some(custom) = hook(src) {
            // Payload type, not the erased box's.
            if (*custom).as_any().type_id() == TypeId::of::<T>() {
                if let Some(clone) = take::<T>(custom) {
                    return clone;
                }
            }
        }
    }

    // Empty optionals rebuild without allocating a visited table.
    if let View::Optional(opt) = src.view() {
        if opt.inner().is_none() {
            if let Some(clone) = take::<T>(opt.empty()) {
                return clone;
            }
        }
    }

    let mut walker = Walker::new();
    let cloned = walker.walk(src);
    match take::<T>(cloned) {
        Some(clone) => clone,
        None => unreachable!("the reflective walker preserves the dynamic type of its input"),
    }
}

/// Scalar short-circuit: a `TypeId`-identity switch over the recognised
/// scalar family.
fn clone_scalar<T: Reflect>(src: &T) -> Option<T> {
    macro_rules! try_scalars {
        ($($ty:ty),+ $(,)?) => {
            $(
                if let Some(value) = reify::<T, $ty>(src) {
                    return Some(retag::<$ty, T>(value.clone()));
                }
            )+
        };
    }

    try_scalars!(
        bool,
        char,
        (),
        i8,
        i16,
        i32,
        i64,
        i128,
        isize,
        u8,
        u16,
        u32,
        u64,
        u128,
        usize,
        f32,
        f64,
        String,
        &'static str,
    );

    #[cfg(feature = "num-complex")]
    try_scalars!(num_complex::Complex32, num_complex::Complex64);

    None
}

/// Sequence fast paths: capacity-preserving bulk copies for vectors of
/// scalar element type.
fn clone_sequence<T: Reflect>(src: &T) -> Option<T> {
    macro_rules! try_vecs {
        ($($elem:ty),+ $(,)?) => {
            $(
                if let Some(vec) = reify::<T, Vec<$elem>>(src) {
                    return Some(retag::<Vec<$elem>, T>(clone_vec_exact(vec)));
                }
            )+
        };
    }

    try_vecs!(bool, u8, i8, i16, i32, i64, isize, usize, u16, u32, u64, f32, f64, String);

    None
}

/// Mapping fast paths for the scalar-to-scalar specialisations.
///
/// `HashMap<_, Box<dyn Reflect>>` is deliberately absent: an erased value
/// may contain a reference that participates in a cycle, which only the
/// walker's visited table handles safely.
fn clone_mapping<T: Reflect>(src: &T) -> Option<T> {
    macro_rules! try_maps {
        ($(($key:ty, $value:ty)),+ $(,)?) => {
            $(
                if let Some(map) = reify::<T, HashMap<$key, $value>>(src) {
                    return Some(retag::<HashMap<$key, $value>, T>(clone_map_sized(map)));
                }
            )+
        };
    }

    try_maps!(
        (String, i64),
        (String, String),
        (String, f64),
        (String, bool),
        (i64, i64),
        (i64, String),
        (i64, bool),
    );

    None
}

/// Copies a vector preserving both length and capacity.
fn clone_vec_exact<E: Clone>(source: &Vec<E>) -> Vec<E> {
    let mut clone = Vec::with_capacity(source.capacity());
    clone.extend_from_slice(source);
    clone
}

/// Copies a hash map with an exact size hint.
fn clone_map_sized<K, V>(source: &HashMap<K, V>) -> HashMap<K, V>
where
    K: Clone + Eq + Hash,
    V: Clone,
{
    let mut clone = HashMap::with_capacity(source.len());
    clone.extend(source.iter().map(|(key, value)| (key.clone(), value.clone())));
    clone
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scalar_fast_path_hits() {
        assert_eq!(clone_scalar(&42i64), Some(42));
        assert_eq!(clone_scalar(&String::from("x")), Some(String::from("x")));
        assert_eq!(clone_scalar(&vec![1i64]), None);
    }

    #[test]
    fn sequence_fast_path_preserves_capacity() {
        let mut source = Vec::with_capacity(32);
        source.extend([1i64, 2, 3]);
        let clone = clone_sequence(&source).unwrap();
        assert_eq!(clone, source);
        assert_eq!(clone.capacity(), 32);
        assert_ne!(clone.as_ptr(), source.as_ptr());
    }

    #[test]
    fn mapping_fast_path_hits() {
        let mut source = HashMap::new();
        source.insert(String::from("a"), 1i64);
        let clone = clone_mapping(&source).unwrap();
        assert_eq!(clone, source);
    }
}

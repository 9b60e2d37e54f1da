//! The process-wide field-action cache.
//!
//! Cloning an aggregate consults a per-type descriptor that records, for
//! each field, whether a direct copy suffices or a recursive clone is
//! needed. Descriptors are computed once per distinct aggregate type and
//! shared between threads behind a read/write lock.
//!
//! Eviction is unnecessary: the cache is keyed by [`TypeId`], which the
//! runtime interns, so the entry count is bounded by the number of distinct
//! aggregate types the process ever introspects — finite and fixed at
//! compile time. [`reset_cache`] exists to reclaim memory in tests and
//! long-lived processes.

use core::any::TypeId;
use std::collections::HashMap;
use std::sync::{Arc, LazyLock, PoisonError, RwLock};

use crate::shape::FieldDef;

/// Per-field decision, computed once per aggregate type.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub(crate) enum FieldAction {
    /// Direct assignment: scalars, function pointers, channel handles,
    /// raw addresses, and inaccessible fields.
    Copy,
    /// Recursive clone: everything that can reach other values.
    Clone,
}

/// Cached descriptor for one aggregate type.
pub(crate) struct StructInfo {
    pub(crate) fields: &'static [FieldDef],
    pub(crate) actions: Vec<FieldAction>,
}

static CACHE: LazyLock<RwLock<HashMap<TypeId, Arc<StructInfo>>>> =
    LazyLock::new(|| RwLock::new(HashMap::new()));

/// Returns the cached descriptor for the aggregate type identified by
/// `key`, computing and publishing it on first access.
///
/// Double-checked: the read lock covers the hot path; a miss re-checks
/// under the write lock because another writer may have published the
/// descriptor in between.
pub(crate) fn describe(
    key: TypeId,
    name: &'static str,
    fields: &'static [FieldDef],
) -> Arc<StructInfo> {
    {
        let cache = CACHE.read().unwrap_or_else(PoisonError::into_inner);
        if let Some(info) = cache.get(&key) {
            return Arc::clone(info);
        }
    }

    let mut cache = CACHE.write().unwrap_or_else(PoisonError::into_inner);
    if let Some(info) = cache.get(&key) {
        return Arc::clone(info);
    }

    let actions = fields
        .iter()
        .map(|field| {
            if !field.public || (field.shape)().is_copy_kind() {
                FieldAction::Copy
            } else {
                FieldAction::Clone
            }
        })
        .collect();

    log::trace!(
        "caching field actions for {name} ({} fields)",
        fields.len()
    );

    let info = Arc::new(StructInfo { fields, actions });
    cache.insert(key, Arc::clone(&info));
    info
}

/// Occupancy of the field-action cache, as reported by [`cache_stats`].
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct CacheStats {
    /// Number of cached aggregate-type descriptors.
    pub entries: usize,
    /// Total field count across all cached descriptors.
    pub fields: usize,
}

/// Reports the current cache occupancy. Safe for concurrent use.
pub fn cache_stats() -> CacheStats {
    let cache = CACHE.read().unwrap_or_else(PoisonError::into_inner);
    CacheStats {
        entries: cache.len(),
        fields: cache.values().map(|info| info.fields.len()).sum(),
    }
}

/// Clears the field-action cache; subsequent clones repopulate it on
/// demand. Safe for concurrent use.
pub fn reset_cache() {
    let mut cache = CACHE.write().unwrap_or_else(PoisonError::into_inner);
    cache.clear();
    log::debug!("field-action cache cleared");
}

//! Administration of the field-action cache: stats, reset, and bounded
//! growth.
//!
//! These tests observe global cache state, so they serialize on a
//! file-local lock; the test harness otherwise runs them in parallel
//! threads of one process.

use std::sync::Mutex;

use replica::{Reflect, deep_clone, cache_stats, reset_cache};

static CACHE_GUARD: Mutex<()> = Mutex::new(());

fn exclusive() -> std::sync::MutexGuard<'static, ()> {
    CACHE_GUARD.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

// ── Test types ──────────────────────────────────────────────────────

#[derive(Reflect, Default)]
struct TwoFields {
    a: i64,
    b: String,
}

#[derive(Reflect, Default)]
struct ThreeFields {
    x: f64,
    y: f64,
    z: f64,
}

#[derive(Reflect, Default)]
struct OneField {
    v: i64,
}

macro_rules! distinct_types {
    ($($name:ident),+ $(,)?) => {
        $(
            #[derive(Reflect, Default)]
            struct $name {
                value: i64,
                label: String,
            }
        )+

        /// Clones one value of each of the distinct aggregate types.
        fn clone_every_distinct_type() {
            $(
                let _ = deep_clone(&$name::default());
            )+
        }

        const DISTINCT_TYPE_COUNT: usize = [$(stringify!($name)),+].len();
    };
}

distinct_types!(
    D01, D02, D03, D04, D05, D06, D07, D08, D09, D10, //
    D11, D12, D13, D14, D15, D16, D17, D18, D19, D20, //
    D21, D22, D23, D24, D25, D26, D27, D28, D29, D30, //
    D31, D32, D33, D34, D35, D36, D37, D38, D39, D40, //
    D41, D42, D43, D44, D45, D46, D47, D48, D49, D50,
);

// ── Stats ───────────────────────────────────────────────────────────

#[test]
fn stats_count_entries_and_fields() {
    let _guard = exclusive();
    reset_cache();

    let stats = cache_stats();
    assert_eq!(stats.entries, 0);
    assert_eq!(stats.fields, 0);

    deep_clone(&TwoFields::default());
    let stats = cache_stats();
    assert_eq!(stats.entries, 1);
    assert_eq!(stats.fields, 2);

    deep_clone(&ThreeFields::default());
    let stats = cache_stats();
    assert_eq!(stats.entries, 2);
    assert_eq!(stats.fields, 5);

    reset_cache();
}

#[test]
fn stats_are_idempotent_across_repeated_clones() {
    let _guard = exclusive();
    reset_cache();

    for _ in 0..100 {
        deep_clone(&OneField { v: 42 });
    }

    let stats = cache_stats();
    assert_eq!(stats.entries, 1, "same type cloned 100x produces one entry");
    assert_eq!(stats.fields, 1);

    reset_cache();
}

// ── Reset ───────────────────────────────────────────────────────────

#[test]
fn reset_clears_and_repopulates_on_demand() {
    let _guard = exclusive();
    reset_cache();

    deep_clone(&OneField { v: 1 });
    assert_eq!(cache_stats().entries, 1);

    reset_cache();
    assert_eq!(cache_stats().entries, 0);

    deep_clone(&OneField { v: 2 });
    assert_eq!(cache_stats().entries, 1);

    reset_cache();
}

// ── Bounded growth ──────────────────────────────────────────────────

#[test]
fn growth_is_bounded_by_distinct_types() {
    let _guard = exclusive();
    reset_cache();

    clone_every_distinct_type();
    let first = cache_stats();
    assert_eq!(first.entries, DISTINCT_TYPE_COUNT);
    assert_eq!(first.fields, DISTINCT_TYPE_COUNT * 2);

    // Cloning the same types repeatedly adds nothing.
    for _ in 0..100 {
        clone_every_distinct_type();
    }
    let second = cache_stats();
    assert_eq!(second.entries, first.entries);
    assert_eq!(second.fields, first.fields);

    reset_cache();
}

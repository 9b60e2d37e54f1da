//! The `Cloneable` capability hook: delegation, observable side effects,
//! and fall-through when the hook returns a foreign type.

use replica::{Cloneable, Reflect, deep_clone};

// ── Test types ──────────────────────────────────────────────────────

#[derive(Reflect, Default, Debug, PartialEq)]
#[reflect(cloneable)]
struct Counter {
    value: i64,
    name: String,
}

impl Cloneable for Counter {
    fn clone_value(&self) -> Box<dyn Reflect> {
        Box::new(Counter {
            value: self.value + 1,
            name: format!("{}_copy", self.name),
        })
    }
}

#[derive(Reflect, Default, Debug, PartialEq)]
struct Document {
    title: String,
    content: Vec<u8>,
    revision: Counter,
}

/// A hook that returns a value of a different dynamic type; dispatch must
/// fall through to the reflective walker.
#[derive(Reflect, Default, Debug, PartialEq)]
#[reflect(cloneable)]
struct Sneaky {
    value: i64,
}

impl Cloneable for Sneaky {
    fn clone_value(&self) -> Box<dyn Reflect> {
        Box::new(String::from("not a Sneaky"))
    }
}

// ── Delegation ──────────────────────────────────────────────────────

#[test]
fn capability_hook_replaces_the_walker() {
    let source = Counter {
        value: 10,
        name: "main".into(),
    };
    let cloned = deep_clone(&source);
    assert_eq!(
        cloned,
        Counter {
            value: 11,
            name: "main_copy".into(),
        }
    );
    // The source is untouched.
    assert_eq!(source.value, 10);
}

#[test]
fn capability_hook_applies_only_at_top_level() {
    // Nested occurrences go through the walker's field actions, matching
    // the dispatch contract: the hook is a top-level entry point.
    let source = Document {
        title: "notes".into(),
        content: vec![1, 2, 3],
        revision: Counter {
            value: 5,
            name: "rev".into(),
        },
    };
    let cloned = deep_clone(&source);
    assert_eq!(cloned.revision.value, 5);
    assert_eq!(cloned.revision.name, "rev");
}

#[test]
fn repeated_hook_clones_compound() {
    let first = deep_clone(&Counter {
        value: 0,
        name: "c".into(),
    });
    let second = deep_clone(&first);
    assert_eq!(second.value, 2);
    assert_eq!(second.name, "c_copy_copy");
}

// ── Fall-through ────────────────────────────────────────────────────

#[test]
fn foreign_hook_result_falls_through_to_the_walker() {
    let source = Sneaky { value: 42 };
    let cloned = deep_clone(&source);
    assert_eq!(cloned, Sneaky { value: 42 });
}

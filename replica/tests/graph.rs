//! Object-graph shape preservation: cycles, diamonds, self-references, and
//! independence of the cloned graph from its source.

use std::cell::RefCell;
use std::rc::Rc;

use replica::{Reflect, deep_clone};

// ── Test types ──────────────────────────────────────────────────────

#[derive(Reflect, Default, Debug)]
struct Node {
    id: i64,
    next: Option<Rc<RefCell<Node>>>,
}

#[derive(Reflect, Default, Debug)]
struct Diamond {
    a: Rc<RefCell<i64>>,
    b: Rc<RefCell<i64>>,
}

#[derive(Reflect, Default, Debug)]
struct Tree {
    value: i64,
    children: Vec<Rc<RefCell<Tree>>>,
}

fn node(id: i64) -> Rc<RefCell<Node>> {
    Rc::new(RefCell::new(Node { id, next: None }))
}

// ── Cycles ──────────────────────────────────────────────────────────

#[test]
fn clone_two_node_cycle() {
    // n1 -> n2 -> n1
    let n1 = node(1);
    let n2 = node(2);
    n1.borrow_mut().next = Some(Rc::clone(&n2));
    n2.borrow_mut().next = Some(Rc::clone(&n1));

    let cloned = deep_clone(&n1);

    assert!(!Rc::ptr_eq(&cloned, &n1));
    assert_eq!(cloned.borrow().id, 1);

    let second = cloned.borrow().next.clone().unwrap();
    assert!(!Rc::ptr_eq(&second, &n2));
    assert_eq!(second.borrow().id, 2);

    // The cycle closes on the clone, not the source.
    let back = second.borrow().next.clone().unwrap();
    assert!(Rc::ptr_eq(&back, &cloned));
}

#[test]
fn clone_self_referencing_node() {
    let lone = node(7);
    lone.borrow_mut().next = Some(Rc::clone(&lone));

    let cloned = deep_clone(&lone);

    assert!(!Rc::ptr_eq(&cloned, &lone));
    let next = cloned.borrow().next.clone().unwrap();
    assert!(Rc::ptr_eq(&next, &cloned));
}

#[test]
fn clone_long_chain_cycle() {
    let chain: Vec<_> = (0..5i64).map(node).collect();
    for window in chain.windows(2) {
        window[0].borrow_mut().next = Some(Rc::clone(&window[1]));
    }
    chain[4].borrow_mut().next = Some(Rc::clone(&chain[0]));

    let cloned = deep_clone(&chain[0]);

    let mut cursor = Rc::clone(&cloned);
    for expected in [0i64, 1, 2, 3, 4] {
        assert_eq!(cursor.borrow().id, expected);
        let next = cursor.borrow().next.clone().unwrap();
        cursor = next;
    }
    // Five hops return to the cloned head.
    assert!(Rc::ptr_eq(&cursor, &cloned));
}

// ── Shared references ───────────────────────────────────────────────

#[test]
fn clone_shared_reference_diamond() {
    let shared = Rc::new(RefCell::new(99i64));
    let source = Diamond {
        a: Rc::clone(&shared),
        b: Rc::clone(&shared),
    };

    let cloned = deep_clone(&source);

    assert_eq!(*cloned.a.borrow(), 99);
    assert_eq!(*cloned.b.borrow(), 99);
    assert!(Rc::ptr_eq(&cloned.a, &cloned.b));
    assert!(!Rc::ptr_eq(&cloned.a, &shared));
}

#[test]
fn clone_shared_references_in_sequence() {
    let shared = Rc::new(RefCell::new(5i64));
    let source = vec![Rc::clone(&shared), Rc::clone(&shared), Rc::clone(&shared)];

    let cloned = deep_clone(&source);

    assert!(Rc::ptr_eq(&cloned[0], &cloned[1]));
    assert!(Rc::ptr_eq(&cloned[1], &cloned[2]));
    assert!(!Rc::ptr_eq(&cloned[0], &source[0]));
}

#[test]
fn distinct_allocations_stay_distinct() {
    let source = Diamond {
        a: Rc::new(RefCell::new(1)),
        b: Rc::new(RefCell::new(1)),
    };
    let cloned = deep_clone(&source);
    assert!(!Rc::ptr_eq(&cloned.a, &cloned.b));
}

#[test]
fn clone_dag_through_nested_nodes() {
    // Two branches meeting at one shared leaf.
    let leaf = Rc::new(RefCell::new(Tree {
        value: 3,
        children: Vec::new(),
    }));
    let root = Tree {
        value: 1,
        children: vec![
            Rc::new(RefCell::new(Tree {
                value: 2,
                children: vec![Rc::clone(&leaf)],
            })),
            Rc::new(RefCell::new(Tree {
                value: 4,
                children: vec![Rc::clone(&leaf)],
            })),
        ],
    };

    let cloned = deep_clone(&root);

    let left_leaf = cloned.children[0].borrow().children[0].clone();
    let right_leaf = cloned.children[1].borrow().children[0].clone();
    assert!(Rc::ptr_eq(&left_leaf, &right_leaf));
    assert!(!Rc::ptr_eq(&left_leaf, &leaf));
    assert_eq!(left_leaf.borrow().value, 3);
}

// ── Independence ────────────────────────────────────────────────────

#[test]
fn cloned_graph_never_observes_source_mutation() {
    let n1 = node(1);
    n1.borrow_mut().next = Some(Rc::clone(&n1));

    let cloned = deep_clone(&n1);

    n1.borrow_mut().id = 1000;
    assert_eq!(cloned.borrow().id, 1);

    *cloned.borrow_mut() = Node {
        id: 2000,
        next: None,
    };
    assert_eq!(n1.borrow().id, 1000);
}

#[test]
fn shared_reference_clone_across_two_calls_is_not_shared() {
    let shared = Rc::new(RefCell::new(1i64));
    let first = deep_clone(&shared);
    let second = deep_clone(&shared);
    assert!(!Rc::ptr_eq(&first, &second));
}

// ── Thread-safe references ──────────────────────────────────────────

#[test]
fn clone_arc_rwlock_graphs() {
    use std::sync::{Arc, RwLock};

    let shared = Arc::new(RwLock::new(vec![1i64, 2]));
    let source = vec![Arc::clone(&shared), Arc::clone(&shared)];

    let cloned = deep_clone(&source);

    assert!(Arc::ptr_eq(&cloned[0], &cloned[1]));
    assert!(!Arc::ptr_eq(&cloned[0], &shared));
    assert_eq!(*cloned[0].read().unwrap(), vec![1, 2]);

    cloned[0].write().unwrap().push(3);
    assert_eq!(shared.read().unwrap().len(), 2);
}

#[test]
fn clone_arc_mutex_values() {
    use std::sync::{Arc, Mutex};

    let source = Arc::new(Mutex::new(String::from("locked")));
    let cloned = deep_clone(&source);

    assert!(!Arc::ptr_eq(&cloned, &source));
    assert_eq!(*cloned.lock().unwrap(), "locked");
}

//! Cloning a cyclic structure: the clone closes its own cycle instead of
//! pointing back into the source.

use std::cell::RefCell;
use std::rc::Rc;

use replica::{Reflect, deep_clone};

#[derive(Reflect, Default, Debug)]
struct Node {
    id: i64,
    next: Option<Rc<RefCell<Node>>>,
}

fn main() {
    println!("=== circular reference example ===\n");

    // Two nodes pointing at each other.
    let node1 = Rc::new(RefCell::new(Node { id: 1, next: None }));
    let node2 = Rc::new(RefCell::new(Node { id: 2, next: None }));
    node1.borrow_mut().next = Some(Rc::clone(&node2));
    node2.borrow_mut().next = Some(Rc::clone(&node1));

    let cloned = deep_clone(&node1);

    let second = cloned.borrow().next.clone().unwrap();
    let third = second.borrow().next.clone().unwrap();

    println!(
        "original: {} -> {} -> {}",
        node1.borrow().id,
        node2.borrow().id,
        node1.borrow().id,
    );
    println!(
        "cloned:   {} -> {} -> {}",
        cloned.borrow().id,
        second.borrow().id,
        third.borrow().id,
    );
    println!(
        "cycle closes on the clone itself: {}",
        Rc::ptr_eq(&third, &cloned),
    );
    println!(
        "clone is independent of the source: {}",
        !Rc::ptr_eq(&cloned, &node1),
    );
}

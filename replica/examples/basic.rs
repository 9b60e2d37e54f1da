//! Basic usage: scalars, sequences, mappings, and aggregates.

use std::collections::HashMap;

use replica::{Reflect, deep_clone};

#[derive(Reflect, Default, Debug)]
struct User {
    name: String,
    age: i64,
    friends: Vec<String>,
    metadata: HashMap<String, String>,
}

fn main() {
    println!("=== replica basic examples ===\n");

    println!("1. Scalars:");
    let original = 42i64;
    let cloned = deep_clone(&original);
    println!("   original: {original}, cloned: {cloned}\n");

    println!("2. Sequences:");
    let mut numbers = vec![1i64, 2, 3, 4, 5];
    let cloned = deep_clone(&numbers);
    numbers[0] = 999;
    println!("   original after mutation: {numbers:?}");
    println!("   cloned stays intact:     {cloned:?}\n");

    println!("3. Mappings:");
    let mut scores: HashMap<String, i64> = HashMap::new();
    scores.insert("alice".into(), 90);
    scores.insert("bob".into(), 85);
    let mut cloned = deep_clone(&scores);
    cloned.insert("carol".into(), 77);
    println!("   original: {} entries", scores.len());
    println!("   cloned:   {} entries\n", cloned.len());

    println!("4. Aggregates:");
    let user = User {
        name: "alice".into(),
        age: 30,
        friends: vec!["bob".into(), "carol".into()],
        metadata: HashMap::from([("team".into(), "storage".into())]),
    };
    let mut cloned = deep_clone(&user);
    cloned.friends.push("dave".into());
    println!("   original friends: {:?}", user.friends);
    println!("   cloned friends:   {:?}", cloned.friends);
}

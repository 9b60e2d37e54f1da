//! The `Cloneable` capability: a type that augments its own clones.

use replica::{Cloneable, Reflect, deep_clone};

#[derive(Reflect, Default, Debug)]
#[reflect(cloneable)]
struct Document {
    title: String,
    content: Vec<u8>,
    generation: i64,
}

impl Cloneable for Document {
    fn clone_value(&self) -> Box<dyn Reflect> {
        Box::new(Document {
            title: self.title.clone(),
            content: deep_clone(&self.content),
            generation: self.generation + 1,
        })
    }
}

fn main() {
    println!("=== custom capability example ===\n");

    let original = Document {
        title: "design notes".into(),
        content: vec![0xde, 0xad, 0xbe, 0xef],
        generation: 1,
    };

    let cloned = deep_clone(&original);

    println!("original generation: {}", original.generation);
    println!("cloned generation:   {}", cloned.generation);
    println!("same content:        {}", cloned.content == original.content);
}

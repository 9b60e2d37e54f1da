//! The reflective walker: recursive kind-dispatched cloning with a
//! per-invocation visited-object table.

use std::collections::HashMap;

use crate::cache::{self, FieldAction};
use crate::reflect::{
    ArrayOps, ListOps, MapOps, RefOps, Reflect, StructOps, View,
};
use crate::shape::Shape;

/// Pre-sizing for the visited table; covers the common shallow graphs
/// without a rehash.
const VISITED_CAPACITY: usize = 8;

/// Per-invocation clone state.
///
/// `visited` maps the address of a source reference's backing allocation to
/// the clone already created for it. Three things fall out of that one map:
/// cycles terminate, shared references stay shared, and a second arrival at
/// an allocation reuses the first clone.
pub(crate) struct Walker {
    visited: HashMap<usize, Box<dyn Reflect>>,
}

impl Walker {
    pub(crate) fn new() -> Self {
        Self {
            visited: HashMap::with_capacity(VISITED_CAPACITY),
        }
    }

    /// Clones `value`, dispatching on its introspected kind.
    pub(crate) fn walk(&mut self, value: &dyn Reflect) -> Box<dyn Reflect> {
        match value.view() {
            View::Leaf => match value.copy_value() {
                Some(copy) => copy,
                None => unreachable!(
                    "leaf kind without a copy: {}",
                    value.value_shape().name
                ),
            },
            View::Reference(ops) => self.walk_reference(ops),
            View::Unique(ops) => {
                let target = self.walk(ops.target());
                match ops.rebox(target) {
                    Some(cloned) => cloned,
                    None => unreachable!("walked pointee preserves its type"),
                }
            }
            View::Optional(ops) => match ops.inner() {
                None => ops.empty(),
                Some(inner) => {
                    let cloned = self.walk(inner);
                    ops.wrap(cloned).unwrap_or_else(|| ops.empty())
                }
            },
            View::List(ops) => self.walk_list(ops),
            View::Map(ops) => self.walk_map(ops),
            View::Array(ops) => self.walk_array(ops),
            View::Struct(ops) => self.walk_struct(value.value_shape(), ops),
            // An erased value clones as its inner concrete value; slot
            // assignment re-erases where the destination requires it.
            View::Any(inner) => self.walk(inner),
        }
    }

    /// A visited-table hit returns an alias of the existing clone; a miss
    /// registers a placeholder *before* descending so that self-references
    /// resolve to the new allocation, not the source.
    fn walk_reference(&mut self, ops: &dyn RefOps) -> Box<dyn Reflect> {
        let address = ops.address();

        // NB: visited entries are `Box<dyn Reflect>`, which has its own
        // erased-any `Reflect` impl; views must be taken through the
        // payload, not the box.
        if let Some(prior) = self.visited.get(&address) {
            if let View::Reference(prior) = (**prior).view() {
                return prior.alias();
            }
        }

        let mut fresh = ops.placeholder();
        if let View::Reference(handle) = (*fresh).view() {
            HashMap::insert(&mut self.visited, address, handle.alias());
        }
        ops.fill(&mut *fresh, &mut |pointee| self.walk(pointee));
        fresh
    }

    fn walk_list(&mut self, ops: &dyn ListOps) -> Box<dyn Reflect> {
        let len = ops.len();
        let mut out = ops.make(ops.capacity());

        if ops.element_shape().is_copy_kind() {
            // Scalar elements: copy-only inner loop, no recursive dispatch.
            for index in 0..len {
                if let Some(copy) = ops.get(index).copy_value() {
                    ops.push(&mut *out, copy);
                }
            }
        } else {
            for index in 0..len {
                let cloned = self.walk(ops.get(index));
                ops.push(&mut *out, cloned);
            }
        }
        out
    }

    fn walk_map(&mut self, ops: &dyn MapOps) -> Box<dyn Reflect> {
        let mut out = ops.make(ops.len());
        for (key, value) in ops.entries() {
            let key = self.walk(key);
            let value = self.walk(value);
            // A mismatched entry is dropped rather than aborting the clone.
            ops.insert(&mut *out, key, value);
        }
        out
    }

    fn walk_array(&mut self, ops: &dyn ArrayOps) -> Box<dyn Reflect> {
        let len = ops.len();
        let mut elements = Vec::with_capacity(len);
        for index in 0..len {
            Vec::push(&mut elements, self.walk(ops.get(index)));
        }
        match ops.assemble(elements) {
            Some(cloned) => cloned,
            None => unreachable!("walked elements preserve their types"),
        }
    }

    fn walk_struct(&mut self, shape: &'static Shape, ops: &dyn StructOps) -> Box<dyn Reflect> {
        let info = cache::describe(ops.type_key(), shape.name, ops.fields());
        let mut out = ops.make();

        for (index, action) in info.actions.iter().enumerate() {
            let field = &info.fields[index];
            if !field.public {
                // Inaccessible fields stay at their default value.
                continue;
            }
            match action {
                FieldAction::Copy => {
                    if let Some(copy) = ops.field(index).copy_value() {
                        (field.set)(&mut *out, copy);
                    }
                }
                FieldAction::Clone => {
                    let cloned = self.walk(ops.field(index));
                    (field.set)(&mut *out, cloned);
                }
            }
        }
        out
    }
}

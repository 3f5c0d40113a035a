//! Heap: arena of class instances and arrays addressed by handle.
//!
//! A `Value::Ref` holds the handle. Copying the value copies the handle, so
//! two variables referring to the same object observe each other's field
//! writes, matching reference semantics.

use super::value::Value;
use crate::parser::ast::Type;
use rustc_hash::FxHashMap;

/// An allocated object
#[derive(Debug, Clone)]
pub enum HeapObject {
    Instance {
        class: String,
        fields: FxHashMap<String, Value>,
    },
    Array {
        elem_type: Type,
        elements: Vec<Value>,
    },
}

/// The object heap. Handles are never reused; programs run to completion
/// and the arena is dropped wholesale.
#[derive(Debug, Default)]
pub struct Heap {
    objects: Vec<HeapObject>,
}

impl Heap {
    pub fn new() -> Self {
        Self {
            objects: Vec::new(),
        }
    }

    pub fn allocate(&mut self, object: HeapObject) -> usize {
        self.objects.push(object);
        self.objects.len() - 1
    }

    pub fn get(&self, handle: usize) -> Option<&HeapObject> {
        self.objects.get(handle)
    }

    pub fn get_mut(&mut self, handle: usize) -> Option<&mut HeapObject> {
        self.objects.get_mut(handle)
    }

    /// Class name of the instance behind a handle, if it is one
    pub fn class_of(&self, handle: usize) -> Option<&str> {
        match self.objects.get(handle)? {
            HeapObject::Instance { class, .. } => Some(class),
            HeapObject::Array { .. } => None,
        }
    }
}

//! Append-only type and object collections.
//!
//! # Index discipline
//! Types and objects are addressed everywhere by raw 1-based index with no
//! generation check. Types are never removed. Objects split at the dynamic
//! mark: static objects `1..dynamic` live for the whole process, dynamic
//! objects `dynamic..=len` are appended by `create` and removed tail-first
//! only, so every lower index stays valid.

use std::rc::Rc;

use crate::{
    error::{ArchetypeError, ArchetypeResult},
    syntax::{expression::Expr, statement::Stmt},
};

/// Name recorded for objects that were created before any identifier
/// claimed them.
pub const NULL_NAME: &str = "null";

#[derive(Debug, Clone, PartialEq)]
pub struct Attribute {
    pub id: usize,
    pub value: Rc<Expr>,
}

impl Attribute {
    pub fn new(id: usize, value: Expr) -> Self {
        Self {
            id,
            value: Rc::new(value),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Method {
    pub message: usize,
    pub body: Rc<Stmt>,
}

impl Method {
    pub fn new(message: usize, body: Stmt) -> Self {
        Self {
            message,
            body: Rc::new(body),
        }
    }
}

/// Shared shape of type definitions and object instances.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Definition {
    /// Parent type index; 0 means no parent.
    pub parent: usize,
    pub attributes: Vec<Attribute>,
    pub methods: Vec<Method>,
    /// Default handler, run when no ancestor handles a message explicitly.
    pub others: Option<Rc<Stmt>>,
}

pub type TypeDef = Definition;
pub type ObjectDef = Definition;

impl Definition {
    pub fn with_parent(parent: usize) -> Self {
        Self {
            parent,
            ..Self::default()
        }
    }

    pub fn attribute(mut self, id: usize, value: Expr) -> Self {
        self.attributes.push(Attribute::new(id, value));
        self
    }

    pub fn method(mut self, message: usize, body: Stmt) -> Self {
        self.methods.push(Method::new(message, body));
        self
    }

    pub fn others(mut self, body: Stmt) -> Self {
        self.others = Some(Rc::new(body));
        self
    }

    pub fn find_method(&self, message: usize) -> Option<&Rc<Stmt>> {
        self.methods
            .iter()
            .find(|method| method.message == message)
            .map(|method| &method.body)
    }

    pub fn find_attribute(&self, id: usize) -> Option<usize> {
        self.attributes.iter().position(|attr| attr.id == id)
    }
}

/// Something that can own attributes and methods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Owner {
    Object(usize),
    Type(usize),
}

/// Walks a definition and its parent types, nearest first.
///
/// Parent links always point at an earlier type, but a corrupted link could
/// still loop; the walk stops after visiting every type once.
pub struct Ancestry<'a> {
    store: &'a ObjectStore,
    next: Option<Owner>,
    remaining: usize,
}

impl<'a> Iterator for Ancestry<'a> {
    type Item = &'a Definition;

    fn next(&mut self) -> Option<&'a Definition> {
        let owner = self.next.take()?;
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        let def = match owner {
            Owner::Object(index) => self.store.object(index)?,
            Owner::Type(index) => self.store.type_def(index)?,
        };
        if def.parent != 0 {
            self.next = Some(Owner::Type(def.parent));
        }
        Some(def)
    }
}

#[derive(Debug, Clone)]
pub struct ObjectStore {
    types: Vec<TypeDef>,
    type_names: Vec<String>,
    objects: Vec<ObjectDef>,
    object_names: Vec<String>,
    dynamic: usize,
}

impl Default for ObjectStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ObjectStore {
    pub fn new() -> Self {
        Self {
            types: Vec::new(),
            type_names: Vec::new(),
            objects: Vec::new(),
            object_names: Vec::new(),
            dynamic: 1,
        }
    }

    pub fn push_type(&mut self, name: &str, def: TypeDef) -> usize {
        self.types.push(def);
        self.type_names.push(name.to_string());
        self.types.len()
    }

    /// Appends an object with no name yet.
    pub fn push_object(&mut self, def: ObjectDef) -> usize {
        self.objects.push(def);
        self.objects.len()
    }

    /// Appends a named object, first padding the name collection with
    /// [`NULL_NAME`] for unnamed objects appended since the last call so
    /// that names and objects stay index-aligned.
    pub fn push_named_object(&mut self, name: &str, def: ObjectDef) -> usize {
        while self.object_names.len() < self.objects.len() {
            self.object_names.push(NULL_NAME.to_string());
        }
        self.objects.push(def);
        self.object_names.push(name.to_string());
        self.objects.len()
    }

    pub fn type_def(&self, index: usize) -> Option<&TypeDef> {
        index.checked_sub(1).and_then(|i| self.types.get(i))
    }

    pub fn object(&self, index: usize) -> Option<&ObjectDef> {
        index.checked_sub(1).and_then(|i| self.objects.get(i))
    }

    pub fn object_mut(&mut self, index: usize) -> Option<&mut ObjectDef> {
        index.checked_sub(1).and_then(|i| self.objects.get_mut(i))
    }

    pub fn type_name(&self, index: usize) -> Option<&str> {
        index
            .checked_sub(1)
            .and_then(|i| self.type_names.get(i))
            .map(String::as_str)
    }

    /// Registered name of an object, `None` for objects nobody named.
    pub fn object_name(&self, index: usize) -> Option<&str> {
        index
            .checked_sub(1)
            .and_then(|i| self.object_names.get(i))
            .map(String::as_str)
    }

    pub fn type_count(&self) -> usize {
        self.types.len()
    }

    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    /// First dynamic object index.
    pub fn dynamic(&self) -> usize {
        self.dynamic
    }

    pub fn static_count(&self) -> usize {
        self.dynamic - 1
    }

    pub fn is_dynamic(&self, index: usize) -> bool {
        index >= self.dynamic && index <= self.objects.len()
    }

    /// Marks every object present now as static.
    pub fn seal(&mut self) {
        self.dynamic = self.objects.len() + 1;
    }

    /// Appends a dynamic object of type `parent`.
    pub fn create(&mut self, parent: usize) -> ArchetypeResult<usize> {
        if self.type_def(parent).is_none() {
            return Err(ArchetypeError::UnknownType(parent));
        }
        Ok(self.push_object(ObjectDef::with_parent(parent)))
    }

    /// Removes a dynamic object. Only the current tail may go.
    pub fn destroy(&mut self, index: usize) -> ArchetypeResult<()> {
        let tail = self.objects.len();
        if index == 0 || index > tail {
            return Err(ArchetypeError::UnknownObject(index));
        }
        if index < self.dynamic {
            return Err(ArchetypeError::StaticObject(index));
        }
        if index != tail {
            return Err(ArchetypeError::NotTail { index, tail });
        }
        self.objects.pop();
        self.object_names.truncate(self.objects.len());
        Ok(())
    }

    /// The definition behind `owner` followed by its ancestor types.
    pub fn ancestry(&self, owner: Owner) -> Ancestry<'_> {
        Ancestry {
            store: self,
            next: Some(owner),
            remaining: self.types.len() + 1,
        }
    }

    pub fn static_objects(&self) -> &[ObjectDef] {
        &self.objects[..self.dynamic - 1]
    }

    pub fn dynamic_objects(&self) -> &[ObjectDef] {
        &self.objects[self.dynamic - 1..]
    }

    /// Replaces all dynamic objects, keeping static ones as they are.
    pub(crate) fn replace_dynamic(&mut self, objects: Vec<ObjectDef>) {
        self.objects.truncate(self.dynamic - 1);
        self.object_names.truncate(self.objects.len());
        self.objects.extend(objects);
    }
}

use std::{cmp::Ordering, rc::Rc};

use crate::{
    error::ArchetypeError,
    runtime::value::Value,
    syntax::expression::{BinaryOp, Expr},
};

use super::Interpreter;

fn holds(op: BinaryOp, ordering: Ordering) -> bool {
    match op {
        BinaryOp::Eq => ordering == Ordering::Equal,
        BinaryOp::Ne => ordering != Ordering::Equal,
        BinaryOp::Lt => ordering == Ordering::Less,
        BinaryOp::Le => ordering != Ordering::Greater,
        BinaryOp::Gt => ordering == Ordering::Greater,
        BinaryOp::Ge => ordering != Ordering::Less,
        _ => false,
    }
}

impl Interpreter {
    /// Compares two values.
    ///
    /// Both sides are tried as numbers first, then as strings. Values that
    /// convert to neither can only be tested for (in)equality, and only
    /// against a value of the same kind. Anything else is false.
    pub fn result_compare(&self, op: BinaryOp, left: &Value, right: &Value) -> bool {
        if !op.is_comparison() {
            return false;
        }
        if let (Some(l), Some(r)) = (self.to_number(left), self.to_number(right)) {
            return holds(op, l.cmp(&r));
        }
        if let (Some(l), Some(r)) = (self.to_text(left), self.to_text(right)) {
            return holds(op, l.cmp(&r));
        }
        if !left.same_kind(right) {
            return false;
        }
        match op {
            BinaryOp::Eq => left == right,
            BinaryOp::Ne => left != right,
            _ => false,
        }
    }

    /// Stores `value` in the slot `target` names and returns the value.
    ///
    /// The slot's previous expression is dropped; the new binding is the
    /// plain value.
    pub fn assignment(&mut self, target: &Value, value: Value) -> Value {
        let Value::AttrLocation(location) = target else {
            self.report(ArchetypeError::NotAnLvalue);
            return Value::UNDEFINED;
        };
        let binding = self
            .program
            .store
            .object_mut(location.object)
            .and_then(|object| object.attributes.get_mut(location.slot));
        match binding {
            Some(binding) => {
                binding.value = Rc::new(Expr::Literal(value.clone()));
                value
            }
            None => {
                self.report(ArchetypeError::UnknownObject(location.object));
                Value::UNDEFINED
            }
        }
    }
}

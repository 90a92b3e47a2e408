use std::rc::Rc;

use crate::{
    runtime::{
        store::{Attribute, Owner},
        value::{AttrLocation, Desired, Value},
    },
    syntax::{
        expression::{Expr, Transport},
        statement::Stmt,
    },
};

use super::{Context, Flow, Interpreter};

impl Interpreter {
    /// Finds the handler `recipient` runs for `message`: the first explicit
    /// method anywhere along the ancestry, else the first default handler.
    fn resolve_handler(&self, recipient: Owner, message: usize) -> Option<Rc<Stmt>> {
        let store = &self.program.store;
        store
            .ancestry(recipient)
            .find_map(|def| def.find_method(message).cloned())
            .or_else(|| store.ancestry(recipient).find_map(|def| def.others.clone()))
    }

    /// Runs the handler for `message` on `recipient`.
    ///
    /// Returns `None` when nothing along the ancestry handles the message,
    /// which is an ordinary outcome rather than an error.
    pub fn send_message(
        &mut self,
        transport: Transport,
        message: usize,
        recipient: Owner,
        context: &Context,
    ) -> Option<Value> {
        if recipient == Owner::Object(0) {
            let text = self.program.vocabulary.get(message)?.to_string();
            let sender = match transport {
                Transport::Send => context.self_obj,
                Transport::Pass => context.sender,
            };
            return Some(self.send_to_system(&text, sender));
        }
        let handler = self.resolve_handler(recipient, message)?;

        if !self.enter() {
            return None;
        }

        let inner = match transport {
            Transport::Send => Context {
                self_obj: match recipient {
                    Owner::Object(index) => index,
                    Owner::Type(_) => context.self_obj,
                },
                each: 0,
                sender: context.self_obj,
                message,
            },
            Transport::Pass => Context {
                message,
                ..*context
            },
        };

        if self.config.debug.messages {
            log::debug!(
                "{} '{}' to {:?} from object {}",
                match transport {
                    Transport::Send => "send",
                    Transport::Pass => "pass",
                },
                self.program.vocabulary.get(message).unwrap_or("?"),
                recipient,
                inner.sender
            );
        }

        let target = match recipient {
            Owner::Object(index) => index,
            Owner::Type(_) => inner.self_obj,
        };
        self.in_flight.push(target);
        self.last = Value::UNDEFINED;
        let flow = self.exec_stmt(&handler, &inner);
        self.in_flight.pop();
        self.leave();

        if flow == Flow::Stop {
            self.stopped = true;
        }
        Some(std::mem::replace(&mut self.last, Value::UNDEFINED))
    }

    /// Finds `attribute` for `owner`.
    ///
    /// As an lvalue, only the instance itself is consulted; a missing
    /// binding is created there, holding `UNDEFINED`, and its location is
    /// returned. Types cannot be assigned to. As an rvalue, the nearest
    /// binding along the ancestry is evaluated with `self` set to the asking
    /// object; a miss is `UNDEFINED`.
    pub fn lookup(
        &mut self,
        owner: Owner,
        attribute: usize,
        context: &Context,
        desired: Desired,
    ) -> Value {
        match desired {
            Desired::Lvalue => self.attribute_slot(owner, attribute),
            Desired::Rvalue => {
                let found = self
                    .program
                    .store
                    .ancestry(owner)
                    .find_map(|def| {
                        def.find_attribute(attribute)
                            .map(|slot| def.attributes[slot].value.clone())
                    });
                let Some(expr) = found else {
                    return Value::UNDEFINED;
                };
                let asking = match owner {
                    Owner::Object(index) => index,
                    Owner::Type(_) => context.self_obj,
                };
                self.eval_attribute(&expr, &Context {
                    self_obj: asking,
                    ..*context
                })
            }
        }
    }

    fn attribute_slot(&mut self, owner: Owner, attribute: usize) -> Value {
        let Owner::Object(index) = owner else {
            log::warn!("cannot assign attribute {} of type {:?}", attribute, owner);
            return Value::UNDEFINED;
        };
        let Some(object) = self.program.store.object_mut(index) else {
            log::warn!("cannot assign attribute {} of missing object {}", attribute, index);
            return Value::UNDEFINED;
        };
        let slot = match object.find_attribute(attribute) {
            Some(slot) => slot,
            None => {
                object
                    .attributes
                    .push(Attribute::new(attribute, Expr::Literal(Value::UNDEFINED)));
                object.attributes.len() - 1
            }
        };
        Value::AttrLocation(AttrLocation {
            object: index,
            slot,
        })
    }

    fn eval_attribute(&mut self, expr: &Expr, context: &Context) -> Value {
        if let Expr::Literal(value) = expr {
            return value.clone();
        }
        if !self.enter() {
            return Value::UNDEFINED;
        }
        let value = self.eval_expr(expr, context, Desired::Rvalue);
        self.leave();
        value
    }

    /// Claims one level of nesting, or refuses past the configured limit.
    fn enter(&mut self) -> bool {
        if self.depth >= self.config.max_call_depth {
            log::error!(
                "nesting deeper than {} levels; dropping the call",
                self.config.max_call_depth
            );
            return false;
        }
        self.depth += 1;
        true
    }

    fn leave(&mut self) {
        self.depth -= 1;
    }
}

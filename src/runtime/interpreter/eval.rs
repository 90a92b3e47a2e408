use crate::{
    runtime::{
        store::Owner,
        value::{ConvertTarget, Desired, Value},
    },
    syntax::{
        expression::{AssignOp, BinaryOp, Expr, Keyword, Transport, UnaryOp},
        id_table::IdKind,
    },
};

use super::{Context, Interpreter};

/// Owner named by an identifier value, if it names one.
fn owner_of(value: &Value) -> Option<Owner> {
    match value {
        Value::Ident(ident) if ident.kind == IdKind::Object => Some(Owner::Object(ident.index)),
        Value::Ident(ident) if ident.kind == IdKind::Type => Some(Owner::Type(ident.index)),
        _ => None,
    }
}

fn object_or_undefined(index: usize) -> Value {
    if index == 0 {
        Value::UNDEFINED
    } else {
        Value::object(index)
    }
}

impl Interpreter {
    pub fn eval_expr(&mut self, expr: &Expr, context: &Context, desired: Desired) -> Value {
        let value = self.eval_inner(expr, context, desired);
        if self.config.debug.expressions {
            log::trace!("{} => {}", expr, value);
        }
        value
    }

    fn eval_inner(&mut self, expr: &Expr, context: &Context, desired: Desired) -> Value {
        match expr {
            Expr::Literal(value) => value.clone(),
            Expr::Attribute(id) => {
                self.lookup(Owner::Object(context.self_obj), *id, context, desired)
            }
            Expr::Member(object, id) => {
                let object = self.eval_expr(object, context, Desired::Rvalue);
                match owner_of(&object) {
                    Some(owner) => self.lookup(owner, *id, context, desired),
                    None => {
                        log::debug!("{} has no attributes", self.display(&object));
                        Value::UNDEFINED
                    }
                }
            }
            Expr::Keyword(keyword) => self.eval_keyword(*keyword, context),
            Expr::Unary(op, operand) => {
                let operand = self.eval_expr(operand, context, Desired::Rvalue);
                self.eval_unary(*op, &operand)
            }
            Expr::Binary(BinaryOp::And, left, right) => {
                if !self.eval_expr(left, context, Desired::Rvalue).is_truthy() {
                    return Value::from_bool(false);
                }
                Value::from_bool(self.eval_expr(right, context, Desired::Rvalue).is_truthy())
            }
            Expr::Binary(BinaryOp::Or, left, right) => {
                if self.eval_expr(left, context, Desired::Rvalue).is_truthy() {
                    return Value::from_bool(true);
                }
                Value::from_bool(self.eval_expr(right, context, Desired::Rvalue).is_truthy())
            }
            Expr::Binary(op, left, right) => {
                let left = self.eval_expr(left, context, Desired::Rvalue);
                let right = self.eval_expr(right, context, Desired::Rvalue);
                self.eval_binary(*op, &left, &right)
            }
            Expr::Send {
                transport,
                message,
                recipient,
            } => {
                let message = self.eval_expr(message, context, Desired::Rvalue);
                let recipient = self.eval_expr(recipient, context, Desired::Rvalue);
                self.eval_send(*transport, &message, &recipient, context)
            }
            Expr::Assign(op, target, value) => self.eval_assign(*op, target, value, context),
        }
    }

    fn eval_keyword(&mut self, keyword: Keyword, context: &Context) -> Value {
        match keyword {
            Keyword::SelfObject => Value::object(context.self_obj),
            Keyword::Sender => Value::object(context.sender),
            Keyword::Each => object_or_undefined(context.each),
            Keyword::Message if context.message == 0 => Value::UNDEFINED,
            Keyword::Message => Value::Message(context.message),
            Keyword::Read => self
                .console
                .read_line()
                .map(Value::Str)
                .unwrap_or(Value::UNDEFINED),
            Keyword::Key => self
                .console
                .read_key()
                .map(|key| Value::Str(key.to_string()))
                .unwrap_or(Value::UNDEFINED),
        }
    }

    fn eval_unary(&mut self, op: UnaryOp, operand: &Value) -> Value {
        match op {
            UnaryOp::Not => Value::from_bool(!operand.is_truthy()),
            UnaryOp::Chs => self
                .to_number(operand)
                .map(|n| Value::Numeric(n.wrapping_neg()))
                .unwrap_or(Value::UNDEFINED),
            UnaryOp::Length => self
                .to_text(operand)
                .map(|text| Value::Numeric(text.chars().count() as i32))
                .unwrap_or(Value::UNDEFINED),
            UnaryOp::Numeric => self
                .convert_to(ConvertTarget::Numeric, operand)
                .unwrap_or(Value::UNDEFINED),
            UnaryOp::Str => self
                .convert_to(ConvertTarget::Str, operand)
                .unwrap_or(Value::UNDEFINED),
            UnaryOp::Random => match self.to_number(operand) {
                Some(bound) if bound > 0 => {
                    Value::Numeric(1 + self.random.draw(bound as u32) as i32)
                }
                _ => Value::UNDEFINED,
            },
        }
    }

    /// Binary operators other than the short-circuiting `and`/`or`.
    pub(crate) fn eval_binary(&mut self, op: BinaryOp, left: &Value, right: &Value) -> Value {
        match op {
            BinaryOp::Add | BinaryOp::Sub | BinaryOp::Mul | BinaryOp::Div | BinaryOp::Power => {
                let (Some(l), Some(r)) = (self.to_number(left), self.to_number(right)) else {
                    return Value::UNDEFINED;
                };
                arithmetic(op, l, r).map(Value::Numeric).unwrap_or(Value::UNDEFINED)
            }
            BinaryOp::Concat => match (self.to_text(left), self.to_text(right)) {
                (Some(l), Some(r)) => Value::Str(l + &r),
                _ => Value::UNDEFINED,
            },
            BinaryOp::And => Value::from_bool(left.is_truthy() && right.is_truthy()),
            BinaryOp::Or => Value::from_bool(left.is_truthy() || right.is_truthy()),
            BinaryOp::Ne => Value::from_bool(!self.result_compare(BinaryOp::Eq, left, right)),
            BinaryOp::Eq | BinaryOp::Lt | BinaryOp::Le | BinaryOp::Gt | BinaryOp::Ge => {
                Value::from_bool(self.result_compare(op, left, right))
            }
            BinaryOp::LeftFrom => match (self.to_text(left), self.to_number(right)) {
                (Some(text), Some(n)) => {
                    Value::Str(text.chars().take(n.max(0) as usize).collect())
                }
                _ => Value::UNDEFINED,
            },
            BinaryOp::RightFrom => match (self.to_text(left), self.to_number(right)) {
                (Some(text), Some(n)) => {
                    let skip = (n.max(1) - 1) as usize;
                    Value::Str(text.chars().skip(skip).collect())
                }
                _ => Value::UNDEFINED,
            },
            BinaryOp::Within => match (self.to_text(left), self.to_text(right)) {
                (Some(needle), Some(haystack)) => Value::Numeric(
                    haystack
                        .find(&needle)
                        .map(|at| haystack[..at].chars().count() as i32 + 1)
                        .unwrap_or(0),
                ),
                _ => Value::UNDEFINED,
            },
        }
    }

    fn eval_send(
        &mut self,
        transport: Transport,
        message: &Value,
        recipient: &Value,
        context: &Context,
    ) -> Value {
        let Some(owner) = owner_of(recipient) else {
            log::debug!("cannot send to {}", self.display(recipient));
            return Value::UNDEFINED;
        };

        if owner == Owner::Object(0) {
            let text = self
                .to_text(message)
                .unwrap_or_else(|| self.display(message));
            let sender = match transport {
                Transport::Send => context.self_obj,
                Transport::Pass => context.sender,
            };
            return self.send_to_system(&text, sender);
        }

        let Some(Value::Message(index)) = self.convert_to(ConvertTarget::Message, message) else {
            log::debug!("{} is not a known message", self.display(message));
            return Value::UNDEFINED;
        };
        self.send_message(transport, index, owner, context)
            .unwrap_or(Value::UNDEFINED)
    }

    fn eval_assign(
        &mut self,
        op: AssignOp,
        target: &Expr,
        value: &Expr,
        context: &Context,
    ) -> Value {
        let value = self.eval_expr(value, context, Desired::Rvalue);
        let Some(binary) = op.binary() else {
            let location = self.eval_expr(target, context, Desired::Lvalue);
            return self.assignment(&location, value);
        };

        // the owner is resolved once, so a send inside the target runs once
        let (current, location) = match target {
            Expr::Attribute(id) => {
                self.read_modify(Owner::Object(context.self_obj), *id, context)
            }
            Expr::Member(object, id) => {
                let object = self.eval_expr(object, context, Desired::Rvalue);
                match owner_of(&object) {
                    Some(owner) => self.read_modify(owner, *id, context),
                    None => (Value::UNDEFINED, Value::UNDEFINED),
                }
            }
            _ => (
                Value::UNDEFINED,
                self.eval_expr(target, context, Desired::Lvalue),
            ),
        };
        let value = self.eval_binary(binary, &current, &value);
        self.assignment(&location, value)
    }

    /// Current value of `attribute` as seen from `owner`, then its slot.
    /// The read comes first so an inherited value is not shadowed by the
    /// fresh binding.
    fn read_modify(
        &mut self,
        owner: Owner,
        attribute: usize,
        context: &Context,
    ) -> (Value, Value) {
        let current = self.lookup(owner, attribute, context, Desired::Rvalue);
        let location = self.lookup(owner, attribute, context, Desired::Lvalue);
        (current, location)
    }
}

fn arithmetic(op: BinaryOp, l: i32, r: i32) -> Option<i32> {
    match op {
        BinaryOp::Add => Some(l.wrapping_add(r)),
        BinaryOp::Sub => Some(l.wrapping_sub(r)),
        BinaryOp::Mul => Some(l.wrapping_mul(r)),
        BinaryOp::Div if r == 0 => None,
        BinaryOp::Div => Some(l.wrapping_div(r)),
        BinaryOp::Power if r < 0 => None,
        BinaryOp::Power => Some(l.wrapping_pow(r as u32)),
        _ => None,
    }
}

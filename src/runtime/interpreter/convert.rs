use std::borrow::Cow;

use crate::{
    runtime::{
        store::NULL_NAME,
        value::{ConvertTarget, IdentRef, Reserved, Value},
    },
    syntax::id_table::IdKind,
};

use super::Interpreter;

impl Interpreter {
    /// Text behind a string-like value: runtime strings, pooled literals
    /// and vocabulary messages.
    fn text_of<'a>(&'a self, value: &'a Value) -> Option<Cow<'a, str>> {
        match value {
            Value::Str(text) => Some(Cow::Borrowed(text.as_str())),
            Value::Text(index) | Value::Quote(index) => {
                self.program.literals.get(*index).map(Cow::Borrowed)
            }
            Value::Message(index) => self.program.vocabulary.get(*index).map(Cow::Borrowed),
            Value::Numeric(n) => Some(Cow::Owned(n.to_string())),
            Value::Reserved(Reserved::Undefined) => None,
            Value::Reserved(word) => Some(Cow::Borrowed(word.keyword())),
            Value::Ident(_) | Value::AttrLocation(_) => None,
        }
    }

    /// Converts `value` to `target`, or `None` when it has no such form.
    ///
    /// Identifiers never convert. `TRUE` and `false` read as 1 and 0 and
    /// spell themselves; `UNDEFINED` converts to nothing.
    pub fn convert_to(&self, target: ConvertTarget, value: &Value) -> Option<Value> {
        match (target, value) {
            (ConvertTarget::Numeric, Value::Numeric(n)) => Some(Value::Numeric(*n)),
            (ConvertTarget::Numeric, Value::Reserved(Reserved::True)) => Some(Value::Numeric(1)),
            (ConvertTarget::Numeric, Value::Reserved(Reserved::False)) => Some(Value::Numeric(0)),
            (ConvertTarget::Numeric, _) => {
                let text = self.text_of(value)?;
                text.trim().parse::<i32>().ok().map(Value::Numeric)
            }
            (ConvertTarget::Str, Value::Str(text)) => Some(Value::Str(text.clone())),
            (ConvertTarget::Str, _) => self.text_of(value).map(|text| Value::Str(text.into_owned())),
            (ConvertTarget::Message, Value::Message(index)) => Some(Value::Message(*index)),
            (ConvertTarget::Message, _) => {
                let text = self.text_of(value)?;
                self.program.vocabulary.find(&text).map(Value::Message)
            }
        }
    }

    /// Numeric form of `value`, if any.
    pub(crate) fn to_number(&self, value: &Value) -> Option<i32> {
        match self.convert_to(ConvertTarget::Numeric, value)? {
            Value::Numeric(n) => Some(n),
            _ => None,
        }
    }

    /// String form of `value`, if any.
    pub(crate) fn to_text(&self, value: &Value) -> Option<String> {
        match self.convert_to(ConvertTarget::Str, value)? {
            Value::Str(text) => Some(text),
            _ => None,
        }
    }

    /// Text shown to the player for `value`.
    pub fn display(&self, value: &Value) -> String {
        match value {
            Value::Ident(ident) => self.ident_name(*ident).to_string(),
            Value::AttrLocation(_) => value.to_string(),
            Value::Reserved(word) => word.keyword().to_string(),
            other => self
                .text_of(other)
                .map(Cow::into_owned)
                .unwrap_or_default(),
        }
    }

    fn ident_name(&self, ident: IdentRef) -> &str {
        let name = match ident.kind {
            IdKind::Object if ident.index == 0 => Some("system"),
            IdKind::Object => self.program.store.object_name(ident.index),
            IdKind::Type => self.program.store.type_name(ident.index),
            IdKind::Attribute | IdKind::Enumerate | IdKind::Undefined => {
                self.program.ids.name(ident.index)
            }
        };
        name.unwrap_or(NULL_NAME)
    }
}

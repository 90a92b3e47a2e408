use crate::{
    error::ArchetypeError,
    runtime::{
        pools::{LiteralPool, Vocabulary},
        store::{ObjectDef, ObjectStore, TypeDef},
        value::{IdentRef, Value},
    },
    syntax::id_table::{IdKind, IdTable},
};

/// Role requested for an identifier, with the payload the role stores.
#[derive(Debug, Clone, PartialEq)]
pub enum Classification {
    Type(TypeDef),
    Object(ObjectDef),
    Attribute,
    Enumerate,
}

impl Classification {
    pub fn kind(&self) -> IdKind {
        match self {
            Classification::Type(_) => IdKind::Type,
            Classification::Object(_) => IdKind::Object,
            Classification::Attribute => IdKind::Attribute,
            Classification::Enumerate => IdKind::Enumerate,
        }
    }
}

/// Process-wide tables of a loaded game: identifiers, types and objects,
/// and the interned pools.
///
/// Built once by the front end, then handed to the interpreter, which
/// mutates it in place for the rest of the session.
#[derive(Debug, Clone, Default)]
pub struct Program {
    pub ids: IdTable,
    pub store: ObjectStore,
    pub literals: LiteralPool,
    pub vocabulary: Vocabulary,
    /// Reference stamp written into and checked against save states.
    pub timestamp: u32,
    diagnostics: Vec<ArchetypeError>,
}

impl Program {
    pub fn new(timestamp: u32) -> Self {
        Self {
            timestamp,
            ..Self::default()
        }
    }

    pub fn register(&mut self, name: &str) -> usize {
        self.ids.register(name)
    }

    /// Gives identifier `id` a role and returns its resolved integer.
    ///
    /// The first classification of an undefined identifier wins. Asking
    /// again for the same role returns the cached integer and drops the new
    /// payload. Asking for a different role is a conflict: it is reported,
    /// the record stays as it was, and 0 is returned.
    ///
    /// Attribute and enumerated roles have no backing collection and
    /// resolve to the identifier's own index.
    pub fn classify(&mut self, id: usize, role: Classification) -> usize {
        let requested = role.kind();
        let Some(record) = self.ids.get(id) else {
            self.report(ArchetypeError::UnknownIdentifier(id));
            return 0;
        };

        if record.kind == requested {
            return record.integer;
        }
        if record.kind != IdKind::Undefined {
            let conflict = ArchetypeError::ClassificationConflict {
                name: record.name.clone(),
                existing: record.kind,
                requested,
            };
            self.report(conflict);
            return 0;
        }

        let name = record.name.clone();
        let integer = match role {
            Classification::Type(def) => self.store.push_type(&name, def),
            Classification::Object(def) => self.store.push_named_object(&name, def),
            Classification::Attribute | Classification::Enumerate => id,
        };

        if let Some(record) = self.ids.get_mut(id) {
            record.kind = requested;
            record.integer = integer;
        }
        integer
    }

    /// Registers `name` and classifies it in one step.
    pub fn declare(&mut self, name: &str, role: Classification) -> usize {
        let id = self.register(name);
        self.classify(id, role)
    }

    /// Appends an instance nobody has named (yet).
    pub fn add_unnamed_object(&mut self, def: ObjectDef) -> usize {
        self.store.push_object(def)
    }

    pub fn add_literal(&mut self, text: &str) -> Value {
        Value::Text(self.literals.add(text))
    }

    pub fn add_quote(&mut self, text: &str) -> Value {
        Value::Quote(self.literals.add(text))
    }

    pub fn add_message(&mut self, message: &str) -> Value {
        Value::Message(self.vocabulary.add(message))
    }

    /// The value an identifier denotes in an expression.
    ///
    /// Identifiers still undefined at run time behave like enumerated words.
    pub fn meaning(&self, id: usize) -> Value {
        match self.ids.get(id) {
            Some(record) => match record.kind {
                IdKind::Type | IdKind::Object => Value::Ident(IdentRef {
                    kind: record.kind,
                    index: record.integer,
                }),
                IdKind::Attribute => Value::Ident(IdentRef {
                    kind: IdKind::Attribute,
                    index: record.integer,
                }),
                IdKind::Undefined | IdKind::Enumerate => Value::Ident(IdentRef {
                    kind: IdKind::Enumerate,
                    index: id,
                }),
            },
            None => Value::UNDEFINED,
        }
    }

    /// Names that were registered but never given a role.
    pub fn undefined_identifiers(&self) -> Vec<&str> {
        self.ids
            .iter()
            .filter(|record| record.kind == IdKind::Undefined)
            .map(|record| record.name.as_str())
            .collect()
    }

    pub fn diagnostics(&self) -> &[ArchetypeError] {
        &self.diagnostics
    }

    pub fn take_diagnostics(&mut self) -> Vec<ArchetypeError> {
        std::mem::take(&mut self.diagnostics)
    }

    pub(crate) fn report(&mut self, error: ArchetypeError) {
        log::warn!("{}", error);
        self.diagnostics.push(error);
    }
}

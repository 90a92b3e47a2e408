//! Primitive and tree encodings of the save-state stream.
//!
//! Integers are little-endian and written as is. String bytes go through
//! the stream's cipher, behind a one-byte length written twice. Sequences
//! are a `CONTINUE` marker before each item and an `END` marker after the
//! last. Values, expressions and statements are tagged trees.

use std::io::{self, ErrorKind, Read, Write};

use crate::{
    crypt::Cipher,
    error::SaveError,
    runtime::{
        store::{Attribute, Method},
        value::{IdentRef, Reserved, Value},
    },
    syntax::{
        expression::{AssignOp, BinaryOp, Expr, Keyword, Transport, UnaryOp},
        id_table::IdKind,
        statement::{CaseArm, Stmt, WriteMode},
    },
};

pub const END: u8 = 0;
pub const CONTINUE: u8 = 1;

/// Longest string a length byte can describe.
pub const MAX_STRING: usize = u8::MAX as usize;

fn kind_code(kind: IdKind) -> u8 {
    match kind {
        IdKind::Undefined => 0,
        IdKind::Type => 1,
        IdKind::Object => 2,
        IdKind::Attribute => 3,
        IdKind::Enumerate => 4,
    }
}

fn kind_from_code(code: u8) -> Option<IdKind> {
    Some(match code {
        0 => IdKind::Undefined,
        1 => IdKind::Type,
        2 => IdKind::Object,
        3 => IdKind::Attribute,
        4 => IdKind::Enumerate,
        _ => return None,
    })
}

fn reserved_code(word: Reserved) -> u8 {
    match word {
        Reserved::True => 0,
        Reserved::False => 1,
        Reserved::Undefined => 2,
    }
}

fn reserved_from_code(code: u8) -> Option<Reserved> {
    Some(match code {
        0 => Reserved::True,
        1 => Reserved::False,
        2 => Reserved::Undefined,
        _ => return None,
    })
}

/// Longest prefix of `text` that fits a string record, cut on a character
/// boundary.
fn clip(text: &str) -> &str {
    if text.len() <= MAX_STRING {
        return text;
    }
    let mut end = MAX_STRING;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    log::warn!("string of {} bytes cut to {} in save state", text.len(), end);
    &text[..end]
}

pub struct StateWriter<W> {
    out: W,
    cipher: Cipher,
}

impl<W: Write> StateWriter<W> {
    pub fn new(out: W, cipher: Cipher) -> Self {
        Self { out, cipher }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    pub fn write_u8(&mut self, value: u8) -> io::Result<()> {
        self.out.write_all(&[value])
    }

    pub fn write_u32(&mut self, value: u32) -> io::Result<()> {
        self.out.write_all(&value.to_le_bytes())
    }

    pub fn write_i32(&mut self, value: i32) -> io::Result<()> {
        self.out.write_all(&value.to_le_bytes())
    }

    fn write_index(&mut self, index: usize) -> io::Result<()> {
        self.write_u32(index as u32)
    }

    pub fn write_string(&mut self, text: &str) -> io::Result<()> {
        let mut bytes = clip(text).as_bytes().to_vec();
        let len = bytes.len() as u8;
        self.write_u8(len)?;
        self.write_u8(len)?;
        self.cipher.apply(&mut bytes);
        self.out.write_all(&bytes)
    }

    /// Writes `items` as a marker-delimited list.
    fn write_list<T>(
        &mut self,
        items: &[T],
        mut write_item: impl FnMut(&mut Self, &T) -> io::Result<()>,
    ) -> io::Result<()> {
        for item in items {
            self.write_u8(CONTINUE)?;
            write_item(self, item)?;
        }
        self.write_u8(END)
    }

    fn write_optional(&mut self, stmt: Option<&Stmt>) -> io::Result<()> {
        match stmt {
            Some(stmt) => {
                self.write_u8(CONTINUE)?;
                self.write_stmt(stmt)
            }
            None => self.write_u8(END),
        }
    }

    pub fn write_value(&mut self, value: &Value) -> io::Result<()> {
        match value {
            Value::Numeric(n) => {
                self.write_u8(0)?;
                self.write_i32(*n)
            }
            Value::Str(text) => {
                self.write_u8(1)?;
                self.write_string(text)
            }
            Value::Text(index) => {
                self.write_u8(2)?;
                self.write_index(*index)
            }
            Value::Quote(index) => {
                self.write_u8(3)?;
                self.write_index(*index)
            }
            Value::Message(index) => {
                self.write_u8(4)?;
                self.write_index(*index)
            }
            Value::Ident(ident) => {
                self.write_u8(5)?;
                self.write_u8(kind_code(ident.kind))?;
                self.write_index(ident.index)
            }
            Value::Reserved(word) => {
                self.write_u8(6)?;
                self.write_u8(reserved_code(*word))
            }
            // locations are transient; never persisted
            Value::AttrLocation(_) => {
                self.write_u8(6)?;
                self.write_u8(reserved_code(Reserved::Undefined))
            }
        }
    }

    pub fn write_expr(&mut self, expr: &Expr) -> io::Result<()> {
        match expr {
            Expr::Literal(value) => {
                self.write_u8(0)?;
                self.write_value(value)
            }
            Expr::Attribute(id) => {
                self.write_u8(1)?;
                self.write_index(*id)
            }
            Expr::Keyword(keyword) => {
                self.write_u8(2)?;
                self.write_u8(keyword.code())
            }
            Expr::Unary(op, operand) => {
                self.write_u8(3)?;
                self.write_u8(op.code())?;
                self.write_expr(operand)
            }
            Expr::Binary(op, left, right) => {
                self.write_u8(4)?;
                self.write_u8(op.code())?;
                self.write_expr(left)?;
                self.write_expr(right)
            }
            Expr::Member(object, id) => {
                self.write_u8(5)?;
                self.write_expr(object)?;
                self.write_index(*id)
            }
            Expr::Send {
                transport,
                message,
                recipient,
            } => {
                self.write_u8(6)?;
                self.write_u8(transport.code())?;
                self.write_expr(message)?;
                self.write_expr(recipient)
            }
            Expr::Assign(op, target, value) => {
                self.write_u8(7)?;
                self.write_u8(op.code())?;
                self.write_expr(target)?;
                self.write_expr(value)
            }
        }
    }

    pub fn write_stmt(&mut self, stmt: &Stmt) -> io::Result<()> {
        match stmt {
            Stmt::Expr(expr) => {
                self.write_u8(0)?;
                self.write_expr(expr)
            }
            Stmt::Compound(body) => {
                self.write_u8(1)?;
                self.write_list(body, |w, stmt| w.write_stmt(stmt))
            }
            Stmt::If {
                condition,
                then_branch,
                else_branch,
            } => {
                self.write_u8(2)?;
                self.write_expr(condition)?;
                self.write_stmt(then_branch)?;
                self.write_optional(else_branch.as_deref())
            }
            Stmt::Case {
                subject,
                arms,
                default,
            } => {
                self.write_u8(3)?;
                self.write_expr(subject)?;
                self.write_list(arms, |w, arm| {
                    w.write_expr(&arm.label)?;
                    w.write_stmt(&arm.body)
                })?;
                self.write_optional(default.as_deref())
            }
            Stmt::Create { type_index, target } => {
                self.write_u8(4)?;
                self.write_index(*type_index)?;
                self.write_expr(target)
            }
            Stmt::Destroy(expr) => {
                self.write_u8(5)?;
                self.write_expr(expr)
            }
            Stmt::For { condition, body } => {
                self.write_u8(6)?;
                self.write_expr(condition)?;
                self.write_stmt(body)
            }
            Stmt::While { condition, body } => {
                self.write_u8(7)?;
                self.write_expr(condition)?;
                self.write_stmt(body)
            }
            Stmt::Write { mode, exprs } => {
                self.write_u8(8)?;
                self.write_u8(mode.code())?;
                self.write_list(exprs, |w, expr| w.write_expr(expr))
            }
            Stmt::Break => self.write_u8(9),
        }
    }

    pub fn write_attributes(&mut self, attributes: &[Attribute]) -> io::Result<()> {
        self.write_list(attributes, |w, attr| {
            w.write_index(attr.id)?;
            w.write_expr(&attr.value)
        })
    }

    pub fn write_methods(&mut self, methods: &[Method]) -> io::Result<()> {
        self.write_list(methods, |w, method| {
            w.write_index(method.message)?;
            w.write_stmt(&method.body)
        })
    }
}

pub struct StateReader<R> {
    input: R,
    cipher: Cipher,
}

impl<R: Read> StateReader<R> {
    pub fn new(input: R, cipher: Cipher) -> Self {
        Self { input, cipher }
    }

    fn fill(&mut self, buf: &mut [u8]) -> Result<(), SaveError> {
        self.input.read_exact(buf).map_err(|err| {
            if err.kind() == ErrorKind::UnexpectedEof {
                SaveError::Truncated
            } else {
                SaveError::Io(err)
            }
        })
    }

    pub fn read_u8(&mut self) -> Result<u8, SaveError> {
        let mut buf = [0u8; 1];
        self.fill(&mut buf)?;
        Ok(buf[0])
    }

    pub fn read_u32(&mut self) -> Result<u32, SaveError> {
        let mut buf = [0u8; 4];
        self.fill(&mut buf)?;
        Ok(u32::from_le_bytes(buf))
    }

    pub fn read_i32(&mut self) -> Result<i32, SaveError> {
        let mut buf = [0u8; 4];
        self.fill(&mut buf)?;
        Ok(i32::from_le_bytes(buf))
    }

    fn read_index(&mut self) -> Result<usize, SaveError> {
        Ok(self.read_u32()? as usize)
    }

    /// `true` on `CONTINUE`, `false` on `END`.
    pub fn read_marker(&mut self) -> Result<bool, SaveError> {
        match self.read_u8()? {
            CONTINUE => Ok(true),
            END => Ok(false),
            other => Err(SaveError::BadMarker(other)),
        }
    }

    pub fn read_string(&mut self) -> Result<String, SaveError> {
        let first = self.read_u8()?;
        let second = self.read_u8()?;
        if first != second {
            return Err(SaveError::LengthMismatch { first, second });
        }
        let mut bytes = vec![0u8; first as usize];
        self.fill(&mut bytes)?;
        self.cipher.apply(&mut bytes);
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    fn read_list<T>(
        &mut self,
        mut read_item: impl FnMut(&mut Self) -> Result<T, SaveError>,
    ) -> Result<Vec<T>, SaveError> {
        let mut items = Vec::new();
        while self.read_marker()? {
            items.push(read_item(self)?);
        }
        Ok(items)
    }

    fn read_optional(&mut self) -> Result<Option<Box<Stmt>>, SaveError> {
        if self.read_marker()? {
            Ok(Some(Box::new(self.read_stmt()?)))
        } else {
            Ok(None)
        }
    }

    fn read_code<T>(&mut self, what: &'static str, decode: fn(u8) -> Option<T>) -> Result<T, SaveError> {
        let tag = self.read_u8()?;
        decode(tag).ok_or(SaveError::BadTag { what, tag })
    }

    pub fn read_value(&mut self) -> Result<Value, SaveError> {
        let value = match self.read_u8()? {
            0 => Value::Numeric(self.read_i32()?),
            1 => Value::Str(self.read_string()?),
            2 => Value::Text(self.read_index()?),
            3 => Value::Quote(self.read_index()?),
            4 => Value::Message(self.read_index()?),
            5 => {
                let kind = self.read_code("identifier kind", kind_from_code)?;
                Value::Ident(IdentRef {
                    kind,
                    index: self.read_index()?,
                })
            }
            6 => Value::Reserved(self.read_code("reserved word", reserved_from_code)?),
            tag => return Err(SaveError::BadTag { what: "value", tag }),
        };
        Ok(value)
    }

    pub fn read_expr(&mut self) -> Result<Expr, SaveError> {
        let expr = match self.read_u8()? {
            0 => Expr::Literal(self.read_value()?),
            1 => Expr::Attribute(self.read_index()?),
            2 => Expr::Keyword(self.read_code("keyword", Keyword::from_code)?),
            3 => {
                let op = self.read_code("unary operator", UnaryOp::from_code)?;
                Expr::unary(op, self.read_expr()?)
            }
            4 => {
                let op = self.read_code("binary operator", BinaryOp::from_code)?;
                let left = self.read_expr()?;
                Expr::binary(op, left, self.read_expr()?)
            }
            5 => {
                let object = self.read_expr()?;
                Expr::member(object, self.read_index()?)
            }
            6 => {
                let transport = self.read_code("transport", Transport::from_code)?;
                let message = self.read_expr()?;
                Expr::Send {
                    transport,
                    message: Box::new(message),
                    recipient: Box::new(self.read_expr()?),
                }
            }
            7 => {
                let op = self.read_code("assignment operator", AssignOp::from_code)?;
                let target = self.read_expr()?;
                Expr::assign(op, target, self.read_expr()?)
            }
            tag => return Err(SaveError::BadTag { what: "expression", tag }),
        };
        Ok(expr)
    }

    pub fn read_stmt(&mut self) -> Result<Stmt, SaveError> {
        let stmt = match self.read_u8()? {
            0 => Stmt::Expr(self.read_expr()?),
            1 => Stmt::Compound(self.read_list(|r| r.read_stmt())?),
            2 => {
                let condition = self.read_expr()?;
                let then_branch = Box::new(self.read_stmt()?);
                Stmt::If {
                    condition,
                    then_branch,
                    else_branch: self.read_optional()?,
                }
            }
            3 => {
                let subject = self.read_expr()?;
                let arms = self.read_list(|r| {
                    let label = r.read_expr()?;
                    Ok(CaseArm {
                        label,
                        body: r.read_stmt()?,
                    })
                })?;
                Stmt::Case {
                    subject,
                    arms,
                    default: self.read_optional()?,
                }
            }
            4 => {
                let type_index = self.read_index()?;
                Stmt::Create {
                    type_index,
                    target: self.read_expr()?,
                }
            }
            5 => Stmt::Destroy(self.read_expr()?),
            6 => {
                let condition = self.read_expr()?;
                Stmt::For {
                    condition,
                    body: Box::new(self.read_stmt()?),
                }
            }
            7 => {
                let condition = self.read_expr()?;
                Stmt::While {
                    condition,
                    body: Box::new(self.read_stmt()?),
                }
            }
            8 => {
                let mode = self.read_code("write mode", WriteMode::from_code)?;
                Stmt::Write {
                    mode,
                    exprs: self.read_list(|r| r.read_expr())?,
                }
            }
            9 => Stmt::Break,
            tag => return Err(SaveError::BadTag { what: "statement", tag }),
        };
        Ok(stmt)
    }

    pub fn read_attributes(&mut self) -> Result<Vec<Attribute>, SaveError> {
        self.read_list(|r| {
            let id = r.read_index()?;
            Ok(Attribute::new(id, r.read_expr()?))
        })
    }

    pub fn read_methods(&mut self) -> Result<Vec<Method>, SaveError> {
        self.read_list(|r| {
            let message = r.read_index()?;
            Ok(Method::new(message, r.read_stmt()?))
        })
    }
}

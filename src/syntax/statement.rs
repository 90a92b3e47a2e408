use crate::syntax::expression::Expr;

use super::coded_enum;

coded_enum! {
    /// `write` ends the line, `writes` does not, `stop` ends the line and
    /// halts the interpreter.
    pub enum WriteMode {
        Write = 0,
        Writes = 1,
        Stop = 2,
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CaseArm {
    pub label: Expr,
    pub body: Stmt,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    Expr(Expr),
    Compound(Vec<Stmt>),
    If {
        condition: Expr,
        then_branch: Box<Stmt>,
        else_branch: Option<Box<Stmt>>,
    },
    Case {
        subject: Expr,
        arms: Vec<CaseArm>,
        default: Option<Box<Stmt>>,
    },
    /// `create <type> named <target>`
    Create {
        type_index: usize,
        target: Expr,
    },
    Destroy(Expr),
    /// `for <condition> do <body>`: runs `body` for every object for which
    /// `condition` holds, with `each` bound to that object.
    For {
        condition: Expr,
        body: Box<Stmt>,
    },
    While {
        condition: Expr,
        body: Box<Stmt>,
    },
    Write {
        mode: WriteMode,
        exprs: Vec<Expr>,
    },
    Break,
}

impl Stmt {
    /// Leading keyword, for traces.
    pub fn keyword(&self) -> &'static str {
        match self {
            Stmt::Expr(_) => "expression",
            Stmt::Compound(_) => "block",
            Stmt::If { .. } => "if",
            Stmt::Case { .. } => "case",
            Stmt::Create { .. } => "create",
            Stmt::Destroy(_) => "destroy",
            Stmt::For { .. } => "for",
            Stmt::While { .. } => "while",
            Stmt::Write { mode, .. } => match mode {
                WriteMode::Write => "write",
                WriteMode::Writes => "writes",
                WriteMode::Stop => "stop",
            },
            Stmt::Break => "break",
        }
    }

    pub fn if_then(condition: Expr, then_branch: Stmt) -> Self {
        Stmt::If {
            condition,
            then_branch: Box::new(then_branch),
            else_branch: None,
        }
    }

    pub fn if_else(condition: Expr, then_branch: Stmt, else_branch: Stmt) -> Self {
        Stmt::If {
            condition,
            then_branch: Box::new(then_branch),
            else_branch: Some(Box::new(else_branch)),
        }
    }

    pub fn write(exprs: Vec<Expr>) -> Self {
        Stmt::Write {
            mode: WriteMode::Write,
            exprs,
        }
    }

    pub fn writes(exprs: Vec<Expr>) -> Self {
        Stmt::Write {
            mode: WriteMode::Writes,
            exprs,
        }
    }
}

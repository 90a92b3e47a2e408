use std::fmt;

use crate::runtime::value::Value;

use super::coded_enum;

coded_enum! {
    /// Keywords that read interpreter context or the console.
    pub enum Keyword {
        SelfObject = 0,
        Sender = 1,
        Message = 2,
        Each = 3,
        Read = 4,
        Key = 5,
    }
}

coded_enum! {
    pub enum UnaryOp {
        Not = 0,
        Chs = 1,
        Length = 2,
        Numeric = 3,
        Str = 4,
        Random = 5,
    }
}

coded_enum! {
    pub enum BinaryOp {
        Add = 0,
        Sub = 1,
        Mul = 2,
        Div = 3,
        Power = 4,
        Concat = 5,
        And = 6,
        Or = 7,
        Eq = 8,
        Ne = 9,
        Lt = 10,
        Le = 11,
        Gt = 12,
        Ge = 13,
        LeftFrom = 14,
        RightFrom = 15,
        Within = 16,
    }
}

coded_enum! {
    /// `->` sends with a fresh `self`; `-->` passes the message on while
    /// keeping the caller's `self` and `sender`.
    pub enum Transport {
        Send = 0,
        Pass = 1,
    }
}

coded_enum! {
    pub enum AssignOp {
        Set = 0,
        Add = 1,
        Sub = 2,
        Mul = 3,
        Div = 4,
        Concat = 5,
    }
}

impl BinaryOp {
    pub fn symbol(self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Power => "^",
            BinaryOp::Concat => "&",
            BinaryOp::And => "and",
            BinaryOp::Or => "or",
            BinaryOp::Eq => "=",
            BinaryOp::Ne => "~=",
            BinaryOp::Lt => "<",
            BinaryOp::Le => "<=",
            BinaryOp::Gt => ">",
            BinaryOp::Ge => ">=",
            BinaryOp::LeftFrom => "leftfrom",
            BinaryOp::RightFrom => "rightfrom",
            BinaryOp::Within => "within",
        }
    }

    pub fn is_comparison(self) -> bool {
        matches!(
            self,
            BinaryOp::Eq | BinaryOp::Ne | BinaryOp::Lt | BinaryOp::Le | BinaryOp::Gt | BinaryOp::Ge
        )
    }
}

impl AssignOp {
    /// The arithmetic/concatenation applied before storing, if any.
    pub fn binary(self) -> Option<BinaryOp> {
        match self {
            AssignOp::Set => None,
            AssignOp::Add => Some(BinaryOp::Add),
            AssignOp::Sub => Some(BinaryOp::Sub),
            AssignOp::Mul => Some(BinaryOp::Mul),
            AssignOp::Div => Some(BinaryOp::Div),
            AssignOp::Concat => Some(BinaryOp::Concat),
        }
    }
}

/// Expression tree handed to the runtime by the front end.
///
/// Attributes are named by the resolved integer of their identifier.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Literal(Value),
    /// Bare attribute name, read from `self`.
    Attribute(usize),
    Keyword(Keyword),
    Unary(UnaryOp, Box<Expr>),
    Binary(BinaryOp, Box<Expr>, Box<Expr>),
    /// `object.attribute`
    Member(Box<Expr>, usize),
    Send {
        transport: Transport,
        message: Box<Expr>,
        recipient: Box<Expr>,
    },
    Assign(AssignOp, Box<Expr>, Box<Expr>),
}

impl Expr {
    pub fn literal(value: Value) -> Self {
        Expr::Literal(value)
    }

    pub fn unary(op: UnaryOp, operand: Expr) -> Self {
        Expr::Unary(op, Box::new(operand))
    }

    pub fn binary(op: BinaryOp, left: Expr, right: Expr) -> Self {
        Expr::Binary(op, Box::new(left), Box::new(right))
    }

    pub fn member(object: Expr, attribute: usize) -> Self {
        Expr::Member(Box::new(object), attribute)
    }

    pub fn send(message: Expr, recipient: Expr) -> Self {
        Expr::Send {
            transport: Transport::Send,
            message: Box::new(message),
            recipient: Box::new(recipient),
        }
    }

    pub fn pass(message: Expr, recipient: Expr) -> Self {
        Expr::Send {
            transport: Transport::Pass,
            message: Box::new(message),
            recipient: Box::new(recipient),
        }
    }

    pub fn assign(op: AssignOp, target: Expr, value: Expr) -> Self {
        Expr::Assign(op, Box::new(target), Box::new(value))
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Literal(value) => write!(f, "{}", value),
            Expr::Attribute(id) => write!(f, "@{}", id),
            Expr::Keyword(keyword) => write!(f, "{:?}", keyword),
            Expr::Unary(op, operand) => write!(f, "({:?} {})", op, operand),
            Expr::Binary(op, left, right) => write!(f, "({} {} {})", left, op.symbol(), right),
            Expr::Member(object, id) => write!(f, "{}.@{}", object, id),
            Expr::Send {
                transport,
                message,
                recipient,
            } => {
                let arrow = match transport {
                    Transport::Send => "->",
                    Transport::Pass => "-->",
                };
                write!(f, "({} {} {})", message, arrow, recipient)
            }
            Expr::Assign(op, target, value) => write!(f, "({} {:?}:= {})", target, op, value),
        }
    }
}

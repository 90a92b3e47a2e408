use crate::{
    config::RuntimeConfig,
    runtime::{console::BufferConsole, value::Value},
    syntax::{expression::Expr, program::Program},
};

use super::Interpreter;

pub(crate) fn start(program: Program) -> (Interpreter, BufferConsole) {
    start_with(program, RuntimeConfig::default())
}

pub(crate) fn start_with(program: Program, config: RuntimeConfig) -> (Interpreter, BufferConsole) {
    let console = BufferConsole::new();
    let config = RuntimeConfig {
        random_seed: Some(7),
        ..config
    };
    let interp = Interpreter::new(program)
        .with_config(config)
        .with_console(console.clone());
    (interp, console)
}

pub(crate) fn num(n: i32) -> Expr {
    Expr::Literal(Value::Numeric(n))
}

pub(crate) fn text(s: &str) -> Expr {
    Expr::Literal(Value::Str(s.to_string()))
}

pub(crate) fn str_value(s: &str) -> Value {
    Value::Str(s.to_string())
}

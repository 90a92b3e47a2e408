use crate::{
    error::ArchetypeError,
    runtime::value::{Desired, Value},
    syntax::{
        expression::BinaryOp,
        id_table::IdKind,
        statement::{Stmt, WriteMode},
    },
};

use super::{Context, Flow, Interpreter};

impl Interpreter {
    /// Executes one statement. Expression statements and `write` leave
    /// their value as the running result a handler returns.
    pub fn exec_stmt(&mut self, stmt: &Stmt, context: &Context) -> Flow {
        if self.stopped {
            return Flow::Stop;
        }
        if self.config.debug.statements {
            log::trace!("{} as object {}", stmt.keyword(), context.self_obj);
        }

        // a handler deep inside the statement may have run `stop`
        match self.exec_inner(stmt, context) {
            _ if self.stopped => Flow::Stop,
            flow => flow,
        }
    }

    fn exec_inner(&mut self, stmt: &Stmt, context: &Context) -> Flow {
        match stmt {
            Stmt::Expr(expr) => {
                self.last = self.eval_expr(expr, context, Desired::Rvalue);
                Flow::Continue
            }
            Stmt::Compound(body) => {
                for stmt in body {
                    let flow = self.exec_stmt(stmt, context);
                    if flow != Flow::Continue {
                        return flow;
                    }
                }
                Flow::Continue
            }
            Stmt::If {
                condition,
                then_branch,
                else_branch,
            } => {
                if self.eval_expr(condition, context, Desired::Rvalue).is_truthy() {
                    self.exec_stmt(then_branch, context)
                } else if let Some(else_branch) = else_branch {
                    self.exec_stmt(else_branch, context)
                } else {
                    Flow::Continue
                }
            }
            Stmt::Case {
                subject,
                arms,
                default,
            } => {
                let subject = self.eval_expr(subject, context, Desired::Rvalue);
                for arm in arms {
                    let label = self.eval_expr(&arm.label, context, Desired::Rvalue);
                    if self.result_compare(BinaryOp::Eq, &subject, &label) {
                        return self.exec_stmt(&arm.body, context);
                    }
                }
                match default {
                    Some(body) => self.exec_stmt(body, context),
                    None => Flow::Continue,
                }
            }
            Stmt::Create { type_index, target } => {
                match self.program.store.create(*type_index) {
                    Ok(index) => {
                        if self.config.debug.memory {
                            log::debug!("created object {} of type {}", index, type_index);
                        }
                        let location = self.eval_expr(target, context, Desired::Lvalue);
                        self.last = self.assignment(&location, Value::object(index));
                    }
                    Err(err) => self.report(err),
                }
                Flow::Continue
            }
            Stmt::Destroy(expr) => {
                let doomed = self.eval_expr(expr, context, Desired::Rvalue);
                let result = match doomed {
                    Value::Ident(ident) if ident.kind == IdKind::Object => {
                        self.destroy_object(ident.index)
                    }
                    _ => Err(ArchetypeError::UnknownObject(0)),
                };
                if let Err(err) = result {
                    self.report(err);
                }
                Flow::Continue
            }
            Stmt::For { condition, body } => {
                let mut index = 1;
                while !self.stopped && index <= self.program.store.object_count() {
                    let inner = Context {
                        each: index,
                        ..*context
                    };
                    index += 1;
                    if !self.eval_expr(condition, &inner, Desired::Rvalue).is_truthy() {
                        continue;
                    }
                    match self.exec_stmt(body, &inner) {
                        Flow::Continue => {}
                        Flow::Break => break,
                        Flow::Stop => return Flow::Stop,
                    }
                }
                Flow::Continue
            }
            Stmt::While { condition, body } => {
                while !self.stopped
                    && self.eval_expr(condition, context, Desired::Rvalue).is_truthy()
                {
                    match self.exec_stmt(body, context) {
                        Flow::Continue => {}
                        Flow::Break => break,
                        Flow::Stop => return Flow::Stop,
                    }
                }
                Flow::Continue
            }
            Stmt::Write { mode, exprs } => {
                for expr in exprs {
                    let value = self.eval_expr(expr, context, Desired::Rvalue);
                    let text = self.display(&value);
                    self.console.write(&text);
                    self.last = value;
                }
                match mode {
                    WriteMode::Writes => Flow::Continue,
                    WriteMode::Write => {
                        self.console.newline();
                        Flow::Continue
                    }
                    WriteMode::Stop => {
                        self.console.newline();
                        self.stopped = true;
                        Flow::Stop
                    }
                }
            }
            Stmt::Break => Flow::Break,
        }
    }
}

use std::rc::Rc;

use frontend::ast::{Stmt, StmtKind};

use super::{Flow, FunctionDef, Interpreter, InterpreterError};
use crate::operators;
use crate::values::Value;

impl Interpreter<'_> {
    pub(super) fn resolve(&mut self, stmt: &Stmt) -> Result<Flow, InterpreterError> {
        match &stmt.kind {
            StmtKind::Expr { values } => {
                for value in values {
                    self.evaluate(value)?;
                }

                Ok(Flow::Normal)
            }
            StmtKind::Assign { targets, values } => {
                let mut evaluated = Vec::with_capacity(values.len());
                for value in values {
                    evaluated.push(self.evaluate(value)?);
                }

                // Right-most target list first, names bind pairwise by
                // position. Extra values or extra names are ignored.
                for target in targets.iter().rev() {
                    for (name, value) in target.iter().zip(evaluated.iter()) {
                        self.env.set(name, value.clone());
                    }
                }

                Ok(Flow::Normal)
            }
            StmtKind::AugAssign {
                name,
                operator,
                value,
            } => {
                let current = self.env.get(name);
                let rhs = self.evaluate(value)?;
                let result = operators::apply_binary(*operator, &current, &rhs)?;

                self.env.set(name, result);

                Ok(Flow::Normal)
            }
            StmtKind::Break => Ok(Flow::Break),
            StmtKind::Continue => Ok(Flow::Continue),
            StmtKind::Return { values } => {
                let mut evaluated = Vec::with_capacity(values.len());
                for value in values {
                    evaluated.push(self.evaluate(value)?);
                }

                let value = match evaluated.len() {
                    0 => Value::None,
                    1 => evaluated.pop().unwrap(),
                    _ => Value::Tuple(evaluated),
                };

                Ok(Flow::Return(value))
            }
            StmtKind::If {
                branches,
                else_suite,
            } => {
                for (test, suite) in branches {
                    if self.evaluate(test)?.is_truthy() {
                        return self.execute_suite(suite);
                    }
                }

                match else_suite {
                    Some(suite) => self.execute_suite(suite),
                    None => Ok(Flow::Normal),
                }
            }
            StmtKind::While { test, body } => {
                while self.evaluate(test)?.is_truthy() {
                    match self.execute_suite(body)? {
                        Flow::Normal | Flow::Continue => {}
                        Flow::Break => break,
                        // Leave the return for the enclosing call frame
                        flow @ Flow::Return(_) => return Ok(flow),
                    }
                }

                Ok(Flow::Normal)
            }
            StmtKind::FnDeclaration {
                name,
                params,
                defaults,
                body,
            } => {
                // Defaults are evaluated once, right now, in order
                let mut evaluated = Vec::with_capacity(defaults.len());
                for default in defaults {
                    evaluated.push(self.evaluate(default)?);
                }

                self.functions.insert(
                    name.clone(),
                    FunctionDef {
                        params: params.clone(),
                        defaults: evaluated,
                        body: Rc::clone(body),
                    },
                );

                Ok(Flow::Normal)
            }
        }
    }
}

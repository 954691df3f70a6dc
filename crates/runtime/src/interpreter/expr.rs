use std::collections::HashSet;

use frontend::ast::{BoolOp, CallArg, ExprKind, FStringPart, UnaryOp};

use super::{Flow, Interpreter, InterpreterError};
use crate::values::Value;
use crate::{builtins, operators};

impl Interpreter<'_> {
    pub(super) fn evaluate(&mut self, expr: &ExprKind) -> Result<Value, InterpreterError> {
        match expr {
            ExprKind::IntLiteral { value } => Ok(Value::Int(value.parse()?)),
            ExprKind::FloatLiteral { value } => Ok(Value::Float(*value)),
            ExprKind::StrLiteral { value } => Ok(Value::Str(value.clone())),
            ExprKind::NoneLiteral => Ok(Value::None),
            ExprKind::BoolLiteral { value } => Ok(Value::Bool(*value)),
            ExprKind::Identifier { symbol } => Ok(self.env.get(symbol)),
            ExprKind::BinaryOp {
                left,
                right,
                operator,
            } => {
                let lhs = self.evaluate(left)?;
                let rhs = self.evaluate(right)?;

                Ok(operators::apply_binary(*operator, &lhs, &rhs)?)
            }
            ExprKind::UnaryOp { operator, operand } => {
                let value = self.evaluate(operand)?;

                match operator {
                    UnaryOp::Minus => Ok(operators::negate(value)),
                    UnaryOp::Plus => Ok(value),
                }
            }
            ExprKind::Comparison { first, rest } => {
                // Every operand is evaluated up front, exactly once, then
                // the chain is tested pairwise as a conjunction
                let mut values = vec![self.evaluate(first)?];
                for (_, operand) in rest {
                    values.push(self.evaluate(operand)?);
                }

                for (i, (operator, _)) in rest.iter().enumerate() {
                    if !operators::compare(&values[i], &values[i + 1], *operator) {
                        return Ok(Value::Bool(false));
                    }
                }

                Ok(Value::Bool(true))
            }
            ExprKind::BoolOp { operator, operands } => {
                let mut result = self.evaluate(&operands[0])?;

                for operand in &operands[1..] {
                    let decided = match operator {
                        BoolOp::Or => result.is_truthy(),
                        BoolOp::And => !result.is_truthy(),
                    };

                    // The deciding operand is handed back uncoerced
                    if decided {
                        return Ok(result);
                    }

                    result = self.evaluate(operand)?;
                }

                Ok(result)
            }
            ExprKind::Not { operand } => {
                let value = self.evaluate(operand)?;

                Ok(Value::Bool(!value.is_truthy()))
            }
            ExprKind::FString { parts } => self.evaluate_format_string(parts),
            ExprKind::FunctionCall { name, args } => {
                let mut positional: Vec<Value> = vec![];
                let mut keyword: Vec<(String, Value)> = vec![];

                for arg in args {
                    match arg {
                        CallArg::Positional(value) => positional.push(self.evaluate(value)?),
                        CallArg::Keyword { name, value } => {
                            keyword.push((name.clone(), self.evaluate(value)?))
                        }
                    }
                }

                // Builtins win over user definitions and only take the
                // positional arguments
                if builtins::is_builtin(name) {
                    return Ok(builtins::call_builtin(name, &positional, &mut *self.out)?);
                }

                self.call_function(name, positional, keyword)
            }
        }
    }

    fn call_function(
        &mut self,
        name: &str,
        positional: Vec<Value>,
        keyword: Vec<(String, Value)>,
    ) -> Result<Value, InterpreterError> {
        // Unknown callees quietly evaluate to None
        let func = match self.functions.get(name) {
            Some(func) => func.clone(),
            None => return Ok(Value::None),
        };

        self.env.push_frame();

        // Positional arguments bind left to right, extras are dropped
        let bound_count = positional.len().min(func.params.len());
        let mut bound: HashSet<String> = func.params.iter().take(bound_count).cloned().collect();

        for (param, value) in func.params.iter().zip(positional) {
            self.env.set(param, value);
        }

        // Keyword arguments overwrite, and may introduce locals that are
        // not parameters at all
        for (kw_name, value) in keyword {
            self.env.set(&kw_name, value);
            bound.insert(kw_name);
        }

        // Whatever is still unbound takes its default if it has one
        let first_default = func.params.len().saturating_sub(func.defaults.len());
        for (i, param) in func.params.iter().enumerate() {
            if i >= first_default && !bound.contains(param) {
                self.env.set(param, func.defaults[i - first_default].clone());
            }
        }

        let flow = self.execute_suite(&func.body);
        self.env.pop_frame();

        match flow? {
            Flow::Return(value) => Ok(value),
            _ => Ok(Value::None),
        }
    }

    fn evaluate_format_string(&mut self, parts: &[FStringPart]) -> Result<Value, InterpreterError> {
        let mut result = String::new();

        for part in parts {
            match part {
                FStringPart::Literal(chunk) => {
                    result.push_str(&chunk.replace("{{", "{").replace("}}", "}"));
                }
                FStringPart::Interpolation(exprs) => {
                    for (idx, expr) in exprs.iter().enumerate() {
                        if idx > 0 {
                            result.push_str(", ");
                        }

                        let value = self.evaluate(expr)?;
                        result.push_str(&value.to_string());
                    }
                }
            }
        }

        Ok(Value::Str(result))
    }
}

mod expr;
mod interp_errors;
mod stmt;

use std::collections::HashMap;
use std::io::Write;
use std::rc::Rc;

use frontend::ast::{Program, Suite};
use tools::errors::{CodeErr, ReportCodeErr};

pub use interp_errors::InterpreterError;

use super::environment::Env;
use super::values::Value;

// Outcome of a single statement. Loops consume Break and Continue, call
// frames consume Return, everything else propagates outward untouched.
#[derive(Debug, PartialEq)]
pub enum Flow {
    Normal,
    Break,
    Continue,
    Return(Value),
}

// Registered by 'def'. Defaults are already evaluated, they align to the
// trailing parameters by count.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDef {
    params: Vec<String>,
    defaults: Vec<Value>,
    body: Rc<Suite>,
}

pub struct Interpreter<'a> {
    env: Env,
    functions: HashMap<String, FunctionDef>,
    out: &'a mut dyn Write,
}

impl<'a> Interpreter<'a> {
    pub fn new(out: &'a mut dyn Write) -> Self {
        Self {
            env: Env::new(),
            functions: HashMap::new(),
            out,
        }
    }

    pub fn execute_program(&mut self, program: &Program) -> Result<(), CodeErr> {
        for stmt in &program.statements {
            let flow = self.resolve(stmt).map_err(|e| e.to_glob_err(stmt.line))?;

            // A top-level return halts the whole program. Stray break and
            // continue have no loop to act on and fall through.
            if let Flow::Return(_) = flow {
                break;
            }
        }

        Ok(())
    }

    fn execute_suite(&mut self, suite: &Suite) -> Result<Flow, InterpreterError> {
        for stmt in suite {
            match self.resolve(stmt)? {
                Flow::Normal => {}
                flow => return Ok(flow),
            }
        }

        Ok(Flow::Normal)
    }
}

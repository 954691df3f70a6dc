use thiserror::Error;

use crate::builtins::BuiltinError;
use crate::values::ValueError;
use tools::errors::ReportCodeErr;

#[derive(Error, Debug, PartialEq)]
pub enum InterpreterError {
    #[error("{0}")]
    Value(#[from] ValueError),

    #[error("{0}")]
    Builtin(#[from] BuiltinError),
}

// Implement global trait for final error
impl ReportCodeErr for InterpreterError {}

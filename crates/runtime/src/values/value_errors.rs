use colored::*;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum ValueError {
    #[error("{} integer division or modulo by zero", "Error".red().bold())]
    DivisionByZero,

    #[error("{} invalid decimal integer: -{0}-", "Error".red().bold())]
    MalformedInt(String),

    #[error("{} invalid float: -{0}-", "Error".red().bold())]
    MalformedFloat(String),
}

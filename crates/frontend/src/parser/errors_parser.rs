use colored::*;
use thiserror::*;

use super::TokenKind;
use tools::errors::ReportCodeErr;

#[derive(Error, Debug, PartialEq)]
pub enum ParserError {
    // Token
    #[error("expected token: -{0:?}-, token found: -{1:?}-")]
    FoundWrongToken(TokenKind, TokenKind),

    #[error("tried to use non existant token")]
    EmptyTokenBufferUsed,

    #[error("{} while parsing expression, unexpected token: -{0}-", "Error".red().bold())]
    UnexpectedToken(String),

    // Assignment
    #[error("{} while parsing assignment: targets must be plain names, found: -{0}-", "Error".red().bold())]
    NonNameAssignTarget(String),

    #[error("{} while parsing augmented assignment: target must be a single name", "Error".red().bold())]
    InvalidAugAssignTarget,

    #[error("{} while parsing augmented assignment, unknown operator: -{0}-", "Error".red().bold())]
    UnknownAugAssignOperator(String),

    // Functions declaration
    #[error("{} while parsing function declaration: expected identifier after 'def' keyword.", "Error".red().bold())]
    MissingIdentifierAfterDef,

    // Numbers
    #[error("{} while parsing number literal: -{0}-", "Error".red().bold())]
    MalformedNumber(String),

    // Format strings
    #[error("{} while parsing format string: missing '}}' to close an embedded expression.", "Error".red().bold())]
    UnclosedFStringExpr,

    #[error("{} while parsing format string: empty embedded expression.", "Error".red().bold())]
    EmptyFStringExpr,

    #[error("{} while parsing format string embedded expression: {0}", "Error".red().bold())]
    FStringExpr(String),
}

// Implement global trait for final error
impl ReportCodeErr for ParserError {}

use std::io::Write;
use std::str::FromStr;

use colored::*;
use thiserror::Error;

use crate::bigint::BigInt;
use crate::values::{Value, ValueError};

#[derive(Debug, PartialEq, Error)]
pub enum BuiltinError {
    #[error("{0}")]
    Conversion(#[from] ValueError),

    #[error("{} while writing to stdout: {0}", "Error".red().bold())]
    Stdout(String),
}

// Reserved names. They shadow user definitions at call resolution.
pub fn is_builtin(name: &str) -> bool {
    matches!(name, "print" | "int" | "float" | "str" | "bool")
}

// Builtins only ever see positional arguments. A conversion called with
// no argument yields None.
pub fn call_builtin(
    name: &str,
    args: &[Value],
    out: &mut dyn Write,
) -> Result<Value, BuiltinError> {
    match name {
        "print" => print(args, out),
        "int" => match args.first() {
            Some(value) => Ok(to_int(value)?),
            None => Ok(Value::None),
        },
        "float" => match args.first() {
            Some(value) => Ok(to_float(value)?),
            None => Ok(Value::None),
        },
        "str" => match args.first() {
            Some(value) => Ok(to_str(value)),
            None => Ok(Value::None),
        },
        "bool" => match args.first() {
            Some(value) => Ok(Value::Bool(value.is_truthy())),
            None => Ok(Value::None),
        },
        _ => Ok(Value::None),
    }
}

fn print(args: &[Value], out: &mut dyn Write) -> Result<Value, BuiltinError> {
    let mut separator = "";

    for arg in args {
        write!(out, "{}{}", separator, arg).map_err(|e| BuiltinError::Stdout(e.to_string()))?;
        separator = " ";
    }

    writeln!(out).map_err(|e| BuiltinError::Stdout(e.to_string()))?;

    Ok(Value::None)
}

fn to_int(value: &Value) -> Result<Value, ValueError> {
    match value {
        Value::Int(_) => Ok(value.clone()),
        Value::Float(f) => {
            let truncated = f.trunc();
            if !truncated.is_finite() {
                return Err(ValueError::MalformedInt(f.to_string()));
            }

            // Re-render without an exponent so any magnitude parses
            Ok(Value::Int(BigInt::from_str(&format!("{:.0}", truncated))?))
        }
        Value::Bool(b) => Ok(Value::Int(BigInt::from(*b as i64))),
        Value::Str(s) => Ok(Value::Int(BigInt::from_str(s)?)),
        _ => Ok(Value::Int(BigInt::zero())),
    }
}

fn to_float(value: &Value) -> Result<Value, ValueError> {
    match value {
        Value::Float(_) => Ok(value.clone()),
        Value::Int(i) => Ok(Value::Float(i.to_f64())),
        Value::Bool(b) => Ok(Value::Float(if *b { 1.0 } else { 0.0 })),
        Value::Str(s) => s
            .parse::<f64>()
            .map(Value::Float)
            .map_err(|_| ValueError::MalformedFloat(s.clone())),
        _ => Ok(Value::Float(0.0)),
    }
}

fn to_str(value: &Value) -> Value {
    match value {
        Value::Str(_) => value.clone(),
        other => Value::Str(other.to_string()),
    }
}

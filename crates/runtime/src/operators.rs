use frontend::ast::{BinOp, CmpOp};

use crate::bigint::BigInt;
use crate::values::{Value, ValueError};

// The coercion matrix for the six binary operators. Type combinations
// outside the matrix evaluate to None instead of failing, only integer
// division and modulo by zero are fatal.
pub fn apply_binary(operator: BinOp, lhs: &Value, rhs: &Value) -> Result<Value, ValueError> {
    match operator {
        BinOp::Add => Ok(add(lhs, rhs)),
        BinOp::Sub => Ok(sub(lhs, rhs)),
        BinOp::Mul => Ok(mul(lhs, rhs)),
        BinOp::Div => Ok(div(lhs, rhs)),
        BinOp::FloorDiv => floor_div(lhs, rhs),
        BinOp::Mod => modulo(lhs, rhs),
    }
}

pub fn add(lhs: &Value, rhs: &Value) -> Value {
    match (lhs, rhs) {
        (Value::Int(a), Value::Int(b)) => Value::Int(a + b),
        (Value::Str(a), Value::Str(b)) => Value::Str(format!("{}{}", a, b)),
        // Compatibility quirk: '+' repeats the string like '*' does
        (Value::Str(s), Value::Int(n)) => Value::Str(repeat_str(s, n)),
        _ => match (as_f64(lhs), as_f64(rhs)) {
            (Some(a), Some(b)) => Value::Float(a + b),
            _ => Value::None,
        },
    }
}

pub fn sub(lhs: &Value, rhs: &Value) -> Value {
    match (lhs, rhs) {
        (Value::Int(a), Value::Int(b)) => Value::Int(a - b),
        _ => match (as_f64(lhs), as_f64(rhs)) {
            (Some(a), Some(b)) => Value::Float(a - b),
            _ => Value::None,
        },
    }
}

pub fn mul(lhs: &Value, rhs: &Value) -> Value {
    match (lhs, rhs) {
        (Value::Int(a), Value::Int(b)) => Value::Int(a * b),
        (Value::Str(s), Value::Int(n)) | (Value::Int(n), Value::Str(s)) => {
            Value::Str(repeat_str(s, n))
        }
        _ => match (as_f64(lhs), as_f64(rhs)) {
            (Some(a), Some(b)) => Value::Float(a * b),
            _ => Value::None,
        },
    }
}

// True division always lands on a float, IEEE rules apply so a zero
// divisor gives an infinity or NaN rather than an error
pub fn div(lhs: &Value, rhs: &Value) -> Value {
    match (as_f64(lhs), as_f64(rhs)) {
        (Some(a), Some(b)) => Value::Float(a / b),
        _ => Value::None,
    }
}

pub fn floor_div(lhs: &Value, rhs: &Value) -> Result<Value, ValueError> {
    match (lhs, rhs) {
        (Value::Int(a), Value::Int(b)) => {
            let (quotient, _) = floor_div_rem(a, b)?;
            Ok(Value::Int(quotient))
        }
        _ => match (as_f64(lhs), as_f64(rhs)) {
            (Some(a), Some(b)) => Ok(Value::Float((a / b).floor())),
            _ => Ok(Value::None),
        },
    }
}

pub fn modulo(lhs: &Value, rhs: &Value) -> Result<Value, ValueError> {
    match (lhs, rhs) {
        (Value::Int(a), Value::Int(b)) => {
            let (quotient, _) = floor_div_rem(a, b)?;
            Ok(Value::Int(a - &(&quotient * b)))
        }
        _ => match (as_f64(lhs), as_f64(rhs)) {
            (Some(a), Some(b)) => Ok(Value::Float(a - (a / b).floor() * b)),
            _ => Ok(Value::None),
        },
    }
}

// Unary minus on a non-number hands the value back unchanged
pub fn negate(value: Value) -> Value {
    match value {
        Value::Int(i) => Value::Int(-&i),
        Value::Float(f) => Value::Float(-f),
        other => other,
    }
}

pub fn compare(lhs: &Value, rhs: &Value, operator: CmpOp) -> bool {
    match operator {
        CmpOp::Eq => eq(lhs, rhs),
        CmpOp::NotEq => !eq(lhs, rhs),
        CmpOp::Lt => lt(lhs, rhs),
        // The other orderings all come from '<' by swap or negation
        CmpOp::Gt => lt(rhs, lhs),
        CmpOp::LtEq => !lt(rhs, lhs),
        CmpOp::GtEq => !lt(lhs, rhs),
    }
}

fn eq(lhs: &Value, rhs: &Value) -> bool {
    match (lhs, rhs) {
        (Value::None, Value::None) => true,
        (Value::Bool(a), Value::Bool(b)) => a == b,
        (Value::Int(a), Value::Int(b)) => a == b,
        (Value::Float(a), Value::Float(b)) => a == b,
        (Value::Str(a), Value::Str(b)) => a == b,
        // Int and Float mix through doubles. Bool is its own tag and
        // never joins the numeric tower.
        (Value::Int(a), Value::Float(b)) => a.to_f64() == *b,
        (Value::Float(a), Value::Int(b)) => *a == b.to_f64(),
        _ => false,
    }
}

fn lt(lhs: &Value, rhs: &Value) -> bool {
    match (lhs, rhs) {
        (Value::Int(a), Value::Int(b)) => a < b,
        (Value::Str(a), Value::Str(b)) => a < b,
        _ => match (as_f64(lhs), as_f64(rhs)) {
            (Some(a), Some(b)) => a < b,
            _ => false,
        },
    }
}

fn as_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Int(i) => Some(i.to_f64()),
        Value::Float(f) => Some(*f),
        _ => None,
    }
}

// Floored quotient and remainder built on the truncated primitives:
// when the remainder is nonzero and the operand signs differ, the
// truncated quotient is one too high
fn floor_div_rem(a: &BigInt, b: &BigInt) -> Result<(BigInt, BigInt), ValueError> {
    let (mut quotient, remainder) = a.div_rem(b)?;

    if !remainder.is_zero() && a.is_negative() != b.is_negative() {
        quotient = &quotient - &BigInt::from(1);
    }

    Ok((quotient, remainder))
}

// Negative counts give the empty string. Counts beyond usize cannot be
// materialized anyway.
fn repeat_str(s: &str, count: &BigInt) -> String {
    match count.to_usize() {
        Some(n) => s.repeat(n),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn int(n: i64) -> Value {
        Value::Int(BigInt::from(n))
    }

    fn string(s: &str) -> Value {
        Value::Str(s.to_string())
    }

    #[test]
    fn int_arithmetic_is_exact() {
        assert_eq!(add(&int(60), &int(3)), int(63));
        assert_eq!(sub(&int(60), &int(63)), int(-3));
        assert_eq!(mul(&int(-12), &int(34)), int(-408));
    }

    #[test]
    fn mixed_arithmetic_lands_on_floats() {
        assert_eq!(add(&int(1), &Value::Float(0.5)), Value::Float(1.5));
        assert_eq!(sub(&Value::Float(2.5), &int(1)), Value::Float(1.5));
        assert_eq!(mul(&Value::Float(1.5), &Value::Float(2.0)), Value::Float(3.0));
    }

    #[test]
    fn true_division_is_always_float() {
        assert_eq!(div(&int(1), &int(4)), Value::Float(0.25));
        assert_eq!(div(&int(1), &int(0)), Value::Float(f64::INFINITY));
    }

    #[test]
    fn floor_division_rounds_toward_negative_infinity() {
        assert_eq!(floor_div(&int(10), &int(3)), Ok(int(3)));
        assert_eq!(floor_div(&int(-10), &int(3)), Ok(int(-4)));
        assert_eq!(floor_div(&int(10), &int(-3)), Ok(int(-4)));
        assert_eq!(floor_div(&int(-10), &int(-3)), Ok(int(3)));
        assert_eq!(floor_div(&int(9), &int(3)), Ok(int(3)));
        assert_eq!(floor_div(&int(-9), &int(3)), Ok(int(-3)));

        assert_eq!(
            floor_div(&Value::Float(7.0), &int(2)),
            Ok(Value::Float(3.0))
        );
        assert_eq!(
            floor_div(&Value::Float(-7.0), &int(2)),
            Ok(Value::Float(-4.0))
        );
    }

    #[test]
    fn modulo_follows_the_floored_quotient() {
        assert_eq!(modulo(&int(10), &int(3)), Ok(int(1)));
        assert_eq!(modulo(&int(-10), &int(3)), Ok(int(2)));
        assert_eq!(modulo(&int(10), &int(-3)), Ok(int(-2)));
        assert_eq!(modulo(&int(-10), &int(-3)), Ok(int(-1)));
    }

    #[test]
    fn division_identity_holds() {
        // (a // b) * b + a % b == a, with the remainder bounded by b
        for a in [-27i64, -10, -1, 0, 1, 10, 27] {
            for b in [-7i64, -3, 3, 7] {
                let q = floor_div(&int(a), &int(b)).unwrap();
                let m = modulo(&int(a), &int(b)).unwrap();

                assert_eq!(add(&mul(&q, &int(b)), &m), int(a), "{a} / {b}");

                if let Value::Int(m) = m {
                    if b > 0 {
                        assert!(!m.is_negative() && m < BigInt::from(b));
                    } else {
                        assert!(m <= BigInt::zero() && BigInt::from(b) < m || m.is_zero());
                    }
                }
            }
        }
    }

    #[test]
    fn integer_division_by_zero_is_fatal() {
        assert_eq!(
            floor_div(&int(1), &int(0)),
            Err(ValueError::DivisionByZero)
        );
        assert_eq!(modulo(&int(1), &int(0)), Err(ValueError::DivisionByZero));
    }

    #[test]
    fn string_concat_and_repeat() {
        assert_eq!(add(&string("ab"), &string("cd")), string("abcd"));
        assert_eq!(mul(&string("ab"), &int(3)), string("ababab"));
        assert_eq!(mul(&int(3), &string("ab")), string("ababab"));
        assert_eq!(mul(&string("ab"), &int(0)), string(""));
        assert_eq!(mul(&string("ab"), &int(-2)), string(""));

        // '+' with a string and an integer repeats too
        assert_eq!(add(&string("ab"), &int(2)), string("abab"));
    }

    #[test]
    fn out_of_matrix_combinations_give_none() {
        assert_eq!(add(&Value::None, &int(1)), Value::None);
        assert_eq!(sub(&string("a"), &string("b")), Value::None);
        assert_eq!(mul(&string("a"), &string("b")), Value::None);
        assert_eq!(div(&string("a"), &int(2)), Value::None);
        assert_eq!(floor_div(&int(2), &string("a")), Ok(Value::None));

        // Bool does not promote to a number
        assert_eq!(add(&Value::Bool(true), &int(1)), Value::None);
    }

    #[test]
    fn negation() {
        assert_eq!(negate(int(5)), int(-5));
        assert_eq!(negate(Value::Float(2.5)), Value::Float(-2.5));
        assert_eq!(negate(Value::Bool(true)), Value::Bool(true));
        assert_eq!(negate(string("x")), string("x"));
    }

    #[test]
    fn equality_matrix() {
        assert!(compare(&Value::None, &Value::None, CmpOp::Eq));
        assert!(compare(&int(3), &int(3), CmpOp::Eq));
        assert!(compare(&int(3), &Value::Float(3.0), CmpOp::Eq));
        assert!(compare(&Value::Float(3.0), &int(3), CmpOp::Eq));
        assert!(compare(&string("a"), &string("a"), CmpOp::Eq));
        assert!(compare(&Value::Bool(true), &Value::Bool(true), CmpOp::Eq));

        // Cross-tag equality is false, inequality true
        assert!(!compare(&Value::Bool(true), &int(1), CmpOp::Eq));
        assert!(compare(&Value::Bool(true), &int(1), CmpOp::NotEq));
        assert!(!compare(&Value::None, &int(0), CmpOp::Eq));
        assert!(!compare(&string("1"), &int(1), CmpOp::Eq));

        // NaN is not equal to itself
        assert!(!compare(
            &Value::Float(f64::NAN),
            &Value::Float(f64::NAN),
            CmpOp::Eq
        ));
    }

    #[test]
    fn ordering_matrix() {
        assert!(compare(&int(2), &int(10), CmpOp::Lt));
        assert!(compare(&int(10), &int(2), CmpOp::Gt));
        assert!(compare(&int(2), &int(2), CmpOp::LtEq));
        assert!(compare(&int(2), &int(2), CmpOp::GtEq));
        assert!(compare(&int(1), &Value::Float(1.5), CmpOp::Lt));
        assert!(compare(&string("abc"), &string("abd"), CmpOp::Lt));

        // Cross-tag ordering is simply false
        assert!(!compare(&string("a"), &int(1), CmpOp::Lt));
        assert!(!compare(&string("a"), &int(1), CmpOp::Gt));
    }
}

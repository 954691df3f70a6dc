use std::cmp::Ordering;
use std::fmt::Display;
use std::ops::{Add, Mul, Neg, Sub};
use std::str::FromStr;

use crate::values::ValueError;

// Arbitrary precision signed integer. Base-10 digits are stored least
// significant first. Canonical form: no leading zero digit except the
// single zero itself, and zero is never negative.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BigInt {
    digits: Vec<u8>,
    negative: bool,
}

impl BigInt {
    pub fn zero() -> Self {
        Self {
            digits: vec![0],
            negative: false,
        }
    }

    // Restores canonical form before exposing a freshly computed value
    fn from_parts(mut digits: Vec<u8>, negative: bool) -> Self {
        while digits.len() > 1 && *digits.last().unwrap() == 0 {
            digits.pop();
        }

        if digits == [0] {
            return Self::zero();
        }

        Self { digits, negative }
    }

    pub fn is_zero(&self) -> bool {
        self.digits == [0]
    }

    pub fn is_negative(&self) -> bool {
        self.negative && !self.is_zero()
    }

    pub fn abs(&self) -> BigInt {
        BigInt {
            digits: self.digits.clone(),
            negative: false,
        }
    }

    // Truncated quotient and remainder, both toward zero. The remainder
    // keeps the sign of the dividend.
    pub fn div_rem(&self, other: &BigInt) -> Result<(BigInt, BigInt), ValueError> {
        if other.is_zero() {
            return Err(ValueError::DivisionByZero);
        }

        let divisor = other.abs();

        if cmp_magnitude(self, other) == Ordering::Less {
            return Ok((BigInt::zero(), self.clone()));
        }

        // Schoolbook long division, most significant digit first
        let mut quotient_digits: Vec<u8> = Vec::with_capacity(self.digits.len());
        let mut current = BigInt::zero();

        for &digit in self.digits.iter().rev() {
            current = current.shift_push(digit);

            let mut q = 0u8;
            while current >= divisor {
                current = &current - &divisor;
                q += 1;
            }
            quotient_digits.push(q);
        }

        quotient_digits.reverse();
        let quotient = BigInt::from_parts(quotient_digits, self.negative != other.negative);
        let remainder = self - &(&quotient * other);

        Ok((quotient, remainder))
    }

    // current * 10 + digit, on magnitudes
    fn shift_push(&self, digit: u8) -> BigInt {
        let mut digits = self.digits.clone();
        digits.insert(0, digit);
        BigInt::from_parts(digits, false)
    }

    // Lossy, the usual digit sum. Magnitudes beyond f64 range saturate
    // to infinity like any other double overflow.
    pub fn to_f64(&self) -> f64 {
        let mut result = 0.0;
        let mut base = 1.0;

        for &digit in &self.digits {
            result += digit as f64 * base;
            base *= 10.0;
        }

        if self.negative {
            -result
        } else {
            result
        }
    }

    // None when negative or too large to index or repeat with
    pub fn to_usize(&self) -> Option<usize> {
        if self.is_negative() {
            return None;
        }

        let mut result: usize = 0;
        for &digit in self.digits.iter().rev() {
            result = result.checked_mul(10)?.checked_add(digit as usize)?;
        }

        Some(result)
    }
}

impl From<i64> for BigInt {
    fn from(num: i64) -> Self {
        if num == 0 {
            return BigInt::zero();
        }

        let negative = num < 0;
        let mut magnitude = num.unsigned_abs();
        let mut digits = vec![];

        while magnitude > 0 {
            digits.push((magnitude % 10) as u8);
            magnitude /= 10;
        }

        BigInt { digits, negative }
    }
}

impl FromStr for BigInt {
    type Err = ValueError;

    // Signed decimal, optional leading '+' or '-'
    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let unsigned = text.strip_prefix(['+', '-']).unwrap_or(text);

        if unsigned.is_empty() || !unsigned.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ValueError::MalformedInt(text.to_string()));
        }

        let digits = unsigned.bytes().rev().map(|b| b - b'0').collect();

        Ok(BigInt::from_parts(digits, text.starts_with('-')))
    }
}

impl Display for BigInt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.negative {
            write!(f, "-")?;
        }

        for &digit in self.digits.iter().rev() {
            write!(f, "{}", digit)?;
        }

        Ok(())
    }
}

// Magnitude comparison, ignoring signs
fn cmp_magnitude(a: &BigInt, b: &BigInt) -> Ordering {
    if a.digits.len() != b.digits.len() {
        return a.digits.len().cmp(&b.digits.len());
    }

    for (da, db) in a.digits.iter().rev().zip(b.digits.iter().rev()) {
        if da != db {
            return da.cmp(db);
        }
    }

    Ordering::Equal
}

fn add_magnitude(a: &[u8], b: &[u8]) -> Vec<u8> {
    let mut digits = Vec::with_capacity(a.len().max(b.len()) + 1);
    let mut carry = 0u8;
    let mut i = 0;

    while i < a.len() || i < b.len() || carry > 0 {
        let sum = carry + a.get(i).copied().unwrap_or(0) + b.get(i).copied().unwrap_or(0);
        digits.push(sum % 10);
        carry = sum / 10;
        i += 1;
    }

    digits
}

// Requires |a| >= |b|
fn sub_magnitude(a: &[u8], b: &[u8]) -> Vec<u8> {
    let mut digits = Vec::with_capacity(a.len());
    let mut borrow = 0i8;

    for (i, &da) in a.iter().enumerate() {
        let mut diff = da as i8 - borrow - b.get(i).copied().unwrap_or(0) as i8;

        if diff < 0 {
            diff += 10;
            borrow = 1;
        } else {
            borrow = 0;
        }

        digits.push(diff as u8);
    }

    digits
}

impl Add for &BigInt {
    type Output = BigInt;

    fn add(self, other: &BigInt) -> BigInt {
        if self.negative == other.negative {
            return BigInt::from_parts(
                add_magnitude(&self.digits, &other.digits),
                self.negative,
            );
        }

        if self.negative {
            // (-a) + b is b - |a|
            other - &self.abs()
        } else {
            self - &other.abs()
        }
    }
}

impl Sub for &BigInt {
    type Output = BigInt;

    fn sub(self, other: &BigInt) -> BigInt {
        if self.negative != other.negative {
            // a - (-b) is a + b, (-a) - b is -(a + b)
            return BigInt::from_parts(
                add_magnitude(&self.digits, &other.digits),
                self.negative,
            );
        }

        match cmp_magnitude(self, other) {
            Ordering::Less => BigInt::from_parts(
                sub_magnitude(&other.digits, &self.digits),
                !self.negative,
            ),
            _ => BigInt::from_parts(
                sub_magnitude(&self.digits, &other.digits),
                self.negative,
            ),
        }
    }
}

impl Mul for &BigInt {
    type Output = BigInt;

    fn mul(self, other: &BigInt) -> BigInt {
        let mut digits = vec![0u8; self.digits.len() + other.digits.len()];

        for (i, &da) in self.digits.iter().enumerate() {
            let mut carry = 0u32;
            let mut j = 0;

            while j < other.digits.len() || carry > 0 {
                let db = other.digits.get(j).copied().unwrap_or(0) as u32;
                let cur = digits[i + j] as u32 + da as u32 * db + carry;

                digits[i + j] = (cur % 10) as u8;
                carry = cur / 10;
                j += 1;
            }
        }

        BigInt::from_parts(digits, self.negative != other.negative)
    }
}

impl Neg for &BigInt {
    type Output = BigInt;

    fn neg(self) -> BigInt {
        if self.is_zero() {
            return self.clone();
        }

        BigInt {
            digits: self.digits.clone(),
            negative: !self.negative,
        }
    }
}

impl PartialOrd for BigInt {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for BigInt {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.negative, other.negative) {
            (true, false) => Ordering::Less,
            (false, true) => Ordering::Greater,
            (false, false) => cmp_magnitude(self, other),
            // Both negative, larger magnitude is smaller
            (true, true) => cmp_magnitude(other, self),
        }
    }
}

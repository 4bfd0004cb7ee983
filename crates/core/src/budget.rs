//! Fixed-point project budget (12 digits, 2 fractional).
//!
//! Stored as integer cents in a `BIGINT` column. Serialized as a decimal
//! string with exactly two fractional digits (`"1500.00"`) and accepted on
//! input as either a string or a JSON number.

use std::fmt;
use std::str::FromStr;

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::CoreError;

/// Total significant digits allowed.
pub const MAX_DIGITS: u32 = 12;

/// Digits after the decimal point.
pub const DECIMAL_PLACES: u32 = 2;

/// Largest representable amount in cents (`9_999_999_999.99`).
pub const MAX_CENTS: i64 = 10_i64.pow(MAX_DIGITS) - 1;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Budget(i64);

impl Budget {
    pub const ZERO: Budget = Budget(0);

    /// Build a budget from cents, enforcing the range.
    pub fn from_cents(cents: i64) -> Result<Self, CoreError> {
        if cents < 0 {
            return Err(CoreError::Validation(
                "Budget cannot be negative".to_string(),
            ));
        }
        if cents > MAX_CENTS {
            return Err(CoreError::Validation(format!(
                "Budget exceeds the maximum of {} digits",
                MAX_DIGITS
            )));
        }
        Ok(Self(cents))
    }

    pub fn cents(self) -> i64 {
        self.0
    }
}

impl fmt::Display for Budget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}", self.0 / 100, self.0 % 100)
    }
}

impl FromStr for Budget {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || CoreError::Validation(format!("Invalid budget '{s}'"));
        let s = s.trim();
        if s.starts_with('-') {
            return Err(CoreError::Validation(
                "Budget cannot be negative".to_string(),
            ));
        }

        let (whole, frac) = match s.split_once('.') {
            Some((whole, frac)) => (whole, frac),
            None => (s, ""),
        };
        if whole.is_empty() && frac.is_empty() {
            return Err(invalid());
        }
        if !whole.chars().all(|c| c.is_ascii_digit()) || !frac.chars().all(|c| c.is_ascii_digit())
        {
            return Err(invalid());
        }
        if frac.len() > DECIMAL_PLACES as usize {
            return Err(CoreError::Validation(format!(
                "Budget allows at most {DECIMAL_PLACES} decimal places"
            )));
        }

        let whole = whole.trim_start_matches('0');
        if whole.len() > (MAX_DIGITS - DECIMAL_PLACES) as usize {
            return Err(CoreError::Validation(format!(
                "Budget exceeds the maximum of {MAX_DIGITS} digits"
            )));
        }

        let whole: i64 = if whole.is_empty() {
            0
        } else {
            whole.parse().map_err(|_| invalid())?
        };
        let frac: i64 = format!("{frac:0<2}").parse().map_err(|_| invalid())?;

        Self::from_cents(whole * 100 + frac)
    }
}

impl TryFrom<i64> for Budget {
    type Error = CoreError;

    fn try_from(cents: i64) -> Result<Self, Self::Error> {
        Self::from_cents(cents)
    }
}

impl Serialize for Budget {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

struct BudgetVisitor;

impl Visitor<'_> for BudgetVisitor {
    type Value = Budget;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a decimal amount as a string or number")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Budget, E> {
        v.parse().map_err(E::custom)
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Budget, E> {
        let cents = i64::try_from(v)
            .ok()
            .and_then(|v| v.checked_mul(100))
            .ok_or_else(|| E::custom("Budget is out of range"))?;
        Budget::from_cents(cents).map_err(E::custom)
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Budget, E> {
        let cents = v
            .checked_mul(100)
            .ok_or_else(|| E::custom("Budget is out of range"))?;
        Budget::from_cents(cents).map_err(E::custom)
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Budget, E> {
        // Formatting through the shortest round-trip repr keeps 12.5 as "12.5".
        v.to_string().parse().map_err(E::custom)
    }
}

impl<'de> Deserialize<'de> for Budget {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(BudgetVisitor)
    }
}

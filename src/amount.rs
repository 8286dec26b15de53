//! Exact Lovelace/ADA monetary values.

use std::fmt;

use serde_json::Value;

use crate::config::{LOVELACE_PER_ADA, MAX_LOVELACE, SCALE};
use crate::error::{Error, Result};
use crate::json;
use crate::validate;
use crate::wire::QuantityUnitBlock;

/// An exact quantity of the chain's native currency.
///
/// Stored as whole Lovelace (the indivisible unit); the ADA rendering is
/// derived with integer arithmetic only, so every representable value
/// round-trips between the two forms without precision loss.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct LovelaceAmount {
    lovelace: u64,
}

impl LovelaceAmount {
    /// Zero Lovelace.
    pub const ZERO: LovelaceAmount = LovelaceAmount { lovelace: 0 };

    /// Wraps a raw Lovelace quantity, enforcing the maximum-supply ceiling.
    pub fn from_lovelace(lovelace: u64) -> Result<Self> {
        if lovelace > MAX_LOVELACE {
            return Err(Error::InvalidAmount(format!(
                "Lovelace amount cannot exceed {}",
                MAX_LOVELACE
            )));
        }
        Ok(Self { lovelace })
    }

    /// Parses a decimal ADA string such as `"1.5"`.
    ///
    /// The accepted grammar is `digits[.digits]` with at most [`SCALE`]
    /// fractional digits and no sign; conversion multiplies by 10^[`SCALE`]
    /// using integer arithmetic only (never floating point).
    pub fn from_ada(ada: &str) -> Result<Self> {
        if !validate::ada_amount(ada) {
            return Err(Error::InvalidAmount(format!(
                "malformed ADA amount \"{}\"",
                ada
            )));
        }

        let (whole, frac) = match ada.split_once('.') {
            Some((whole, frac)) => (whole, frac),
            None => (ada, ""),
        };

        let whole: u64 = whole
            .parse()
            .map_err(|_| Error::InvalidAmount(format!("ADA amount \"{}\" out of range", ada)))?;
        let frac_digits: u64 = if frac.is_empty() {
            0
        } else {
            frac.parse()
                .map_err(|_| Error::InvalidAmount(format!("ADA amount \"{}\" out of range", ada)))?
        };
        let frac_lovelace = frac_digits * 10u64.pow(SCALE - frac.len() as u32);

        let lovelace = whole
            .checked_mul(LOVELACE_PER_ADA)
            .and_then(|n| n.checked_add(frac_lovelace))
            .ok_or_else(|| Error::InvalidAmount(format!("ADA amount \"{}\" out of range", ada)))?;

        Self::from_lovelace(lovelace)
    }

    /// The amount in Lovelace.
    pub fn lovelace(&self) -> u64 {
        self.lovelace
    }

    /// The amount in ADA, rendered with exactly [`SCALE`] fractional digits.
    pub fn ada(&self) -> String {
        format!(
            "{}.{:0width$}",
            self.lovelace / LOVELACE_PER_ADA,
            self.lovelace % LOVELACE_PER_ADA,
            width = SCALE as usize
        )
    }

    /// Parses a bare integer Lovelace field (v1 wire form).
    pub(crate) fn from_json_int(path: &str, value: &Value) -> Result<Self> {
        let raw = value
            .as_i64()
            .ok_or_else(|| Error::invalid_field(path, "integer", json::type_name(value)))?;
        if raw < 0 {
            return Err(Error::invalid_field(
                path,
                "non-negative Lovelace amount",
                raw.to_string(),
            ));
        }
        Self::from_lovelace(raw as u64)
            .map_err(|_| Error::invalid_field(path, "Lovelace within maximum supply", raw.to_string()))
    }

    /// Parses a `{quantity, unit: "lovelace"}` block (v2 wire form).
    pub(crate) fn from_json_block(path: &str, value: &Value) -> Result<Self> {
        let block = QuantityUnitBlock::from_json(path, value)?;
        if block.unit != "lovelace" {
            return Err(Error::invalid_field(
                json::join(path, "unit"),
                "\"lovelace\"",
                format!("\"{}\"", block.unit),
            ));
        }
        Self::from_lovelace(block.quantity).map_err(|_| {
            Error::invalid_field(
                json::join(path, "quantity"),
                "Lovelace within maximum supply",
                block.quantity.to_string(),
            )
        })
    }
}

impl fmt::Display for LovelaceAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.ada())
    }
}

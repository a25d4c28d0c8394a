use serde::{Deserialize, Serialize};

use crate::EngineError;

/// ISO-like currency code used by ledgers and their money values.
///
/// Today the engine is effectively mono-currency (default `INR`), but currency
/// is modeled explicitly to keep the data model future-proof. Multi-currency
/// conversion stays out of scope.
///
/// ## Minor units
///
/// The engine stores monetary values as an `i64` number of **minor units**
/// (see `Money`). `minor_units()` returns how many decimal digits are used
/// when converting between:
/// - major units (human input/output, e.g. `10.50 INR`)
/// - minor units (stored integers, e.g. `1050` paise)
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    #[default]
    Inr,
}

impl Currency {
    /// Canonical currency code.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Currency::Inr => "INR",
        }
    }

    /// Number of fraction digits used when formatting/parsing amounts.
    ///
    /// Example: INR uses 2 fraction digits (paise).
    #[must_use]
    pub const fn minor_units(self) -> u8 {
        match self {
            Currency::Inr => 2,
        }
    }
}

impl core::fmt::Display for Currency {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.code())
    }
}

impl TryFrom<&str> for Currency {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_uppercase().as_str() {
            "INR" => Ok(Currency::Inr),
            other => Err(EngineError::InvalidAmount(format!(
                "unsupported currency: {other}"
            ))),
        }
    }
}

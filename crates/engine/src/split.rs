//! Split arithmetic and validation.
//!
//! Turns a total amount into per-participant shares under one of three
//! methods (equal / unequal / percentage) with deterministic rounding, and
//! checks that proposed shares are internally consistent before an expense is
//! created.
//!
//! All arithmetic runs on integer paise (see [`Money`]). Percentages are
//! handled as integer **basis points** (hundredths of a percent): `40%` is
//! `4_000` bp and a full split is [`FULL_PERCENT_BP`] (`10_000`).

use crate::{EngineError, Money, ResultEngine};

/// 100% expressed in basis points.
pub const FULL_PERCENT_BP: i64 = 10_000;

/// Result of a split with a residual participant.
///
/// The residual participant (typically the current actor) does not enter a
/// share directly; their share is whatever remains after the explicit shares
/// are taken out of the total.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SplitOutcome {
    /// Share of the residual participant, always `>= 0`.
    pub residual_share: Money,
    /// Shares of the explicit participants, in input order.
    pub explicit_shares: Vec<Money>,
}

/// Splits `total` equally among `n` participants.
///
/// `base = total / n` floored in paise; the remainder is distributed one
/// paisa at a time to the first entries in input order, so the first
/// participants absorb the rounding surplus.
///
/// Guarantees `Σ shares == total` exactly and `max − min <= 1` paisa.
///
/// ```rust
/// use engine::{Money, split::equal_split};
///
/// let shares = equal_split(Money::new(1000), 3).unwrap();
/// assert_eq!(shares, vec![Money::new(334), Money::new(333), Money::new(333)]);
/// ```
pub fn equal_split(total: Money, n: usize) -> ResultEngine<Vec<Money>> {
    if n == 0 {
        return Err(EngineError::InvalidParticipantSet(
            "at least one participant is required".to_string(),
        ));
    }
    if total.is_negative() {
        return Err(EngineError::InvalidAmount(
            "total must be >= 0".to_string(),
        ));
    }

    let count = i64::try_from(n)
        .map_err(|_| EngineError::InvalidParticipantSet("too many participants".to_string()))?;
    let base = total.paise() / count;
    let remainder = total.paise() - base * count;

    let shares = (0..count)
        .map(|i| {
            if i < remainder {
                Money::new(base + 1)
            } else {
                Money::new(base)
            }
        })
        .collect();
    Ok(shares)
}

/// Splits `total` with directly supplied shares plus one residual participant.
///
/// The residual share is `total − Σ(explicit)`. A negative residual is a
/// rejection ([`EngineError::NegativeResidual`]), never a clamp to zero.
pub fn unequal_split(total: Money, explicit: &[Money]) -> ResultEngine<SplitOutcome> {
    if total.is_negative() {
        return Err(EngineError::InvalidAmount(
            "total must be >= 0".to_string(),
        ));
    }

    let mut sum = Money::ZERO;
    for share in explicit {
        if share.is_negative() {
            return Err(EngineError::InvalidAmount(format!(
                "share must be >= 0, got {share}"
            )));
        }
        sum = sum
            .checked_add(*share)
            .ok_or_else(|| EngineError::InvalidAmount("share sum too large".to_string()))?;
    }

    let residual = total - sum;
    if residual.is_negative() {
        return Err(EngineError::NegativeResidual(format!(
            "explicit shares total {sum} exceed {total}"
        )));
    }

    Ok(SplitOutcome {
        residual_share: residual,
        explicit_shares: explicit.to_vec(),
    })
}

/// Splits `total` by percentages plus one residual participant.
///
/// Explicit shares are `total * bp / 10_000` rounded half-up; the residual
/// participant absorbs the exact remainder so the split conserves the total
/// in paise. Percentages summing above 100% are a rejection
/// ([`EngineError::NegativeResidual`]).
pub fn percentage_split(total: Money, explicit_bp: &[i64]) -> ResultEngine<SplitOutcome> {
    if total.is_negative() {
        return Err(EngineError::InvalidAmount(
            "total must be >= 0".to_string(),
        ));
    }

    let mut bp_sum: i64 = 0;
    for bp in explicit_bp {
        if *bp < 0 {
            return Err(EngineError::InvalidAmount(format!(
                "percentage must be >= 0, got {} bp",
                bp
            )));
        }
        bp_sum = bp_sum
            .checked_add(*bp)
            .ok_or_else(|| EngineError::InvalidAmount("percentage sum too large".to_string()))?;
    }
    if bp_sum > FULL_PERCENT_BP {
        return Err(EngineError::NegativeResidual(format!(
            "explicit percentages total {bp_sum} bp exceed {FULL_PERCENT_BP} bp"
        )));
    }

    let mut explicit_shares = Vec::with_capacity(explicit_bp.len());
    let mut shares_sum = Money::ZERO;
    for bp in explicit_bp {
        let share = Money::new(mul_bp_half_up(total.paise(), *bp)?);
        shares_sum = shares_sum
            .checked_add(share)
            .ok_or_else(|| EngineError::InvalidAmount("share sum too large".to_string()))?;
        explicit_shares.push(share);
    }

    // Rounding half-up can push the explicit shares past the total even when
    // the percentages themselves fit; the residual participant cannot absorb
    // a negative amount.
    let residual = total - shares_sum;
    if residual.is_negative() {
        return Err(EngineError::NegativeResidual(format!(
            "rounded shares total {shares_sum} exceed {total}"
        )));
    }

    Ok(SplitOutcome {
        residual_share: residual,
        explicit_shares,
    })
}

/// Converts a major-unit percentage (e.g. `40.25`) into basis points.
pub fn percent_to_bp(percent: f64) -> ResultEngine<i64> {
    if !percent.is_finite() || percent < 0.0 || percent > 100.0 {
        return Err(EngineError::InvalidAmount(format!(
            "percentage out of range: {percent}"
        )));
    }
    Ok((percent * 100.0).round() as i64)
}

/// Checks that `shares` sum to `total` within one paisa.
///
/// In integer arithmetic this is exact equality; the one-paisa tolerance is
/// kept in the message contract to absorb rounding noise from upstream
/// decimal input.
pub fn validate_share_sum(total: Money, shares: &[Money]) -> ResultEngine<()> {
    let mut sum = Money::ZERO;
    for share in shares {
        sum = sum
            .checked_add(*share)
            .ok_or_else(|| EngineError::InvalidAmount("share sum too large".to_string()))?;
    }

    if (sum.paise() - total.paise()).abs() < 1 {
        Ok(())
    } else {
        Err(EngineError::SplitSumMismatch(format!(
            "shares total {sum}, expense total {total}"
        )))
    }
}

/// Checks that percentages sum to 100% within 0.01% (one basis point).
pub fn validate_percentage_sum(bps: &[i64]) -> ResultEngine<()> {
    let mut sum: i64 = 0;
    for bp in bps {
        sum = sum
            .checked_add(*bp)
            .ok_or_else(|| EngineError::InvalidAmount("percentage sum too large".to_string()))?;
    }

    if (sum - FULL_PERCENT_BP).abs() < 1 {
        Ok(())
    } else {
        Err(EngineError::PercentageSumMismatch(format!(
            "percentages total {sum} bp, expected {FULL_PERCENT_BP} bp"
        )))
    }
}

fn mul_bp_half_up(amount: i64, bp: i64) -> ResultEngine<i64> {
    amount
        .checked_mul(bp)
        .and_then(|v| v.checked_add(FULL_PERCENT_BP / 2))
        .map(|v| v / FULL_PERCENT_BP)
        .ok_or_else(|| EngineError::InvalidAmount("amount too large".to_string()))
}

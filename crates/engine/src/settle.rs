//! Settlement direction.
//!
//! Given a derived balance, decides who pays whom so a new transfer reduces
//! rather than amplifies the debt. The direction is never defaulted on a
//! settled balance.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    BalanceStatus, EngineError, Money, PairwiseBalance, ResultEngine, Transfer,
};

const DEFAULT_NOTE: &str = "Settlement payment";

/// A directed settlement ready for ledger append.
///
/// Hand this unchanged to [`Transfer`]: the endpoints come from the balance
/// status and must not be reinterpreted by the caller.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettlementDraft {
    pub from_user_id: String,
    pub to_user_id: String,
    pub amount_minor: Money,
    pub note: String,
}

impl SettlementDraft {
    /// Converts the draft into a ledger transfer.
    pub fn into_transfer(self, created_at: DateTime<Utc>) -> ResultEngine<Transfer> {
        Transfer::new(
            self.from_user_id,
            self.to_user_id,
            self.amount_minor,
            Some(&self.note),
            created_at,
        )
    }
}

/// Directs a settlement transfer for the actor's balance with a counterparty.
///
/// - `owes_you` → the counterparty pays the actor.
/// - `you_owe` → the actor pays the counterparty.
/// - `settled` → caller error ([`EngineError::NoOutstandingBalance`]).
///
/// `proposed` defaults to `|net|`. Partial settlements and overshoots are
/// both allowed — an overshoot legitimately flips the balance sign — but the
/// amount must be positive.
pub fn direct_settlement(
    actor_id: &str,
    balance: &PairwiseBalance,
    proposed: Option<Money>,
    note: Option<&str>,
) -> ResultEngine<SettlementDraft> {
    let amount = proposed.unwrap_or_else(|| balance.net_minor.abs());
    if !amount.is_positive() {
        return Err(EngineError::InvalidAmount(
            "settlement amount must be > 0".to_string(),
        ));
    }

    let (from_user_id, to_user_id) = match balance.status {
        BalanceStatus::OwesYou => (balance.counterparty_id.clone(), actor_id.to_string()),
        BalanceStatus::YouOwe => (actor_id.to_string(), balance.counterparty_id.clone()),
        BalanceStatus::Settled => {
            return Err(EngineError::NoOutstandingBalance(format!(
                "already settled with {}",
                balance.counterparty_id
            )));
        }
    };

    let note = note
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or(DEFAULT_NOTE)
        .to_string();

    Ok(SettlementDraft {
        from_user_id,
        to_user_id,
        amount_minor: amount,
        note,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn balance(counterparty: &str, net: i64) -> PairwiseBalance {
        let net = Money::new(net);
        PairwiseBalance {
            counterparty_id: counterparty.to_string(),
            net_minor: net,
            status: BalanceStatus::classify(net),
        }
    }

    #[test]
    fn owes_you_directs_counterparty_to_actor() {
        let draft = direct_settlement("alice", &balance("bob", 15_000), None, None).unwrap();
        assert_eq!(draft.from_user_id, "bob");
        assert_eq!(draft.to_user_id, "alice");
        assert_eq!(draft.amount_minor, Money::new(15_000));
        assert_eq!(draft.note, "Settlement payment");
    }

    #[test]
    fn you_owe_directs_actor_to_counterparty() {
        let draft = direct_settlement("alice", &balance("bob", -4_200), None, Some("dinner")).unwrap();
        assert_eq!(draft.from_user_id, "alice");
        assert_eq!(draft.to_user_id, "bob");
        assert_eq!(draft.amount_minor, Money::new(4_200));
        assert_eq!(draft.note, "dinner");
    }

    #[test]
    fn settled_is_a_caller_error() {
        let err = direct_settlement("alice", &balance("bob", 0), Some(Money::new(100)), None)
            .unwrap_err();
        assert!(matches!(err, EngineError::NoOutstandingBalance(_)));
    }

    #[test]
    fn partial_and_overshooting_amounts_are_allowed() {
        let draft =
            direct_settlement("alice", &balance("bob", -4_200), Some(Money::new(100)), None)
                .unwrap();
        assert_eq!(draft.amount_minor, Money::new(100));

        let draft =
            direct_settlement("alice", &balance("bob", -4_200), Some(Money::new(9_999)), None)
                .unwrap();
        assert_eq!(draft.amount_minor, Money::new(9_999));
    }

    #[test]
    fn nonpositive_amount_is_rejected() {
        let err = direct_settlement("alice", &balance("bob", -4_200), Some(Money::ZERO), None)
            .unwrap_err();
        assert!(matches!(err, EngineError::InvalidAmount(_)));
    }

    #[test]
    fn draft_converts_into_transfer_unchanged() {
        let draft = direct_settlement("alice", &balance("bob", 500), None, None).unwrap();
        let transfer = draft.clone().into_transfer(chrono::Utc::now()).unwrap();
        assert_eq!(transfer.from_user_id, draft.from_user_id);
        assert_eq!(transfer.to_user_id, draft.to_user_id);
        assert_eq!(transfer.amount_minor, draft.amount_minor);
        assert_eq!(transfer.note.as_deref(), Some("Settlement payment"));
    }
}

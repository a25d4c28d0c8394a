//! Ledger entry models.
//!
//! Two event kinds affect a pairwise balance: an [`Expense`] (one payer, N
//! participants, each with a share of the total) and a [`Transfer`] (a direct
//! settlement payment between two parties). This module owns their structural
//! validity, independent of whatever store the caller keeps them in.
//!
//! Expenses are soft-deleted only: the engine sets `deleted_at` and keeps the
//! row, so history stays restorable. Every derivation treats soft-deleted
//! expenses as absent.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use unicode_normalization::UnicodeNormalization;
use uuid::Uuid;

use crate::{Currency, EngineError, Money, ResultEngine, split};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SplitMethod {
    Equal,
    Unequal,
    Percentage,
}

impl SplitMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Equal => "equal",
            Self::Unequal => "unequal",
            Self::Percentage => "percentage",
        }
    }
}

impl TryFrom<&str> for SplitMethod {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "equal" => Ok(Self::Equal),
            "unequal" => Ok(Self::Unequal),
            "percentage" => Ok(Self::Percentage),
            other => Err(EngineError::InvalidAmount(format!(
                "invalid split method: {other}"
            ))),
        }
    }
}

/// One participant's stake in an expense.
///
/// The payer is itself a participant with their own share, so the
/// conservation invariant is simply `Σ shares == amount`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParticipantShare {
    pub user_id: String,
    pub share: Money,
    /// Basis points this share was derived from, for percentage splits.
    pub percent_bp: Option<i64>,
}

impl ParticipantShare {
    pub fn new(user_id: impl Into<String>, share: Money) -> Self {
        Self {
            user_id: user_id.into(),
            share,
            percent_bp: None,
        }
    }

    pub fn with_percent(user_id: impl Into<String>, share: Money, percent_bp: i64) -> Self {
        Self {
            user_id: user_id.into(),
            share,
            percent_bp: Some(percent_bp),
        }
    }
}

/// A cost-sharing event: one payer, N participants, each owing a share.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Expense {
    pub id: Uuid,
    pub title: String,
    pub payer_id: String,
    pub amount_minor: Money,
    pub currency: Currency,
    pub participants: Vec<ParticipantShare>,
    pub method: SplitMethod,
    pub created_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
    pub deleted_reason: Option<String>,
}

impl Expense {
    /// Creates a structurally valid expense.
    ///
    /// Requirements:
    /// - non-empty title (after NFC normalization and trimming)
    /// - `amount_minor > 0`
    /// - at least one participant besides the payer
    /// - unique participant ids, payer included among them
    /// - shares summing exactly to the total in paise
    pub fn new(
        title: &str,
        payer_id: impl Into<String>,
        amount_minor: Money,
        participants: Vec<ParticipantShare>,
        method: SplitMethod,
        created_at: DateTime<Utc>,
    ) -> ResultEngine<Self> {
        let title = normalize_title(title)?;
        let payer_id = payer_id.into();

        if !amount_minor.is_positive() {
            return Err(EngineError::InvalidAmount(
                "amount_minor must be > 0".to_string(),
            ));
        }
        if participants.len() < 2 {
            return Err(EngineError::InvalidParticipantSet(
                "an expense needs the payer and at least one other participant".to_string(),
            ));
        }
        for (i, p) in participants.iter().enumerate() {
            if p.user_id.is_empty() {
                return Err(EngineError::InvalidId("empty participant id".to_string()));
            }
            if participants[..i].iter().any(|q| q.user_id == p.user_id) {
                return Err(EngineError::InvalidParticipantSet(format!(
                    "duplicate participant: {}",
                    p.user_id
                )));
            }
        }
        if !participants.iter().any(|p| p.user_id == payer_id) {
            return Err(EngineError::InvalidParticipantSet(format!(
                "payer {payer_id} is not among the participants"
            )));
        }

        let shares: Vec<Money> = participants.iter().map(|p| p.share).collect();
        split::validate_share_sum(amount_minor, &shares)?;

        Ok(Self {
            id: Uuid::new_v4(),
            title,
            payer_id,
            amount_minor,
            currency: Currency::default(),
            participants,
            method,
            created_at,
            deleted_at: None,
            deleted_reason: None,
        })
    }

    #[must_use]
    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }

    /// Soft-deletes the expense, preserving history.
    pub fn delete(&mut self, at: DateTime<Utc>, reason: Option<&str>) -> ResultEngine<()> {
        if self.is_deleted() {
            return Err(EngineError::InvalidId(
                "expense already deleted".to_string(),
            ));
        }
        self.deleted_at = Some(at);
        self.deleted_reason = reason
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(ToString::to_string);
        Ok(())
    }

    /// Clears the soft-delete flag.
    pub fn restore(&mut self) -> ResultEngine<()> {
        if !self.is_deleted() {
            return Err(EngineError::InvalidId("expense is not deleted".to_string()));
        }
        self.deleted_at = None;
        self.deleted_reason = None;
        Ok(())
    }

    /// The share recorded for `user_id`, if they participate.
    #[must_use]
    pub fn share_of(&self, user_id: &str) -> Option<Money> {
        self.participants
            .iter()
            .find(|p| p.user_id == user_id)
            .map(|p| p.share)
    }

    /// Every user the expense touches: the payer plus all participants.
    pub fn touched_users(&self) -> impl Iterator<Item = &str> {
        // The payer is also a participant, so iterating participants covers
        // everyone.
        self.participants.iter().map(|p| p.user_id.as_str())
    }
}

/// A direct settlement payment between two parties.
///
/// Immutable once created: there is no update or delete path for transfers.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transfer {
    pub id: Uuid,
    pub from_user_id: String,
    pub to_user_id: String,
    pub amount_minor: Money,
    pub currency: Currency,
    pub note: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Transfer {
    pub fn new(
        from_user_id: impl Into<String>,
        to_user_id: impl Into<String>,
        amount_minor: Money,
        note: Option<&str>,
        created_at: DateTime<Utc>,
    ) -> ResultEngine<Self> {
        let from_user_id = from_user_id.into();
        let to_user_id = to_user_id.into();

        if !amount_minor.is_positive() {
            return Err(EngineError::InvalidAmount(
                "amount_minor must be > 0".to_string(),
            ));
        }
        if from_user_id.is_empty() || to_user_id.is_empty() {
            return Err(EngineError::InvalidId("empty endpoint id".to_string()));
        }
        if from_user_id == to_user_id {
            return Err(EngineError::InvalidParticipantSet(
                "from_user_id and to_user_id must differ".to_string(),
            ));
        }

        Ok(Self {
            id: Uuid::new_v4(),
            from_user_id,
            to_user_id,
            amount_minor,
            currency: Currency::default(),
            note: note
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(ToString::to_string),
            created_at,
        })
    }
}

/// A snapshot of the ledger the engine folds over.
///
/// The engine keeps no state between calls: every derivation receives one of
/// these, owned by the caller's store. Append-only semantics at that store
/// are what keep concurrent writers from losing updates; the snapshot itself
/// is plain data.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Ledger {
    pub expenses: Vec<Expense>,
    pub transfers: Vec<Transfer>,
}

impl Ledger {
    #[must_use]
    pub fn new(expenses: Vec<Expense>, transfers: Vec<Transfer>) -> Self {
        Self {
            expenses,
            transfers,
        }
    }

    /// Expenses that still count, i.e. not soft-deleted.
    pub fn active_expenses(&self) -> impl Iterator<Item = &Expense> {
        self.expenses.iter().filter(|e| !e.is_deleted())
    }

    pub fn push_expense(&mut self, expense: Expense) {
        self.expenses.push(expense);
    }

    pub fn push_transfer(&mut self, transfer: Transfer) {
        self.transfers.push(transfer);
    }

    #[must_use]
    pub fn expense(&self, id: Uuid) -> Option<&Expense> {
        self.expenses.iter().find(|e| e.id == id)
    }

    pub fn expense_mut(&mut self, id: Uuid) -> Option<&mut Expense> {
        self.expenses.iter_mut().find(|e| e.id == id)
    }
}

/// NFC-normalizes and trims a title, rejecting empty results.
fn normalize_title(value: &str) -> ResultEngine<String> {
    let normalized: String = value.nfc().collect();
    let trimmed = normalized.trim();
    if trimmed.is_empty() {
        return Err(EngineError::InvalidName(
            "title must not be empty".to_string(),
        ));
    }
    Ok(trimmed.to_string())
}

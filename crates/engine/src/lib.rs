//! Split & balance reconciliation engine.
//!
//! The engine divides a shared cost among participants, folds a ledger of
//! cost-sharing events and direct payments into pairwise balances, directs
//! settlement transfers, and guards destructive mutations. Every operation is
//! a pure function over an explicit [`Ledger`] snapshot owned by the caller:
//! no state is shared between calls, and all arithmetic runs on integer
//! minor units ([`Money`]).
//!
//! The actor is always an explicit parameter — there is no ambient "current
//! user" anywhere in the engine.

pub use balance::{BalanceStatus, BalanceSummary, PairwiseBalance};
pub use currency::Currency;
pub use error::EngineError;
pub use guard::DeletionImpact;
pub use ledger::{Expense, Ledger, ParticipantShare, SplitMethod, Transfer};
pub use money::Money;
pub use refresh::{RefreshAction, RefreshGate};
pub use settle::SettlementDraft;
pub use split::SplitOutcome;

pub mod balance;
mod currency;
mod error;
pub mod guard;
mod ledger;
mod money;
pub mod refresh;
pub mod settle;
pub mod split;

pub type ResultEngine<T> = Result<T, EngineError>;

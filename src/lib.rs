// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2025 Daniel Negri
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program. If not, see <https://www.gnu.org/licenses/>.

//! # Costsplit
//!
//! This library settles shared expenses: a group of people each pay some
//! amount toward a common pool, and the engine computes who must transfer
//! how much to whom so that everyone ends up contributing an equal share.
//!
//! ## Core Components
//!
//! - [`Engine`]: Session-scoped settlement engine and query surface
//! - [`BalanceSheet`]: Per-person refund/debt against the equal share
//! - [`TransferLedger`]: Directed pairwise transfers from greedy matching
//! - [`SettlementError`]: Error types for settlement failures
//!
//! ## Example
//!
//! ```
//! use costsplit_rs::{Engine, Payment, PersonName};
//! use rust_decimal_macros::dec;
//!
//! let engine = Engine::new();
//!
//! engine
//!     .calculate(&[
//!         Payment::new("Anna", dec!(10.00)),
//!         Payment::new("Bob", dec!(0.00)),
//!     ])
//!     .unwrap();
//!
//! // Bob underpaid by half the pool and owes it to Anna.
//! let owed = engine
//!     .amount_owed_between(&PersonName::from("Bob"), &PersonName::from("Anna"))
//!     .unwrap();
//! assert_eq!(owed, dec!(5.00));
//! ```
//!
//! ## Thread Safety
//!
//! The engine guards its ledger with a single lock, so calculations and
//! queries from concurrent callers serialize cleanly.

mod balance;
mod base;
mod engine;
pub mod error;
mod ledger;
mod payment;

pub use balance::{Balance, BalanceSheet};
pub use base::PersonName;
pub use engine::Engine;
pub use error::SettlementError;
pub use ledger::{Transfer, TransferLedger};
pub use payment::Payment;

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

//! Settlement engine.
//!
//! The [`Engine`] is the public surface of the crate: feed it the payment
//! list with [`Engine::calculate`], then query directed amounts with
//! [`Engine::amount_owed_between`].
//!
//! # Session States
//!
//! An engine is **Uncalculated** until the first successful `calculate`,
//! then **Ready**. Queries are only valid in Ready; a later `calculate`
//! replaces the stored ledger instead of merging with it, and a failed
//! `calculate` leaves the previous ledger untouched.
//!
//! # Thread Safety
//!
//! One [`Mutex`] guards the ledger and the session state together, so
//! concurrent callers see either the previous settlement or the new one,
//! never a mix.

use crate::balance::BalanceSheet;
use crate::base::PersonName;
use crate::error::SettlementError;
use crate::ledger::{Transfer, TransferLedger};
use crate::payment::Payment;
use parking_lot::Mutex;
use rust_decimal::Decimal;

/// Settlement engine holding the most recent transfer ledger.
///
/// # Invariants
///
/// - The stored ledger always came from one complete, validated
///   calculation; errors never leave partial state.
/// - Queries answer against the most recent successful calculation only.
#[derive(Debug, Default)]
pub struct Engine {
    /// `None` while Uncalculated, `Some` once Ready.
    ledger: Mutex<Option<TransferLedger>>,
}

impl Engine {
    /// Creates a new engine with no settlement calculated.
    pub fn new() -> Self {
        Engine {
            ledger: Mutex::new(None),
        }
    }

    /// Calculates the settlement for a payment list.
    ///
    /// Derives per-person balances against the equal share, matches debtors
    /// to creditors, and stores the resulting ledger, replacing any prior
    /// one. The input is validated up front; on error the engine keeps
    /// whatever ledger it had before.
    ///
    /// # Errors
    ///
    /// - [`SettlementError::NoParticipants`] - The payment list is empty.
    /// - [`SettlementError::BadPayment`] - A payment amount is negative.
    /// - [`SettlementError::DuplicatePerson`] - Two payments share a name.
    pub fn calculate(&self, payments: &[Payment]) -> Result<(), SettlementError> {
        let sheet = BalanceSheet::calculate(payments)?;
        let ledger = TransferLedger::settle(&sheet);
        *self.ledger.lock() = Some(ledger);
        Ok(())
    }

    /// Returns how much `debtor` must transfer to `creditor` per the last
    /// calculation.
    ///
    /// The amount is directional; pairs the matcher never produced read as
    /// zero even when the reverse direction carries a transfer.
    ///
    /// # Errors
    ///
    /// - [`SettlementError::NotCalculated`] - No successful calculation yet.
    /// - [`SettlementError::UnknownPerson`] - Either name was not part of
    ///   the last calculation.
    pub fn amount_owed_between(
        &self,
        debtor: &PersonName,
        creditor: &PersonName,
    ) -> Result<Decimal, SettlementError> {
        self.ledger
            .lock()
            .as_ref()
            .ok_or(SettlementError::NotCalculated)?
            .amount_between(debtor, creditor)
    }

    /// Snapshot of all transfers from the last calculation, sorted by
    /// debtor then creditor.
    ///
    /// # Errors
    ///
    /// - [`SettlementError::NotCalculated`] - No successful calculation yet.
    pub fn transfers(&self) -> Result<Vec<Transfer>, SettlementError> {
        Ok(self
            .ledger
            .lock()
            .as_ref()
            .ok_or(SettlementError::NotCalculated)?
            .transfers())
    }

    /// The equal share of the last calculation.
    ///
    /// # Errors
    ///
    /// - [`SettlementError::NotCalculated`] - No successful calculation yet.
    pub fn equal_share(&self) -> Result<Decimal, SettlementError> {
        Ok(self
            .ledger
            .lock()
            .as_ref()
            .ok_or(SettlementError::NotCalculated)?
            .equal_share())
    }

    /// Whether a settlement has been calculated in this session.
    pub fn is_ready(&self) -> bool {
        self.ledger.lock().is_some()
    }
}

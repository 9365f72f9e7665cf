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

//! Equal-share calculation.
//!
//! The [`BalanceSheet`] derives every participant's refund or debt from the
//! raw payment list: `equal_share = total / count`, then per person
//! `refund = max(paid - equal_share, 0)` and `owed = max(equal_share - paid, 0)`.
//!
//! # Example
//!
//! ```
//! use costsplit_rs::{BalanceSheet, Payment};
//! use rust_decimal_macros::dec;
//!
//! let sheet = BalanceSheet::calculate(&[
//!     Payment::new("Anna", dec!(10)),
//!     Payment::new("Bob", dec!(0)),
//! ])
//! .unwrap();
//!
//! assert_eq!(sheet.equal_share(), dec!(5));
//! assert_eq!(sheet.balances()[0].refund, dec!(5));
//! assert_eq!(sheet.balances()[1].owed, dec!(5));
//! ```

use crate::base::PersonName;
use crate::error::SettlementError;
use crate::payment::Payment;
use rust_decimal::Decimal;
use std::collections::HashSet;

/// One participant's position relative to the equal share.
///
/// At most one of `refund` and `owed` is strictly positive; both are zero
/// when the person paid exactly the equal share.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Balance {
    pub name: PersonName,
    /// Amount by which this person overpaid; they should receive this back.
    pub refund: Decimal,
    /// Amount by which this person underpaid; they must pay this to others.
    pub owed: Decimal,
}

impl Balance {
    pub fn is_creditor(&self) -> bool {
        self.refund > Decimal::ZERO
    }

    pub fn is_debtor(&self) -> bool {
        self.owed > Decimal::ZERO
    }
}

/// Per-person balances derived from a payment list, in input order.
///
/// Produced exclusively by [`BalanceSheet::calculate`]; the settlement
/// matcher consumes it as-is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BalanceSheet {
    balances: Vec<Balance>,
    equal_share: Decimal,
}

impl BalanceSheet {
    /// Computes the equal share and every participant's refund or debt.
    ///
    /// The equal share is recomputed fresh on every call; nothing is cached
    /// across inputs. The input sequence is not mutated.
    ///
    /// # Errors
    ///
    /// - [`SettlementError::NoParticipants`] - The payment list is empty.
    /// - [`SettlementError::BadPayment`] - A payment amount is negative;
    ///   names the first offending record in input order.
    /// - [`SettlementError::DuplicatePerson`] - Two payments share a name.
    ///
    /// No partial result is produced on any error.
    pub fn calculate(payments: &[Payment]) -> Result<Self, SettlementError> {
        if payments.is_empty() {
            return Err(SettlementError::NoParticipants);
        }

        // Validate before deriving anything, so a bad record can never
        // leak into a half-built sheet.
        let mut seen: HashSet<&PersonName> = HashSet::with_capacity(payments.len());
        for payment in payments {
            if payment.paid < Decimal::ZERO {
                return Err(SettlementError::BadPayment {
                    name: payment.name.clone(),
                    amount: payment.paid,
                });
            }
            if !seen.insert(&payment.name) {
                return Err(SettlementError::DuplicatePerson {
                    name: payment.name.clone(),
                });
            }
        }

        let total: Decimal = payments.iter().map(|p| p.paid).sum();
        let equal_share = total / Decimal::from(payments.len());

        let balances = payments
            .iter()
            .map(|payment| Balance {
                name: payment.name.clone(),
                refund: (payment.paid - equal_share).max(Decimal::ZERO),
                owed: (equal_share - payment.paid).max(Decimal::ZERO),
            })
            .collect();

        let sheet = Self {
            balances,
            equal_share,
        };
        sheet.assert_invariants();
        Ok(sheet)
    }

    fn assert_invariants(&self) {
        let refunds: Decimal = self.balances.iter().map(|b| b.refund).sum();
        let owed: Decimal = self.balances.iter().map(|b| b.owed).sum();
        // A repeating-decimal share leaves division dust near the 28th
        // digit, so the two sides match within tolerance, not exactly.
        debug_assert!(
            (refunds - owed).abs() < Decimal::new(1, 12),
            "Invariant violated: refunds {} do not match debts {}",
            refunds,
            owed
        );
    }

    /// Balances in the original input order.
    pub fn balances(&self) -> &[Balance] {
        &self.balances
    }

    /// The fair per-person contribution: `total / count`.
    pub fn equal_share(&self) -> Decimal {
        self.equal_share
    }

    pub fn len(&self) -> usize {
        self.balances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.balances.is_empty()
    }
}

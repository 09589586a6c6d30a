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

//! Core identifier type for customer accounts.

use crate::PurchaseError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Identifier of the account paying for a purchase.
///
/// Always strictly positive. Raw identifiers arriving from callers are
/// checked through [`TryFrom<i64>`] or [`FromStr`], both of which reject
/// zero, negative, and non-integer values with
/// [`PurchaseError::InvalidAccount`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize)]
#[serde(try_from = "i64", into = "u64")]
pub struct AccountId(u64);

impl AccountId {
    /// Returns the raw identifier (always at least 1).
    pub fn get(self) -> u64 {
        self.0
    }
}

impl TryFrom<i64> for AccountId {
    type Error = PurchaseError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match u64::try_from(value) {
            Ok(id) if id > 0 => Ok(AccountId(id)),
            _ => Err(PurchaseError::InvalidAccount),
        }
    }
}

impl FromStr for AccountId {
    type Err = PurchaseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = s
            .trim()
            .parse::<i64>()
            .map_err(|_| PurchaseError::InvalidAccount)?;
        AccountId::try_from(raw)
    }
}

impl From<AccountId> for u64 {
    fn from(id: AccountId) -> Self {
        id.0
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

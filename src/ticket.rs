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

//! Ticket categories and the line items of a purchase.
//!
//! | Category | Price | Seat |
//! |----------|-------|------|
//! | [`Adult`](TicketType::Adult)   | 20 | yes |
//! | [`Child`](TicketType::Child)   | 10 | yes |
//! | [`Infant`](TicketType::Infant) | 0  | no (sits on an adult's lap) |

use crate::PurchaseError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Category of a ticket, deciding its price and whether it takes a seat.
///
/// Parsed from text case-insensitively; serialized in uppercase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TicketType {
    Adult,
    Child,
    Infant,
}

impl TicketType {
    /// Every ticket type, in pricing-table order.
    pub const ALL: [TicketType; 3] = [TicketType::Adult, TicketType::Child, TicketType::Infant];

    /// Flat price of a single ticket of this type.
    pub const fn price(self) -> u64 {
        match self {
            Self::Adult => 20,
            Self::Child => 10,
            Self::Infant => 0,
        }
    }

    /// Whether a ticket of this type needs its own seat.
    pub const fn occupies_seat(self) -> bool {
        !matches!(self, Self::Infant)
    }

    /// Canonical uppercase name, e.g. `"ADULT"`.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Adult => "ADULT",
            Self::Child => "CHILD",
            Self::Infant => "INFANT",
        }
    }
}

impl FromStr for TicketType {
    type Err = PurchaseError;

    /// Case-insensitive, surrounding whitespace ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "adult" => Ok(Self::Adult),
            "child" => Ok(Self::Child),
            "infant" => Ok(Self::Infant),
            _ => Err(PurchaseError::InvalidCategory(s.trim().to_string())),
        }
    }
}

impl fmt::Display for TicketType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single line item: how many tickets of one type are wanted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TicketTypeRequest {
    ticket_type: TicketType,
    count: u32,
}

impl TicketTypeRequest {
    pub const fn new(ticket_type: TicketType, count: u32) -> Self {
        Self { ticket_type, count }
    }

    /// Builds a request from a raw category name.
    ///
    /// # Errors
    ///
    /// Returns [`PurchaseError::InvalidCategory`] for anything other than
    /// adult, child, or infant.
    pub fn parse(ticket_type: &str, count: u32) -> Result<Self, PurchaseError> {
        Ok(Self::new(ticket_type.parse()?, count))
    }

    pub const fn ticket_type(&self) -> TicketType {
        self.ticket_type
    }

    pub const fn count(&self) -> u32 {
        self.count
    }
}

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

//! Error types for ticket purchase validation.

use thiserror::Error;

/// Result type alias for purchase operations.
pub type Result<T> = std::result::Result<T, PurchaseError>;

/// Reasons a ticket purchase is rejected.
///
/// Every variant is returned before either downstream service is called.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PurchaseError {
    /// Account ID is missing, not an integer, or less than 1
    #[error("invalid account ID (must be a positive integer)")]
    InvalidAccount,

    /// No ticket type requests were supplied
    #[error("no ticket type requests supplied")]
    NoRequests,

    /// Ticket type is not one of adult, child, or infant
    #[error("unknown ticket type '{0}'")]
    InvalidCategory(String),

    /// Every requested count is zero
    #[error("at least one ticket must be purchased")]
    ZeroTickets,

    /// Child or infant tickets requested without an adult ticket
    #[error("child and infant tickets require an adult ticket")]
    UnaccompaniedMinor,

    /// More infants than adults (infants sit on an adult's lap)
    #[error("each infant must be accompanied by its own adult")]
    TooManyInfants,

    /// Requested more tickets than a single purchase allows
    #[error("cannot purchase {requested} tickets (maximum is {max})")]
    TooManyTickets { requested: u64, max: u32 },
}

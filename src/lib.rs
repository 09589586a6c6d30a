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

//! # Cinema Tickets
//!
//! This library validates cinema ticket purchases and, once a purchase is
//! valid, charges the account and reserves its seats.
//!
//! ## Core Components
//!
//! - [`TicketService`]: Entry point that validates, prices, pays, and reserves
//! - [`PurchaseRequest`]: An account plus its ticket line items
//! - [`TicketType`]: Supported ticket types (adult, child, infant)
//! - [`PurchaseError`]: Reasons a purchase is rejected
//! - [`TicketPaymentService`] / [`SeatReservationService`]: Downstream services
//!
//! ## Rules
//!
//! - Adults cost 20, children 10, infants nothing.
//! - Infants sit on an adult's lap: no seat, and at most one per adult.
//! - Child and infant tickets need at least one adult ticket.
//! - At most 20 tickets per purchase (configurable via [`ServiceConfig`]).
//!
//! ## Example
//!
//! ```
//! use cinema_tickets_rs::{
//!     InMemoryPaymentGateway, InMemorySeatBooking, TicketService, TicketType, TicketTypeRequest,
//! };
//!
//! let service = TicketService::new(InMemoryPaymentGateway::new(), InMemorySeatBooking::new());
//!
//! let purchase = service
//!     .purchase_tickets(
//!         1,
//!         &[
//!             TicketTypeRequest::new(TicketType::Adult, 3),
//!             TicketTypeRequest::new(TicketType::Child, 4),
//!             TicketTypeRequest::new(TicketType::Infant, 2),
//!         ],
//!     )
//!     .unwrap();
//!
//! assert_eq!(purchase.total_cost, 100);
//! assert_eq!(purchase.total_seats, 7);
//! ```

mod base;
pub mod config;
pub mod error;
pub mod order;
mod service;
pub mod services;
mod ticket;

pub use base::AccountId;
pub use config::{DuplicatePolicy, ServiceConfig};
pub use error::{PurchaseError, Result};
pub use order::{Purchase, PurchaseRequest, TicketCounts};
pub use service::TicketService;
pub use services::{
    InMemoryPaymentGateway, InMemorySeatBooking, SeatReservationService, TicketPaymentService,
};
pub use ticket::{TicketType, TicketTypeRequest};

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

//! TicketService public API integration tests.

use cinema_tickets_rs::{
    AccountId, DuplicatePolicy, PurchaseError, PurchaseRequest, SeatReservationService,
    ServiceConfig, TicketPaymentService, TicketService, TicketType, TicketTypeRequest,
};
use parking_lot::Mutex;

// === Recording Doubles ===

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Call {
    Payment(u64, u64),
    Reservation(u64, u32),
}

/// Records calls to both services in a single timeline.
#[derive(Debug, Default)]
struct Recorder {
    calls: Mutex<Vec<Call>>,
}

impl Recorder {
    fn calls(&self) -> Vec<Call> {
        self.calls.lock().clone()
    }
}

impl TicketPaymentService for Recorder {
    fn make_payment(&self, account_id: AccountId, total_amount_to_pay: u64) {
        self.calls
            .lock()
            .push(Call::Payment(account_id.get(), total_amount_to_pay));
    }
}

impl SeatReservationService for Recorder {
    fn reserve_seat(&self, account_id: AccountId, total_seats_to_allocate: u32) {
        self.calls
            .lock()
            .push(Call::Reservation(account_id.get(), total_seats_to_allocate));
    }
}

fn adult(count: u32) -> TicketTypeRequest {
    TicketTypeRequest::new(TicketType::Adult, count)
}

fn child(count: u32) -> TicketTypeRequest {
    TicketTypeRequest::new(TicketType::Child, count)
}

fn infant(count: u32) -> TicketTypeRequest {
    TicketTypeRequest::new(TicketType::Infant, count)
}

fn purchase(
    account_id: i64,
    tickets: &[TicketTypeRequest],
) -> (Result<cinema_tickets_rs::Purchase, PurchaseError>, Vec<Call>) {
    let recorder = Recorder::default();
    let service = TicketService::new(&recorder, &recorder);
    let result = service.purchase_tickets(account_id, tickets);
    (result, recorder.calls())
}

// === Successful Purchases ===

#[test]
fn makes_a_call_to_the_payment_service() {
    let (result, calls) = purchase(1, &[adult(3), child(4), infant(2)]);
    assert!(result.is_ok());
    assert!(calls.iter().any(|call| matches!(call, Call::Payment(..))));
}

#[test]
fn charges_the_correct_total() {
    let (_, calls) = purchase(1, &[adult(3), child(4), infant(2)]);
    assert_eq!(calls, vec![Call::Payment(1, 100), Call::Reservation(1, 7)]);
}

#[test]
fn reserves_the_correct_seats() {
    let (_, calls) = purchase(1, &[adult(3), child(4), infant(2)]);
    assert_eq!(calls.last(), Some(&Call::Reservation(1, 7)));
    assert_eq!(calls.len(), 2);
}

#[test]
fn pays_before_reserving() {
    let (result, calls) = purchase(9, &[adult(2), child(1)]);
    let purchase = result.unwrap();

    assert_eq!(purchase.account_id.get(), 9);
    assert_eq!(calls, vec![Call::Payment(9, 50), Call::Reservation(9, 3)]);
}

#[test]
fn twenty_adults_is_the_limit() {
    let (result, calls) = purchase(1, &[adult(20)]);
    let purchase = result.unwrap();

    assert_eq!(purchase.total_cost, 400);
    assert_eq!(purchase.total_seats, 20);
    assert_eq!(calls, vec![Call::Payment(1, 400), Call::Reservation(1, 20)]);
}

#[test]
fn adults_only() {
    let (result, _) = purchase(1, &[adult(1)]);
    let purchase = result.unwrap();
    assert_eq!(purchase.total_cost, 20);
    assert_eq!(purchase.total_seats, 1);
}

#[test]
fn infants_are_free_and_seatless() {
    let (result, calls) = purchase(1, &[adult(2), infant(2)]);
    result.unwrap();
    assert_eq!(calls, vec![Call::Payment(1, 40), Call::Reservation(1, 2)]);
}

#[test]
fn zero_count_lines_are_ignored() {
    let (result, calls) = purchase(1, &[adult(1), child(0), infant(0)]);
    result.unwrap();
    assert_eq!(calls, vec![Call::Payment(1, 20), Call::Reservation(1, 1)]);
}

#[test]
fn duplicate_lines_are_summed_by_default() {
    let (result, calls) = purchase(1, &[adult(2), child(1), adult(1)]);
    let purchase = result.unwrap();

    assert_eq!(purchase.counts.adult, 3);
    assert_eq!(calls, vec![Call::Payment(1, 70), Call::Reservation(1, 4)]);
}

#[test]
fn duplicate_lines_last_wins_when_configured() {
    let recorder = Recorder::default();
    let config = ServiceConfig {
        duplicates: DuplicatePolicy::LastWins,
        ..ServiceConfig::default()
    };
    let service = TicketService::with_config(&recorder, &recorder, config);

    let purchase = service
        .purchase_tickets(1, &[adult(2), child(1), adult(1)])
        .unwrap();

    assert_eq!(purchase.counts.adult, 1);
    assert_eq!(
        recorder.calls(),
        vec![Call::Payment(1, 30), Call::Reservation(1, 2)]
    );
}

// === Rejected Purchases ===

#[test]
fn too_many_tickets() {
    let (result, calls) = purchase(1, &[adult(20), child(4), infant(2)]);
    assert_eq!(
        result,
        Err(PurchaseError::TooManyTickets {
            requested: 26,
            max: 20
        })
    );
    assert!(calls.is_empty());
}

#[test]
fn infants_count_towards_the_limit() {
    let (result, calls) = purchase(1, &[adult(11), infant(10)]);
    assert_eq!(
        result,
        Err(PurchaseError::TooManyTickets {
            requested: 21,
            max: 20
        })
    );
    assert!(calls.is_empty());
}

#[test]
fn children_and_infants_without_adult() {
    let (result, calls) = purchase(1, &[child(4), infant(2)]);
    assert_eq!(result, Err(PurchaseError::UnaccompaniedMinor));
    assert!(calls.is_empty());
}

#[test]
fn infant_only_reports_unaccompanied() {
    let (result, _) = purchase(1, &[infant(1)]);
    assert_eq!(result, Err(PurchaseError::UnaccompaniedMinor));
}

#[test]
fn more_infants_than_adults() {
    let (result, calls) = purchase(1, &[adult(1), infant(2)]);
    assert_eq!(result, Err(PurchaseError::TooManyInfants));
    assert!(calls.is_empty());
}

#[test]
fn zero_tickets() {
    let (result, calls) = purchase(1, &[adult(0)]);
    assert_eq!(result, Err(PurchaseError::ZeroTickets));
    assert!(calls.is_empty());
}

#[test]
fn no_requests() {
    let (result, calls) = purchase(1, &[]);
    assert_eq!(result, Err(PurchaseError::NoRequests));
    assert!(calls.is_empty());
}

#[test]
fn invalid_account_checked_first() {
    for account_id in [0, -1, i64::MIN] {
        let (result, calls) = purchase(account_id, &[child(30), infant(40)]);
        assert_eq!(result, Err(PurchaseError::InvalidAccount));
        assert!(calls.is_empty());
    }
}

// === Untyped Input ===

#[test]
fn parsed_request_runs_through_service() {
    let recorder = Recorder::default();
    let service = TicketService::new(&recorder, &recorder);

    let request =
        PurchaseRequest::parse("12", [("adult", 3), ("CHILD", 4), ("Infant", 2)]).unwrap();
    let purchase = service.purchase(&request).unwrap();

    assert_eq!(purchase.total_cost, 100);
    assert_eq!(
        recorder.calls(),
        vec![Call::Payment(12, 100), Call::Reservation(12, 7)]
    );
}

#[test]
fn non_integer_account_strings() {
    for raw in ["", "abc", "1.5", "0", "-2"] {
        assert_eq!(
            PurchaseRequest::parse(raw, [("ADULT", 1)]),
            Err(PurchaseError::InvalidAccount),
            "{raw:?}"
        );
    }
}

#[test]
fn unknown_category_rejected() {
    assert_eq!(
        PurchaseRequest::parse("1", [("ADULT", 1), ("student", 1)]),
        Err(PurchaseError::InvalidCategory("student".to_string()))
    );
}

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use chrono::Utc;
use serde::Serialize;
use uuid::Uuid;

use oba_catalog::Trip;
use oba_core::{IdGenerator, PaymentMethod};

use crate::models::{
    deposit_amount, Booking, BookingRequest, BookingStatus, Customer, LedgerError, PaymentPlan,
    Transaction, TransactionPatch, TransactionRequest, TransactionStatus,
};

/// Ids minted for a freshly created booking and its synthetic deposit
/// transaction.
#[derive(Debug, Clone, Serialize)]
pub struct BookingReceipt {
    pub booking_id: Uuid,
    pub transaction_id: Uuid,
}

/// A user's bookings bucketed the way the dashboard tabs show them.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardView {
    pub upcoming: Vec<Booking>,
    pub completed: Vec<Booking>,
    pub cancelled: Vec<Booking>,
}

/// In-memory booking/transaction ledger.
///
/// The one real protocol in the system lives here: a booking's paid
/// amount and status evolve only when a transaction is recorded as or
/// becomes Completed. Each transaction's amount is applied to its
/// booking at most once, tracked by the `applied` set, so repeated
/// approval writes cannot double-count.
pub struct LedgerStore {
    bookings: HashMap<Uuid, Booking>,
    transactions: HashMap<Uuid, Transaction>,
    applied: HashSet<Uuid>,
    ids: Arc<dyn IdGenerator>,
}

impl LedgerStore {
    pub fn new(ids: Arc<dyn IdGenerator>) -> Self {
        Self {
            bookings: HashMap::new(),
            transactions: HashMap::new(),
            applied: HashSet::new(),
            ids,
        }
    }

    /// Create a booking against `trip` and synthesize the deposit
    /// transaction that confirms it.
    ///
    /// Total is price × travelers. The amount due now is the rounded
    /// deposit for installment plans, or the full total. The booking
    /// starts Confirmed with the due amount already paid; the
    /// accompanying card transaction is recorded Completed and marked
    /// applied so it cannot count a second time.
    pub fn create_booking(
        &mut self,
        trip: &Trip,
        request: BookingRequest,
    ) -> Result<BookingReceipt, LedgerError> {
        if request.travelers == 0 {
            return Err(LedgerError::NoTravelers);
        }
        if request.travelers > trip.available_slots {
            return Err(LedgerError::NoAvailability {
                requested: request.travelers,
                available: trip.available_slots,
            });
        }
        match (request.payment_plan, request.installment_rate) {
            (PaymentPlan::Installment, Some(_)) | (PaymentPlan::Full, None) => {}
            _ => return Err(LedgerError::PlanRateMismatch),
        }
        if request.customer.is_guest() && request.payment_plan == PaymentPlan::Installment {
            return Err(LedgerError::GuestInstallmentNotAllowed);
        }
        if request.customer.is_guest() != request.guest_info.is_some() {
            return Err(LedgerError::GuestInfoMismatch);
        }

        let total = trip.price * f64::from(request.travelers);
        let due_now = match request.installment_rate {
            Some(rate) => deposit_amount(total, rate),
            None => total,
        };

        let booking_id = self.ids.next_id();
        let now = Utc::now();
        let booking = Booking {
            id: booking_id,
            trip_id: trip.id,
            customer: request.customer.clone(),
            travelers: request.travelers,
            total_amount: total,
            paid_amount: due_now,
            payment_plan: request.payment_plan,
            installment_rate: request.installment_rate,
            status: if due_now >= total {
                BookingStatus::Paid
            } else {
                BookingStatus::Confirmed
            },
            booking_date: now,
            notes: request.notes,
            guest_info: request.guest_info,
        };

        let transaction_id = self.ids.next_id();
        let transaction = Transaction {
            id: transaction_id,
            booking_id,
            customer: request.customer,
            amount: due_now,
            payment_method: PaymentMethod::Card,
            status: TransactionStatus::Completed,
            transaction_date: now,
            reference: self.ids.payment_reference(),
            proof_of_payment: None,
            notes: None,
        };

        tracing::info!(
            booking_id = %booking_id,
            trip_id = %trip.id,
            total,
            due_now,
            "booking created"
        );

        self.bookings.insert(booking_id, booking);
        self.transactions.insert(transaction_id, transaction);
        // The deposit is already reflected in paid_amount.
        self.applied.insert(transaction_id);

        Ok(BookingReceipt {
            booking_id,
            transaction_id,
        })
    }

    /// Record a payment against a booking. Completed transactions
    /// update the booking balance immediately; Pending and Failed ones
    /// never touch it.
    pub fn add_transaction(&mut self, request: TransactionRequest) -> Result<Uuid, LedgerError> {
        let booking = self
            .bookings
            .get(&request.booking_id)
            .ok_or(LedgerError::BookingNotFound(request.booking_id))?;
        if booking.status == BookingStatus::Cancelled {
            return Err(LedgerError::BookingNotPayable(booking.id));
        }
        let outstanding = booking.outstanding();
        if request.amount <= 0.0 || request.amount > outstanding {
            return Err(LedgerError::AmountOutOfRange {
                amount: request.amount,
                outstanding,
            });
        }
        if request.payment_method == PaymentMethod::BankTransfer
            && request
                .proof_of_payment
                .as_deref()
                .map_or(true, |proof| proof.trim().is_empty())
        {
            return Err(LedgerError::ProofOfPaymentRequired);
        }

        let id = self.ids.next_id();
        let transaction = Transaction {
            id,
            booking_id: request.booking_id,
            customer: request.customer,
            amount: request.amount,
            payment_method: request.payment_method,
            status: request.status,
            transaction_date: Utc::now(),
            reference: request.reference,
            proof_of_payment: request.proof_of_payment,
            notes: request.notes,
        };
        tracing::info!(
            transaction_id = %id,
            booking_id = %request.booking_id,
            amount = request.amount,
            status = ?request.status,
            "transaction recorded"
        );
        self.transactions.insert(id, transaction);

        if request.status == TransactionStatus::Completed {
            self.apply_balance(id)?;
        }
        Ok(id)
    }

    /// Merge a partial update into a transaction.
    ///
    /// If the merged status becomes Completed (the admin approval
    /// path), the parent booking's balance is updated by the stored
    /// amount — at most once per transaction id. Setting Failed
    /// (rejection) never changes the balance. A settled transaction's
    /// status cannot change again.
    pub fn update_transaction(
        &mut self,
        id: Uuid,
        patch: TransactionPatch,
    ) -> Result<(), LedgerError> {
        let transaction = self
            .transactions
            .get_mut(&id)
            .ok_or(LedgerError::TransactionNotFound(id))?;

        if let Some(status) = patch.status {
            if transaction.status.is_terminal() && status != transaction.status {
                return Err(LedgerError::TransactionSettled(id));
            }
            transaction.status = status;
        }
        if let Some(proof) = patch.proof_of_payment {
            transaction.proof_of_payment = Some(proof);
        }
        if let Some(notes) = patch.notes {
            transaction.notes = Some(notes);
        }

        if transaction.status == TransactionStatus::Completed {
            self.apply_balance(id)?;
        }
        Ok(())
    }

    /// Admin approval: Pending → Completed, crediting the booking.
    pub fn approve_transaction(&mut self, id: Uuid) -> Result<(), LedgerError> {
        self.update_transaction(
            id,
            TransactionPatch {
                status: Some(TransactionStatus::Completed),
                ..TransactionPatch::default()
            },
        )
    }

    /// Admin rejection: Pending → Failed, balance untouched.
    pub fn reject_transaction(&mut self, id: Uuid) -> Result<(), LedgerError> {
        self.update_transaction(
            id,
            TransactionPatch {
                status: Some(TransactionStatus::Failed),
                ..TransactionPatch::default()
            },
        )
    }

    /// Explicit cancellation, allowed from any non-terminal state.
    pub fn cancel_booking(&mut self, id: Uuid) -> Result<(), LedgerError> {
        let booking = self
            .bookings
            .get_mut(&id)
            .ok_or(LedgerError::BookingNotFound(id))?;
        if booking.status.is_terminal() {
            return Err(LedgerError::BookingTerminal(id));
        }
        booking.status = BookingStatus::Cancelled;
        tracing::info!(booking_id = %id, "booking cancelled");
        Ok(())
    }

    /// Credit a transaction's amount to its booking, once.
    fn apply_balance(&mut self, transaction_id: Uuid) -> Result<(), LedgerError> {
        if !self.applied.insert(transaction_id) {
            return Ok(());
        }
        let transaction = self
            .transactions
            .get(&transaction_id)
            .ok_or(LedgerError::TransactionNotFound(transaction_id))?;
        let booking = self
            .bookings
            .get_mut(&transaction.booking_id)
            .ok_or(LedgerError::BookingNotFound(transaction.booking_id))?;

        booking.paid_amount += transaction.amount;
        booking.status = if booking.paid_amount >= booking.total_amount {
            BookingStatus::Paid
        } else {
            BookingStatus::Confirmed
        };
        tracing::info!(
            booking_id = %booking.id,
            paid = booking.paid_amount,
            total = booking.total_amount,
            status = ?booking.status,
            "balance updated"
        );
        Ok(())
    }

    pub fn booking(&self, id: Uuid) -> Option<&Booking> {
        self.bookings.get(&id)
    }

    pub fn transaction(&self, id: Uuid) -> Option<&Transaction> {
        self.transactions.get(&id)
    }

    /// All bookings, newest first.
    pub fn bookings(&self) -> Vec<&Booking> {
        let mut all: Vec<&Booking> = self.bookings.values().collect();
        all.sort_by(|a, b| b.booking_date.cmp(&a.booking_date));
        all
    }

    /// All transactions, newest first.
    pub fn transactions(&self) -> Vec<&Transaction> {
        let mut all: Vec<&Transaction> = self.transactions.values().collect();
        all.sort_by(|a, b| b.transaction_date.cmp(&a.transaction_date));
        all
    }

    pub fn user_bookings(&self, customer: &Customer) -> Vec<&Booking> {
        self.bookings()
            .into_iter()
            .filter(|b| &b.customer == customer)
            .collect()
    }

    pub fn user_transactions(&self, customer: &Customer) -> Vec<&Transaction> {
        self.transactions()
            .into_iter()
            .filter(|t| &t.customer == customer)
            .collect()
    }

    pub fn booking_transactions(&self, booking_id: Uuid) -> Vec<&Transaction> {
        self.transactions()
            .into_iter()
            .filter(|t| t.booking_id == booking_id)
            .collect()
    }

    pub fn pending_transactions(&self) -> Vec<&Transaction> {
        self.transactions()
            .into_iter()
            .filter(|t| t.status == TransactionStatus::Pending)
            .collect()
    }

    /// Bucket a user's bookings for the dashboard: upcoming (pending
    /// or confirmed), completed (paid) and cancelled.
    pub fn user_dashboard(&self, customer: &Customer) -> DashboardView {
        let mut view = DashboardView {
            upcoming: Vec::new(),
            completed: Vec::new(),
            cancelled: Vec::new(),
        };
        for booking in self.user_bookings(customer) {
            let bucket = match booking.status {
                BookingStatus::Pending | BookingStatus::Confirmed => &mut view.upcoming,
                BookingStatus::Paid => &mut view.completed,
                BookingStatus::Cancelled => &mut view.cancelled,
            };
            bucket.push(booking.clone());
        }
        view
    }

    pub fn bookings_for_trip(&self, trip_id: Uuid) -> usize {
        self.bookings
            .values()
            .filter(|b| b.trip_id == trip_id)
            .count()
    }

    pub fn outstanding_amount(&self, booking_id: Uuid) -> Result<f64, LedgerError> {
        self.bookings
            .get(&booking_id)
            .map(Booking::outstanding)
            .ok_or(LedgerError::BookingNotFound(booking_id))
    }

    /// Sum of everything paid across all bookings.
    pub fn total_revenue(&self) -> f64 {
        self.bookings.values().map(|b| b.paid_amount).sum()
    }

    pub fn booking_count(&self) -> usize {
        self.bookings.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{GuestInfo, InstallmentRate};
    use oba_catalog::CatalogStore;
    use oba_core::SequentialIds;

    fn fixtures() -> (CatalogStore, LedgerStore) {
        let ids = Arc::new(SequentialIds::new());
        (
            CatalogStore::with_seed(ids.clone()),
            LedgerStore::new(ids),
        )
    }

    fn zanzibar(catalog: &CatalogStore) -> Trip {
        catalog
            .trips()
            .into_iter()
            .find(|t| t.title.contains("Zanzibar"))
            .unwrap()
            .clone()
    }

    fn installment_request(trip: &Trip) -> BookingRequest {
        BookingRequest {
            trip_id: trip.id,
            customer: Customer::Registered("user-1".into()),
            travelers: 1,
            payment_plan: PaymentPlan::Installment,
            installment_rate: Some(InstallmentRate::Thirty),
            notes: None,
            guest_info: None,
        }
    }

    fn pending_bank_transfer(
        ledger: &mut LedgerStore,
        booking_id: Uuid,
        amount: f64,
    ) -> Uuid {
        ledger
            .add_transaction(TransactionRequest {
                booking_id,
                customer: Customer::Registered("user-1".into()),
                amount,
                payment_method: PaymentMethod::BankTransfer,
                status: TransactionStatus::Pending,
                reference: "TXN-TEST".into(),
                proof_of_payment: Some("https://example.com/receipt.jpg".into()),
                notes: None,
            })
            .unwrap()
    }

    #[test]
    fn installment_booking_pays_rounded_deposit() {
        // $1200 trip, one traveler, 30% down.
        let (catalog, mut ledger) = fixtures();
        let trip = zanzibar(&catalog);

        let receipt = ledger.create_booking(&trip, installment_request(&trip)).unwrap();
        let booking = ledger.booking(receipt.booking_id).unwrap();
        assert_eq!(booking.total_amount, 1200.0);
        assert_eq!(booking.paid_amount, 360.0);
        assert_eq!(booking.status, BookingStatus::Confirmed);

        let transactions = ledger.booking_transactions(receipt.booking_id);
        assert_eq!(transactions.len(), 1);
        assert_eq!(transactions[0].amount, 360.0);
        assert_eq!(transactions[0].status, TransactionStatus::Completed);
        assert_eq!(transactions[0].payment_method, PaymentMethod::Card);
    }

    #[test]
    fn full_plan_booking_is_paid_immediately() {
        let (catalog, mut ledger) = fixtures();
        let trip = zanzibar(&catalog);

        let receipt = ledger
            .create_booking(
                &trip,
                BookingRequest {
                    payment_plan: PaymentPlan::Full,
                    installment_rate: None,
                    ..installment_request(&trip)
                },
            )
            .unwrap();
        let booking = ledger.booking(receipt.booking_id).unwrap();
        assert_eq!(booking.paid_amount, booking.total_amount);
        assert_eq!(booking.status, BookingStatus::Paid);
    }

    #[test]
    fn guest_checkout_allows_full_plan_only() {
        let (catalog, mut ledger) = fixtures();
        let trip = zanzibar(&catalog);

        let guest = GuestInfo {
            name: "Guest".into(),
            email: "guest@example.com".into(),
            phone: "+255 000 000".into(),
        };
        let err = ledger
            .create_booking(
                &trip,
                BookingRequest {
                    customer: Customer::Guest,
                    guest_info: Some(guest.clone()),
                    ..installment_request(&trip)
                },
            )
            .unwrap_err();
        assert!(matches!(err, LedgerError::GuestInstallmentNotAllowed));

        let receipt = ledger
            .create_booking(
                &trip,
                BookingRequest {
                    customer: Customer::Guest,
                    payment_plan: PaymentPlan::Full,
                    installment_rate: None,
                    guest_info: Some(guest),
                    ..installment_request(&trip)
                },
            )
            .unwrap();
        let booking = ledger.booking(receipt.booking_id).unwrap();
        assert!(booking.customer.is_guest());
        assert!(booking.guest_info.is_some());
    }

    #[test]
    fn travelers_beyond_available_slots_are_rejected() {
        let (catalog, mut ledger) = fixtures();
        let trip = zanzibar(&catalog);

        let err = ledger
            .create_booking(
                &trip,
                BookingRequest {
                    travelers: trip.available_slots + 1,
                    ..installment_request(&trip)
                },
            )
            .unwrap_err();
        assert!(matches!(err, LedgerError::NoAvailability { .. }));
        assert_eq!(ledger.booking_count(), 0);
    }

    #[test]
    fn approval_credits_booking_exactly_once() {
        // $1200 booking, $360 paid; admin approves an $840 transfer.
        let (catalog, mut ledger) = fixtures();
        let trip = zanzibar(&catalog);
        let receipt = ledger.create_booking(&trip, installment_request(&trip)).unwrap();
        let txn = pending_bank_transfer(&mut ledger, receipt.booking_id, 840.0);

        ledger.approve_transaction(txn).unwrap();
        let booking = ledger.booking(receipt.booking_id).unwrap();
        assert_eq!(booking.paid_amount, 1200.0);
        assert_eq!(booking.status, BookingStatus::Paid);

        // A second approval write must not double-count.
        ledger.approve_transaction(txn).unwrap();
        let booking = ledger.booking(receipt.booking_id).unwrap();
        assert_eq!(booking.paid_amount, 1200.0);
        assert_eq!(booking.status, BookingStatus::Paid);
    }

    #[test]
    fn rejection_never_touches_the_balance() {
        let (catalog, mut ledger) = fixtures();
        let trip = zanzibar(&catalog);
        let receipt = ledger.create_booking(&trip, installment_request(&trip)).unwrap();
        let txn = pending_bank_transfer(&mut ledger, receipt.booking_id, 840.0);

        ledger.reject_transaction(txn).unwrap();
        let booking = ledger.booking(receipt.booking_id).unwrap();
        assert_eq!(booking.paid_amount, 360.0);
        assert_eq!(booking.status, BookingStatus::Confirmed);
        assert_eq!(
            ledger.transaction(txn).unwrap().status,
            TransactionStatus::Failed
        );

        // Rejected transactions are settled; flipping to approved later
        // is not allowed.
        assert!(matches!(
            ledger.approve_transaction(txn),
            Err(LedgerError::TransactionSettled(_))
        ));
    }

    #[test]
    fn completed_card_payment_applies_immediately() {
        let (catalog, mut ledger) = fixtures();
        let trip = zanzibar(&catalog);
        let receipt = ledger.create_booking(&trip, installment_request(&trip)).unwrap();

        ledger
            .add_transaction(TransactionRequest {
                booking_id: receipt.booking_id,
                customer: Customer::Registered("user-1".into()),
                amount: 400.0,
                payment_method: PaymentMethod::Card,
                status: TransactionStatus::Completed,
                reference: "TXN-CARD".into(),
                proof_of_payment: None,
                notes: None,
            })
            .unwrap();

        let booking = ledger.booking(receipt.booking_id).unwrap();
        assert_eq!(booking.paid_amount, 760.0);
        assert_eq!(booking.status, BookingStatus::Confirmed);
    }

    #[test]
    fn pending_transactions_leave_the_balance_alone() {
        let (catalog, mut ledger) = fixtures();
        let trip = zanzibar(&catalog);
        let receipt = ledger.create_booking(&trip, installment_request(&trip)).unwrap();
        pending_bank_transfer(&mut ledger, receipt.booking_id, 840.0);

        let booking = ledger.booking(receipt.booking_id).unwrap();
        assert_eq!(booking.paid_amount, 360.0);
        assert_eq!(booking.status, BookingStatus::Confirmed);
        assert_eq!(ledger.pending_transactions().len(), 1);
    }

    #[test]
    fn amount_must_stay_within_outstanding_balance() {
        let (catalog, mut ledger) = fixtures();
        let trip = zanzibar(&catalog);
        let receipt = ledger.create_booking(&trip, installment_request(&trip)).unwrap();

        for amount in [0.0, -10.0, 900.0] {
            let err = ledger
                .add_transaction(TransactionRequest {
                    booking_id: receipt.booking_id,
                    customer: Customer::Registered("user-1".into()),
                    amount,
                    payment_method: PaymentMethod::Card,
                    status: TransactionStatus::Completed,
                    reference: "TXN-BAD".into(),
                    proof_of_payment: None,
                    notes: None,
                })
                .unwrap_err();
            assert!(matches!(err, LedgerError::AmountOutOfRange { .. }));
        }
    }

    #[test]
    fn bank_transfer_requires_proof_of_payment() {
        let (catalog, mut ledger) = fixtures();
        let trip = zanzibar(&catalog);
        let receipt = ledger.create_booking(&trip, installment_request(&trip)).unwrap();

        let err = ledger
            .add_transaction(TransactionRequest {
                booking_id: receipt.booking_id,
                customer: Customer::Registered("user-1".into()),
                amount: 100.0,
                payment_method: PaymentMethod::BankTransfer,
                status: TransactionStatus::Pending,
                reference: "TXN-NOPROOF".into(),
                proof_of_payment: None,
                notes: None,
            })
            .unwrap_err();
        assert!(matches!(err, LedgerError::ProofOfPaymentRequired));
    }

    #[test]
    fn paid_iff_paid_amount_covers_total() {
        let (catalog, mut ledger) = fixtures();
        let trip = zanzibar(&catalog);
        let receipt = ledger.create_booking(&trip, installment_request(&trip)).unwrap();

        // Pay off in two steps; invariant must hold at every point.
        for amount in [400.0, 440.0] {
            let txn = pending_bank_transfer(&mut ledger, receipt.booking_id, amount);
            ledger.approve_transaction(txn).unwrap();
            let booking = ledger.booking(receipt.booking_id).unwrap();
            assert_eq!(
                booking.status == BookingStatus::Paid,
                booking.paid_amount >= booking.total_amount
            );
        }
        let booking = ledger.booking(receipt.booking_id).unwrap();
        assert_eq!(booking.paid_amount, 1200.0);
        assert_eq!(booking.status, BookingStatus::Paid);
    }

    #[test]
    fn cancelled_booking_rejects_payments() {
        let (catalog, mut ledger) = fixtures();
        let trip = zanzibar(&catalog);
        let receipt = ledger.create_booking(&trip, installment_request(&trip)).unwrap();

        ledger.cancel_booking(receipt.booking_id).unwrap();
        let err = ledger
            .add_transaction(TransactionRequest {
                booking_id: receipt.booking_id,
                customer: Customer::Registered("user-1".into()),
                amount: 100.0,
                payment_method: PaymentMethod::Card,
                status: TransactionStatus::Completed,
                reference: "TXN-LATE".into(),
                proof_of_payment: None,
                notes: None,
            })
            .unwrap_err();
        assert!(matches!(err, LedgerError::BookingNotPayable(_)));

        // Cancelled is terminal.
        assert!(matches!(
            ledger.cancel_booking(receipt.booking_id),
            Err(LedgerError::BookingTerminal(_))
        ));
    }

    #[test]
    fn dashboard_buckets_follow_booking_status() {
        let (catalog, mut ledger) = fixtures();
        let trip = zanzibar(&catalog);
        let user = Customer::Registered("user-1".into());

        // One confirmed, one fully paid, one cancelled.
        let confirmed = ledger.create_booking(&trip, installment_request(&trip)).unwrap();
        let paid = ledger
            .create_booking(
                &trip,
                BookingRequest {
                    payment_plan: PaymentPlan::Full,
                    installment_rate: None,
                    ..installment_request(&trip)
                },
            )
            .unwrap();
        let cancelled = ledger.create_booking(&trip, installment_request(&trip)).unwrap();
        ledger.cancel_booking(cancelled.booking_id).unwrap();

        let view = ledger.user_dashboard(&user);
        assert_eq!(view.upcoming.len(), 1);
        assert_eq!(view.upcoming[0].id, confirmed.booking_id);
        assert_eq!(view.completed.len(), 1);
        assert_eq!(view.completed[0].id, paid.booking_id);
        assert_eq!(view.cancelled.len(), 1);
        assert_eq!(view.cancelled[0].id, cancelled.booking_id);
    }

    #[test]
    fn queries_are_scoped_to_the_customer() {
        let (catalog, mut ledger) = fixtures();
        let trip = zanzibar(&catalog);

        ledger.create_booking(&trip, installment_request(&trip)).unwrap();
        ledger
            .create_booking(
                &trip,
                BookingRequest {
                    customer: Customer::Registered("user-2".into()),
                    ..installment_request(&trip)
                },
            )
            .unwrap();

        let user_1 = Customer::Registered("user-1".into());
        assert_eq!(ledger.user_bookings(&user_1).len(), 1);
        assert_eq!(ledger.user_transactions(&user_1).len(), 1);
        assert_eq!(ledger.bookings_for_trip(trip.id), 2);
        assert_eq!(ledger.total_revenue(), 720.0);
    }
}

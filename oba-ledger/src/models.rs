use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub use oba_core::PaymentMethod;

/// Who a booking or transaction belongs to: a registered account or
/// the guest-checkout sentinel.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(into = "String", from = "String")]
pub enum Customer {
    Registered(String),
    Guest,
}

impl Customer {
    pub fn is_guest(&self) -> bool {
        matches!(self, Customer::Guest)
    }
}

impl From<Customer> for String {
    fn from(customer: Customer) -> Self {
        match customer {
            Customer::Registered(id) => id,
            Customer::Guest => "guest".to_string(),
        }
    }
}

impl From<String> for Customer {
    fn from(raw: String) -> Self {
        if raw == "guest" {
            Customer::Guest
        } else {
            Customer::Registered(raw)
        }
    }
}

/// Contact details collected during guest checkout.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GuestInfo {
    pub name: String,
    pub email: String,
    pub phone: String,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentPlan {
    Full,
    Installment,
}

/// Allowed deposit percentages for installment plans.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(try_from = "u8", into = "u8")]
pub enum InstallmentRate {
    TwentyFive,
    Thirty,
    Fifty,
}

impl InstallmentRate {
    pub fn percent(&self) -> u8 {
        match self {
            InstallmentRate::TwentyFive => 25,
            InstallmentRate::Thirty => 30,
            InstallmentRate::Fifty => 50,
        }
    }
}

impl From<InstallmentRate> for u8 {
    fn from(rate: InstallmentRate) -> Self {
        rate.percent()
    }
}

impl TryFrom<u8> for InstallmentRate {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            25 => Ok(InstallmentRate::TwentyFive),
            30 => Ok(InstallmentRate::Thirty),
            50 => Ok(InstallmentRate::Fifty),
            other => Err(format!("unsupported deposit percentage: {other}")),
        }
    }
}

/// Booking status in the lifecycle.
///
/// Pending → Confirmed → Paid, with Cancelled reachable from any
/// non-terminal state by explicit action. Paid and Cancelled are
/// terminal.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Paid,
    Cancelled,
}

impl BookingStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, BookingStatus::Paid | BookingStatus::Cancelled)
    }
}

/// A customer's reservation against a trip, tracking what is owed and
/// what has been paid.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Booking {
    pub id: Uuid,
    pub trip_id: Uuid,
    pub customer: Customer,
    pub travelers: u32,
    pub total_amount: f64,
    pub paid_amount: f64,
    pub payment_plan: PaymentPlan,
    pub installment_rate: Option<InstallmentRate>,
    pub status: BookingStatus,
    pub booking_date: DateTime<Utc>,
    pub notes: Option<String>,
    pub guest_info: Option<GuestInfo>,
}

impl Booking {
    /// What is still owed on this booking.
    pub fn outstanding(&self) -> f64 {
        (self.total_amount - self.paid_amount).max(0.0)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionStatus {
    Pending,
    Completed,
    Failed,
}

impl TransactionStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, TransactionStatus::Completed | TransactionStatus::Failed)
    }
}

/// One payment event applied (or attempted) against a booking.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    pub id: Uuid,
    pub booking_id: Uuid,
    pub customer: Customer,
    pub amount: f64,
    pub payment_method: PaymentMethod,
    pub status: TransactionStatus,
    pub transaction_date: DateTime<Utc>,
    pub reference: String,
    pub proof_of_payment: Option<String>,
    pub notes: Option<String>,
}

/// Checkout request as it arrives from the booking form.
#[derive(Debug, Clone, Deserialize)]
pub struct BookingRequest {
    pub trip_id: Uuid,
    pub customer: Customer,
    pub travelers: u32,
    pub payment_plan: PaymentPlan,
    pub installment_rate: Option<InstallmentRate>,
    pub notes: Option<String>,
    pub guest_info: Option<GuestInfo>,
}

/// A payment submitted against an existing booking.
#[derive(Debug, Clone, Deserialize)]
pub struct TransactionRequest {
    pub booking_id: Uuid,
    pub customer: Customer,
    pub amount: f64,
    pub payment_method: PaymentMethod,
    pub status: TransactionStatus,
    pub reference: String,
    pub proof_of_payment: Option<String>,
    pub notes: Option<String>,
}

/// Partial update to a recorded transaction. Setting the status to
/// Completed is the admin approval path; Failed is rejection.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TransactionPatch {
    pub status: Option<TransactionStatus>,
    pub proof_of_payment: Option<String>,
    pub notes: Option<String>,
}

/// Deposit due at booking time: the rate applied to the total, rounded
/// to the nearest whole currency unit (half away from zero).
pub fn deposit_amount(total: f64, rate: InstallmentRate) -> f64 {
    (total * f64::from(rate.percent()) / 100.0).round()
}

/// Balance left after the deposit. Always total minus the rounded
/// deposit; never independently rounded, so it may differ by one unit
/// from total × (1 − rate).
pub fn remaining_after_deposit(total: f64, rate: InstallmentRate) -> f64 {
    total - deposit_amount(total, rate)
}

#[derive(Debug, thiserror::Error)]
pub enum LedgerError {
    #[error("Booking not found: {0}")]
    BookingNotFound(Uuid),

    #[error("Transaction not found: {0}")]
    TransactionNotFound(Uuid),

    #[error("Trip not found: {0}")]
    TripNotFound(Uuid),

    #[error("Not enough slots: requested {requested}, available {available}")]
    NoAvailability { requested: u32, available: u32 },

    #[error("A booking needs at least one traveler")]
    NoTravelers,

    #[error("Installment plans require an account; guest checkout is full payment only")]
    GuestInstallmentNotAllowed,

    #[error("Installment plans require a deposit percentage; full plans must not carry one")]
    PlanRateMismatch,

    #[error("Guest contact details are required for guest checkout and not otherwise")]
    GuestInfoMismatch,

    #[error("Payment amount {amount} outside allowed range (outstanding: {outstanding})")]
    AmountOutOfRange { amount: f64, outstanding: f64 },

    #[error("Proof of payment is required for bank transfers")]
    ProofOfPaymentRequired,

    #[error("Booking {0} is cancelled and cannot accept payments")]
    BookingNotPayable(Uuid),

    #[error("Booking {0} is already in a terminal state")]
    BookingTerminal(Uuid),

    #[error("Transaction {0} is already settled")]
    TransactionSettled(Uuid),

    #[error("Cannot delete trip: {bookings} booking(s) reference it")]
    TripHasBookings { bookings: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deposit_rounds_to_whole_units() {
        assert_eq!(deposit_amount(1200.0, InstallmentRate::Thirty), 360.0);
        // 25% of 1330 is 332.5; rounds half away from zero.
        assert_eq!(deposit_amount(1330.0, InstallmentRate::TwentyFive), 333.0);
    }

    #[test]
    fn remaining_is_total_minus_rounded_deposit() {
        // Never recomputed from the complementary percentage; the two
        // may differ by a unit once the deposit is rounded.
        let total = 1330.0;
        let deposit = deposit_amount(total, InstallmentRate::TwentyFive);
        assert_eq!(
            remaining_after_deposit(total, InstallmentRate::TwentyFive),
            total - deposit
        );
        assert_eq!(
            remaining_after_deposit(total, InstallmentRate::TwentyFive),
            997.0
        );
    }

    #[test]
    fn installment_rate_accepts_the_fixed_set_only() {
        assert!(InstallmentRate::try_from(25).is_ok());
        assert!(InstallmentRate::try_from(30).is_ok());
        assert!(InstallmentRate::try_from(50).is_ok());
        assert!(InstallmentRate::try_from(40).is_err());
    }

    #[test]
    fn guest_sentinel_round_trips_through_serde() {
        let json = serde_json::to_string(&Customer::Guest).unwrap();
        assert_eq!(json, "\"guest\"");
        let back: Customer = serde_json::from_str("\"user-7\"").unwrap();
        assert_eq!(back, Customer::Registered("user-7".into()));
    }
}

pub mod engine;
pub mod gateway;
pub mod models;
pub mod store;

pub use engine::{AdminOverview, TravelEngine};
pub use gateway::MockGateway;
pub use models::{
    Booking, BookingRequest, BookingStatus, Customer, GuestInfo, InstallmentRate, LedgerError,
    PaymentPlan, Transaction, TransactionPatch, TransactionRequest, TransactionStatus,
};
pub use store::{BookingReceipt, DashboardView, LedgerStore};

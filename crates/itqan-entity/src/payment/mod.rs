//! Payment request entity and status machine.

pub mod model;
pub mod status;

pub use model::{CreatePaymentRequest, PaymentRequest};
pub use status::PaymentStatus;

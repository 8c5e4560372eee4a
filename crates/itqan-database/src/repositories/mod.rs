//! Concrete repository implementations for all ITQAN entities.

pub mod course;
pub mod enrollment;
pub mod job;
pub mod notification;
pub mod payment;
pub mod user;

pub use course::CourseRepository;
pub use enrollment::EnrollmentRepository;
pub use job::JobRepository;
pub use notification::NotificationRepository;
pub use payment::PaymentRequestRepository;
pub use user::UserRepository;

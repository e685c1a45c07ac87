#[path = "trait.rs"]
mod trait_;
pub mod mock;

pub use mock::MockEnrollmentRepository;
pub use trait_::EnrollmentRepository;

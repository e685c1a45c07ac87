#[path = "trait.rs"]
mod trait_;
pub mod mock;

pub use mock::MockProgramRepository;
pub use trait_::ProgramRepository;

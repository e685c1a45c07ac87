#[path = "trait.rs"]
mod trait_;
pub mod mock;

pub use mock::MockFlashcardRepository;
pub use trait_::FlashcardRepository;

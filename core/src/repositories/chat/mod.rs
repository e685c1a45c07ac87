#[path = "trait.rs"]
mod trait_;
pub mod mock;

pub use mock::MockChatRepository;
pub use trait_::ChatRepository;

pub mod chat;
pub mod enrollment;
pub mod flashcard;
pub mod program;
pub mod user;

pub use chat::ChatRepository;
pub use enrollment::EnrollmentRepository;
pub use flashcard::FlashcardRepository;
pub use program::ProgramRepository;
pub use user::UserRepository;

pub use chat::MockChatRepository;
pub use enrollment::MockEnrollmentRepository;
pub use flashcard::MockFlashcardRepository;
pub use program::MockProgramRepository;
pub use user::MockUserRepository;

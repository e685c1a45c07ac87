//! Domain entities representing core business objects.

pub mod chat;
pub mod enrollment;
pub mod flashcard;
pub mod program;
pub mod token;
pub mod user;
pub mod verification;

// Re-export commonly used types
pub use chat::{ChatMessage, ChatRole, ChatSession};
pub use enrollment::{Enrollment, EnrollmentStatus};
pub use flashcard::Flashcard;
pub use program::{Program, ProgramStatus};
pub use token::{Claims, SESSION_TOKEN_EXPIRY_HOURS};
pub use user::{User, UserRole};
pub use verification::{
    VerificationToken, RESEND_COOLDOWN_SECONDS, VERIFICATION_TOKEN_BYTES,
    VERIFICATION_TOKEN_TTL_MINUTES,
};

//! Program entity for the learning catalogue.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Publication state of a program
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProgramStatus {
    #[serde(rename = "DRAFT")]
    Draft,
    #[serde(rename = "PUBLISHED")]
    Published,
    #[serde(rename = "ARCHIVED")]
    Archived,
}

impl ProgramStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProgramStatus::Draft => "DRAFT",
            ProgramStatus::Published => "PUBLISHED",
            ProgramStatus::Archived => "ARCHIVED",
        }
    }
}

impl std::str::FromStr for ProgramStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "DRAFT" => Ok(ProgramStatus::Draft),
            "PUBLISHED" => Ok(ProgramStatus::Published),
            "ARCHIVED" => Ok(ProgramStatus::Archived),
            _ => Err(format!("Unknown program status: {}", s)),
        }
    }
}

/// A learning program teens can enroll in
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Program {
    /// Unique identifier for the program
    pub id: Uuid,

    /// Program title shown in the catalogue
    pub title: String,

    /// Longer description of the program content
    pub description: String,

    /// Category label, e.g. "digital-skills" or "entrepreneurship"
    pub category: String,

    /// Publication state
    pub status: ProgramStatus,

    /// Timestamp when the program was created
    pub created_at: DateTime<Utc>,

    /// Timestamp when the program was last updated
    pub updated_at: DateTime<Utc>,
}

impl Program {
    /// Creates a new draft program
    pub fn new(title: String, description: String, category: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            title,
            description,
            category,
            status: ProgramStatus::Draft,
            created_at: now,
            updated_at: now,
        }
    }

    /// Publishes the program, making it visible in the public catalogue
    pub fn publish(&mut self) {
        self.status = ProgramStatus::Published;
        self.updated_at = Utc::now();
    }

    /// Archives the program
    pub fn archive(&mut self) {
        self.status = ProgramStatus::Archived;
        self.updated_at = Utc::now();
    }

    /// Checks whether the program is publicly visible
    pub fn is_published(&self) -> bool {
        self.status == ProgramStatus::Published
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_new_program_is_draft() {
        let program = Program::new(
            "Intro to Web Development".to_string(),
            "HTML, CSS and a first taste of JavaScript".to_string(),
            "digital-skills".to_string(),
        );

        assert_eq!(program.status, ProgramStatus::Draft);
        assert!(!program.is_published());
        assert_eq!(program.created_at, program.updated_at);
    }

    #[test]
    fn test_publish_and_archive() {
        let mut program = Program::new(
            "Starting a Small Business".to_string(),
            "From idea to first sale".to_string(),
            "entrepreneurship".to_string(),
        );

        program.publish();
        assert!(program.is_published());

        program.archive();
        assert_eq!(program.status, ProgramStatus::Archived);
        assert!(!program.is_published());
    }

    #[test]
    fn test_status_round_trip() {
        for status in [
            ProgramStatus::Draft,
            ProgramStatus::Published,
            ProgramStatus::Archived,
        ] {
            assert_eq!(ProgramStatus::from_str(status.as_str()).unwrap(), status);
        }
        assert!(ProgramStatus::from_str("published").is_err());
    }

    #[test]
    fn test_status_wire_format() {
        let program = Program::new(
            "Financial Literacy".to_string(),
            "Budgeting and saving basics".to_string(),
            "finance".to_string(),
        );
        let json = serde_json::to_string(&program).unwrap();

        assert!(json.contains("\"status\":\"DRAFT\""));
    }
}

//! Mock implementation of EnrollmentRepository for testing

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::enrollment::Enrollment;
use crate::errors::DomainError;

use super::trait_::EnrollmentRepository;

/// Mock enrollment repository for testing
pub struct MockEnrollmentRepository {
    enrollments: Arc<RwLock<HashMap<Uuid, Enrollment>>>,
}

impl MockEnrollmentRepository {
    /// Create a new mock repository
    pub fn new() -> Self {
        Self {
            enrollments: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

impl Default for MockEnrollmentRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EnrollmentRepository for MockEnrollmentRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Enrollment>, DomainError> {
        let enrollments = self.enrollments.read().await;
        Ok(enrollments.get(&id).cloned())
    }

    async fn find_by_user(&self, user_id: Uuid) -> Result<Vec<Enrollment>, DomainError> {
        let enrollments = self.enrollments.read().await;
        let mut owned: Vec<Enrollment> = enrollments
            .values()
            .filter(|e| e.user_id == user_id)
            .cloned()
            .collect();
        owned.sort_by(|a, b| b.enrolled_at.cmp(&a.enrolled_at));
        Ok(owned)
    }

    async fn create(&self, enrollment: Enrollment) -> Result<Enrollment, DomainError> {
        let mut enrollments = self.enrollments.write().await;

        // Same contract as the unique index on (user_id, program_id)
        if enrollments
            .values()
            .any(|e| e.user_id == enrollment.user_id && e.program_id == enrollment.program_id)
        {
            return Err(DomainError::Duplicate {
                resource: "Enrollment".to_string(),
            });
        }

        enrollments.insert(enrollment.id, enrollment.clone());
        Ok(enrollment)
    }

    async fn update(&self, enrollment: Enrollment) -> Result<Enrollment, DomainError> {
        let mut enrollments = self.enrollments.write().await;

        if !enrollments.contains_key(&enrollment.id) {
            return Err(DomainError::NotFound {
                resource: "Enrollment".to_string(),
            });
        }

        enrollments.insert(enrollment.id, enrollment.clone());
        Ok(enrollment)
    }
}

//! Mock implementation of ProgramRepository for testing

use async_trait::async_trait;
use gt_shared::Pagination;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::program::Program;
use crate::errors::DomainError;

use super::trait_::ProgramRepository;

/// Mock program repository for testing
pub struct MockProgramRepository {
    programs: Arc<RwLock<HashMap<Uuid, Program>>>,
}

impl MockProgramRepository {
    /// Create a new mock repository
    pub fn new() -> Self {
        Self {
            programs: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

impl Default for MockProgramRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ProgramRepository for MockProgramRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Program>, DomainError> {
        let programs = self.programs.read().await;
        Ok(programs.get(&id).cloned())
    }

    async fn list(&self, pagination: Pagination) -> Result<(Vec<Program>, u64), DomainError> {
        let programs = self.programs.read().await;
        let total = programs.len() as u64;

        let mut all: Vec<Program> = programs.values().cloned().collect();
        all.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        let page = all
            .into_iter()
            .skip(pagination.offset.max(0) as usize)
            .take(pagination.limit.max(0) as usize)
            .collect();

        Ok((page, total))
    }

    async fn create(&self, program: Program) -> Result<Program, DomainError> {
        let mut programs = self.programs.write().await;
        programs.insert(program.id, program.clone());
        Ok(program)
    }

    async fn update(&self, program: Program) -> Result<Program, DomainError> {
        let mut programs = self.programs.write().await;

        if !programs.contains_key(&program.id) {
            return Err(DomainError::NotFound {
                resource: "Program".to_string(),
            });
        }

        programs.insert(program.id, program.clone());
        Ok(program)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, DomainError> {
        let mut programs = self.programs.write().await;
        Ok(programs.remove(&id).is_some())
    }
}

//! Workshops service

use crate::{
    error::AppResult,
    models::workshop::{CreateWorkshop, Workshop},
    repository::Repository,
};

#[derive(Clone)]
pub struct WorkshopsService {
    repository: Repository,
}

impl WorkshopsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self) -> AppResult<Vec<Workshop>> {
        self.repository.workshops.list().await
    }

    pub async fn create(&self, data: CreateWorkshop) -> AppResult<Workshop> {
        let data = data.into_new()?;
        let workshop = self.repository.workshops.create(&data).await?;
        tracing::info!(workshop_id = %workshop.workshop_id, "Workshop created");
        Ok(workshop)
    }
}

//! Business logic services

pub mod catalog;
pub mod registration;
pub mod stats;

use crate::repository::Repository;

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub catalog: catalog::CatalogService,
    pub registration: registration::RegistrationService,
    pub stats: stats::StatsService,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(repository: Repository) -> Self {
        Self {
            catalog: catalog::CatalogService::new(repository.clone()),
            registration: registration::RegistrationService::new(repository.clone()),
            stats: stats::StatsService::new(repository),
        }
    }
}

//! Module declaration and lifecycle

use crate::api::rest::{
    routes::register_routes,
    views::{HtmlShellRenderer, ViewRenderer},
};
use crate::config::Config;
use crate::domain::Service;
use crate::infra::storage::{
    migrations::Migrator,
    repositories::{SeaOrmListingRepository, SeaOrmShowRepository},
};
use anyhow::{Context, Result};
use axum::Router;
use sea_orm::DatabaseConnection;
use sea_orm_migration::MigratorTrait;
use std::sync::Arc;

/// Booking service module: owns the domain service and builds its router
pub struct BookingModule {
    config: Config,
    service: Arc<Service>,
    renderer: Arc<dyn ViewRenderer>,
}

impl BookingModule {
    /// Wire repositories and the domain service over `db`, applying pending
    /// migrations first when configured to.
    pub async fn init(config: Config, db: Arc<DatabaseConnection>) -> Result<Self> {
        if config.run_migrations {
            migrate(&db).await?;
        }

        let listings = Arc::new(SeaOrmListingRepository::new(db.clone()));
        let shows = Arc::new(SeaOrmShowRepository::new(db));
        let service =
            Arc::new(Service::new(listings, shows).with_recent_limit(config.recent_limit));

        tracing::info!(recent_limit = config.recent_limit, "booking service initialized");
        Ok(Self {
            config,
            service,
            renderer: Arc::new(HtmlShellRenderer::default()),
        })
    }

    /// Replace the bundled HTML shell renderer
    pub fn with_renderer(mut self, renderer: Arc<dyn ViewRenderer>) -> Self {
        self.renderer = renderer;
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn service(&self) -> Arc<Service> {
        self.service.clone()
    }

    /// All page routes plus the 404 fallback
    pub fn router(&self) -> Result<Router> {
        register_routes(Router::new(), self.service.clone(), self.renderer.clone())
    }
}

/// Apply all pending migrations
pub async fn migrate(db: &DatabaseConnection) -> Result<()> {
    Migrator::up(db, None)
        .await
        .context("failed to apply booking migrations")?;
    tracing::info!("booking migrations applied");
    Ok(())
}

//! Application Startup
//!
//! Application building and server initialization.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::Router;
use sqlx::PgPool;
use tokio::net::TcpListener;

use crate::application::dto::PageQuery;
use crate::application::services::{read_catalog_file, CatalogService, CatalogServiceImpl};
use crate::config::{CatalogSettings, Settings};
use crate::domain::{NewIngredient, NewTag, PageRequest};
use crate::infrastructure::database;
use crate::infrastructure::repositories::Repositories;
use crate::presentation::http::{create_router, handlers::health};
use crate::shared::snowflake::SnowflakeGenerator;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub repos: Repositories,
    pub snowflake: Arc<SnowflakeGenerator>,
    pub settings: Arc<Settings>,
}

impl AppState {
    pub fn new(db: PgPool, repos: Repositories, settings: Settings) -> Self {
        let snowflake = Arc::new(SnowflakeGenerator::new(
            settings.snowflake.machine_id as u64,
            settings.snowflake.epoch,
        ));

        Self {
            db,
            repos,
            snowflake,
            settings: Arc::new(settings),
        }
    }

    /// Page request with the configured default and maximum page size.
    pub fn page_request(&self, query: &PageQuery) -> PageRequest {
        PageRequest::new(
            query.page,
            query.limit,
            self.settings.pagination.page_size,
            self.settings.pagination.max_page_size,
        )
    }
}

/// Application instance
pub struct Application {
    listener: TcpListener,
    router: Router,
}

impl Application {
    /// Build the application from settings
    pub async fn build(settings: Settings) -> Result<Self> {
        health::init_server_start();

        // Create database pool
        let db = database::create_pool(&settings.database)
            .await
            .context("Failed to connect to PostgreSQL")?;
        tracing::info!("Database connection pool created");

        if settings.database.run_migrations {
            database::run_migrations(&db)
                .await
                .context("Failed to apply migrations")?;
        }

        let repos = Repositories::postgres(db.clone());
        load_catalog(&repos, &settings.catalog).await?;

        let addr: SocketAddr = settings
            .server_addr()
            .parse()
            .with_context(|| format!("Invalid server address {}", settings.server_addr()))?;

        let state = AppState::new(db, repos, settings);
        let router = create_router(state);

        // Bind to address
        let listener = TcpListener::bind(addr).await?;
        tracing::info!("Listening on {}", addr);

        Ok(Self { listener, router })
    }

    /// Run the server until stopped
    pub async fn run_until_stopped(self) -> Result<()> {
        axum::serve(self.listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;
        Ok(())
    }

    /// Get the bound address
    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.listener.local_addr()
    }
}

/// Seed ingredients and tags from the configured JSON files.
pub async fn load_catalog(repos: &Repositories, catalog: &CatalogSettings) -> Result<()> {
    let service = CatalogServiceImpl::new(repos.ingredients.clone(), repos.tags.clone());

    if let Some(path) = &catalog.ingredients_path {
        let records: Vec<NewIngredient> = read_catalog_file(path).await?;
        service.load_ingredients(records).await?;
    }

    if let Some(path) = &catalog.tags_path {
        let records: Vec<NewTag> = read_catalog_file(path).await?;
        service.load_tags(records).await?;
    }

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}

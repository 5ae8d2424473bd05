//! # Phone Store Backend Service
//!
//! This is the main entry point for the backend service that manages
//! a retail phone & accessory store. It provides:
//!
//! - REST API for inventory, sales, and stock transfers
//! - Employee/admin login with database-backed sessions
//! - Weekly and monthly sales reporting per employee
//! - An activity log for auditing
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                        BACKEND SERVICE                           │
//! │                                                                  │
//! │  ┌─────────────────────────────────────────────────────────┐    │
//! │  │                     REST API (Actix)                     │    │
//! │  │  /auth  /phones  /accessories  /sales  /transfers        │    │
//! │  │  /reports/weekly  /reports/monthly  /activity            │    │
//! │  └─────────────────────────────────────────────────────────┘    │
//! │                          │                                       │
//! │  ┌───────────────────────┴───────────────────────────────────┐  │
//! │  │                    SERVICE LAYER                           │  │
//! │  │  ┌──────────────┐ ┌──────────────┐ ┌──────────────────┐   │  │
//! │  │  │ReportAggr.   │ │Inventory     │ │Sales / Auth /    │   │  │
//! │  │  │              │ │Manager       │ │ActivityLogger    │   │  │
//! │  │  └──────────────┘ └──────────────┘ └──────────────────┘   │  │
//! │  └───────────────────────────────────────────────────────────┘  │
//! │                          │                                       │
//! │                   ┌──────┴──────┐                                │
//! │                   │  PostgreSQL │                                │
//! │                   │  Database   │                                │
//! │                   └─────────────┘                                │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Quick Start
//!
//! 1. Set up PostgreSQL and create the database
//! 2. Copy `.env.example` to `.env` and configure
//! 3. Start the server: `cargo run`
//!
//! Migrations run automatically at startup. On an empty database a
//! default `admin`/`admin123` account is created.

use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{middleware, web, App, HttpServer};
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

mod api;
mod config;
mod db;
mod models;
mod services;
mod utils;

use config::AppConfig;
use db::Database;
use services::{ActivityLogger, AuthService, InventoryManager, ReportAggregator, SalesRecorder};

/// Application state shared across all handlers.
///
/// This struct contains all the shared resources that API handlers
/// need access to. It is wrapped in an `Arc` so every worker thread
/// shares the same pool and services.
pub struct AppState {
    /// Database connection pool for PostgreSQL
    pub db: Database,

    /// Session and login management
    pub auth: AuthService,

    /// Phone & accessory stock, transfers
    pub inventory: InventoryManager,

    /// Sale recording
    pub sales: SalesRecorder,

    /// Weekly/monthly report computation
    pub reports: ReportAggregator,

    /// Audit trail
    pub activity: ActivityLogger,

    /// Application configuration
    #[allow(dead_code)]
    pub config: AppConfig,
}

/// Main entry point for the backend service.
///
/// This function:
/// 1. Loads configuration from environment
/// 2. Initializes database connection and runs migrations
/// 3. Sets up the service layer
/// 4. Launches the HTTP server
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // =========================================
    // STEP 1: Initialize Logging
    // =========================================
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .expect("Failed to set tracing subscriber");

    info!("🚀 Starting Phone Store Backend Service");

    // =========================================
    // STEP 2: Load Configuration
    // =========================================
    dotenvy::dotenv().ok(); // It's okay if .env doesn't exist

    let config = AppConfig::from_env()
        .expect("Failed to load configuration");

    info!("📋 Configuration loaded");
    info!("   Server: {}:{}", config.server_host, config.server_port);
    info!("   Session TTL: {} minutes", config.session_ttl_minutes);

    // =========================================
    // STEP 3: Initialize Database
    // =========================================
    let db = Database::connect(&config.database_url)
        .await
        .expect("Failed to connect to database");

    info!("🗄️  Database connected");

    // Run migrations to ensure schema is up to date
    db.run_migrations()
        .await
        .expect("Failed to run migrations");

    info!("📦 Database migrations complete");

    // =========================================
    // STEP 4: Initialize Services
    // =========================================
    let auth = AuthService::new(db.clone(), config.clone());
    let inventory = InventoryManager::new(db.clone());
    let sales = SalesRecorder::new(db.clone());
    let reports = ReportAggregator::new(db.clone());
    let activity = ActivityLogger::new(db.clone());

    // First-boot admin account and session cleanup
    auth.ensure_default_admin()
        .await
        .expect("Failed to bootstrap admin account");
    auth.purge_expired()
        .await
        .expect("Failed to purge expired sessions");

    info!("🔧 Services initialized");

    // =========================================
    // STEP 5: Create Application State
    // =========================================
    let app_state = Arc::new(AppState {
        db: db.clone(),
        auth,
        inventory,
        sales,
        reports,
        activity,
        config: config.clone(),
    });

    // =========================================
    // STEP 6: Start HTTP Server
    // =========================================
    let server_host = config.server_host.clone();
    let server_port = config.server_port;

    info!("🌐 Starting HTTP server on {}:{}", server_host, server_port);

    HttpServer::new(move || {
        App::new()
            // Attach shared application state
            .app_data(web::Data::new(app_state.clone()))

            // Add logging middleware
            .wrap(middleware::Logger::default())

            // Browser frontends live on another origin in development
            .wrap(Cors::permissive())

            // Configure API routes
            .configure(api::configure_routes)
    })
    .bind(format!("{}:{}", server_host, server_port))?
    .run()
    .await
}

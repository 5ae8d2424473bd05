//! # API Route Configuration
//!
//! This module sets up all the HTTP routes for the API.

use actix_web::web;

use super::handlers;

/// Configure all API routes.
///
/// This function is called from main.rs to set up
/// all the endpoint routes.
///
/// ## Route Structure
///
/// ```text
/// /
/// ├── /health                 GET - Health check
/// ├── /auth
/// │   ├── /login              POST - Open a session
/// │   └── /logout             POST - Close the session
/// ├── /phones
/// │   ├── /                   POST - Register / GET - List
/// │   └── /{id}               GET / DELETE, PUT /{id}/status
/// ├── /accessories
/// │   ├── /                   POST - Register / GET - List
/// │   └── /{id}               GET / DELETE, PUT /{id}/stock
/// ├── /sales                  POST - Record / GET - List
/// ├── /transfers              POST - Record / GET - List
/// ├── /reports
/// │   ├── /weekly             GET - Weekly report
/// │   └── /monthly            GET - Monthly report
/// └── /activity               GET - Activity log (admin)
/// ```
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg
        // Root endpoint - API information
        .route("/", web::get().to(handlers::api_info))

        // Health check endpoint
        .route("/health", web::get().to(handlers::health_check))

        // Session endpoints
        .service(
            web::scope("/auth")
                .route("/login", web::post().to(handlers::login))
                .route("/logout", web::post().to(handlers::logout)),
        )

        // Phone inventory
        .service(
            web::scope("/phones")
                .route("", web::post().to(handlers::register_phone))
                .route("", web::get().to(handlers::list_phones))
                .route("/{id}", web::get().to(handlers::get_phone))
                .route("/{id}", web::delete().to(handlers::delete_phone))
                .route("/{id}/status", web::put().to(handlers::update_phone_status)),
        )

        // Accessory inventory
        .service(
            web::scope("/accessories")
                .route("", web::post().to(handlers::register_accessory))
                .route("", web::get().to(handlers::list_accessories))
                .route("/{id}", web::get().to(handlers::get_accessory))
                .route("/{id}", web::delete().to(handlers::delete_accessory))
                .route("/{id}/stock", web::put().to(handlers::restock_accessory)),
        )

        // Sales
        .service(
            web::scope("/sales")
                .route("", web::post().to(handlers::record_sale))
                .route("", web::get().to(handlers::list_sales)),
        )

        // Stock transfers
        .service(
            web::scope("/transfers")
                .route("", web::post().to(handlers::record_transfer))
                .route("", web::get().to(handlers::list_transfers)),
        )

        // Reports
        .service(
            web::scope("/reports")
                .route("/weekly", web::get().to(handlers::weekly_report))
                .route("/monthly", web::get().to(handlers::monthly_report)),
        )

        // Activity log (admin only)
        .route("/activity", web::get().to(handlers::list_activity));
}

//! # API Request Handlers
//!
//! This module contains the handler functions for each API endpoint.
//! Each handler:
//! 1. Extracts request data
//! 2. Checks the caller's session
//! 3. Calls the appropriate service
//! 4. Returns a formatted response
//!
//! ## Error Handling
//!
//! All errors are caught and returned as JSON:
//!
//! ```json
//! {
//!     "success": false,
//!     "error": {
//!         "code": "OUT_OF_STOCK",
//!         "message": "Insufficient stock: available 2, requested 5"
//!     }
//! }
//! ```
//!
//! ## Authentication
//!
//! Every endpoint except `/`, `/health`, and `/auth/login` expects an
//! `Authorization: Bearer <token>` header carrying the session token
//! returned by login. Reports always receive the target `user_id`
//! explicitly; employees are pinned to their own id and only admins
//! may pass somebody else's.

use std::sync::Arc;

use actix_web::http::header;
use actix_web::{web, HttpRequest, HttpResponse};
use chrono::Utc;
use serde_json::json;
use tracing::{error, info};

use crate::db::{SessionRecord, UserRole};
use crate::models::{
    ApiResponse, HealthResponse, ListQuery, LoginRequest, MonthlyReportQuery,
    RecordSaleRequest, RecordTransferRequest, RegisterAccessoryRequest, RegisterPhoneRequest,
    UpdateAccessoryStockRequest, UpdatePhoneStatusRequest, WeeklyReportQuery,
};
use crate::services::auth_service::AuthError;
use crate::services::inventory_manager::InventoryError;
use crate::services::report_aggregator::ReportError;
use crate::services::sales_recorder::SaleError;
use crate::AppState;

// ============================================
// HELPERS
// ============================================

/// Pull the bearer token out of the Authorization header and resolve
/// it to a session. Returns a ready-made error response on failure so
/// handlers can use `?`-less early returns.
async fn require_session(
    state: &AppState,
    req: &HttpRequest,
) -> Result<SessionRecord, HttpResponse> {
    let token = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "));

    let token = match token {
        Some(t) => t,
        None => {
            return Err(HttpResponse::Unauthorized().json(ApiResponse::<()>::error(
                "UNAUTHORIZED",
                "Missing bearer token",
            )));
        }
    };

    match state.auth.validate(token).await {
        Ok(session) => Ok(session),
        Err(AuthError::Unauthorized) => Err(HttpResponse::Unauthorized().json(
            ApiResponse::<()>::error("UNAUTHORIZED", "Invalid or expired session"),
        )),
        Err(e) => {
            error!("Session validation failed: {}", e);
            Err(HttpResponse::InternalServerError().json(ApiResponse::<()>::error(
                "DATABASE_ERROR",
                "Could not validate session",
            )))
        }
    }
}

/// Resolve which user a report should cover.
///
/// Employees always get their own report. Admins may pass any user id.
fn resolve_report_user(
    session: &SessionRecord,
    requested: Option<i32>,
) -> Result<i32, HttpResponse> {
    match requested {
        Some(user_id) if user_id != session.user_id => {
            if UserRole::parse(&session.role) == Some(UserRole::Admin) {
                Ok(user_id)
            } else {
                Err(HttpResponse::Forbidden().json(ApiResponse::<()>::error(
                    "FORBIDDEN",
                    "Employees can only view their own reports",
                )))
            }
        }
        _ => Ok(session.user_id),
    }
}

/// Map an inventory error to an HTTP response.
fn inventory_error_response(e: InventoryError) -> HttpResponse {
    match &e {
        InventoryError::ItemNotFound(_) => HttpResponse::NotFound()
            .json(ApiResponse::<()>::error("ITEM_NOT_FOUND", &e.to_string())),
        InventoryError::NotAvailable(_) => HttpResponse::BadRequest()
            .json(ApiResponse::<()>::error("ITEM_NOT_AVAILABLE", &e.to_string())),
        InventoryError::OutOfStock { .. } => HttpResponse::BadRequest()
            .json(ApiResponse::<()>::error("OUT_OF_STOCK", &e.to_string())),
        InventoryError::InvalidInput(_) => HttpResponse::BadRequest()
            .json(ApiResponse::<()>::error("INVALID_INPUT", &e.to_string())),
        InventoryError::DatabaseError(_) => {
            error!("Inventory operation failed: {}", e);
            HttpResponse::InternalServerError()
                .json(ApiResponse::<()>::error("DATABASE_ERROR", &e.to_string()))
        }
    }
}

/// Map a sale error to an HTTP response.
fn sale_error_response(e: SaleError) -> HttpResponse {
    match &e {
        SaleError::ItemNotFound(_) => HttpResponse::NotFound()
            .json(ApiResponse::<()>::error("ITEM_NOT_FOUND", &e.to_string())),
        SaleError::NotSellable(_) => HttpResponse::BadRequest()
            .json(ApiResponse::<()>::error("ITEM_NOT_AVAILABLE", &e.to_string())),
        SaleError::OutOfStock { .. } => HttpResponse::BadRequest()
            .json(ApiResponse::<()>::error("OUT_OF_STOCK", &e.to_string())),
        SaleError::InvalidInput(_) => HttpResponse::BadRequest()
            .json(ApiResponse::<()>::error("INVALID_INPUT", &e.to_string())),
        SaleError::DatabaseError(_) => {
            error!("Sale recording failed: {}", e);
            HttpResponse::InternalServerError()
                .json(ApiResponse::<()>::error("DATABASE_ERROR", &e.to_string()))
        }
    }
}

/// Map a report error to an HTTP response.
fn report_error_response(e: ReportError) -> HttpResponse {
    match &e {
        ReportError::InvalidPeriod(_) => HttpResponse::BadRequest()
            .json(ApiResponse::<()>::error("INVALID_PERIOD", &e.to_string())),
        ReportError::DataAccess(_) => {
            error!("Report computation failed: {}", e);
            HttpResponse::InternalServerError()
                .json(ApiResponse::<()>::error("REPORT_FAILED", &e.to_string()))
        }
    }
}

// ============================================
// INFO & HEALTH
// ============================================

/// API information endpoint (root).
///
/// Returns information about available API endpoints.
///
/// ## Endpoint
///
/// `GET /`
pub async fn api_info() -> HttpResponse {
    let info = json!({
        "name": "Phone Store API",
        "version": env!("CARGO_PKG_VERSION"),
        "description": "Backend API for retail phone & accessory inventory, sales, and reporting",
        "endpoints": {
            "health": { "method": "GET", "path": "/health" },
            "auth": {
                "login": { "method": "POST", "path": "/auth/login" },
                "logout": { "method": "POST", "path": "/auth/logout" }
            },
            "phones": { "methods": "GET/POST/PUT/DELETE", "path": "/phones" },
            "accessories": { "methods": "GET/POST/PUT/DELETE", "path": "/accessories" },
            "sales": { "methods": "GET/POST", "path": "/sales" },
            "transfers": { "methods": "GET/POST", "path": "/transfers" },
            "reports": {
                "weekly": { "method": "GET", "path": "/reports/weekly?weekStart=YYYY-MM-DD" },
                "monthly": { "method": "GET", "path": "/reports/monthly?month=YYYY-MM" }
            },
            "activity": { "method": "GET", "path": "/activity" }
        }
    });

    HttpResponse::Ok().json(ApiResponse::success(info))
}

/// Health check endpoint.
///
/// Check if the backend is running and the database responds.
///
/// ## Endpoint
///
/// `GET /health`
///
/// ## Example
///
/// ```bash
/// curl http://127.0.0.1:8080/health
/// ```
pub async fn health_check(state: web::Data<Arc<AppState>>) -> HttpResponse {
    // Check database
    let db_healthy = state.db.pool().get().await.is_ok();

    let response = HealthResponse {
        status: if db_healthy { "healthy" } else { "unhealthy" }.to_string(),
        database: db_healthy,
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: Utc::now(),
    };

    let status_code = if db_healthy {
        actix_web::http::StatusCode::OK
    } else {
        actix_web::http::StatusCode::SERVICE_UNAVAILABLE
    };

    HttpResponse::build(status_code).json(ApiResponse::success(response))
}

// ============================================
// AUTH
// ============================================

/// Log in and open a session.
///
/// ## Endpoint
///
/// `POST /auth/login`
///
/// ## Example
///
/// ```bash
/// curl -X POST http://127.0.0.1:8080/auth/login \
///   -H "Content-Type: application/json" \
///   -d '{"username": "amina", "password": "hunter2"}'
/// ```
///
/// ## Response
///
/// ```json
/// {
///     "success": true,
///     "data": {
///         "token": "550e8400-e29b-41d4-a716-446655440000",
///         "userId": 3,
///         "role": "employee",
///         "expiresAt": "2024-06-03T20:00:00Z"
///     }
/// }
/// ```
pub async fn login(
    state: web::Data<Arc<AppState>>,
    body: web::Json<LoginRequest>,
) -> HttpResponse {
    info!("Login attempt: {}", body.username);

    match state.auth.login(&body.username, &body.password).await {
        Ok(result) => {
            state.activity.log(Some(result.user_id), "login", None).await;
            HttpResponse::Ok().json(ApiResponse::success(result))
        }
        Err(AuthError::InvalidCredentials) => {
            state.activity
                .log(None, "login_failed", Some(&body.username))
                .await;
            HttpResponse::Unauthorized().json(ApiResponse::<()>::error(
                "LOGIN_FAILED",
                "Invalid username or password",
            ))
        }
        Err(e) => {
            error!("Login failed: {}", e);
            HttpResponse::InternalServerError()
                .json(ApiResponse::<()>::error("DATABASE_ERROR", &e.to_string()))
        }
    }
}

/// Close the current session.
///
/// ## Endpoint
///
/// `POST /auth/logout`
pub async fn logout(state: web::Data<Arc<AppState>>, req: HttpRequest) -> HttpResponse {
    let session = match require_session(&state, &req).await {
        Ok(s) => s,
        Err(response) => return response,
    };

    match state.auth.logout(&session.session_id.to_string()).await {
        Ok(_) => {
            state.activity.log(Some(session.user_id), "logout", None).await;
            HttpResponse::Ok().json(ApiResponse::success(json!({ "loggedOut": true })))
        }
        Err(e) => {
            error!("Logout failed: {}", e);
            HttpResponse::InternalServerError()
                .json(ApiResponse::<()>::error("DATABASE_ERROR", &e.to_string()))
        }
    }
}

// ============================================
// PHONES
// ============================================

/// Register a phone into inventory.
///
/// ## Endpoint
///
/// `POST /phones`
///
/// ## Example
///
/// ```bash
/// curl -X POST http://127.0.0.1:8080/phones \
///   -H "Authorization: Bearer $TOKEN" \
///   -H "Content-Type: application/json" \
///   -d '{
///     "brand": "Samsung",
///     "model": "Galaxy A54",
///     "imei": "356938035643809",
///     "purchasePrice": 25000,
///     "salePrice": 32000
///   }'
/// ```
pub async fn register_phone(
    state: web::Data<Arc<AppState>>,
    req: HttpRequest,
    body: web::Json<RegisterPhoneRequest>,
) -> HttpResponse {
    let session = match require_session(&state, &req).await {
        Ok(s) => s,
        Err(response) => return response,
    };

    match state.inventory.register_phone(body.into_inner(), session.user_id).await {
        Ok(phone) => {
            state.activity
                .log(
                    Some(session.user_id),
                    "register_phone",
                    Some(&format!("{} {} ({})", phone.brand, phone.model, phone.imei)),
                )
                .await;
            HttpResponse::Ok().json(ApiResponse::success(phone))
        }
        Err(e) => inventory_error_response(e),
    }
}

/// List phones, newest first.
///
/// ## Endpoint
///
/// `GET /phones?limit=50&offset=0`
pub async fn list_phones(
    state: web::Data<Arc<AppState>>,
    req: HttpRequest,
    query: web::Query<ListQuery>,
) -> HttpResponse {
    if let Err(response) = require_session(&state, &req).await {
        return response;
    }

    let (limit, offset) = query.resolve();
    match state.inventory.list_phones(limit, offset).await {
        Ok(phones) => HttpResponse::Ok().json(ApiResponse::success(phones)),
        Err(e) => inventory_error_response(e),
    }
}

/// Get a single phone.
///
/// ## Endpoint
///
/// `GET /phones/{id}`
pub async fn get_phone(
    state: web::Data<Arc<AppState>>,
    req: HttpRequest,
    path: web::Path<i32>,
) -> HttpResponse {
    if let Err(response) = require_session(&state, &req).await {
        return response;
    }

    match state.inventory.get_phone(path.into_inner()).await {
        Ok(phone) => HttpResponse::Ok().json(ApiResponse::success(phone)),
        Err(e) => inventory_error_response(e),
    }
}

/// Change a phone's status.
///
/// ## Endpoint
///
/// `PUT /phones/{id}/status`
pub async fn update_phone_status(
    state: web::Data<Arc<AppState>>,
    req: HttpRequest,
    path: web::Path<i32>,
    body: web::Json<UpdatePhoneStatusRequest>,
) -> HttpResponse {
    let session = match require_session(&state, &req).await {
        Ok(s) => s,
        Err(response) => return response,
    };

    let phone_id = path.into_inner();
    match state.inventory.update_phone_status(phone_id, &body.status).await {
        Ok(()) => {
            state.activity
                .log(
                    Some(session.user_id),
                    "update_phone_status",
                    Some(&format!("phone {} -> {}", phone_id, body.status)),
                )
                .await;
            HttpResponse::Ok().json(ApiResponse::success(json!({ "updated": true })))
        }
        Err(e) => inventory_error_response(e),
    }
}

/// Remove a phone from inventory.
///
/// ## Endpoint
///
/// `DELETE /phones/{id}`
pub async fn delete_phone(
    state: web::Data<Arc<AppState>>,
    req: HttpRequest,
    path: web::Path<i32>,
) -> HttpResponse {
    let session = match require_session(&state, &req).await {
        Ok(s) => s,
        Err(response) => return response,
    };

    let phone_id = path.into_inner();
    match state.inventory.delete_phone(phone_id).await {
        Ok(()) => {
            state.activity
                .log(
                    Some(session.user_id),
                    "delete_phone",
                    Some(&format!("phone {}", phone_id)),
                )
                .await;
            HttpResponse::Ok().json(ApiResponse::success(json!({ "deleted": true })))
        }
        Err(e) => inventory_error_response(e),
    }
}

// ============================================
// ACCESSORIES
// ============================================

/// Register an accessory line.
///
/// ## Endpoint
///
/// `POST /accessories`
pub async fn register_accessory(
    state: web::Data<Arc<AppState>>,
    req: HttpRequest,
    body: web::Json<RegisterAccessoryRequest>,
) -> HttpResponse {
    let session = match require_session(&state, &req).await {
        Ok(s) => s,
        Err(response) => return response,
    };

    match state.inventory.register_accessory(body.into_inner(), session.user_id).await {
        Ok(accessory) => {
            state.activity
                .log(
                    Some(session.user_id),
                    "register_accessory",
                    Some(&format!("{} x{}", accessory.accessory_name, accessory.quantity)),
                )
                .await;
            HttpResponse::Ok().json(ApiResponse::success(accessory))
        }
        Err(e) => inventory_error_response(e),
    }
}

/// List accessories, newest first.
///
/// ## Endpoint
///
/// `GET /accessories?limit=50&offset=0`
pub async fn list_accessories(
    state: web::Data<Arc<AppState>>,
    req: HttpRequest,
    query: web::Query<ListQuery>,
) -> HttpResponse {
    if let Err(response) = require_session(&state, &req).await {
        return response;
    }

    let (limit, offset) = query.resolve();
    match state.inventory.list_accessories(limit, offset).await {
        Ok(accessories) => HttpResponse::Ok().json(ApiResponse::success(accessories)),
        Err(e) => inventory_error_response(e),
    }
}

/// Get a single accessory line.
///
/// ## Endpoint
///
/// `GET /accessories/{id}`
pub async fn get_accessory(
    state: web::Data<Arc<AppState>>,
    req: HttpRequest,
    path: web::Path<i32>,
) -> HttpResponse {
    if let Err(response) = require_session(&state, &req).await {
        return response;
    }

    match state.inventory.get_accessory(path.into_inner()).await {
        Ok(accessory) => HttpResponse::Ok().json(ApiResponse::success(accessory)),
        Err(e) => inventory_error_response(e),
    }
}

/// Set an accessory's stock quantity.
///
/// ## Endpoint
///
/// `PUT /accessories/{id}/stock`
pub async fn restock_accessory(
    state: web::Data<Arc<AppState>>,
    req: HttpRequest,
    path: web::Path<i32>,
    body: web::Json<UpdateAccessoryStockRequest>,
) -> HttpResponse {
    let session = match require_session(&state, &req).await {
        Ok(s) => s,
        Err(response) => return response,
    };

    let accessory_id = path.into_inner();
    match state.inventory.restock_accessory(accessory_id, body.quantity).await {
        Ok(accessory) => {
            state.activity
                .log(
                    Some(session.user_id),
                    "restock_accessory",
                    Some(&format!("accessory {} -> {}", accessory_id, accessory.quantity)),
                )
                .await;
            HttpResponse::Ok().json(ApiResponse::success(accessory))
        }
        Err(e) => inventory_error_response(e),
    }
}

/// Remove an accessory line.
///
/// ## Endpoint
///
/// `DELETE /accessories/{id}`
pub async fn delete_accessory(
    state: web::Data<Arc<AppState>>,
    req: HttpRequest,
    path: web::Path<i32>,
) -> HttpResponse {
    let session = match require_session(&state, &req).await {
        Ok(s) => s,
        Err(response) => return response,
    };

    let accessory_id = path.into_inner();
    match state.inventory.delete_accessory(accessory_id).await {
        Ok(()) => {
            state.activity
                .log(
                    Some(session.user_id),
                    "delete_accessory",
                    Some(&format!("accessory {}", accessory_id)),
                )
                .await;
            HttpResponse::Ok().json(ApiResponse::success(json!({ "deleted": true })))
        }
        Err(e) => inventory_error_response(e),
    }
}

// ============================================
// SALES
// ============================================

/// Record a sale.
///
/// ## Endpoint
///
/// `POST /sales`
///
/// ## Example
///
/// ```bash
/// curl -X POST http://127.0.0.1:8080/sales \
///   -H "Authorization: Bearer $TOKEN" \
///   -H "Content-Type: application/json" \
///   -d '{
///     "itemType": "accessory",
///     "itemId": 7,
///     "quantity": 3,
///     "paymentMethod": "cash"
///   }'
/// ```
///
/// ## Errors
///
/// - `ITEM_NOT_FOUND` - Phone or accessory doesn't exist
/// - `ITEM_NOT_AVAILABLE` - Item exists but cannot be sold
/// - `OUT_OF_STOCK` - Not enough accessory stock
/// - `INVALID_INPUT` - Bad quantity, price, or payment method
pub async fn record_sale(
    state: web::Data<Arc<AppState>>,
    req: HttpRequest,
    body: web::Json<RecordSaleRequest>,
) -> HttpResponse {
    let session = match require_session(&state, &req).await {
        Ok(s) => s,
        Err(response) => return response,
    };

    match state.sales.record_sale(body.into_inner(), session.user_id).await {
        Ok(sale) => {
            state.activity
                .log(
                    Some(session.user_id),
                    "record_sale",
                    Some(&format!(
                        "{} {} x{} for {} cents",
                        sale.item_type, sale.item_id, sale.quantity, sale.sale_price
                    )),
                )
                .await;
            HttpResponse::Ok().json(ApiResponse::success(sale))
        }
        Err(e) => sale_error_response(e),
    }
}

/// List the caller's sales (admins may pass `userId`).
///
/// ## Endpoint
///
/// `GET /sales?limit=50&offset=0&userId=3`
pub async fn list_sales(
    state: web::Data<Arc<AppState>>,
    req: HttpRequest,
    query: web::Query<SalesListQuery>,
) -> HttpResponse {
    let session = match require_session(&state, &req).await {
        Ok(s) => s,
        Err(response) => return response,
    };

    let user_id = match resolve_report_user(&session, query.user_id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    let limit = query.limit.unwrap_or(50).clamp(1, 200);
    let offset = query.offset.unwrap_or(0).max(0);
    match state.sales.list_sales(user_id, limit, offset).await {
        Ok(sales) => HttpResponse::Ok().json(ApiResponse::success(sales)),
        Err(e) => sale_error_response(e),
    }
}

/// Query string for the sales list: pagination plus an optional
/// admin-only user filter.
#[derive(Debug, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalesListQuery {
    pub user_id: Option<i32>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

// ============================================
// TRANSFERS
// ============================================

/// Record a stock transfer.
///
/// ## Endpoint
///
/// `POST /transfers`
pub async fn record_transfer(
    state: web::Data<Arc<AppState>>,
    req: HttpRequest,
    body: web::Json<RecordTransferRequest>,
) -> HttpResponse {
    let session = match require_session(&state, &req).await {
        Ok(s) => s,
        Err(response) => return response,
    };

    match state.inventory.record_transfer(body.into_inner(), session.user_id).await {
        Ok(transfer) => {
            state.activity
                .log(
                    Some(session.user_id),
                    "record_transfer",
                    Some(&format!(
                        "{} {} x{} -> {}",
                        transfer.item_type, transfer.item_id, transfer.quantity,
                        transfer.destination
                    )),
                )
                .await;
            HttpResponse::Ok().json(ApiResponse::success(transfer))
        }
        Err(e) => inventory_error_response(e),
    }
}

/// List the caller's transfers.
///
/// ## Endpoint
///
/// `GET /transfers?limit=50&offset=0`
pub async fn list_transfers(
    state: web::Data<Arc<AppState>>,
    req: HttpRequest,
    query: web::Query<ListQuery>,
) -> HttpResponse {
    let session = match require_session(&state, &req).await {
        Ok(s) => s,
        Err(response) => return response,
    };

    let (limit, offset) = query.resolve();
    match state.inventory.list_transfers(session.user_id, limit, offset).await {
        Ok(transfers) => HttpResponse::Ok().json(ApiResponse::success(transfers)),
        Err(e) => inventory_error_response(e),
    }
}

// ============================================
// REPORTS
// ============================================

/// Weekly sales report.
///
/// One zero-filled bucket per day of the week, summary totals, top 5
/// items, and the payment breakdown. Defaults to the current ISO week;
/// pass `weekStart` for a historical week.
///
/// ## Endpoint
///
/// `GET /reports/weekly?weekStart=2024-06-03&userId=7`
///
/// ## Example
///
/// ```bash
/// curl -H "Authorization: Bearer $TOKEN" \
///   "http://127.0.0.1:8080/reports/weekly?weekStart=2024-06-03"
/// ```
///
/// ## Errors
///
/// - `FORBIDDEN` - Employee asked for another user's report
/// - `REPORT_FAILED` - A report query failed; no partial data is returned
pub async fn weekly_report(
    state: web::Data<Arc<AppState>>,
    req: HttpRequest,
    query: web::Query<WeeklyReportQuery>,
) -> HttpResponse {
    let session = match require_session(&state, &req).await {
        Ok(s) => s,
        Err(response) => return response,
    };

    let user_id = match resolve_report_user(&session, query.user_id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    info!("Weekly report requested for user {}", user_id);

    match state.reports.weekly_report(user_id, query.week_start).await {
        Ok(report) => HttpResponse::Ok().json(ApiResponse::success(report)),
        Err(e) => report_error_response(e),
    }
}

/// Monthly sales report.
///
/// Day-of-month buckets, summary, derived KPIs, top 10 items, payment
/// breakdown, inventory movement, and the 5 best days. Defaults to the
/// current month; pass `month=YYYY-MM` for a historical month.
///
/// ## Endpoint
///
/// `GET /reports/monthly?month=2024-02&userId=7`
///
/// ## Errors
///
/// - `INVALID_PERIOD` - Malformed `month` value; rejected before querying
/// - `FORBIDDEN` - Employee asked for another user's report
/// - `REPORT_FAILED` - A report query failed; no partial data is returned
pub async fn monthly_report(
    state: web::Data<Arc<AppState>>,
    req: HttpRequest,
    query: web::Query<MonthlyReportQuery>,
) -> HttpResponse {
    let session = match require_session(&state, &req).await {
        Ok(s) => s,
        Err(response) => return response,
    };

    let user_id = match resolve_report_user(&session, query.user_id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    info!("Monthly report requested for user {}", user_id);

    match state.reports.monthly_report(user_id, query.month.as_deref()).await {
        Ok(report) => HttpResponse::Ok().json(ApiResponse::success(report)),
        Err(e) => report_error_response(e),
    }
}

// ============================================
// ACTIVITY LOG
// ============================================

/// Recent activity log entries. Admin only.
///
/// ## Endpoint
///
/// `GET /activity?limit=50&offset=0`
pub async fn list_activity(
    state: web::Data<Arc<AppState>>,
    req: HttpRequest,
    query: web::Query<ListQuery>,
) -> HttpResponse {
    let session = match require_session(&state, &req).await {
        Ok(s) => s,
        Err(response) => return response,
    };

    if UserRole::parse(&session.role) != Some(UserRole::Admin) {
        return HttpResponse::Forbidden().json(ApiResponse::<()>::error(
            "FORBIDDEN",
            "The activity log is admin only",
        ));
    }

    let (limit, offset) = query.resolve();
    match state.activity.recent(limit, offset).await {
        Ok(entries) => HttpResponse::Ok().json(ApiResponse::success(entries)),
        Err(e) => {
            error!("Activity log query failed: {}", e);
            HttpResponse::InternalServerError()
                .json(ApiResponse::<()>::error("DATABASE_ERROR", &e.to_string()))
        }
    }
}

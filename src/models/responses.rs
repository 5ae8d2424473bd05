//! # API Response Models
//!
//! Structures for outgoing API response bodies.
//! All responses are wrapped in a standard format.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::utils::format_money;

/// Standard API response wrapper.
///
/// All API responses follow this format:
///
/// ## Success Response
///
/// ```json
/// {
///     "success": true,
///     "data": { ... },
///     "error": null
/// }
/// ```
///
/// ## Error Response
///
/// ```json
/// {
///     "success": false,
///     "data": null,
///     "error": {
///         "code": "INVALID_PERIOD",
///         "message": "Malformed month: 2024-13"
///     }
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse<T> {
    /// Whether the request was successful.
    pub success: bool,

    /// Response data (null on error).
    pub data: Option<T>,

    /// Error information (null on success).
    pub error: Option<ApiError>,
}

impl<T> ApiResponse<T> {
    /// Create a successful response with data.
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    /// Create an error response.
    pub fn error(code: &str, message: &str) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(ApiError {
                code: code.to_string(),
                message: message.to_string(),
            }),
        }
    }
}

/// API error information.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Error code (e.g., "INVALID_PERIOD").
    pub code: String,

    /// Human-readable error message.
    pub message: String,
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    /// "healthy" or "unhealthy".
    pub status: String,

    /// Whether the database responded.
    pub database: bool,

    /// Crate version.
    pub version: String,

    /// Server time.
    pub timestamp: DateTime<Utc>,
}

/// Successful login response.
///
/// ## Example Response
///
/// ```json
/// {
///     "success": true,
///     "data": {
///         "token": "550e8400-e29b-41d4-a716-446655440000",
///         "userId": 3,
///         "username": "amina",
///         "fullName": "Amina Diallo",
///         "role": "employee",
///         "expiresAt": "2024-06-03T20:00:00Z"
///     }
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    /// Bearer token for subsequent requests.
    pub token: Uuid,

    /// The logged-in user.
    pub user_id: i32,

    /// Login name.
    pub username: String,

    /// Display name.
    pub full_name: String,

    /// "admin" or "employee".
    pub role: String,

    /// When the session expires.
    pub expires_at: DateTime<Utc>,
}

// ============================================
// REPORT PAYLOAD
// ============================================

/// The period a report covers.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ReportPeriodInfo {
    /// First day, inclusive.
    pub start_date: NaiveDate,

    /// Last day, inclusive.
    pub end_date: NaiveDate,

    /// "week" or "month".
    pub granularity: String,
}

/// One calendar day's aggregated metrics within a report period.
///
/// Every day in the period gets exactly one bucket, zero-valued when
/// nothing was sold.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DailyBucket {
    /// The calendar day.
    pub date: NaiveDate,

    /// 1-based day number within the period (day of month for
    /// monthly reports).
    pub day: u32,

    /// Sales recorded on this day.
    pub sales_count: i64,

    /// Revenue in cents.
    pub revenue: i64,

    /// Phone sales on this day.
    pub phone_count: i64,

    /// Accessory sales on this day.
    pub accessory_count: i64,

    /// Accessory units moved on this day.
    pub accessory_units: i64,
}

/// Totals across the whole report period.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ReportSummary {
    /// Total sales in the period.
    pub total_sales: i64,

    /// Total revenue in cents.
    pub total_revenue: i64,

    /// Human-readable revenue, e.g. "1,234.56".
    pub formatted_revenue: String,

    /// Phone sales in the period.
    pub phones_sold: i64,

    /// Accessory sales in the period.
    pub accessories_sold: i64,

    /// Accessory units moved in the period.
    pub accessory_units: i64,
}

impl ReportSummary {
    /// Build a summary from already-aggregated totals.
    pub fn from_totals(
        total_sales: i64,
        total_revenue: i64,
        phones_sold: i64,
        accessories_sold: i64,
        accessory_units: i64,
    ) -> Self {
        Self {
            total_sales,
            total_revenue,
            formatted_revenue: format_money(total_revenue),
            phones_sold,
            accessories_sold,
            accessory_units,
        }
    }
}

/// One entry in the best-sellers ranking.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TopItem {
    /// "phone" or "accessory".
    pub item_type: String,

    /// phone_id or accessory_id.
    pub item_id: i32,

    /// Display name.
    pub name: String,

    /// Sales within the period.
    pub sales_count: i64,

    /// Units moved within the period.
    pub units: i64,

    /// Revenue in cents.
    pub revenue: i64,

    /// Average price in cents: raw sale price for phones,
    /// per-unit price for accessories.
    pub avg_price: i64,
}

/// Sales grouped by payment method.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PaymentBreakdown {
    /// "cash", "card", ...
    pub payment_method: String,

    /// Sales using this method.
    pub transactions: i64,

    /// Total amount in cents.
    pub total_amount: i64,

    /// Average amount per sale, in cents (rounded to the nearest cent).
    pub avg_amount: i64,
}

/// Phone inventory movement for the month.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PhoneDeltas {
    /// Phones registered this month.
    pub added: i64,

    /// Of those, currently sold.
    pub sold: i64,

    /// Of those, still in stock.
    pub in_stock: i64,

    /// Of those, transferred out.
    pub transferred: i64,

    /// Of those, currently unavailable.
    pub unavailable: i64,
}

/// Accessory inventory movement for the month.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AccessoryDeltas {
    /// Accessory lines registered this month.
    pub added: i64,

    /// Units currently on hand across those lines.
    pub units_in_stock: i64,

    /// Lines currently in stock.
    pub in_stock: i64,

    /// Lines currently out of stock.
    pub out_of_stock: i64,

    /// Lines currently unavailable.
    pub unavailable: i64,
}

/// Transfer activity for the month.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TransferSummary {
    /// Transfer records in the month.
    pub transfers: i64,

    /// Units moved.
    pub units: i64,

    /// Phone transfers.
    pub phone_transfers: i64,

    /// Accessory transfers.
    pub accessory_transfers: i64,
}

/// Inventory movement block of the monthly report.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct InventoryDeltas {
    pub phones: PhoneDeltas,
    pub accessories: AccessoryDeltas,
    pub transfers: TransferSummary,
}

/// One of the best days of the month, ranked by revenue.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BestDay {
    /// The calendar day.
    pub date: NaiveDate,

    /// Sales on that day.
    pub sales_count: i64,

    /// Revenue in cents.
    pub revenue: i64,
}

/// The weekly report payload.
///
/// Returned by `GET /reports/weekly`. Contains one bucket per day of
/// the week plus summary, top 5 items, and payment breakdown.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyReport {
    /// The employee this report covers.
    pub user_id: i32,

    /// The week covered.
    pub period: ReportPeriodInfo,

    /// One bucket per calendar day, zero-filled.
    pub daily: Vec<DailyBucket>,

    /// Totals for the week.
    pub summary: ReportSummary,

    /// Top 5 items by sales count.
    pub top_items: Vec<TopItem>,

    /// Sales grouped by payment method, largest first.
    pub payment_breakdown: Vec<PaymentBreakdown>,
}

/// The monthly report payload.
///
/// Returned by `GET /reports/monthly`. Adds derived KPIs, inventory
/// movement, and the best days of the month on top of the weekly
/// report's shape.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyReport {
    /// The employee this report covers.
    pub user_id: i32,

    /// The month covered.
    pub period: ReportPeriodInfo,

    /// One bucket per day of the month, zero-filled.
    pub daily: Vec<DailyBucket>,

    /// Totals for the month.
    pub summary: ReportSummary,

    /// Days with at least one sale.
    pub days_with_sales: i64,

    /// Average sales per active day, rounded to 1 decimal.
    /// 0.0 when the month had no active days.
    pub avg_daily_sales: f64,

    /// Average revenue per active day, in cents rounded to the
    /// nearest whole currency unit. 0 when the month had no
    /// active days.
    pub avg_daily_revenue: i64,

    /// Top 10 items by sales count.
    pub top_items: Vec<TopItem>,

    /// Sales grouped by payment method, largest first.
    pub payment_breakdown: Vec<PaymentBreakdown>,

    /// Inventory movement for the month.
    pub inventory: InventoryDeltas,

    /// Up to 5 best days by revenue.
    pub best_days: Vec<BestDay>,
}

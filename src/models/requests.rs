//! # API Request Models
//!
//! Structures for incoming API request bodies and query strings.
//! Each struct represents the expected JSON body for an endpoint.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Request to log in.
///
/// ## Example JSON
///
/// ```json
/// {
///     "username": "amina",
///     "password": "hunter2"
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    /// Login name.
    pub username: String,

    /// Plaintext password, verified against the stored hash.
    pub password: String,
}

/// Request to register a phone into inventory.
///
/// ## Example JSON
///
/// ```json
/// {
///     "brand": "Samsung",
///     "model": "Galaxy A54",
///     "imei": "356938035643809",
///     "purchasePrice": 25000,
///     "salePrice": 32000
/// }
/// ```
///
/// ## Notes
///
/// Prices are in cents: 32000 = 320.00.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterPhoneRequest {
    /// Manufacturer.
    pub brand: String,

    /// Model name.
    pub model: String,

    /// Unique hardware identifier.
    pub imei: String,

    /// What the store paid, in cents.
    pub purchase_price: i64,

    /// Listed selling price, in cents.
    pub sale_price: i64,
}

/// Request to change a phone's status.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePhoneStatusRequest {
    /// New status: "in_stock", "sold", "transferred", or "unavailable".
    pub status: String,
}

/// Request to register an accessory line.
///
/// ## Example JSON
///
/// ```json
/// {
///     "accessoryName": "USB-C Charger 25W",
///     "quantity": 40,
///     "unitPrice": 1500
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterAccessoryRequest {
    /// Display name.
    pub accessory_name: String,

    /// Initial stock quantity.
    pub quantity: i32,

    /// Price per unit, in cents.
    pub unit_price: i64,
}

/// Request to restock or adjust an accessory line.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAccessoryStockRequest {
    /// New absolute stock quantity.
    pub quantity: i32,
}

/// Request to record a sale.
///
/// ## Example JSON
///
/// ```json
/// {
///     "itemType": "accessory",
///     "itemId": 7,
///     "quantity": 3,
///     "salePrice": 4500,
///     "paymentMethod": "cash",
///     "customerName": "Walk-in"
/// }
/// ```
///
/// ## Notes
///
/// - `salePrice` is the total charged, in cents. When omitted it is
///   derived from the item's listed price.
/// - `quantity` defaults to 1 and must be 1 for phones.
/// - `saleDate` defaults to today.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordSaleRequest {
    /// "phone" or "accessory".
    pub item_type: String,

    /// The phone_id or accessory_id being sold.
    pub item_id: i32,

    /// Units sold. Defaults to 1.
    pub quantity: Option<i32>,

    /// Total charged, in cents. Defaults to the listed price.
    pub sale_price: Option<i64>,

    /// "cash", "card", "transfer", ...
    pub payment_method: String,

    /// Optional customer name for the receipt.
    pub customer_name: Option<String>,

    /// Business date. Defaults to today.
    pub sale_date: Option<NaiveDate>,
}

/// Request to record a stock transfer to another branch.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordTransferRequest {
    /// "phone" or "accessory".
    pub item_type: String,

    /// The phone_id or accessory_id being moved.
    pub item_id: i32,

    /// Units moved. Defaults to 1.
    pub quantity: Option<i32>,

    /// Receiving branch or party.
    pub destination: String,

    /// Business date. Defaults to today.
    pub transfer_date: Option<NaiveDate>,
}

/// Pagination query string, shared by the list endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListQuery {
    /// Page size. Defaults to 50, capped at 200.
    pub limit: Option<i64>,

    /// Rows to skip.
    pub offset: Option<i64>,
}

impl ListQuery {
    /// Resolve the query into concrete (limit, offset) values.
    pub fn resolve(&self) -> (i64, i64) {
        let limit = self.limit.unwrap_or(50).clamp(1, 200);
        let offset = self.offset.unwrap_or(0).max(0);
        (limit, offset)
    }
}

/// Query string for the weekly report endpoint.
///
/// `userId` is honored for admins only; employees always get their
/// own report. `weekStart` defaults to the Monday of the current week.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyReportQuery {
    /// Employee to report on (admin only).
    pub user_id: Option<i32>,

    /// First day of the week to report, ISO date.
    pub week_start: Option<NaiveDate>,
}

/// Query string for the monthly report endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyReportQuery {
    /// Employee to report on (admin only).
    pub user_id: Option<i32>,

    /// Month to report, in `YYYY-MM` form. Defaults to the current month.
    pub month: Option<String>,
}

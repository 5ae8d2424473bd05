//! # Database Queries
//!
//! This module contains all the SQL queries for interacting with the database.
//! Each function performs a specific database operation.
//!
//! ## Query Organization
//!
//! Queries are grouped by the table they operate on:
//! - `user_*` / `session_*` - Accounts and login sessions
//! - `phone_*` / `accessory_*` - Inventory operations
//! - `sale_*` / `transfer_*` - Sales and stock transfers
//! - `activity_*` - Audit trail
//! - `report_*` - Read-only aggregation queries for the report service
//!
//! ## Error Handling
//!
//! All queries return `Result<T, DatabaseError>`. Common errors:
//! - `NotFound` - Record doesn't exist
//! - `QueryError` - SQL execution failed

use chrono::{DateTime, NaiveDate, Utc};
use deadpool_postgres::Pool;
use tokio_postgres::Row;
use tracing::{debug, info};
use uuid::Uuid;

use super::models::*;
use super::DatabaseError;

// ============================================
// HELPER FUNCTIONS
// ============================================

/// Helper to convert a database row to UserRecord
fn row_to_user(row: &Row) -> UserRecord {
    UserRecord {
        user_id: row.get("user_id"),
        username: row.get("username"),
        password_hash: row.get("password_hash"),
        full_name: row.get("full_name"),
        role: row.get("role"),
        created_at: row.get("created_at"),
    }
}

/// Helper to convert a database row to SessionRecord
fn row_to_session(row: &Row) -> SessionRecord {
    SessionRecord {
        session_id: row.get("session_id"),
        user_id: row.get("user_id"),
        role: row.get("role"),
        created_at: row.get("created_at"),
        expires_at: row.get("expires_at"),
    }
}

/// Helper to convert a database row to PhoneRecord
fn row_to_phone(row: &Row) -> PhoneRecord {
    PhoneRecord {
        phone_id: row.get("phone_id"),
        brand: row.get("brand"),
        model: row.get("model"),
        imei: row.get("imei"),
        purchase_price: row.get("purchase_price"),
        sale_price: row.get("sale_price"),
        status: row.get("status"),
        registered_by: row.get("registered_by"),
        created_at: row.get("created_at"),
    }
}

/// Helper to convert a database row to AccessoryRecord
fn row_to_accessory(row: &Row) -> AccessoryRecord {
    AccessoryRecord {
        accessory_id: row.get("accessory_id"),
        accessory_name: row.get("accessory_name"),
        quantity: row.get("quantity"),
        unit_price: row.get("unit_price"),
        status: row.get("status"),
        registered_by: row.get("registered_by"),
        created_at: row.get("created_at"),
    }
}

/// Helper to convert a database row to SaleRecord
fn row_to_sale(row: &Row) -> SaleRecord {
    SaleRecord {
        sale_id: row.get("sale_id"),
        item_type: row.get("item_type"),
        item_id: row.get("item_id"),
        sold_by: row.get("sold_by"),
        sale_date: row.get("sale_date"),
        sale_price: row.get("sale_price"),
        quantity: row.get("quantity"),
        payment_method: row.get("payment_method"),
        customer_name: row.get("customer_name"),
        created_at: row.get("created_at"),
    }
}

/// Helper to convert a database row to TransferRecord
fn row_to_transfer(row: &Row) -> TransferRecord {
    TransferRecord {
        transfer_id: row.get("transfer_id"),
        item_type: row.get("item_type"),
        item_id: row.get("item_id"),
        quantity: row.get("quantity"),
        destination: row.get("destination"),
        transferred_by: row.get("transferred_by"),
        transfer_date: row.get("transfer_date"),
        created_at: row.get("created_at"),
    }
}

/// Helper to convert a database row to ActivityLogEntry
fn row_to_activity(row: &Row) -> ActivityLogEntry {
    ActivityLogEntry {
        log_id: row.get("log_id"),
        user_id: row.get("user_id"),
        action: row.get("action"),
        details: row.get("details"),
        created_at: row.get("created_at"),
    }
}

// ============================================
// USER QUERIES
// ============================================

/// Get a user by username.
pub async fn get_user_by_username(
    pool: &Pool,
    username: &str,
) -> Result<Option<UserRecord>, DatabaseError> {
    debug!("Fetching user: {}", username);

    let client = pool.get().await
        .map_err(|e| DatabaseError::ConnectionError(e.to_string()))?;

    let rows = client.query(
        r#"
        SELECT user_id, username, password_hash, full_name, role, created_at
        FROM users
        WHERE username = $1
        "#,
        &[&username],
    ).await?;

    Ok(rows.first().map(row_to_user))
}

/// Get a user by id.
#[allow(dead_code)]
pub async fn get_user_by_id(
    pool: &Pool,
    user_id: i32,
) -> Result<Option<UserRecord>, DatabaseError> {
    let client = pool.get().await
        .map_err(|e| DatabaseError::ConnectionError(e.to_string()))?;

    let rows = client.query(
        r#"
        SELECT user_id, username, password_hash, full_name, role, created_at
        FROM users
        WHERE user_id = $1
        "#,
        &[&user_id],
    ).await?;

    Ok(rows.first().map(row_to_user))
}

/// Count all user accounts.
///
/// Used at startup to decide whether the default admin must be created.
pub async fn count_users(pool: &Pool) -> Result<i64, DatabaseError> {
    let client = pool.get().await
        .map_err(|e| DatabaseError::ConnectionError(e.to_string()))?;

    let row = client.query_one("SELECT COUNT(*)::bigint AS count FROM users", &[]).await?;
    Ok(row.get("count"))
}

/// Create a new user account. Returns the new user_id.
pub async fn create_user(
    pool: &Pool,
    username: &str,
    password_hash: &str,
    full_name: &str,
    role: &str,
) -> Result<i32, DatabaseError> {
    debug!("Creating user: {}", username);

    let client = pool.get().await
        .map_err(|e| DatabaseError::ConnectionError(e.to_string()))?;

    let row = client.query_one(
        r#"
        INSERT INTO users (username, password_hash, full_name, role)
        VALUES ($1, $2, $3, $4)
        RETURNING user_id
        "#,
        &[&username, &password_hash, &full_name, &role],
    ).await?;

    let user_id: i32 = row.get("user_id");
    info!("User created: {} (id {})", username, user_id);
    Ok(user_id)
}

// ============================================
// SESSION QUERIES
// ============================================

/// Create a login session.
pub async fn create_session(
    pool: &Pool,
    session: &SessionRecord,
) -> Result<(), DatabaseError> {
    let client = pool.get().await
        .map_err(|e| DatabaseError::ConnectionError(e.to_string()))?;

    client.execute(
        r#"
        INSERT INTO sessions (session_id, user_id, role, created_at, expires_at)
        VALUES ($1, $2, $3, $4, $5)
        "#,
        &[
            &session.session_id,
            &session.user_id,
            &session.role,
            &session.created_at,
            &session.expires_at,
        ],
    ).await?;

    Ok(())
}

/// Get a session by token, if it exists and has not expired.
pub async fn get_valid_session(
    pool: &Pool,
    session_id: Uuid,
    now: DateTime<Utc>,
) -> Result<Option<SessionRecord>, DatabaseError> {
    let client = pool.get().await
        .map_err(|e| DatabaseError::ConnectionError(e.to_string()))?;

    let rows = client.query(
        r#"
        SELECT session_id, user_id, role, created_at, expires_at
        FROM sessions
        WHERE session_id = $1 AND expires_at > $2
        "#,
        &[&session_id, &now],
    ).await?;

    Ok(rows.first().map(row_to_session))
}

/// Delete a session (logout).
pub async fn delete_session(
    pool: &Pool,
    session_id: Uuid,
) -> Result<bool, DatabaseError> {
    let client = pool.get().await
        .map_err(|e| DatabaseError::ConnectionError(e.to_string()))?;

    let affected = client.execute(
        "DELETE FROM sessions WHERE session_id = $1",
        &[&session_id],
    ).await?;

    Ok(affected > 0)
}

/// Remove all expired sessions.
pub async fn delete_expired_sessions(
    pool: &Pool,
    now: DateTime<Utc>,
) -> Result<u64, DatabaseError> {
    let client = pool.get().await
        .map_err(|e| DatabaseError::ConnectionError(e.to_string()))?;

    let affected = client.execute(
        "DELETE FROM sessions WHERE expires_at <= $1",
        &[&now],
    ).await?;

    Ok(affected)
}

// ============================================
// PHONE QUERIES
// ============================================

/// Register a new phone. Returns the new phone_id.
pub async fn create_phone(
    pool: &Pool,
    brand: &str,
    model: &str,
    imei: &str,
    purchase_price: i64,
    sale_price: i64,
    registered_by: i32,
) -> Result<i32, DatabaseError> {
    debug!("Registering phone: {} {} ({})", brand, model, imei);

    let client = pool.get().await
        .map_err(|e| DatabaseError::ConnectionError(e.to_string()))?;

    let row = client.query_one(
        r#"
        INSERT INTO phones (brand, model, imei, purchase_price, sale_price, status, registered_by)
        VALUES ($1, $2, $3, $4, $5, 'in_stock', $6)
        RETURNING phone_id
        "#,
        &[&brand, &model, &imei, &purchase_price, &sale_price, &registered_by],
    ).await?;

    Ok(row.get("phone_id"))
}

/// Get a phone by id.
pub async fn get_phone(
    pool: &Pool,
    phone_id: i32,
) -> Result<Option<PhoneRecord>, DatabaseError> {
    let client = pool.get().await
        .map_err(|e| DatabaseError::ConnectionError(e.to_string()))?;

    let rows = client.query(
        r#"
        SELECT phone_id, brand, model, imei, purchase_price, sale_price,
               status, registered_by, created_at
        FROM phones
        WHERE phone_id = $1
        "#,
        &[&phone_id],
    ).await?;

    Ok(rows.first().map(row_to_phone))
}

/// List phones, newest first.
pub async fn list_phones(
    pool: &Pool,
    limit: i64,
    offset: i64,
) -> Result<Vec<PhoneRecord>, DatabaseError> {
    let client = pool.get().await
        .map_err(|e| DatabaseError::ConnectionError(e.to_string()))?;

    let rows = client.query(
        r#"
        SELECT phone_id, brand, model, imei, purchase_price, sale_price,
               status, registered_by, created_at
        FROM phones
        ORDER BY created_at DESC
        LIMIT $1 OFFSET $2
        "#,
        &[&limit, &offset],
    ).await?;

    Ok(rows.iter().map(row_to_phone).collect())
}

/// Update a phone's status.
pub async fn update_phone_status(
    pool: &Pool,
    phone_id: i32,
    status: &str,
) -> Result<(), DatabaseError> {
    let client = pool.get().await
        .map_err(|e| DatabaseError::ConnectionError(e.to_string()))?;

    let affected = client.execute(
        "UPDATE phones SET status = $2 WHERE phone_id = $1",
        &[&phone_id, &status],
    ).await?;

    if affected == 0 {
        return Err(DatabaseError::NotFound(format!("Phone not found: {}", phone_id)));
    }

    Ok(())
}

/// Delete a phone from inventory.
pub async fn delete_phone(
    pool: &Pool,
    phone_id: i32,
) -> Result<bool, DatabaseError> {
    let client = pool.get().await
        .map_err(|e| DatabaseError::ConnectionError(e.to_string()))?;

    let affected = client.execute(
        "DELETE FROM phones WHERE phone_id = $1",
        &[&phone_id],
    ).await?;

    Ok(affected > 0)
}

// ============================================
// ACCESSORY QUERIES
// ============================================

/// Register a new accessory line. Returns the new accessory_id.
pub async fn create_accessory(
    pool: &Pool,
    accessory_name: &str,
    quantity: i32,
    unit_price: i64,
    registered_by: i32,
) -> Result<i32, DatabaseError> {
    debug!("Registering accessory: {} x{}", accessory_name, quantity);

    let client = pool.get().await
        .map_err(|e| DatabaseError::ConnectionError(e.to_string()))?;

    let status = if quantity > 0 { "in_stock" } else { "out_of_stock" };

    let row = client.query_one(
        r#"
        INSERT INTO accessories (accessory_name, quantity, unit_price, status, registered_by)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING accessory_id
        "#,
        &[&accessory_name, &quantity, &unit_price, &status, &registered_by],
    ).await?;

    Ok(row.get("accessory_id"))
}

/// Get an accessory by id.
pub async fn get_accessory(
    pool: &Pool,
    accessory_id: i32,
) -> Result<Option<AccessoryRecord>, DatabaseError> {
    let client = pool.get().await
        .map_err(|e| DatabaseError::ConnectionError(e.to_string()))?;

    let rows = client.query(
        r#"
        SELECT accessory_id, accessory_name, quantity, unit_price,
               status, registered_by, created_at
        FROM accessories
        WHERE accessory_id = $1
        "#,
        &[&accessory_id],
    ).await?;

    Ok(rows.first().map(row_to_accessory))
}

/// List accessories, newest first.
pub async fn list_accessories(
    pool: &Pool,
    limit: i64,
    offset: i64,
) -> Result<Vec<AccessoryRecord>, DatabaseError> {
    let client = pool.get().await
        .map_err(|e| DatabaseError::ConnectionError(e.to_string()))?;

    let rows = client.query(
        r#"
        SELECT accessory_id, accessory_name, quantity, unit_price,
               status, registered_by, created_at
        FROM accessories
        ORDER BY created_at DESC
        LIMIT $1 OFFSET $2
        "#,
        &[&limit, &offset],
    ).await?;

    Ok(rows.iter().map(row_to_accessory).collect())
}

/// Update an accessory's stock level and status together.
pub async fn update_accessory_stock(
    pool: &Pool,
    accessory_id: i32,
    quantity: i32,
    status: &str,
) -> Result<(), DatabaseError> {
    let client = pool.get().await
        .map_err(|e| DatabaseError::ConnectionError(e.to_string()))?;

    let affected = client.execute(
        "UPDATE accessories SET quantity = $2, status = $3 WHERE accessory_id = $1",
        &[&accessory_id, &quantity, &status],
    ).await?;

    if affected == 0 {
        return Err(DatabaseError::NotFound(format!(
            "Accessory not found: {}",
            accessory_id
        )));
    }

    Ok(())
}

/// Delete an accessory line.
pub async fn delete_accessory(
    pool: &Pool,
    accessory_id: i32,
) -> Result<bool, DatabaseError> {
    let client = pool.get().await
        .map_err(|e| DatabaseError::ConnectionError(e.to_string()))?;

    let affected = client.execute(
        "DELETE FROM accessories WHERE accessory_id = $1",
        &[&accessory_id],
    ).await?;

    Ok(affected > 0)
}

// ============================================
// SALE QUERIES
// ============================================

/// Record a new sale. Returns the new sale_id.
///
/// Sales rows are immutable: there is deliberately no update query
/// for this table.
pub async fn create_sale(
    pool: &Pool,
    item_type: &str,
    item_id: i32,
    sold_by: i32,
    sale_date: NaiveDate,
    sale_price: i64,
    quantity: i32,
    payment_method: &str,
    customer_name: Option<&str>,
) -> Result<i32, DatabaseError> {
    debug!("Recording sale: {} {} by user {}", item_type, item_id, sold_by);

    let client = pool.get().await
        .map_err(|e| DatabaseError::ConnectionError(e.to_string()))?;

    let row = client.query_one(
        r#"
        INSERT INTO sales (item_type, item_id, sold_by, sale_date, sale_price,
                           quantity, payment_method, customer_name)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        RETURNING sale_id
        "#,
        &[
            &item_type,
            &item_id,
            &sold_by,
            &sale_date,
            &sale_price,
            &quantity,
            &payment_method,
            &customer_name,
        ],
    ).await?;

    let sale_id: i32 = row.get("sale_id");
    info!("Sale recorded: {}", sale_id);
    Ok(sale_id)
}

/// Get sales recorded by a user, newest first.
pub async fn list_sales_by_user(
    pool: &Pool,
    sold_by: i32,
    limit: i64,
    offset: i64,
) -> Result<Vec<SaleRecord>, DatabaseError> {
    let client = pool.get().await
        .map_err(|e| DatabaseError::ConnectionError(e.to_string()))?;

    let rows = client.query(
        r#"
        SELECT sale_id, item_type, item_id, sold_by, sale_date, sale_price,
               quantity, payment_method, customer_name, created_at
        FROM sales
        WHERE sold_by = $1
        ORDER BY sale_date DESC, sale_id DESC
        LIMIT $2 OFFSET $3
        "#,
        &[&sold_by, &limit, &offset],
    ).await?;

    Ok(rows.iter().map(row_to_sale).collect())
}

// ============================================
// TRANSFER QUERIES
// ============================================

/// Record a stock transfer. Returns the new transfer_id.
pub async fn create_transfer(
    pool: &Pool,
    item_type: &str,
    item_id: i32,
    quantity: i32,
    destination: &str,
    transferred_by: i32,
    transfer_date: NaiveDate,
) -> Result<i32, DatabaseError> {
    let client = pool.get().await
        .map_err(|e| DatabaseError::ConnectionError(e.to_string()))?;

    let row = client.query_one(
        r#"
        INSERT INTO transfers (item_type, item_id, quantity, destination,
                               transferred_by, transfer_date)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING transfer_id
        "#,
        &[
            &item_type,
            &item_id,
            &quantity,
            &destination,
            &transferred_by,
            &transfer_date,
        ],
    ).await?;

    Ok(row.get("transfer_id"))
}

/// Get transfers made by a user, newest first.
pub async fn list_transfers_by_user(
    pool: &Pool,
    transferred_by: i32,
    limit: i64,
    offset: i64,
) -> Result<Vec<TransferRecord>, DatabaseError> {
    let client = pool.get().await
        .map_err(|e| DatabaseError::ConnectionError(e.to_string()))?;

    let rows = client.query(
        r#"
        SELECT transfer_id, item_type, item_id, quantity, destination,
               transferred_by, transfer_date, created_at
        FROM transfers
        WHERE transferred_by = $1
        ORDER BY transfer_date DESC, transfer_id DESC
        LIMIT $2 OFFSET $3
        "#,
        &[&transferred_by, &limit, &offset],
    ).await?;

    Ok(rows.iter().map(row_to_transfer).collect())
}

// ============================================
// ACTIVITY LOG QUERIES
// ============================================

/// Append an entry to the activity log.
pub async fn create_activity(
    pool: &Pool,
    user_id: Option<i32>,
    action: &str,
    details: Option<&str>,
) -> Result<(), DatabaseError> {
    let client = pool.get().await
        .map_err(|e| DatabaseError::ConnectionError(e.to_string()))?;

    client.execute(
        "INSERT INTO activity_log (user_id, action, details) VALUES ($1, $2, $3)",
        &[&user_id, &action, &details],
    ).await?;

    Ok(())
}

/// Get recent activity log entries, newest first.
pub async fn list_activity(
    pool: &Pool,
    limit: i64,
    offset: i64,
) -> Result<Vec<ActivityLogEntry>, DatabaseError> {
    let client = pool.get().await
        .map_err(|e| DatabaseError::ConnectionError(e.to_string()))?;

    let rows = client.query(
        r#"
        SELECT log_id, user_id, action, details, created_at
        FROM activity_log
        ORDER BY created_at DESC
        LIMIT $1 OFFSET $2
        "#,
        &[&limit, &offset],
    ).await?;

    Ok(rows.iter().map(row_to_activity).collect())
}

// ============================================
// REPORT QUERIES
// ============================================
//
// These are the read-only aggregation queries behind the weekly and
// monthly reports. They return plain row structs; all shaping
// (calendar zero-fill, ranking merges, derived KPIs) happens in the
// report service so it can be unit tested without a database.

/// One day of sales activity, as returned by [`report_sales_by_day`].
#[derive(Debug, Clone, PartialEq)]
pub struct DailySalesRow {
    /// Business date of the bucket.
    pub sale_date: NaiveDate,
    /// Number of sale rows on that day.
    pub sales_count: i64,
    /// Revenue in cents.
    pub revenue: i64,
    /// Phone sales on that day.
    pub phone_count: i64,
    /// Accessory sales on that day.
    pub accessory_count: i64,
    /// Accessory units moved on that day.
    pub accessory_units: i64,
}

/// One ranked item, as returned by the top-seller queries.
#[derive(Debug, Clone, PartialEq)]
pub struct TopItemRow {
    /// phone_id or accessory_id.
    pub item_id: i32,
    /// Display name ("Samsung Galaxy A54" / "USB-C Charger 25W").
    pub name: String,
    /// Number of sale rows within the period.
    pub sales_count: i64,
    /// Units moved within the period.
    pub units: i64,
    /// Revenue in cents.
    pub revenue: i64,
    /// Average price in cents. Raw sale price for phones,
    /// price-per-unit for accessories.
    pub avg_price: f64,
}

/// Totals per payment method, as returned by [`report_payment_totals`].
#[derive(Debug, Clone, PartialEq)]
pub struct PaymentTotalsRow {
    /// "cash", "card", ...
    pub payment_method: String,
    /// Number of sales using this method.
    pub transactions: i64,
    /// Total amount in cents.
    pub total_amount: i64,
}

/// Phone inventory movement within a window, bucketed by the phone's
/// current status (not the status it had inside the window).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PhoneDeltaRow {
    pub added: i64,
    pub sold: i64,
    pub in_stock: i64,
    pub transferred: i64,
    pub unavailable: i64,
}

/// Accessory inventory movement within a window.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AccessoryDeltaRow {
    /// Lines registered within the window.
    pub added: i64,
    /// Units currently on hand across those lines.
    pub units_in_stock: i64,
    pub in_stock: i64,
    pub out_of_stock: i64,
    pub unavailable: i64,
}

/// Transfer totals within a window.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransferTotalsRow {
    pub transfers: i64,
    pub units: i64,
    pub phone_transfers: i64,
    pub accessory_transfers: i64,
}

/// Per-day sales totals for one employee over an inclusive date range.
///
/// Days with no sales produce no row; the report service zero-fills
/// the calendar around this result.
pub async fn report_sales_by_day(
    pool: &Pool,
    user_id: i32,
    from: NaiveDate,
    to: NaiveDate,
) -> Result<Vec<DailySalesRow>, DatabaseError> {
    debug!("Report: sales by day for user {} [{} .. {}]", user_id, from, to);

    let client = pool.get().await
        .map_err(|e| DatabaseError::ConnectionError(e.to_string()))?;

    let rows = client.query(
        r#"
        SELECT
            sale_date,
            COUNT(*)::bigint AS sales_count,
            COALESCE(SUM(sale_price), 0)::bigint AS revenue,
            COUNT(*) FILTER (WHERE item_type = 'phone')::bigint AS phone_count,
            COUNT(*) FILTER (WHERE item_type = 'accessory')::bigint AS accessory_count,
            COALESCE(SUM(quantity) FILTER (WHERE item_type = 'accessory'), 0)::bigint AS accessory_units
        FROM sales
        WHERE sold_by = $1
          AND sale_date >= $2
          AND sale_date <= $3
        GROUP BY sale_date
        ORDER BY sale_date
        "#,
        &[&user_id, &from, &to],
    ).await?;

    Ok(rows.iter().map(|row| DailySalesRow {
        sale_date: row.get("sale_date"),
        sales_count: row.get("sales_count"),
        revenue: row.get("revenue"),
        phone_count: row.get("phone_count"),
        accessory_count: row.get("accessory_count"),
        accessory_units: row.get("accessory_units"),
    }).collect())
}

/// Best-selling phones for one employee within a range, ranked by
/// sales count descending and limited to `limit`.
pub async fn report_top_phones(
    pool: &Pool,
    user_id: i32,
    from: NaiveDate,
    to: NaiveDate,
    limit: i64,
) -> Result<Vec<TopItemRow>, DatabaseError> {
    let client = pool.get().await
        .map_err(|e| DatabaseError::ConnectionError(e.to_string()))?;

    let rows = client.query(
        r#"
        SELECT
            s.item_id,
            p.brand || ' ' || p.model AS name,
            COUNT(*)::bigint AS sales_count,
            COALESCE(SUM(s.quantity), 0)::bigint AS units,
            COALESCE(SUM(s.sale_price), 0)::bigint AS revenue,
            COALESCE(AVG(s.sale_price), 0)::float8 AS avg_price
        FROM sales s
        JOIN phones p ON p.phone_id = s.item_id
        WHERE s.sold_by = $1
          AND s.item_type = 'phone'
          AND s.sale_date >= $2
          AND s.sale_date <= $3
        GROUP BY s.item_id, p.brand, p.model
        ORDER BY sales_count DESC, s.item_id
        LIMIT $4
        "#,
        &[&user_id, &from, &to, &limit],
    ).await?;

    Ok(rows.iter().map(|row| TopItemRow {
        item_id: row.get("item_id"),
        name: row.get("name"),
        sales_count: row.get("sales_count"),
        units: row.get("units"),
        revenue: row.get("revenue"),
        avg_price: row.get("avg_price"),
    }).collect())
}

/// Best-selling accessories for one employee within a range.
///
/// The average price is per unit (`sale_price / quantity`), since an
/// accessory sale row covers several units at once.
pub async fn report_top_accessories(
    pool: &Pool,
    user_id: i32,
    from: NaiveDate,
    to: NaiveDate,
    limit: i64,
) -> Result<Vec<TopItemRow>, DatabaseError> {
    let client = pool.get().await
        .map_err(|e| DatabaseError::ConnectionError(e.to_string()))?;

    let rows = client.query(
        r#"
        SELECT
            s.item_id,
            a.accessory_name AS name,
            COUNT(*)::bigint AS sales_count,
            COALESCE(SUM(s.quantity), 0)::bigint AS units,
            COALESCE(SUM(s.sale_price), 0)::bigint AS revenue,
            COALESCE(AVG(s.sale_price::float8 / NULLIF(s.quantity, 0)), 0)::float8 AS avg_price
        FROM sales s
        JOIN accessories a ON a.accessory_id = s.item_id
        WHERE s.sold_by = $1
          AND s.item_type = 'accessory'
          AND s.sale_date >= $2
          AND s.sale_date <= $3
        GROUP BY s.item_id, a.accessory_name
        ORDER BY sales_count DESC, s.item_id
        LIMIT $4
        "#,
        &[&user_id, &from, &to, &limit],
    ).await?;

    Ok(rows.iter().map(|row| TopItemRow {
        item_id: row.get("item_id"),
        name: row.get("name"),
        sales_count: row.get("sales_count"),
        units: row.get("units"),
        revenue: row.get("revenue"),
        avg_price: row.get("avg_price"),
    }).collect())
}

/// Sales grouped by payment method, ordered by total amount descending.
pub async fn report_payment_totals(
    pool: &Pool,
    user_id: i32,
    from: NaiveDate,
    to: NaiveDate,
) -> Result<Vec<PaymentTotalsRow>, DatabaseError> {
    let client = pool.get().await
        .map_err(|e| DatabaseError::ConnectionError(e.to_string()))?;

    let rows = client.query(
        r#"
        SELECT
            payment_method,
            COUNT(*)::bigint AS transactions,
            COALESCE(SUM(sale_price), 0)::bigint AS total_amount
        FROM sales
        WHERE sold_by = $1
          AND sale_date >= $2
          AND sale_date <= $3
        GROUP BY payment_method
        ORDER BY total_amount DESC, payment_method
        "#,
        &[&user_id, &from, &to],
    ).await?;

    Ok(rows.iter().map(|row| PaymentTotalsRow {
        payment_method: row.get("payment_method"),
        transactions: row.get("transactions"),
        total_amount: row.get("total_amount"),
    }).collect())
}

/// Phones registered by the user within the window, bucketed by their
/// status at query time.
pub async fn report_phone_deltas(
    pool: &Pool,
    user_id: i32,
    from: NaiveDate,
    to: NaiveDate,
) -> Result<PhoneDeltaRow, DatabaseError> {
    let client = pool.get().await
        .map_err(|e| DatabaseError::ConnectionError(e.to_string()))?;

    let row = client.query_one(
        r#"
        SELECT
            COUNT(*)::bigint AS added,
            COUNT(*) FILTER (WHERE status = 'sold')::bigint AS sold,
            COUNT(*) FILTER (WHERE status = 'in_stock')::bigint AS in_stock,
            COUNT(*) FILTER (WHERE status = 'transferred')::bigint AS transferred,
            COUNT(*) FILTER (WHERE status = 'unavailable')::bigint AS unavailable
        FROM phones
        WHERE registered_by = $1
          AND created_at::date >= $2
          AND created_at::date <= $3
        "#,
        &[&user_id, &from, &to],
    ).await?;

    Ok(PhoneDeltaRow {
        added: row.get("added"),
        sold: row.get("sold"),
        in_stock: row.get("in_stock"),
        transferred: row.get("transferred"),
        unavailable: row.get("unavailable"),
    })
}

/// Accessory lines registered by the user within the window, bucketed
/// by their status at query time.
pub async fn report_accessory_deltas(
    pool: &Pool,
    user_id: i32,
    from: NaiveDate,
    to: NaiveDate,
) -> Result<AccessoryDeltaRow, DatabaseError> {
    let client = pool.get().await
        .map_err(|e| DatabaseError::ConnectionError(e.to_string()))?;

    let row = client.query_one(
        r#"
        SELECT
            COUNT(*)::bigint AS added,
            COALESCE(SUM(quantity), 0)::bigint AS units_in_stock,
            COUNT(*) FILTER (WHERE status = 'in_stock')::bigint AS in_stock,
            COUNT(*) FILTER (WHERE status = 'out_of_stock')::bigint AS out_of_stock,
            COUNT(*) FILTER (WHERE status = 'unavailable')::bigint AS unavailable
        FROM accessories
        WHERE registered_by = $1
          AND created_at::date >= $2
          AND created_at::date <= $3
        "#,
        &[&user_id, &from, &to],
    ).await?;

    Ok(AccessoryDeltaRow {
        added: row.get("added"),
        units_in_stock: row.get("units_in_stock"),
        in_stock: row.get("in_stock"),
        out_of_stock: row.get("out_of_stock"),
        unavailable: row.get("unavailable"),
    })
}

/// Transfer totals for the user within the window.
pub async fn report_transfer_totals(
    pool: &Pool,
    user_id: i32,
    from: NaiveDate,
    to: NaiveDate,
) -> Result<TransferTotalsRow, DatabaseError> {
    let client = pool.get().await
        .map_err(|e| DatabaseError::ConnectionError(e.to_string()))?;

    let row = client.query_one(
        r#"
        SELECT
            COUNT(*)::bigint AS transfers,
            COALESCE(SUM(quantity), 0)::bigint AS units,
            COUNT(*) FILTER (WHERE item_type = 'phone')::bigint AS phone_transfers,
            COUNT(*) FILTER (WHERE item_type = 'accessory')::bigint AS accessory_transfers
        FROM transfers
        WHERE transferred_by = $1
          AND transfer_date >= $2
          AND transfer_date <= $3
        "#,
        &[&user_id, &from, &to],
    ).await?;

    Ok(TransferTotalsRow {
        transfers: row.get("transfers"),
        units: row.get("units"),
        phone_transfers: row.get("phone_transfers"),
        accessory_transfers: row.get("accessory_transfers"),
    })
}

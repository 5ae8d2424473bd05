//! # Database Models
//!
//! This module defines the data structures that map to database tables.
//! Each struct represents a row in a table.
//!
//! ## Table Overview
//!
//! | Table | Description |
//! |-------|-------------|
//! | `users` | Employee and admin accounts |
//! | `sessions` | Active login sessions (bearer tokens) |
//! | `phones` | Phone inventory, one row per handset |
//! | `accessories` | Accessory inventory with stock quantity |
//! | `sales` | Immutable record of every sale |
//! | `transfers` | Stock moved to another branch |
//! | `activity_log` | Audit trail of user actions |
//!
//! ## Relationship Diagram
//!
//! ```text
//! ┌─────────────┐       ┌──────────────────┐
//! │    users    │──────<│      sales       │
//! │             │       │                  │
//! │ user_id(PK) │       │ sold_by (FK)     │
//! │ role        │       │ item_type/id     │
//! └─────────────┘       └──────────────────┘
//!        │
//!        ├──────────────<┌──────────────────┐
//!        │               │  phones /        │
//!        │               │  accessories     │
//!        │               │ registered_by(FK)│
//!        │               └──────────────────┘
//!        ▼
//! ┌──────────────────┐
//! │  activity_log    │
//! │ user_id (FK)     │
//! └──────────────────┘
//! ```
//!
//! ## Note on Money
//!
//! All monetary columns are `i64` cents (PostgreSQL `BIGINT`), so
//! 1,000 = 10.00 in display currency. This avoids floating point in
//! storage; display formatting happens at the API edge.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Whether a sale or transfer concerns a phone or an accessory.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ItemType {
    /// A single handset, tracked per unit
    Phone,
    /// An accessory line item, tracked by quantity
    Accessory,
}

impl ItemType {
    /// The string stored in the `item_type` columns.
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemType::Phone => "phone",
            ItemType::Accessory => "accessory",
        }
    }

    /// Parse the stored string back into the enum.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "phone" => Some(ItemType::Phone),
            "accessory" => Some(ItemType::Accessory),
            _ => None,
        }
    }
}

/// Lifecycle status of a phone in inventory.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PhoneStatus {
    /// Available for sale
    InStock,
    /// Sold to a customer
    Sold,
    /// Moved to another branch
    Transferred,
    /// Damaged, lost, or otherwise not sellable
    Unavailable,
}

impl PhoneStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PhoneStatus::InStock => "in_stock",
            PhoneStatus::Sold => "sold",
            PhoneStatus::Transferred => "transferred",
            PhoneStatus::Unavailable => "unavailable",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "in_stock" => Some(PhoneStatus::InStock),
            "sold" => Some(PhoneStatus::Sold),
            "transferred" => Some(PhoneStatus::Transferred),
            "unavailable" => Some(PhoneStatus::Unavailable),
            _ => None,
        }
    }
}

/// Stock status of an accessory line.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AccessoryStatus {
    /// Quantity above zero
    InStock,
    /// Quantity has reached zero
    OutOfStock,
    /// Discontinued or not sellable
    Unavailable,
}

impl AccessoryStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AccessoryStatus::InStock => "in_stock",
            AccessoryStatus::OutOfStock => "out_of_stock",
            AccessoryStatus::Unavailable => "unavailable",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "in_stock" => Some(AccessoryStatus::InStock),
            "out_of_stock" => Some(AccessoryStatus::OutOfStock),
            "unavailable" => Some(AccessoryStatus::Unavailable),
            _ => None,
        }
    }
}

/// User role, controls access to admin-only endpoints.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    /// Full access, including other employees' reports and the activity log
    Admin,
    /// Regular staff, limited to their own records
    Employee,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Admin => "admin",
            UserRole::Employee => "employee",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "admin" => Some(UserRole::Admin),
            "employee" => Some(UserRole::Employee),
            _ => None,
        }
    }
}

/// Represents a user record in the database.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    /// Primary key.
    pub user_id: i32,

    /// Login name, unique.
    pub username: String,

    /// Salted SHA-256 hex digest of the password.
    /// Never serialized out of the backend.
    #[serde(skip_serializing)]
    pub password_hash: String,

    /// Display name.
    pub full_name: String,

    /// "admin" or "employee".
    pub role: String,

    /// When the account was created.
    pub created_at: DateTime<Utc>,
}

/// An active login session.
///
/// The `session_id` UUID doubles as the bearer token handed to the
/// client at login. Sessions past `expires_at` are treated as absent.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionRecord {
    /// Session token (UUID v4).
    pub session_id: Uuid,

    /// The logged-in user.
    pub user_id: i32,

    /// Role captured at login time.
    pub role: String,

    /// When the session was created.
    pub created_at: DateTime<Utc>,

    /// When the session stops being valid.
    pub expires_at: DateTime<Utc>,
}

/// Represents a phone in inventory.
///
/// Each row is one physical handset, identified by IMEI. Selling or
/// transferring a phone flips its `status` rather than deleting the row,
/// so monthly reports can count what happened to registered stock.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhoneRecord {
    /// Primary key.
    pub phone_id: i32,

    /// Manufacturer, e.g. "Samsung".
    pub brand: String,

    /// Model name, e.g. "Galaxy A54".
    pub model: String,

    /// Unique hardware identifier.
    pub imei: String,

    /// What the store paid, in cents.
    pub purchase_price: i64,

    /// Listed selling price, in cents.
    pub sale_price: i64,

    /// "in_stock", "sold", "transferred", or "unavailable".
    pub status: String,

    /// The employee who registered this phone.
    pub registered_by: i32,

    /// When the phone entered inventory.
    pub created_at: DateTime<Utc>,
}

/// Represents an accessory line in inventory.
///
/// Unlike phones, accessories are tracked by quantity: one row covers
/// the whole stock of, say, a charger model.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessoryRecord {
    /// Primary key.
    pub accessory_id: i32,

    /// Display name, e.g. "USB-C Charger 25W".
    pub accessory_name: String,

    /// Units currently in stock.
    pub quantity: i32,

    /// Price per unit, in cents.
    pub unit_price: i64,

    /// "in_stock", "out_of_stock", or "unavailable".
    pub status: String,

    /// The employee who registered this line.
    pub registered_by: i32,

    /// When the line was created.
    pub created_at: DateTime<Utc>,
}

/// Represents a sale record.
///
/// Sales are immutable once recorded: corrections are handled by the
/// surrounding application, never by editing rows. For phones
/// `quantity` is always 1 and `sale_price` is the handset price; for
/// accessories `sale_price` is the total for `quantity` units.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleRecord {
    /// Primary key.
    pub sale_id: i32,

    /// "phone" or "accessory".
    pub item_type: String,

    /// The phone_id or accessory_id sold.
    pub item_id: i32,

    /// The employee who made the sale.
    pub sold_by: i32,

    /// Business date of the sale.
    pub sale_date: NaiveDate,

    /// Total amount charged, in cents.
    pub sale_price: i64,

    /// Units sold (1 for phones).
    pub quantity: i32,

    /// "cash", "card", "transfer", ...
    pub payment_method: String,

    /// Optional customer name for the receipt.
    pub customer_name: Option<String>,

    /// When the sale was recorded.
    pub created_at: DateTime<Utc>,
}

/// Stock moved to another branch.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferRecord {
    /// Primary key.
    pub transfer_id: i32,

    /// "phone" or "accessory".
    pub item_type: String,

    /// The phone_id or accessory_id moved.
    pub item_id: i32,

    /// Units moved (1 for phones).
    pub quantity: i32,

    /// Receiving branch or party.
    pub destination: String,

    /// The employee who made the transfer.
    pub transferred_by: i32,

    /// Business date of the transfer.
    pub transfer_date: NaiveDate,

    /// When the transfer was recorded.
    pub created_at: DateTime<Utc>,
}

/// One line in the audit trail.
///
/// Every login, registration, sale, and transfer writes an entry here.
/// Entries survive user deletion (`user_id` goes NULL).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityLogEntry {
    /// Primary key.
    pub log_id: i32,

    /// Acting user, if still present.
    pub user_id: Option<i32>,

    /// Short action tag, e.g. "login", "record_sale".
    pub action: String,

    /// Free-form detail text.
    pub details: Option<String>,

    /// When the action happened.
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_round_trip() {
        assert_eq!(PhoneStatus::parse("sold"), Some(PhoneStatus::Sold));
        assert_eq!(PhoneStatus::Sold.as_str(), "sold");
        assert_eq!(AccessoryStatus::parse("out_of_stock"), Some(AccessoryStatus::OutOfStock));
        assert_eq!(PhoneStatus::parse("bogus"), None);
    }

    #[test]
    fn test_item_type_parse() {
        assert_eq!(ItemType::parse("phone"), Some(ItemType::Phone));
        assert_eq!(ItemType::parse("accessory"), Some(ItemType::Accessory));
        assert_eq!(ItemType::parse(""), None);
    }
}

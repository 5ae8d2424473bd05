//! # Sales Recorder Service
//!
//! The SalesRecorder turns a sale request into an immutable sale row
//! plus the matching inventory side effect.
//!
//! ## Flow Example: Accessory Sale
//!
//! ```text
//! 1. Employee posts a sale via API
//!                ↓
//! 2. SalesRecorder.record_sale() called
//!                ↓
//! 3. Accessory looked up, stock checked
//!                ↓
//! 4. Quantity deducted (out_of_stock at zero)
//!                ↓
//! 5. Immutable sale row written
//!                ↓
//! 6. Sale returned to the handler
//! ```

use chrono::Utc;
use tracing::info;

use crate::db::{queries, AccessoryStatus, Database, ItemType, PhoneStatus, SaleRecord};
use crate::models::RecordSaleRequest;

/// Errors that can occur when recording a sale.
#[derive(Debug, thiserror::Error)]
pub enum SaleError {
    /// The referenced phone or accessory does not exist.
    #[error("Item not found: {0}")]
    ItemNotFound(String),

    /// The item exists but cannot be sold right now.
    #[error("Item not sellable: {0}")]
    NotSellable(String),

    /// Not enough accessory stock for the requested quantity.
    #[error("Insufficient stock: available {available}, requested {requested}")]
    OutOfStock { available: i32, requested: i32 },

    /// Invalid input provided.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Database operation failed.
    #[error("Database error: {0}")]
    DatabaseError(String),
}

impl From<crate::db::DatabaseError> for SaleError {
    fn from(e: crate::db::DatabaseError) -> Self {
        match e {
            crate::db::DatabaseError::NotFound(msg) => SaleError::ItemNotFound(msg),
            other => SaleError::DatabaseError(other.to_string()),
        }
    }
}

/// Sale recording service.
#[derive(Clone)]
pub struct SalesRecorder {
    /// Database connection for sales and inventory state.
    db: Database,
}

impl SalesRecorder {
    /// Create a new SalesRecorder instance.
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Record a sale for the given employee.
    ///
    /// Phones sell one at a time and flip to `sold`; accessories sell
    /// by quantity and have their stock deducted. When the request
    /// omits `sale_price` the listed price is charged (times quantity
    /// for accessories). The written sale row is immutable.
    pub async fn record_sale(
        &self,
        request: RecordSaleRequest,
        sold_by: i32,
    ) -> Result<SaleRecord, SaleError> {
        let item_type = ItemType::parse(&request.item_type)
            .ok_or_else(|| SaleError::InvalidInput(format!(
                "Unknown item type: {}",
                request.item_type
            )))?;

        let quantity = request.quantity.unwrap_or(1);
        if quantity < 1 {
            return Err(SaleError::InvalidInput("Quantity must be at least 1".to_string()));
        }
        if request.payment_method.trim().is_empty() {
            return Err(SaleError::InvalidInput("Payment method is required".to_string()));
        }
        if let Some(price) = request.sale_price {
            if price < 0 {
                return Err(SaleError::InvalidInput("Price cannot be negative".to_string()));
            }
        }

        let sale_price = match item_type {
            ItemType::Phone => {
                if quantity != 1 {
                    return Err(SaleError::InvalidInput(
                        "Phones sell one at a time".to_string(),
                    ));
                }

                let phone = queries::get_phone(self.db.pool(), request.item_id)
                    .await?
                    .ok_or_else(|| SaleError::ItemNotFound(format!("Phone {}", request.item_id)))?;

                if phone.status != PhoneStatus::InStock.as_str() {
                    return Err(SaleError::NotSellable(format!(
                        "Phone {} is {}",
                        phone.phone_id, phone.status
                    )));
                }

                queries::update_phone_status(
                    self.db.pool(),
                    phone.phone_id,
                    PhoneStatus::Sold.as_str(),
                ).await?;

                request.sale_price.unwrap_or(phone.sale_price)
            }
            ItemType::Accessory => {
                let accessory = queries::get_accessory(self.db.pool(), request.item_id)
                    .await?
                    .ok_or_else(|| {
                        SaleError::ItemNotFound(format!("Accessory {}", request.item_id))
                    })?;

                if accessory.status == AccessoryStatus::Unavailable.as_str() {
                    return Err(SaleError::NotSellable(format!(
                        "Accessory {} is unavailable",
                        accessory.accessory_id
                    )));
                }
                if accessory.quantity < quantity {
                    return Err(SaleError::OutOfStock {
                        available: accessory.quantity,
                        requested: quantity,
                    });
                }

                let remaining = accessory.quantity - quantity;
                let status = if remaining > 0 {
                    AccessoryStatus::InStock
                } else {
                    AccessoryStatus::OutOfStock
                };
                queries::update_accessory_stock(
                    self.db.pool(),
                    accessory.accessory_id,
                    remaining,
                    status.as_str(),
                ).await?;

                request
                    .sale_price
                    .unwrap_or(accessory.unit_price * quantity as i64)
            }
        };

        let sale_date = request.sale_date.unwrap_or_else(|| Utc::now().date_naive());

        let sale_id = queries::create_sale(
            self.db.pool(),
            item_type.as_str(),
            request.item_id,
            sold_by,
            sale_date,
            sale_price,
            quantity,
            request.payment_method.trim(),
            request.customer_name.as_deref(),
        ).await?;

        info!(
            "Sale {} recorded: {} {} x{} for {} cents by user {}",
            sale_id, item_type.as_str(), request.item_id, quantity, sale_price, sold_by
        );

        Ok(SaleRecord {
            sale_id,
            item_type: item_type.as_str().to_string(),
            item_id: request.item_id,
            sold_by,
            sale_date,
            sale_price,
            quantity,
            payment_method: request.payment_method.trim().to_string(),
            customer_name: request.customer_name,
            created_at: Utc::now(),
        })
    }

    /// List sales recorded by a user, newest first.
    pub async fn list_sales(
        &self,
        sold_by: i32,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<SaleRecord>, SaleError> {
        Ok(queries::list_sales_by_user(self.db.pool(), sold_by, limit, offset).await?)
    }
}

//! # Inventory Manager Service
//!
//! The InventoryManager owns the stock side of the store: registering
//! phones and accessories, status changes, restocks, deletions, and
//! transfers to other branches.
//!
//! Phones are tracked per handset (one row each, identified by IMEI);
//! accessories are tracked by quantity on a single line. Transfers flip
//! a phone's status to `transferred`, or decrement an accessory's
//! quantity, and always write a transfer row for the monthly report.

use chrono::Utc;
use tracing::info;

use crate::db::{queries, AccessoryRecord, AccessoryStatus, Database, ItemType, PhoneRecord,
                PhoneStatus, TransferRecord};
use crate::models::{RecordTransferRequest, RegisterAccessoryRequest, RegisterPhoneRequest};

/// Errors that can occur in inventory operations.
#[derive(Debug, thiserror::Error)]
pub enum InventoryError {
    /// The referenced phone or accessory does not exist.
    #[error("Item not found: {0}")]
    ItemNotFound(String),

    /// The item exists but is not in a state that allows the operation.
    #[error("Item not available: {0}")]
    NotAvailable(String),

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

impl From<crate::db::DatabaseError> for InventoryError {
    fn from(e: crate::db::DatabaseError) -> Self {
        match e {
            crate::db::DatabaseError::NotFound(msg) => InventoryError::ItemNotFound(msg),
            other => InventoryError::DatabaseError(other.to_string()),
        }
    }
}

/// Stock management service.
#[derive(Clone)]
pub struct InventoryManager {
    /// Database connection for inventory state.
    db: Database,
}

impl InventoryManager {
    /// Create a new InventoryManager instance.
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    // ==========================================
    // PHONES
    // ==========================================

    /// Register a phone into inventory.
    pub async fn register_phone(
        &self,
        request: RegisterPhoneRequest,
        registered_by: i32,
    ) -> Result<PhoneRecord, InventoryError> {
        if request.brand.trim().is_empty() || request.model.trim().is_empty() {
            return Err(InventoryError::InvalidInput(
                "Brand and model are required".to_string(),
            ));
        }
        if request.imei.trim().is_empty() {
            return Err(InventoryError::InvalidInput("IMEI is required".to_string()));
        }
        if request.purchase_price < 0 || request.sale_price < 0 {
            return Err(InventoryError::InvalidInput(
                "Prices cannot be negative".to_string(),
            ));
        }

        let phone_id = queries::create_phone(
            self.db.pool(),
            request.brand.trim(),
            request.model.trim(),
            request.imei.trim(),
            request.purchase_price,
            request.sale_price,
            registered_by,
        ).await?;

        info!("Phone registered: {} {} (id {})", request.brand, request.model, phone_id);

        Ok(PhoneRecord {
            phone_id,
            brand: request.brand.trim().to_string(),
            model: request.model.trim().to_string(),
            imei: request.imei.trim().to_string(),
            purchase_price: request.purchase_price,
            sale_price: request.sale_price,
            status: PhoneStatus::InStock.as_str().to_string(),
            registered_by,
            created_at: Utc::now(),
        })
    }

    /// Get a phone by id.
    pub async fn get_phone(&self, phone_id: i32) -> Result<PhoneRecord, InventoryError> {
        queries::get_phone(self.db.pool(), phone_id)
            .await?
            .ok_or_else(|| InventoryError::ItemNotFound(format!("Phone {}", phone_id)))
    }

    /// List phones, newest first.
    pub async fn list_phones(
        &self,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<PhoneRecord>, InventoryError> {
        Ok(queries::list_phones(self.db.pool(), limit, offset).await?)
    }

    /// Change a phone's status.
    pub async fn update_phone_status(
        &self,
        phone_id: i32,
        status: &str,
    ) -> Result<(), InventoryError> {
        let status = PhoneStatus::parse(status)
            .ok_or_else(|| InventoryError::InvalidInput(format!("Unknown status: {}", status)))?;

        queries::update_phone_status(self.db.pool(), phone_id, status.as_str()).await?;
        Ok(())
    }

    /// Remove a phone from inventory.
    pub async fn delete_phone(&self, phone_id: i32) -> Result<(), InventoryError> {
        let deleted = queries::delete_phone(self.db.pool(), phone_id).await?;
        if !deleted {
            return Err(InventoryError::ItemNotFound(format!("Phone {}", phone_id)));
        }
        Ok(())
    }

    // ==========================================
    // ACCESSORIES
    // ==========================================

    /// Register an accessory line.
    pub async fn register_accessory(
        &self,
        request: RegisterAccessoryRequest,
        registered_by: i32,
    ) -> Result<AccessoryRecord, InventoryError> {
        if request.accessory_name.trim().is_empty() {
            return Err(InventoryError::InvalidInput("Name is required".to_string()));
        }
        if request.quantity < 0 {
            return Err(InventoryError::InvalidInput(
                "Quantity cannot be negative".to_string(),
            ));
        }
        if request.unit_price < 0 {
            return Err(InventoryError::InvalidInput(
                "Price cannot be negative".to_string(),
            ));
        }

        let accessory_id = queries::create_accessory(
            self.db.pool(),
            request.accessory_name.trim(),
            request.quantity,
            request.unit_price,
            registered_by,
        ).await?;

        info!("Accessory registered: {} (id {})", request.accessory_name, accessory_id);

        let status = if request.quantity > 0 {
            AccessoryStatus::InStock
        } else {
            AccessoryStatus::OutOfStock
        };

        Ok(AccessoryRecord {
            accessory_id,
            accessory_name: request.accessory_name.trim().to_string(),
            quantity: request.quantity,
            unit_price: request.unit_price,
            status: status.as_str().to_string(),
            registered_by,
            created_at: Utc::now(),
        })
    }

    /// Get an accessory by id.
    pub async fn get_accessory(
        &self,
        accessory_id: i32,
    ) -> Result<AccessoryRecord, InventoryError> {
        queries::get_accessory(self.db.pool(), accessory_id)
            .await?
            .ok_or_else(|| InventoryError::ItemNotFound(format!("Accessory {}", accessory_id)))
    }

    /// List accessories, newest first.
    pub async fn list_accessories(
        &self,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<AccessoryRecord>, InventoryError> {
        Ok(queries::list_accessories(self.db.pool(), limit, offset).await?)
    }

    /// Set an accessory's absolute stock quantity.
    ///
    /// The status follows the quantity: positive stock puts the line
    /// back in stock, zero marks it out of stock. Lines marked
    /// `unavailable` stay unavailable regardless of quantity.
    pub async fn restock_accessory(
        &self,
        accessory_id: i32,
        quantity: i32,
    ) -> Result<AccessoryRecord, InventoryError> {
        if quantity < 0 {
            return Err(InventoryError::InvalidInput(
                "Quantity cannot be negative".to_string(),
            ));
        }

        let mut accessory = self.get_accessory(accessory_id).await?;

        let status = if AccessoryStatus::parse(&accessory.status) == Some(AccessoryStatus::Unavailable) {
            AccessoryStatus::Unavailable
        } else if quantity > 0 {
            AccessoryStatus::InStock
        } else {
            AccessoryStatus::OutOfStock
        };

        queries::update_accessory_stock(self.db.pool(), accessory_id, quantity, status.as_str())
            .await?;

        accessory.quantity = quantity;
        accessory.status = status.as_str().to_string();
        Ok(accessory)
    }

    /// Remove an accessory line.
    pub async fn delete_accessory(&self, accessory_id: i32) -> Result<(), InventoryError> {
        let deleted = queries::delete_accessory(self.db.pool(), accessory_id).await?;
        if !deleted {
            return Err(InventoryError::ItemNotFound(format!("Accessory {}", accessory_id)));
        }
        Ok(())
    }

    // ==========================================
    // TRANSFERS
    // ==========================================

    /// Transfer stock to another branch.
    ///
    /// Phones: the handset must be in stock; its status flips to
    /// `transferred`. Accessories: the requested quantity is deducted
    /// from stock. Both variants write a transfer row.
    pub async fn record_transfer(
        &self,
        request: RecordTransferRequest,
        transferred_by: i32,
    ) -> Result<TransferRecord, InventoryError> {
        let item_type = ItemType::parse(&request.item_type)
            .ok_or_else(|| InventoryError::InvalidInput(format!(
                "Unknown item type: {}",
                request.item_type
            )))?;

        if request.destination.trim().is_empty() {
            return Err(InventoryError::InvalidInput(
                "Destination is required".to_string(),
            ));
        }

        let quantity = request.quantity.unwrap_or(1);
        if quantity < 1 {
            return Err(InventoryError::InvalidInput(
                "Quantity must be at least 1".to_string(),
            ));
        }

        match item_type {
            ItemType::Phone => {
                if quantity != 1 {
                    return Err(InventoryError::InvalidInput(
                        "Phones transfer one at a time".to_string(),
                    ));
                }
                let phone = self.get_phone(request.item_id).await?;
                if phone.status != PhoneStatus::InStock.as_str() {
                    return Err(InventoryError::NotAvailable(format!(
                        "Phone {} is {}",
                        phone.phone_id, phone.status
                    )));
                }
                queries::update_phone_status(
                    self.db.pool(),
                    phone.phone_id,
                    PhoneStatus::Transferred.as_str(),
                ).await?;
            }
            ItemType::Accessory => {
                let accessory = self.get_accessory(request.item_id).await?;
                if accessory.status == AccessoryStatus::Unavailable.as_str() {
                    return Err(InventoryError::NotAvailable(format!(
                        "Accessory {} is unavailable",
                        accessory.accessory_id
                    )));
                }
                if accessory.quantity < quantity {
                    return Err(InventoryError::OutOfStock {
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
            }
        }

        let transfer_date = request.transfer_date.unwrap_or_else(|| Utc::now().date_naive());
        let transfer_id = queries::create_transfer(
            self.db.pool(),
            item_type.as_str(),
            request.item_id,
            quantity,
            request.destination.trim(),
            transferred_by,
            transfer_date,
        ).await?;

        info!(
            "Transfer recorded: {} {} x{} -> {} (id {})",
            item_type.as_str(), request.item_id, quantity, request.destination, transfer_id
        );

        Ok(TransferRecord {
            transfer_id,
            item_type: item_type.as_str().to_string(),
            item_id: request.item_id,
            quantity,
            destination: request.destination.trim().to_string(),
            transferred_by,
            transfer_date,
            created_at: Utc::now(),
        })
    }

    /// List transfers made by a user, newest first.
    pub async fn list_transfers(
        &self,
        transferred_by: i32,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<TransferRecord>, InventoryError> {
        Ok(queries::list_transfers_by_user(self.db.pool(), transferred_by, limit, offset).await?)
    }
}

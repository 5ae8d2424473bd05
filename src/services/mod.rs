//! # Services Module
//!
//! This module contains the core business logic services for the
//! phone store backend. Each service handles a specific domain.
//!
//! ## Services Overview
//!
//! | Service | Responsibility |
//! |---------|---------------|
//! | `ReportAggregator` | Weekly/monthly sales reports |
//! | `InventoryManager` | Phone & accessory stock, transfers |
//! | `SalesRecorder` | Recording sales, stock side effects |
//! | `AuthService` | Login sessions, default admin bootstrap |
//! | `ActivityLogger` | Audit trail |
//!
//! ## Service Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                        SERVICES LAYER                            │
//! │                                                                  │
//! │  ┌──────────────────────────────────────────────────────────┐   │
//! │  │                   ReportAggregator                        │   │
//! │  │  • weekly_report()  • monthly_report()                    │   │
//! │  └──────────────────────────────────────────────────────────┘   │
//! │                              │                                   │
//! │         ┌────────────────────┼────────────────────┐             │
//! │         ▼                    ▼                    ▼             │
//! │  ┌────────────┐      ┌────────────┐       ┌────────────┐       │
//! │  │ Inventory  │      │   Sales    │       │   Auth /   │       │
//! │  │  Manager   │      │  Recorder  │       │  Activity  │       │
//! │  │            │      │            │       │            │       │
//! │  │ Stock CRUD │      │ Sell items │       │ Sessions   │       │
//! │  │ Transfers  │      │ Adjust qty │       │ Audit log  │       │
//! │  └────────────┘      └────────────┘       └────────────┘       │
//! └─────────────────────────────────────────────────────────────────┘
//! ```

pub mod activity_logger;
pub mod auth_service;
pub mod inventory_manager;
pub mod report_aggregator;
pub mod sales_recorder;

pub use activity_logger::ActivityLogger;
pub use auth_service::AuthService;
pub use inventory_manager::InventoryManager;
pub use report_aggregator::ReportAggregator;
pub use sales_recorder::SalesRecorder;

//! Data models for the equipment ledger

pub mod equipment;
pub mod fields;
pub mod maintenance;
pub mod statistics;
pub mod workshop;

// Re-export commonly used types
pub use equipment::{Equipment, EquipmentStatus};
pub use maintenance::Maintenance;
pub use statistics::{MaintenanceTrend, StatusCount, WorkshopStatistics};
pub use workshop::Workshop;

//! Domain types tracked by the dashboard.

mod aggregates;
mod connection;
mod entity;
mod health;
mod sample;
mod system;

pub use aggregates::{Aggregates, half_interval_bytes};
pub use connection::{Connection, Protocol, TcpState};
pub use entity::Entity;
pub use health::{Severity, SeverityBands, clamp_percent};
pub use sample::Sample;
pub use system::{DiskUsage, SystemSnapshot};

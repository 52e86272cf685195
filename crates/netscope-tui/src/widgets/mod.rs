//! Reusable rendering helpers shared by the tab views.

pub mod bytes_fmt;
pub mod gauge;
pub mod graph;
pub mod table;

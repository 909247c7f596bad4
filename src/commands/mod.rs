//! CLI commands for ballast

pub mod check;
pub mod dispatch;
pub mod index;
pub mod init;
pub mod order;
pub mod processors;
pub mod set;
pub mod stats;
pub mod table;

//! Dashboard component modules
//!
//! Contains all individual rendering components

pub mod activity;
pub mod emails;
pub mod footer;
pub mod header;
pub mod info_panel;
pub mod logs;
pub mod stats;
pub mod tabs;

pub mod control;
pub mod core;
pub mod fetcher;
pub mod pollers;

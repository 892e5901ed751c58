//! Mixcloud Adapter Modules
//!
//! Mixcloud API統合のためのアダプターモジュール

pub mod client;
pub mod models;

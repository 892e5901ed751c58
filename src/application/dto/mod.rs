//! # Data Transfer Objects
//!
//! レイヤー間で受け渡す実行設定

pub mod upload_options;

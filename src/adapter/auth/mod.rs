//! Authentication Module
//!
//! Mixcloud OAuth認証機能

pub mod browser_oauth;

pub use browser_oauth::BrowserOAuthRepository;

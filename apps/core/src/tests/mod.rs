//! Test Module
//!
//! Cross-module tests for the Switchboard core.
//!
//! ## Test Categories
//! - `dispatch_tests`: generic path, fallbacks, special handlers, fallthrough
//! - `database_tests`: conversation and upload persistence
//! - `server_tests`: HTTP surface through the axum router
//! - `integration_tests`: full request flows over real HTTP doubles

mod support;

pub mod database_tests;

//! Integration tests

mod auth_flow_tests;
mod database_tests;
mod http_api_tests;

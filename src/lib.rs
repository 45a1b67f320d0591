pub mod config;
pub mod db;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod observability;
pub mod openapi;
pub mod pagination;
pub mod quiz;
pub mod routes;
pub mod state;
pub mod types;

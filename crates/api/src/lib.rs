pub mod config;
pub mod docs;
pub mod error;
pub mod handlers;
pub mod router;
pub mod routes;
pub mod state;
pub mod store;

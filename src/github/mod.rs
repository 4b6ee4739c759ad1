pub mod client;
pub mod fetch;
pub mod models;

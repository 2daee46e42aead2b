//! Handles for talking to service tasks.

mod macros;
mod sale_client;

pub use sale_client::SaleClient;

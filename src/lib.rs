//! Inventix sales terminal.
//!
//! A terminal front-end for a small inventory/sales backend. The interesting
//! part is the sale builder: a cart of line items kept by a single service
//! task, totalled from its own list, and sent to the backend as one sale.
//! Around it sit the catalog loader, client/product registration and report
//! downloads, all over one REST+JSON backend seam.

pub mod app_system;
pub mod backend;
pub mod catalog;
pub mod clients;
pub mod config;
pub mod domain;
pub mod error;
pub mod messages;
pub mod registry;
pub mod sale_builder;
pub mod shell;

#[cfg(test)]
mod mock_framework;
#[cfg(test)]
mod integration_tests;

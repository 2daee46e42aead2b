//! The Sale Builder: the pending sale, its single ordered list of line items,
//! and the service task that owns it.
//!
//! [`SaleBuilder`] holds the state and the rules; [`SaleService`] runs it
//! behind a mailbox so every change goes through one task; [`SaleView`] is
//! what the terminal renders after each change.

mod builder;
mod service;
mod view;

pub use builder::*;
pub use service::*;
pub use view::*;

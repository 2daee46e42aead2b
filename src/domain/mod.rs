//! Domain types shared by the catalog, the sale builder and the backend client.
//!
//! Field names are English in Rust; the wire names of the backend are kept
//! through `serde` renames.

pub mod customer;
pub mod invoice;
pub mod money;
pub mod product;
pub mod sale;

pub use customer::*;
pub use invoice::*;
pub use money::*;
pub use product::*;
pub use sale::*;

use serde::{Deserialize, Deserializer};

/// Accepts identifiers sent either as JSON strings or numbers.
pub(crate) fn deserialize_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Number(i64),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(text) => text.trim().to_string(),
        RawId::Number(n) => n.to_string(),
    })
}

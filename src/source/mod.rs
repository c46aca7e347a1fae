//! Source directory boundary: fetching raw pages and turning them into users.

pub mod random_user;
pub mod raw;

use crate::core::Result;
use async_trait::async_trait;
use serde_json::Value;

pub use random_user::{RandomUserSource, SourceConfig};
pub use raw::{RawRecord, capitalize_first, parse_record, transform_page};

/// A paged directory of raw user records.
///
/// Implementations must return the same records for the same
/// `(page, page_size)` pair; the annotation merge relies on stable ids.
#[async_trait]
pub trait SourceGateway: Send + Sync {
    /// Fetch one page. `page` starts at 1.
    ///
    /// Records are returned undecoded; [`transform_page`] checks each one
    /// against the [`RawRecord`] schema.
    async fn fetch_page(&self, page: u32, page_size: u32) -> Result<Vec<Value>>;
}

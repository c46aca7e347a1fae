pub mod error;
pub mod types;

pub use error::{DeckError, Result};
pub use types::{Filters, Location, User};

//! Client for the Etron inventory API, limited to product-template writes.
mod endpoint;
mod error;
mod http;
mod schema;

pub use error::Error;
pub use http::{Auth, HttpClient};
pub use schema::{ProductId, SlotValue};

pub type Result<T> = std::result::Result<T, Error>;

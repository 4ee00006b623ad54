//! Client for the Tixly point-of-sale API.
//! It covers client-credential authentication and order lookups.
mod endpoint;
mod error;
mod http;
mod schema;

pub use error::Error;
pub use http::{Credentials, HttpClient, DEFAULT_BASE_URL};
pub use schema::{Order, OrderData, OrderNumber, OrderStatus, Payment};

pub type Result<T> = std::result::Result<T, Error>;

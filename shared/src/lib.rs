//! Fetchgate Shared Library
//!
//! Request contract types and the error taxonomy shared by the gateway.

pub mod error;
pub mod request;

pub use error::{Error, Result, ValidationError};
pub use request::{FetchMethod, FetchRequest};

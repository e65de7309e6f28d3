//! Error handling for the gateway

mod error;

pub use error::{ErrorDetail, ErrorResponse, PlazaError, Result};

//! Error types for the Lenses API client.
//!
//! Every fallible operation in the crate returns [`LensesResult`]. HTTP
//! failures that are not authorization problems surface as a
//! [`ResourceError`] carrying the status, method, URI and server message.

mod categories;
mod error;

pub use categories::{ApiErrorResponse, ErrorCategory, ValidationDetail};
pub use error::{LensesError, LensesResult, ResourceError};

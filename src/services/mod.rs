//! Typed services for each Lenses resource.
//!
//! Every service is a trait plus an `*Impl` over the shared
//! [`RestClient`](crate::client::RestClient). Inputs are validated before
//! any request is sent.

pub mod acls;
pub mod alerts;
pub mod audits;
pub mod connectors;
pub mod groups;
pub mod logs;
pub mod policies;
pub mod quotas;
pub mod schemas;
pub mod topics;
pub mod users;

use crate::errors::{LensesError, LensesResult};
use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};

/// Characters escaped inside a single path segment
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Escape a value for use as one path segment
pub(crate) fn segment(value: &str) -> String {
    utf8_percent_encode(value, PATH_SEGMENT).to_string()
}

/// Fail with a validation error when `value` is blank
pub(crate) fn require(field: &str, value: &str) -> LensesResult<()> {
    if value.trim().is_empty() {
        return Err(LensesError::required(field));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_segment_escaping() {
        assert_eq!(segment("orders"), "orders");
        assert_eq!(segment("my topic"), "my%20topic");
        assert_eq!(segment("a/b?c"), "a%2Fb%3Fc");
        assert_eq!(segment("50%"), "50%25");
    }

    #[test]
    fn test_require() {
        assert!(require("name", "x").is_ok());
        assert!(matches!(
            require("name", "  "),
            Err(LensesError::Validation { .. })
        ));
    }
}

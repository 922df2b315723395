//! Address lookup
//!
//! `AddressLookup` is the only boundary between the form and the backend.
//! The form depends on the trait; `HttpAddressLookup` is the production client.

pub mod http;
pub mod response;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::LookupError;

pub use http::HttpAddressLookup;
pub use response::{LookupOutcome, LookupResponse};

/// Query parameters for one lookup, taken verbatim from the form fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddressQuery {
    pub post_code: String,
    pub house_number: String,
}

impl AddressQuery {
    pub fn new(post_code: impl Into<String>, house_number: impl Into<String>) -> Self {
        Self {
            post_code: post_code.into(),
            house_number: house_number.into(),
        }
    }

    /// Path and query for the lookup endpoint. Values are interpolated as-is.
    pub fn path(&self) -> String {
        format!(
            "/api/getAddresses?postcode={}&streetnumber={}",
            self.post_code, self.house_number
        )
    }
}

#[async_trait]
pub trait AddressLookup: Send + Sync {
    /// Perform one lookup and return the decoded response body.
    ///
    /// `Err` covers transport and decode failures only. A backend that answers
    /// `{status: "error"}` is an `Ok` response; interpreting it is the
    /// caller's job (see [`LookupResponse::into_outcome`]).
    async fn lookup(&self, query: &AddressQuery) -> Result<LookupResponse, LookupError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_path_is_literal() {
        let query = AddressQuery::new("1345", "350");
        assert_eq!(
            query.path(),
            "/api/getAddresses?postcode=1345&streetnumber=350"
        );

        // No client-side escaping or validation.
        let odd = AddressQuery::new("13 45", "3a");
        assert_eq!(
            odd.path(),
            "/api/getAddresses?postcode=13 45&streetnumber=3a"
        );
    }
}

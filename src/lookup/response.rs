//! Lookup response body and its interpretation.
//!
//! ```text
//! { status?: "error", errormessage?: string, details?: RawAddress[] }
//! ```
//!
//! - `status == "error"`          -> `Failed` (payload message or fallback)
//! - `details` is an array        -> `Found`, one `Address` per element
//! - anything else                -> `Unrecognized` (empty result, no error)

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashSet;

use crate::address::{transform_address, Address, RawAddress};
use crate::error::{FormError, LookupError};

const ERROR_STATUS: &str = "error";

/// Decoded lookup body. Fields stay loosely typed until interpreted so an
/// unexpected shape never aborts decoding of the parts we do understand.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LookupResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errormessage: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

/// What a response means for the form.
#[derive(Debug, Clone, PartialEq)]
pub enum LookupOutcome {
    /// The backend reported an error.
    Failed(FormError),
    /// Transformed candidates, in response order.
    Found(Vec<Address>),
    /// Neither an error nor a `details` array.
    Unrecognized,
}

impl LookupOutcome {
    pub fn candidates(&self) -> &[Address] {
        match self {
            Self::Found(addresses) => addresses,
            _ => &[],
        }
    }
}

impl LookupResponse {
    /// Successful response carrying `details`.
    pub fn with_details(details: Vec<RawAddress>) -> Self {
        Self {
            details: Some(serde_json::to_value(details).unwrap_or(Value::Array(Vec::new()))),
            ..Default::default()
        }
    }

    /// Backend-reported error.
    pub fn error(message: Option<&str>) -> Self {
        Self {
            status: Some(Value::String(ERROR_STATUS.to_string())),
            errormessage: message.map(|m| Value::String(m.to_string())),
            details: None,
        }
    }

    /// Decode an arbitrary JSON body.
    ///
    /// A non-object body other than `null` decodes to an empty response; `null`
    /// has no fields to read and is treated as a decode failure.
    pub fn from_value(value: Value) -> Result<Self, LookupError> {
        match value {
            Value::Object(_) => Ok(serde_json::from_value(value)?),
            Value::Null => Err(LookupError::Decode(<serde_json::Error as serde::de::Error>::custom(
                "response body is null",
            ))),
            _ => Ok(Self::default()),
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(&self.status, Some(Value::String(s)) if s == ERROR_STATUS)
    }

    /// Interpret the body, transforming every candidate with `house_number`.
    ///
    /// Elements are decoded leniently (see [`RawAddress::from_json`]). Ids
    /// are unique within one outcome: a repeated id gets its position appended.
    pub fn into_outcome(self, house_number: &str) -> LookupOutcome {
        if self.is_error() {
            let message = self.errormessage.as_ref().and_then(Value::as_str);
            return LookupOutcome::Failed(FormError::server(message));
        }

        match self.details {
            Some(Value::Array(items)) => {
                let mut seen = HashSet::new();
                let addresses = items
                    .into_iter()
                    .enumerate()
                    .map(|(index, item)| {
                        let mut address =
                            transform_address(&RawAddress::from_json(item), house_number);
                        if !seen.insert(address.id.clone()) {
                            tracing::warn!(id = %address.id, index, "duplicate address id in lookup response");
                            address.id = format!("{}-{}", address.id, index);
                            seen.insert(address.id.clone());
                        }
                        address
                    })
                    .collect();
                LookupOutcome::Found(addresses)
            }
            _ => LookupOutcome::Unrecognized,
        }
    }
}

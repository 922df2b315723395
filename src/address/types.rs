//! Address record types
//!
//! The backend's record shape is loose: any field may be missing or null, and
//! coordinates/ids arrive as numbers or strings depending on the source.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A JSON scalar that may be a number or a string (`"52.1"` vs `52.1`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Number(serde_json::Number),
    Text(String),
}

/// Coordinates use the same loose encoding.
pub type Coordinate = Scalar;

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{}", n),
            Self::Text(s) => write!(f, "{}", s),
        }
    }
}

/// Address as returned by `GET /api/getAddresses` (one element of `details`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawAddress {
    /// Backend identity, when the source provides one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Scalar>,
    #[serde(default)]
    pub street: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub postcode: Option<String>,
    #[serde(default)]
    pub lat: Option<Coordinate>,
    #[serde(default)]
    pub long: Option<Coordinate>,
    /// Fields the pipeline does not map.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl RawAddress {
    /// Lenient decode of one `details` element. Never fails: a non-object
    /// becomes an empty record, mapped fields of the wrong type are dropped and
    /// numbers are accepted where text is expected.
    pub fn from_json(value: serde_json::Value) -> Self {
        let serde_json::Value::Object(mut map) = value else {
            return Self::default();
        };
        Self {
            id: map.remove("id").and_then(scalar),
            street: map.remove("street").and_then(text),
            city: map.remove("city").and_then(text),
            postcode: map.remove("postcode").and_then(text),
            lat: map.remove("lat").and_then(scalar),
            long: map.remove("long").and_then(scalar),
            extra: map,
        }
    }
}

fn scalar(value: serde_json::Value) -> Option<Scalar> {
    match value {
        serde_json::Value::Number(n) => Some(Scalar::Number(n)),
        serde_json::Value::String(s) => Some(Scalar::Text(s)),
        _ => None,
    }
}

fn text(value: serde_json::Value) -> Option<String> {
    scalar(value).map(|s| s.to_string())
}

/// Normalized address: one candidate in the lookup result.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    pub id: String,
    pub street: String,
    pub house_number: String,
    pub postcode: String,
    pub city: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lat: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub long: Option<String>,
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.street, self.house_number)?;
        match (self.postcode.is_empty(), self.city.is_empty()) {
            (false, false) => write!(f, ", {}, {}", self.postcode, self.city),
            (false, true) => write!(f, ", {}", self.postcode),
            (true, false) => write!(f, ", {}", self.city),
            (true, true) => Ok(()),
        }
    }
}

/// An address with a person attached, as stored in the address book.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddressBookEntry {
    #[serde(flatten)]
    pub address: Address,
    pub first_name: String,
    pub last_name: String,
}

impl AddressBookEntry {
    pub fn new(address: Address, first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self {
            address,
            first_name: first_name.into(),
            last_name: last_name.into(),
        }
    }

    pub fn id(&self) -> &str {
        &self.address.id
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

impl fmt::Display for AddressBookEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.full_name(), self.address)
    }
}

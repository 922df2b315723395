//! Form state
//!
//! - `fields`: generic keyed string store with change/reset/bulk-update
//! - `controller`: the address form and its lookup, person and clear pipelines

pub mod controller;
pub mod fields;

pub use controller::{AddressForm, LookupTicket};
pub use fields::{FieldValues, FormFields};

pub const POST_CODE: &str = "postCode";
pub const HOUSE_NUMBER: &str = "houseNumber";
pub const FIRST_NAME: &str = "firstName";
pub const LAST_NAME: &str = "lastName";
pub const SELECTED_ADDRESS: &str = "selectedAddress";

/// Every field the address form declares, all defaulting to "".
pub const FIELD_NAMES: [&str; 5] = [POST_CODE, HOUSE_NUMBER, FIRST_NAME, LAST_NAME, SELECTED_ADDRESS];

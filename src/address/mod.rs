//! Address records
//!
//! - `RawAddress`: what the lookup backend returns
//! - `Address`: the normalized record the form works with
//! - `AddressBookEntry`: an `Address` with a person attached

pub mod transform;
pub mod types;

pub use transform::{address_id, transform_address};
pub use types::{Address, AddressBookEntry, Coordinate, RawAddress, Scalar};

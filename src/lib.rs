//! Address Book - postcode lookup form core
//!
//! This crate provides the state and data-flow pipeline behind an address-book
//! form: look up addresses by postcode and house number, pick one candidate,
//! attach a person's name and hand the result to an address book.
//!
//! ## Pipeline
//! Fields -> Lookup (HTTP) -> Transform -> Candidates -> Select -> Validate -> Address book
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use address_book::{AddressForm, Config, HttpAddressLookup, InMemoryAddressBook};
//!
//! # async fn run() -> anyhow::Result<()> {
//! let lookup = HttpAddressLookup::new(&Config::from_env()?)?;
//! let mut book = InMemoryAddressBook::new();
//! let mut form = AddressForm::new();
//!
//! form.on_change("postCode", "1345");
//! form.on_change("houseNumber", "350");
//! form.submit_lookup(&lookup).await;
//!
//! if let Some(first) = form.candidates().first().map(|a| a.id.clone()) {
//!     form.select(&first);
//!     form.on_change("firstName", "Jane");
//!     form.on_change("lastName", "Doe");
//!     form.submit_person(&mut book)?;
//! }
//! # Ok(())
//! # }
//! ```

// Core error handling
pub mod error;

// Configuration (env + .env)
pub mod config;

// Address records and the raw -> normalized transformation
pub mod address;

// Backend lookup client
pub mod lookup;

// Address book collection (injected collaborator)
pub mod book;

// Form state and the three pipelines
pub mod form;

// Plain-text rendering of the form primitives
pub mod view;

pub use address::{transform_address, Address, AddressBookEntry, RawAddress};
pub use book::{AddressCollection, InMemoryAddressBook};
pub use config::Config;
pub use error::{ConfigError, FormError, LookupError};
pub use form::{AddressForm, FormFields, LookupTicket};
pub use lookup::{AddressLookup, AddressQuery, HttpAddressLookup, LookupOutcome, LookupResponse};

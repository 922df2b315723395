//! Address form state and its pipelines.
//!
//! ```text
//! lookup:  Idle --begin_lookup--> Loading --complete_lookup--> Idle
//!                                    |-- Found        -> candidates replaced
//!                                    |-- Failed       -> error set
//!                                    |-- Unrecognized -> candidates empty
//! person:  validate names -> validate selection -> add to book -> clear person fields
//! clear:   reset fields, candidates, error
//! ```
//!
//! Every lookup gets a `LookupTicket`. Only the most recent ticket can settle
//! the form; completions for older tickets are dropped, so a slow response can
//! never overwrite a newer one.

use crate::address::{Address, AddressBookEntry};
use crate::book::AddressCollection;
use crate::error::{FormError, LookupError};
use crate::lookup::{AddressLookup, AddressQuery, LookupOutcome, LookupResponse};

use super::fields::{FieldValues, FormFields};
use super::{FIELD_NAMES, FIRST_NAME, HOUSE_NUMBER, LAST_NAME, POST_CODE, SELECTED_ADDRESS};

/// Proof that a lookup was started. Required to settle it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupTicket {
    generation: u64,
    query: AddressQuery,
}

impl LookupTicket {
    pub fn query(&self) -> &AddressQuery {
        &self.query
    }
}

#[derive(Debug, Clone)]
pub struct AddressForm {
    fields: FormFields,
    candidates: Vec<Address>,
    error: Option<FormError>,
    generation: u64,
    /// Generation of the lookup in flight, if any. Loading iff `Some`.
    in_flight: Option<u64>,
}

impl Default for AddressForm {
    fn default() -> Self {
        Self::new()
    }
}

impl AddressForm {
    pub fn new() -> Self {
        Self {
            fields: FormFields::new(FIELD_NAMES.iter().map(|name| (*name, ""))),
            candidates: Vec::new(),
            error: None,
            generation: 0,
            in_flight: None,
        }
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    pub fn fields(&self) -> &FormFields {
        &self.fields
    }

    pub fn value(&self, name: &str) -> &str {
        self.fields.get(name)
    }

    pub fn candidates(&self) -> &[Address] {
        &self.candidates
    }

    pub fn error(&self) -> Option<&FormError> {
        self.error.as_ref()
    }

    pub fn error_message(&self) -> Option<String> {
        self.error.as_ref().map(ToString::to_string)
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn selected_id(&self) -> Option<&str> {
        Some(self.fields.get(SELECTED_ADDRESS)).filter(|id| !id.is_empty())
    }

    /// The candidate the current selection points at.
    pub fn selected_address(&self) -> Option<&Address> {
        let id = self.selected_id()?;
        self.candidates.iter().find(|a| a.id == id)
    }

    // ------------------------------------------------------------------
    // Field changes
    // ------------------------------------------------------------------

    pub fn on_change(&mut self, name: &str, value: impl Into<String>) {
        self.fields.on_change(name, value);
    }

    /// Radio change: select a candidate by id.
    pub fn select(&mut self, id: &str) {
        self.fields.on_change(SELECTED_ADDRESS, id);
    }

    // ------------------------------------------------------------------
    // Lookup pipeline
    // ------------------------------------------------------------------

    /// Idle -> Loading. Clears error and candidates before anything is sent
    /// and captures the query from the current field values.
    pub fn begin_lookup(&mut self) -> LookupTicket {
        self.error = None;
        self.candidates.clear();
        self.generation += 1;
        self.in_flight = Some(self.generation);

        let query = AddressQuery::new(self.fields.get(POST_CODE), self.fields.get(HOUSE_NUMBER));
        tracing::debug!(
            generation = self.generation,
            postcode = %query.post_code,
            house_number = %query.house_number,
            "address lookup started"
        );

        LookupTicket {
            generation: self.generation,
            query,
        }
    }

    /// Loading -> Idle. Returns `false` (and leaves the form untouched) when
    /// the ticket has been superseded by a newer lookup or a clear.
    pub fn complete_lookup(
        &mut self,
        ticket: LookupTicket,
        result: Result<LookupResponse, LookupError>,
    ) -> bool {
        if self.in_flight != Some(ticket.generation) {
            tracing::debug!(
                generation = ticket.generation,
                current = ?self.in_flight,
                "discarding stale address lookup result"
            );
            return false;
        }
        self.in_flight = None;

        let outcome =
            result.map(|response| response.into_outcome(&ticket.query.house_number));

        match outcome {
            Ok(LookupOutcome::Found(addresses)) => {
                tracing::info!(count = addresses.len(), "address lookup succeeded");
                self.candidates = addresses;
            }
            Ok(LookupOutcome::Failed(error)) => {
                tracing::warn!(%error, "address lookup rejected by backend");
                self.error = Some(error);
            }
            Ok(LookupOutcome::Unrecognized) => {
                tracing::warn!("address lookup response had no details; showing no candidates");
            }
            Err(e) => {
                tracing::warn!(error = %e, "address lookup failed");
                self.error = Some(FormError::Fetch);
            }
        }
        true
    }

    /// Run a complete lookup against `lookup`.
    ///
    /// The loading flag is cleared on every exit, including when this future is
    /// dropped before the call settles.
    pub async fn submit_lookup<L>(&mut self, lookup: &L)
    where
        L: AddressLookup + ?Sized,
    {
        let ticket = self.begin_lookup();
        let mut guard = InFlight {
            generation: ticket.generation,
            form: self,
        };
        let result = lookup.lookup(ticket.query()).await;
        guard.form.complete_lookup(ticket, result);
    }

    // ------------------------------------------------------------------
    // Person-association pipeline
    // ------------------------------------------------------------------

    /// Validate, merge and hand the entry to `book`. First failing check wins.
    ///
    /// Names are validated trimmed but stored as typed.
    pub fn submit_person<C>(&mut self, book: &mut C) -> Result<AddressBookEntry, FormError>
    where
        C: AddressCollection + ?Sized,
    {
        let entry = match self.resolve_entry() {
            Ok(entry) => entry,
            Err(error) => {
                tracing::debug!(%error, "person submission rejected");
                self.error = Some(error.clone());
                return Err(error);
            }
        };

        book.add_address(entry.clone());

        self.fields.set_all(|values: &mut FieldValues| {
            for name in [FIRST_NAME, LAST_NAME, SELECTED_ADDRESS] {
                values.insert(name.to_string(), String::new());
            }
        });
        self.candidates.clear();
        self.error = None;

        Ok(entry)
    }

    fn resolve_entry(&self) -> Result<AddressBookEntry, FormError> {
        let first_name = self.fields.get(FIRST_NAME);
        let last_name = self.fields.get(LAST_NAME);
        if first_name.trim().is_empty() || last_name.trim().is_empty() {
            return Err(FormError::MissingNames);
        }

        let selected = self.fields.get(SELECTED_ADDRESS);
        if selected.is_empty() || self.candidates.is_empty() {
            return Err(FormError::NoSelection);
        }

        let address = self
            .candidates
            .iter()
            .find(|a| a.id == selected)
            .ok_or(FormError::SelectionNotFound)?;

        Ok(AddressBookEntry::new(address.clone(), first_name, last_name))
    }

    // ------------------------------------------------------------------
    // Clear pipeline
    // ------------------------------------------------------------------

    /// Reset every field, drop candidates and error. A lookup still in flight
    /// is abandoned.
    pub fn clear_fields(&mut self) {
        self.fields.reset();
        self.candidates.clear();
        self.error = None;
        if let Some(generation) = self.in_flight.take() {
            tracing::debug!(generation, "abandoning in-flight lookup on clear");
        }
    }
}

/// Clears the loading flag for its lookup when dropped.
struct InFlight<'a> {
    generation: u64,
    form: &'a mut AddressForm,
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if self.form.in_flight == Some(self.generation) {
            self.form.in_flight = None;
        }
    }
}

//! Plain-text rendering of the form.
//!
//! No colour here; the CLI decorates the output.

use std::fmt;

use crate::address::{Address, AddressBookEntry};
use crate::form::AddressForm;

const SPINNER: &str = "⟳";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ButtonVariant {
    #[default]
    Primary,
    Secondary,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Button {
    pub label: String,
    pub variant: ButtonVariant,
    pub loading: bool,
}

impl Button {
    pub fn primary(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            variant: ButtonVariant::Primary,
            loading: false,
        }
    }

    pub fn secondary(label: impl Into<String>) -> Self {
        Self {
            variant: ButtonVariant::Secondary,
            ..Self::primary(label)
        }
    }

    pub fn loading(mut self, loading: bool) -> Self {
        self.loading = loading;
        self
    }

    /// A loading button cannot be triggered.
    pub fn is_disabled(&self) -> bool {
        self.loading
    }
}

impl fmt::Display for Button {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = if self.loading {
            format!("{} {}", SPINNER, self.label)
        } else {
            self.label.clone()
        };
        match self.variant {
            ButtonVariant::Primary => write!(f, "[ {} ]", label),
            ButtonVariant::Secondary => write!(f, "( {} )", label),
        }
    }
}

/// Renders nothing for an empty message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorMessage<'a>(pub &'a str);

impl ErrorMessage<'_> {
    pub fn is_visible(&self) -> bool {
        !self.0.is_empty()
    }
}

impl fmt::Display for ErrorMessage<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_visible() {
            write!(f, "! {}", self.0)
        } else {
            Ok(())
        }
    }
}

/// One radio line per candidate, numbered from 1.
pub fn render_candidates(candidates: &[Address], selected: Option<&str>) -> String {
    candidates
        .iter()
        .enumerate()
        .map(|(i, address)| {
            let mark = if Some(address.id.as_str()) == selected {
                "(*)"
            } else {
                "( )"
            };
            format!("{} {}. {}", mark, i + 1, address)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn render_book(entries: &[AddressBookEntry]) -> String {
    if entries.is_empty() {
        return "Address book is empty".to_string();
    }
    entries
        .iter()
        .map(|entry| format!("{}  [{}]", entry, entry.id()))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Whole form: fields, find button, candidates, person section (only once an
/// address is selected), error, clear button.
pub fn render_form(form: &AddressForm) -> String {
    use crate::form::{FIRST_NAME, HOUSE_NUMBER, LAST_NAME, POST_CODE};

    let mut lines = vec![
        "Find an address".to_string(),
        format!("  Post code:    {}", form.value(POST_CODE)),
        format!("  House number: {}", form.value(HOUSE_NUMBER)),
        format!("  {}", Button::primary("Find").loading(form.is_loading())),
    ];

    if !form.candidates().is_empty() {
        lines.push(render_candidates(form.candidates(), form.selected_id()));
    }

    if form.selected_id().is_some() {
        lines.push("Add personal info to address".to_string());
        lines.push(format!("  First name: {}", form.value(FIRST_NAME)));
        lines.push(format!("  Last name:  {}", form.value(LAST_NAME)));
        lines.push(format!("  {}", Button::primary("Add to addressbook")));
    }

    let message = form.error_message().unwrap_or_default();
    let error = ErrorMessage(&message);
    if error.is_visible() {
        lines.push(error.to_string());
    }

    lines.push(Button::secondary("Clear all fields").to_string());
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn address(id: &str, street: &str) -> Address {
        Address {
            id: id.into(),
            street: street.into(),
            house_number: "350".into(),
            postcode: "1345".into(),
            city: "Amsterdam".into(),
            lat: None,
            long: None,
        }
    }

    #[test]
    fn test_button_variants() {
        assert_eq!(Button::primary("Find").to_string(), "[ Find ]");
        assert_eq!(
            Button::secondary("Clear all fields").to_string(),
            "( Clear all fields )"
        );
    }

    #[test]
    fn test_loading_button_shows_spinner_and_is_disabled() {
        let button = Button::primary("Find").loading(true);
        assert!(button.is_disabled());
        assert_eq!(button.to_string(), format!("[ {} Find ]", SPINNER));
    }

    #[test]
    fn test_error_message_hidden_when_empty() {
        assert_eq!(ErrorMessage("").to_string(), "");
        assert_eq!(
            ErrorMessage("Something went wrong").to_string(),
            "! Something went wrong"
        );
    }

    #[test]
    fn test_candidates_mark_selection() {
        let list = [address("a", "Dam"), address("b", "Damrak")];
        let out = render_candidates(&list, Some("b"));
        assert_eq!(
            out,
            "( ) 1. Dam 350, 1345, Amsterdam\n(*) 2. Damrak 350, 1345, Amsterdam"
        );
    }

    #[test]
    fn test_empty_book_placeholder() {
        assert_eq!(render_book(&[]), "Address book is empty");
    }

    #[test]
    fn test_form_hides_person_section_without_selection() {
        let form = AddressForm::new();
        let out = render_form(&form);
        assert!(out.contains("[ Find ]"));
        assert!(!out.contains("Add personal info"));
        assert!(out.ends_with("( Clear all fields )"));
    }
}

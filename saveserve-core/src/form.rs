//! Contact form state and validation for the "Get Involved" page.
//!
//! Validation is pure ([`validate`]); [`ContactFormState`] layers the
//! submission lifecycle on top of it: per-field errors that clear as soon as
//! the field is edited, a loading phase that blocks double submits, and a
//! reset to defaults once the relay accepts the message.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{CoreError, Result};

pub const NAME_MIN_CHARS: usize = 2;
pub const MESSAGE_MIN_CHARS: usize = 10;

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles"));

/// Who is getting in touch. The select control only offers these five.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Role {
    #[default]
    #[serde(rename = "Student Volunteer")]
    StudentVolunteer,
    #[serde(rename = "Mess/Kitchen Vendor")]
    KitchenVendor,
    #[serde(rename = "NGO / Shelter Representative")]
    NgoRepresentative,
    #[serde(rename = "University Administrator")]
    UniversityAdministrator,
    #[serde(rename = "Developer / Contributor")]
    Developer,
}

impl Role {
    pub const ALL: [Role; 5] = [
        Role::StudentVolunteer,
        Role::KitchenVendor,
        Role::NgoRepresentative,
        Role::UniversityAdministrator,
        Role::Developer,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::StudentVolunteer => "Student Volunteer",
            Role::KitchenVendor => "Mess/Kitchen Vendor",
            Role::NgoRepresentative => "NGO / Shelter Representative",
            Role::UniversityAdministrator => "University Administrator",
            Role::Developer => "Developer / Contributor",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self> {
        Role::ALL
            .into_iter()
            .find(|role| role.as_str() == s)
            .ok_or_else(|| CoreError::unknown_role(s))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    Name,
    Email,
    Role,
    Message,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Field::Name => "name",
            Field::Email => "email",
            Field::Role => "role",
            Field::Message => "message",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldError {
    Required,
    TooShort { min: usize },
    InvalidFormat,
}

impl FieldError {
    /// Text shown under the offending input.
    pub fn message(&self, field: Field) -> String {
        match (self, field) {
            (FieldError::Required, Field::Name) => "Name is required.".to_string(),
            (FieldError::Required, Field::Email) => "Email is required.".to_string(),
            (FieldError::TooShort { min }, Field::Name) => {
                format!("Name must be at least {} characters.", min)
            }
            (FieldError::TooShort { min }, Field::Message) => {
                format!("Message is too short (min {} chars).", min)
            }
            (FieldError::InvalidFormat, Field::Email) => {
                "Please enter a valid email address.".to_string()
            }
            (FieldError::Required, other) => format!("{} is required.", other),
            (FieldError::TooShort { min }, other) => {
                format!("{} must be at least {} characters.", other, min)
            }
            (FieldError::InvalidFormat, other) => format!("{} is not valid.", other),
        }
    }
}

/// Ordered field to error map produced by [`validate`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<Field, FieldError>);

impl FieldErrors {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, field: Field) -> Option<FieldError> {
        self.0.get(&field).copied()
    }

    pub fn insert(&mut self, field: Field, error: FieldError) {
        self.0.insert(field, error);
    }

    pub fn remove(&mut self, field: Field) -> Option<FieldError> {
        self.0.remove(&field)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, FieldError)> + '_ {
        self.0.iter().map(|(field, error)| (*field, *error))
    }

    /// Field name to display message, as rendered by the form.
    pub fn messages(&self) -> BTreeMap<Field, String> {
        self.iter()
            .map(|(field, error)| (field, error.message(field)))
            .collect()
    }
}

/// The submitted record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub role: Role,
    pub message: String,
}

impl ContactForm {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        role: Role,
        message: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            role,
            message: message.into(),
        }
    }
}

pub fn validate_name(name: &str) -> Option<FieldError> {
    if name.trim().is_empty() {
        Some(FieldError::Required)
    } else if name.chars().count() < NAME_MIN_CHARS {
        Some(FieldError::TooShort {
            min: NAME_MIN_CHARS,
        })
    } else {
        None
    }
}

pub fn validate_email(email: &str) -> Option<FieldError> {
    if email.trim().is_empty() {
        Some(FieldError::Required)
    } else if !EMAIL_RE.is_match(email) {
        Some(FieldError::InvalidFormat)
    } else {
        None
    }
}

/// The message is optional; only a non-empty message is length-checked.
pub fn validate_message(message: &str) -> Option<FieldError> {
    let len = message.chars().count();
    if len > 0 && len < MESSAGE_MIN_CHARS {
        Some(FieldError::TooShort {
            min: MESSAGE_MIN_CHARS,
        })
    } else {
        None
    }
}

/// Validate every field. An empty result means the form may be submitted.
pub fn validate(form: &ContactForm) -> FieldErrors {
    let mut errors = FieldErrors::default();
    if let Some(err) = validate_name(&form.name) {
        errors.insert(Field::Name, err);
    }
    if let Some(err) = validate_email(&form.email) {
        errors.insert(Field::Email, err);
    }
    if let Some(err) = validate_message(&form.message) {
        errors.insert(Field::Message, err);
    }
    errors
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmitPhase {
    #[default]
    Editing,
    Loading,
    Submitted,
}

/// Per-page form state: field values, visible errors and the submit phase.
#[derive(Debug, Clone, Default)]
pub struct ContactFormState {
    form: ContactForm,
    errors: FieldErrors,
    phase: SubmitPhase,
}

impl ContactFormState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn form(&self) -> &ContactForm {
        &self.form
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn phase(&self) -> SubmitPhase {
        self.phase
    }

    pub fn is_loading(&self) -> bool {
        self.phase == SubmitPhase::Loading
    }

    /// Update one field from its input control. Any error shown for that
    /// field is cleared right away, without waiting for the next submit.
    pub fn set_field(&mut self, field: Field, value: &str) -> Result<()> {
        match field {
            Field::Name => self.form.name = value.to_string(),
            Field::Email => self.form.email = value.to_string(),
            Field::Role => self.form.role = value.parse()?,
            Field::Message => self.form.message = value.to_string(),
        }
        if self.errors.remove(field).is_some() {
            debug!(%field, "cleared field error on edit");
        }
        Ok(())
    }

    pub fn set_role(&mut self, role: Role) {
        self.form.role = role;
        self.errors.remove(Field::Role);
    }

    /// Validate and enter the loading phase.
    ///
    /// Returns `Ok(Err(errors))` when validation fails; the errors are also
    /// kept on the state for display. Fails with
    /// [`CoreError::SubmissionInFlight`] while a previous submit is loading.
    pub fn begin_submit(&mut self) -> Result<std::result::Result<ContactForm, FieldErrors>> {
        if self.phase == SubmitPhase::Loading {
            return Err(CoreError::SubmissionInFlight);
        }

        let errors = validate(&self.form);
        if !errors.is_empty() {
            debug!(count = errors.len(), "contact form failed validation");
            self.errors = errors.clone();
            return Ok(Err(errors));
        }

        self.errors = FieldErrors::default();
        self.phase = SubmitPhase::Loading;
        Ok(Ok(self.form.clone()))
    }

    /// Leave the loading phase. On success the fields reset to defaults and
    /// the confirmation view is shown; on failure the entered values stay.
    pub fn finish_submit(&mut self, success: bool) {
        if success {
            self.form = ContactForm::default();
            self.phase = SubmitPhase::Submitted;
        } else {
            self.phase = SubmitPhase::Editing;
        }
    }

    /// "Submit another response" from the confirmation view.
    pub fn submit_another(&mut self) {
        if self.phase == SubmitPhase::Submitted {
            self.phase = SubmitPhase::Editing;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(name: &str, email: &str, message: &str) -> ContactForm {
        ContactForm::new(name, email, Role::default(), message)
    }

    #[test]
    fn name_rules() {
        assert_eq!(validate_name(""), Some(FieldError::Required));
        assert_eq!(validate_name("   "), Some(FieldError::Required));
        assert_eq!(validate_name("J"), Some(FieldError::TooShort { min: 2 }));
        assert_eq!(validate_name("Jo"), None);
    }

    #[test]
    fn email_rules() {
        assert_eq!(validate_email(""), Some(FieldError::Required));
        assert_eq!(validate_email("a@b"), Some(FieldError::InvalidFormat));
        assert_eq!(validate_email("a b@c.com"), Some(FieldError::InvalidFormat));
        assert_eq!(validate_email("@b.com"), Some(FieldError::InvalidFormat));
        assert_eq!(validate_email("a@b.com"), None);
    }

    #[test]
    fn message_is_optional_but_length_checked() {
        assert_eq!(validate_message(""), None);
        assert_eq!(
            validate_message("too short"),
            Some(FieldError::TooShort { min: 10 })
        );
        assert_eq!(validate_message("long enough"), None);
    }

    #[test]
    fn error_messages_match_form_copy() {
        let errors = validate(&form("", "nope", "hi"));
        let messages = errors.messages();
        assert_eq!(messages[&Field::Name], "Name is required.");
        assert_eq!(messages[&Field::Email], "Please enter a valid email address.");
        assert_eq!(messages[&Field::Message], "Message is too short (min 10 chars).");
    }

    #[test]
    fn role_round_trips_through_display_string() {
        for role in Role::ALL {
            assert_eq!(role.as_str().parse::<Role>().unwrap(), role);
        }
        assert!("Astronaut".parse::<Role>().is_err());

        let json = serde_json::to_string(&Role::NgoRepresentative).unwrap();
        assert_eq!(json, "\"NGO / Shelter Representative\"");
    }

    #[test]
    fn editing_a_field_clears_its_error() {
        let mut state = ContactFormState::new();
        state.set_field(Field::Email, "jo@x.com").unwrap();
        let errors = state.begin_submit().unwrap().unwrap_err();
        assert_eq!(errors.get(Field::Name), Some(FieldError::Required));

        state.set_field(Field::Name, "J").unwrap();
        assert!(state.errors().get(Field::Name).is_none());
        assert_eq!(state.phase(), SubmitPhase::Editing);
    }

    #[test]
    fn unknown_role_leaves_state_untouched() {
        let mut state = ContactFormState::new();
        assert!(state.set_field(Field::Role, "Pirate").is_err());
        assert_eq!(state.form().role, Role::StudentVolunteer);
    }

    #[test]
    fn loading_blocks_second_submit() {
        let mut state = ContactFormState::new();
        state.set_field(Field::Name, "Jo").unwrap();
        state.set_field(Field::Email, "jo@x.com").unwrap();

        assert!(state.begin_submit().unwrap().is_ok());
        assert!(state.is_loading());
        assert!(matches!(
            state.begin_submit(),
            Err(CoreError::SubmissionInFlight)
        ));
    }

    #[test]
    fn success_resets_fields_and_failure_keeps_them() {
        let mut state = ContactFormState::new();
        state.set_field(Field::Name, "Jo").unwrap();
        state.set_field(Field::Email, "jo@x.com").unwrap();
        state.set_role(Role::Developer);

        state.begin_submit().unwrap().unwrap();
        state.finish_submit(false);
        assert_eq!(state.phase(), SubmitPhase::Editing);
        assert_eq!(state.form().name, "Jo");

        state.begin_submit().unwrap().unwrap();
        state.finish_submit(true);
        assert_eq!(state.phase(), SubmitPhase::Submitted);
        assert_eq!(state.form(), &ContactForm::default());

        state.submit_another();
        assert_eq!(state.phase(), SubmitPhase::Editing);
    }
}

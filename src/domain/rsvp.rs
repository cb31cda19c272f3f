use serde::Deserialize;
use serde::Serialize;

use super::GuestEmail;

pub const EMAIL_FORMAT_MSG: &str = "Please enter your correct email address";
pub const NAME_REQUIRED_MSG: &str = "Please enter your name";
pub const EMAIL_REQUIRED_MSG: &str = "Please enter your email address";
pub const PHONE_REQUIRED_MSG: &str = "Please enter your phone number";

/// Raw `POST /form` body. Every field defaults to an empty string, so a
/// missing field is reported as a validation message instead of a 400.
///
/// Also serialized back into the form template, which is why the field names
/// match the html `name` attributes.
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct RsvpForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub willattend: String,
}

/// A guest's response, only obtainable from a valid `RsvpForm`. Never mutated
/// after creation.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Rsvp {
    pub name: String,
    pub email: GuestEmail,
    pub phone: String,
    pub will_attend: bool,
}

/// Validation failure: the submitted form is handed back (so it can be
/// re-rendered) along with the messages to show, in order.
#[derive(Debug)]
pub struct IntakeErrors {
    pub form: RsvpForm,
    pub messages: Vec<String>,
}

impl TryFrom<RsvpForm> for Rsvp {
    type Error = IntakeErrors;

    /// The email is checked first; a malformed address short-circuits with a
    /// single message. Otherwise each required field gets its own message.
    fn try_from(form: RsvpForm) -> Result<Self, Self::Error> {
        let email = match GuestEmail::parse(form.email.clone()) {
            Ok(email) => email,
            Err(_) => {
                return Err(IntakeErrors {
                    form,
                    messages: vec![EMAIL_FORMAT_MSG.to_string()],
                })
            }
        };

        let mut messages = vec![];
        // whitespace-only counts as empty
        if form.name.trim().is_empty() {
            messages.push(NAME_REQUIRED_MSG.to_string());
        }
        // a parsed address is never empty, but the field is still required in
        // its own right
        if form.email.trim().is_empty() {
            messages.push(EMAIL_REQUIRED_MSG.to_string());
        }
        if form.phone.trim().is_empty() {
            messages.push(PHONE_REQUIRED_MSG.to_string());
        }

        if !messages.is_empty() {
            return Err(IntakeErrors { form, messages });
        }

        Ok(Rsvp {
            will_attend: form.willattend == "true",
            name: form.name,
            email,
            phone: form.phone,
        })
    }
}

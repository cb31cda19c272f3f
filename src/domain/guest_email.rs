use email_address::EmailAddress;
use serde::Serialize;

/// An email address that parses as a single RFC 5322 mailbox, optionally with
/// a display name (`Ann <a@b.com>`). The submitted string is kept as is.
///
/// The field is left private, so the only way in is `GuestEmail::parse`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct GuestEmail(String);

impl GuestEmail {
    pub fn parse(email: String) -> Result<Self, String> {
        // default options allow display text and quoted local parts
        EmailAddress::is_valid(&email)
            .then_some(Self(email.clone()))
            .ok_or(format!("Invalid email: {email:?}"))
    }
}

impl AsRef<str> for GuestEmail {
    fn as_ref(&self) -> &str { &self.0 }
}

impl std::fmt::Display for GuestEmail {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

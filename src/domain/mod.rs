mod guest_email;
mod rsvp;
// allow external `use` statements to skip `rsvp` etc
pub use guest_email::GuestEmail;
pub use rsvp::IntakeErrors;
pub use rsvp::Rsvp;
pub use rsvp::RsvpForm;
pub use rsvp::EMAIL_FORMAT_MSG;
pub use rsvp::EMAIL_REQUIRED_MSG;
pub use rsvp::NAME_REQUIRED_MSG;
pub use rsvp::PHONE_REQUIRED_MSG;

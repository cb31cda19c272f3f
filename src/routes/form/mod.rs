mod get;
mod post;
pub use get::*;
pub use post::*;

use tera::Context;

use crate::domain::RsvpForm;

/// Context for the form page: the values to pre-fill, and the messages to show
/// above the form (empty on first load).
fn form_context(
    rsvp: &RsvpForm,
    errors: &[String],
) -> Context {
    let mut ctx = Context::new();
    ctx.insert("rsvp", rsvp);
    ctx.insert("errors", errors);
    ctx
}

use actix_web::web;
use actix_web::HttpResponse;
use tera::Context;

use super::form_context;
use crate::domain::Rsvp;
use crate::domain::RsvpForm;
use crate::guest_list::GuestList;
use crate::routes::render;
use crate::routes::PageError;
use crate::submission_log::SubmissionLog;
use crate::templates::Page;
use crate::templates::TemplateStore;

/// `POST /form`
///
/// On invalid input, the form is rendered again with the submitted values and
/// the validation messages (still 200). Otherwise the response is added to the
/// guest list, and the visitor gets either the "thanks" or "sorry" page.
/// Attending guests are also appended to the submission log; a failed write
/// is logged and otherwise ignored.
///
/// # Request example
///
/// ```sh
///     curl --data 'name=Ann&email=a%40b.com&phone=555&willattend=true' http://127.0.0.1:5000/form
/// ```
#[tracing::instrument(
    name = "Accepting RSVP",
    skip(form, templates, guests, submission_log),
    fields(
        guest_name = %form.name,
        guest_email = %form.email,
    )
)]
pub async fn submit_rsvp(
    form: web::Form<RsvpForm>,
    templates: web::Data<TemplateStore>,
    guests: web::Data<GuestList>,
    submission_log: web::Data<SubmissionLog>,
) -> Result<HttpResponse, PageError> {
    let rsvp = match Rsvp::try_from(form.into_inner()) {
        Ok(rsvp) => rsvp,
        Err(rejected) => {
            tracing::info!(errors = ?rejected.messages, "Rejected RSVP");
            return render(
                &templates,
                Page::Form,
                &form_context(&rejected.form, &rejected.messages),
            );
        }
    };

    guests.push(rsvp.clone());

    let page = match rsvp.will_attend {
        true => {
            if let Err(e) = submission_log.append(&rsvp).await {
                tracing::error!(
                    error.cause_chain = ?e,
                    error.message = %e,
                    "Could not write to submission log"
                );
            }
            Page::Thanks
        }
        false => Page::Sorry,
    };

    let mut ctx = Context::new();
    ctx.insert("name", &rsvp.name);
    render(&templates, page, &ctx)
}

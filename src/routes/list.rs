use actix_web::web;
use actix_web::HttpResponse;
use tera::Context;

use super::render;
use super::PageError;
use crate::guest_list::GuestList;
use crate::templates::Page;
use crate::templates::TemplateStore;

/// `GET /list`
///
/// Every accepted response, attending or not, in submission order. Read-only,
/// so repeated calls without a `POST /form` in between return the same page.
#[tracing::instrument(name = "Listing responses", skip_all, fields(count = tracing::field::Empty))]
pub async fn list_responses(
    templates: web::Data<TemplateStore>,
    guests: web::Data<GuestList>,
) -> Result<HttpResponse, PageError> {
    // render from a copy, so the lock isn't held while tera runs
    let responses = guests.snapshot();
    tracing::Span::current().record("count", responses.len());

    let mut ctx = Context::new();
    ctx.insert("responses", &responses);
    render(&templates, Page::List, &ctx)
}

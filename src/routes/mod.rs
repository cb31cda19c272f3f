use std::fmt::Debug;

use actix_web::http::header::ContentType;
use actix_web::http::StatusCode;
use actix_web::HttpResponse;
use actix_web::ResponseError;
use tera::Context;

use crate::templates::Page;
use crate::templates::TemplateStore;
use crate::utils::error_chain_fmt;

mod form;
mod health_check;
mod list;
mod welcome;
pub use form::*;
pub use health_check::*;
pub use list::*;
pub use welcome::*;

/// The only infrastructure failure a visitor can see; validation problems are
/// rendered inline by the form page instead.
#[derive(thiserror::Error)]
pub enum PageError {
    #[error("Failed to render {0:?} page")]
    Render(Page, #[source] tera::Error),
}

impl Debug for PageError {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

impl ResponseError for PageError {
    fn status_code(&self) -> StatusCode { StatusCode::INTERNAL_SERVER_ERROR }
}

/// Render `page` into a 200 html response
fn render(
    templates: &TemplateStore,
    page: Page,
    ctx: &Context,
) -> Result<HttpResponse, PageError> {
    let body = templates
        .render(page, ctx)
        .map_err(|e| PageError::Render(page, e))?;
    Ok(HttpResponse::Ok()
        .content_type(ContentType::html())
        .body(body))
}

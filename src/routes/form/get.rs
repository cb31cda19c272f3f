use actix_web::web;
use actix_web::HttpResponse;

use super::form_context;
use crate::domain::RsvpForm;
use crate::routes::render;
use crate::routes::PageError;
use crate::templates::Page;
use crate::templates::TemplateStore;

/// `GET /form`
pub async fn rsvp_form(templates: web::Data<TemplateStore>) -> Result<HttpResponse, PageError> {
    render(
        &templates,
        Page::Form,
        &form_context(&RsvpForm::default(), &[]),
    )
}

use actix_web::web;
use actix_web::HttpResponse;
use tera::Context;

use super::render;
use super::PageError;
use crate::templates::Page;
use crate::templates::TemplateStore;

/// `GET /`
pub async fn welcome(templates: web::Data<TemplateStore>) -> Result<HttpResponse, PageError> {
    render(&templates, Page::Welcome, &Context::new())
}

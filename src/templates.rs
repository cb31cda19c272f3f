use std::path::Path;

use tera::Context;
use tera::Tera;

/// Name of the shared fragment that every page `{% extends %}`
const LAYOUT: &str = "layout.html";

/// The fixed set of pages the server knows how to render
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Welcome,
    Form,
    Thanks,
    Sorry,
    List,
}

impl Page {
    pub const ALL: [Page; 5] = [
        Page::Welcome,
        Page::Form,
        Page::Thanks,
        Page::Sorry,
        Page::List,
    ];

    pub fn template_name(self) -> &'static str {
        match self {
            Page::Welcome => "welcome.html",
            Page::Form => "form.html",
            Page::Thanks => "thanks.html",
            Page::Sorry => "sorry.html",
            Page::List => "list.html",
        }
    }
}

/// Parsed page templates. Read once at startup; there is no reload.
///
/// `.html` names mean tera autoescapes every value, so user input echoed back
/// into the form is safe.
#[derive(Debug)]
pub struct TemplateStore {
    tera: Tera,
}

impl TemplateStore {
    /// Parse `layout.html` plus one file per `Page` from `dir`. Any missing or
    /// malformed file is an error, and the caller is expected to abort.
    #[tracing::instrument(name = "Loading templates")]
    pub fn load(dir: &Path) -> Result<Self, tera::Error> {
        let mut tera = Tera::default();

        let mut files = vec![(dir.join(LAYOUT), Some(LAYOUT))];
        for page in Page::ALL {
            files.push((dir.join(page.template_name()), Some(page.template_name())));
        }
        // inheritance is resolved once everything has been added
        tera.add_template_files(files)?;

        for (idx, page) in Page::ALL.iter().enumerate() {
            tracing::info!("Loaded template {idx} {page:?}");
        }
        Ok(Self { tera })
    }

    pub fn render(
        &self,
        page: Page,
        ctx: &Context,
    ) -> Result<String, tera::Error> {
        self.tera.render(page.template_name(), ctx)
    }
}

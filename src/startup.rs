use std::net::TcpListener;

use actix_web::dev::Server;
use actix_web::web;
use actix_web::web::Data;
use actix_web::App;
use actix_web::HttpServer;
use anyhow::Context;
use tracing_actix_web::TracingLogger;

use crate::configuration::Settings;
use crate::guest_list::GuestList;
use crate::routes::health_check;
use crate::routes::list_responses;
use crate::routes::rsvp_form;
use crate::routes::submit_rsvp;
use crate::routes::welcome;
use crate::submission_log::SubmissionLog;
use crate::templates::TemplateStore;

/// Wrapper for actix's `Server` with access to the bound port. Not to be
/// confused with actix's `App`!
pub struct Application {
    /// Left private; use `get_port` to access
    port: u16,
    server: Server,
    guests: Data<GuestList>,
}

impl Application {
    /// Load templates, bind the listener and build the `Server`. Every error
    /// here is fatal; the caller should bail.
    pub async fn build(cfg: Settings) -> Result<Self, anyhow::Error> {
        // a missing or broken template should stop us before we bind anything
        let templates = TemplateStore::load(&cfg.templates.dir)
            .with_context(|| format!("Failed to load templates from {:?}", cfg.templates.dir))?;

        let addr = format!("{}:{}", cfg.application.host, cfg.application.port);
        let listener = TcpListener::bind(&addr).with_context(|| format!("Failed to bind {addr}"))?;

        // the port actually assigned by the OS (relevant when port is 0)
        let port = listener.local_addr()?.port();

        let guests = Data::new(GuestList::new());
        let submission_log = SubmissionLog::new(cfg.submission_log.path);

        let server = run(listener, templates, guests.clone(), submission_log)?;

        Ok(Self {
            port,
            server,
            guests,
        })
    }

    pub fn get_port(&self) -> u16 { self.port }

    /// Handle on the guest list shared with the running server
    pub fn guests(&self) -> Data<GuestList> { self.guests.clone() }

    /// Because this consumes `self`, this should be the final function call (or
    /// passed to `tokio::spawn`)
    pub async fn run_until_stopped(self) -> Result<(), std::io::Error> { self.server.await }
}

/// The server is not responsible for binding to an address, it only listens to
/// an already bound address.
///
/// Declares all endpoints. The application context (templates, guest list,
/// submission log) is handed to handlers via `app_data`; nothing is global.
pub fn run(
    listener: TcpListener,
    templates: TemplateStore,
    guests: Data<GuestList>,
    submission_log: SubmissionLog,
) -> Result<Server, anyhow::Error> {
    // `Data` is an `Arc`; every worker's `App` gets a clone of the same
    // pointers, so all workers see the same guest list
    let templates = Data::new(templates);
    let submission_log = Data::new(submission_log);

    let server = HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .route("/", web::get().to(welcome))
            .route("/form", web::get().to(rsvp_form))
            .route("/form", web::post().to(submit_rsvp))
            .route("/list", web::get().to(list_responses))
            .route("/health_check", web::get().to(health_check))
            .app_data(templates.clone())
            .app_data(guests.clone())
            .app_data(submission_log.clone())
    })
    .listen(listener)?
    .run();

    Ok(server)
}

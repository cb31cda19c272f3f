use std::path::PathBuf;

use actix_web::web::Data;
use once_cell::sync::Lazy;
use rsvp::configuration::get_configuration;
use rsvp::guest_list::GuestList;
use rsvp::startup::Application;
use rsvp::telemetry::get_subscriber;
use rsvp::telemetry::init_subscriber;
use uuid::Uuid;

/// Init the tracing subscriber once for the whole test binary.
///
/// To opt in to verbose logging, use the env var `TEST_LOG`:
///
/// ```sh
///      TEST_LOG=true cargo test [test_name] | bunyan
/// ```
static TRACING: Lazy<()> = Lazy::new(|| {
    // the two sinks are different closure types, hence the duplicated arms
    match std::env::var("TEST_LOG") {
        Ok(_) => {
            let subscriber = get_subscriber("test", "debug", std::io::stdout);
            init_subscriber(subscriber);
        }
        Err(_) => {
            let subscriber = get_subscriber("test", "debug", std::io::sink);
            init_subscriber(subscriber);
        }
    };
});

pub struct TestApp {
    pub addr: String,
    /// Same list the server writes to
    pub guests: Data<GuestList>,
    /// Per-test submission log, inside `scratch_dir`
    pub log_path: PathBuf,
    pub scratch_dir: PathBuf,
    pub client: reqwest::Client,
}

impl TestApp {
    pub async fn get(
        &self,
        path: &str,
    ) -> reqwest::Response {
        self.client
            .get(format!("{}{path}", self.addr))
            .send()
            .await
            .expect("execute request")
    }

    pub async fn get_html(
        &self,
        path: &str,
    ) -> String {
        self.get(path).await.text().await.unwrap()
    }

    /// `POST /form` with a raw urlencoded body
    pub async fn post_form(
        &self,
        body: String,
    ) -> reqwest::Response {
        self.client
            .post(format!("{}/form", self.addr))
            .header("Content-Type", "application/x-www-form-urlencoded")
            .body(body)
            .send()
            .await
            .expect("execute request")
    }

    /// `POST /form` with the four fields, urlencoded for us
    pub async fn post_rsvp(
        &self,
        name: &str,
        email: &str,
        phone: &str,
        willattend: &str,
    ) -> reqwest::Response {
        let body = serde_urlencoded::to_string([
            ("name", name),
            ("email", email),
            ("phone", phone),
            ("willattend", willattend),
        ])
        .unwrap();
        self.post_form(body).await
    }

    /// Lines of the submission log; empty if the file was never created
    pub fn log_lines(&self) -> Vec<String> {
        match std::fs::read_to_string(&self.log_path) {
            Ok(s) => s.lines().map(str::to_owned).collect(),
            Err(_) => vec![],
        }
    }
}

impl Drop for TestApp {
    fn drop(&mut self) { let _ = std::fs::remove_dir_all(&self.scratch_dir); }
}

/// Spawn the server on a random port, with a fresh guest list and a
/// submission log in its own temp dir.
///
/// Returns the address to which the server was bound, in the form `http://127.0.0.1:{port}`.
/// The `http://` prefix is important, as this is the address that clients will send requests to.
pub async fn spawn_app() -> TestApp {
    Lazy::force(&TRACING);

    let scratch_dir = std::env::temp_dir().join(Uuid::new_v4().to_string());

    let cfg = {
        let mut rand_cfg = get_configuration().unwrap();

        // port 0 lets the OS pick a free port; `get_port` tells us which
        rand_cfg.application.port = 0;
        rand_cfg.submission_log.path = scratch_dir.join("test.txt");

        rand_cfg
    };
    let log_path = cfg.submission_log.path.clone();

    let app = Application::build(cfg).await.unwrap();
    let addr = format!("http://127.0.0.1:{}", app.get_port());
    let guests = app.guests();

    tokio::spawn(app.run_until_stopped());

    TestApp {
        addr,
        guests,
        log_path,
        scratch_dir,
        client: reqwest::Client::new(),
    }
}

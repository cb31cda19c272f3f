use std::fmt::Debug;
use std::fmt::Display;

use rsvp::configuration::get_configuration;
use rsvp::library::export_books;
use rsvp::startup::Application;
use rsvp::telemetry::get_subscriber;
use rsvp::telemetry::init_subscriber;
use rsvp::weather::fetch_weather;

/// Startup side tasks are best-effort: a failure is logged and the server
/// starts anyway.
fn report_task<T: Debug>(
    name: &str,
    outcome: Result<T, impl Debug + Display>,
) {
    match outcome {
        Ok(o) => tracing::info!("{name} finished: {o:?}"),
        Err(e) => tracing::error!(
            error.cause_chain = ?e,
            error.message = %e,
            "{name} failed"
        ),
    }
}

/// Initialise telemetry, load config, run the startup tasks, and serve
#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    let subscriber = get_subscriber("rsvp", "info", std::io::stdout);
    init_subscriber(subscriber);

    let cfg = get_configuration()?;

    // fatal errors (templates, bind) end here
    let app = Application::build(cfg.clone()).await?;

    report_task("Weather fetch", fetch_weather(&cfg.weather).await);

    match cfg.library.enabled {
        true => report_task("Library export", export_books(&cfg.library).await),
        false => tracing::info!("Library export disabled"),
    }

    tracing::info!(port = app.get_port(), "Serving");
    app.run_until_stopped().await?;
    Ok(())
}

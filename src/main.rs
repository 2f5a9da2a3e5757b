mod app;
mod batch;
mod contacts;
mod events;
mod opener;
mod sender;
mod template;
mod ui;

use adw::prelude::*;
use adw::Application;
use tracing_subscriber::EnvFilter;

fn main() -> glib::ExitCode {
    // `log` records from the crate are forwarded into this subscriber.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let app = Application::builder()
        .application_id("com.example.WaImageSender")
        .build();
    app.connect_activate(crate::app::build_ui);
    app.run()
}

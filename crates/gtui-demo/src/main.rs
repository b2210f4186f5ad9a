#![forbid(unsafe_code)]

//! gotui demo binary entry point.
//!
//! `gtui-demo` runs the dashboard in the terminal. `gtui-demo -screenshot`
//! renders one 120x40 frame to `screenshot.png` and exits.

use gtui::{App, Backend, Config};
use gtui_demo::Dashboard;

#[cfg(feature = "tracing-json")]
fn init_logging() {
    let Some(path) = std::env::var_os("GTUI_LOG") else {
        return;
    };
    match std::fs::File::create(&path) {
        Ok(file) => {
            let directives = std::env::var("GTUI_LOG_FILTER").unwrap_or_else(|_| "info".into());
            if !gtui::core::logging::init_json(std::sync::Mutex::new(file), &directives) {
                eprintln!("ignoring log filter {directives:?}");
            }
        }
        Err(e) => eprintln!("cannot open log file: {e}"),
    }
}

fn main() {
    #[cfg(feature = "tracing-json")]
    init_logging();

    let config = Config::from_args(std::env::args().skip(1));
    let backend = match Backend::with_config(config) {
        Ok(backend) => backend,
        Err(e) => {
            eprintln!("Failed to initialize: {e}");
            std::process::exit(1);
        }
    };

    let mut dashboard = Dashboard::new();
    let mut app = App::new(backend, dashboard.root());
    if let Err(e) = app.run(|event, _| dashboard.handle(event)) {
        drop(app);
        eprintln!("Runtime error: {e}");
        std::process::exit(1);
    }
}

mod app;
mod config;

mod domain {
    pub mod entities {
        pub mod artwork;
        pub mod page;
        pub mod selection;
    }
}

mod usecase {
    pub mod ports {
        pub mod source;
    }
    pub mod services {
        pub mod page_loader;
        pub mod selection_controller;
    }
}

mod infra {
    pub mod export {
        pub mod csv;
    }
    pub mod http {
        pub mod artic;
        pub mod dto;
    }
}

mod platform {
    pub mod desktop {
        pub mod logging;
        pub mod paths;
    }
}

mod ui {
    pub mod format;
    pub mod paginator;
    pub mod state {
        pub mod app_state;
    }
}


use log::LevelFilter;

use crate::app::App;
use crate::config::AppConfig;
use crate::platform::desktop::logging::init_logging;
use crate::platform::desktop::paths::default_webview_data_dir;

fn main() {
    let log_level = AppConfig::from_env()
        .map(|config| config.log_level)
        .unwrap_or(LevelFilter::Info);
    if let Err(err) = init_logging(log_level) {
        eprintln!("logging disabled: {err:#}");
    }

    let mut desktop_config = dioxus::desktop::Config::new()
        .with_window(dioxus::desktop::WindowBuilder::new().with_title("Artworks"));
    match default_webview_data_dir() {
        Ok(dir) => desktop_config = desktop_config.with_data_directory(dir),
        Err(err) => log::warn!("using default webview data directory: {err:#}"),
    }

    log::info!("starting artworks viewer");
    dioxus::LaunchBuilder::desktop()
        .with_cfg(desktop_config)
        .launch(App);
}

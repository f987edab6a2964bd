use anyhow::Result;
use tracing::{error, warn};

use emd_processor::app::App;
use emd_processor::infra::config::{load_config, AppConfig};
use emd_processor::infra::logging::init_logging;
use emd_processor::platform::desktop::data_dir::default_webview_data_dir;

fn main() -> Result<()> {
    let (config, config_error) = match load_config() {
        Ok(config) => (config, None),
        Err(err) => (AppConfig::default(), Some(err)),
    };

    init_logging(&config.logging)?;
    if let Some(err) = config_error {
        warn!(error = %err, "failed to load configuration, using defaults");
    }

    let webview_data_dir = default_webview_data_dir().inspect_err(|err| {
        error!(error = %err, "failed to prepare WebView2 data directory");
    })?;

    dioxus::LaunchBuilder::desktop()
        .with_context(config)
        .with_cfg(
            dioxus::desktop::Config::new()
                .with_window(dioxus::desktop::WindowBuilder::new().with_title("EMD Processor"))
                .with_data_directory(webview_data_dir),
        )
        .launch(App);

    Ok(())
}

mod common;
mod console;
mod device_sync;
mod entity;
mod panel;
mod util;

use std::error::Error;
use std::sync::Arc;
use dotenv::dotenv;
use tokio_util::sync::CancellationToken;
use common::http::ReqwestDeviceApi;
use common::logger::init_logger;
use common::setting::Settings;
use device_sync::context::SyncContext;
use device_sync::dashboard::Dashboard;
use panel::panel::shared_panel;
use panel::tab::Tab;

const LOG_TAG: &str = "main";

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn Error>> {
    // .env file
    dotenv().ok();

    // config
    let settings = Settings::get();

    // logger
    init_logger()?;
    info!(LOG_TAG, "settings loaded, env: {}", settings.env.env);
    debug!(LOG_TAG, "settings: {:?}", settings);

    let root = CancellationToken::new();
    let ctrlc_token = root.clone();
    ctrlc::set_handler(move || ctrlc_token.cancel())?;

    let base_url = settings.device.base_url();
    info!(LOG_TAG, "device at {}", base_url);
    let api = Arc::new(ReqwestDeviceApi::new(&base_url));
    let ctx = SyncContext::new(api, shared_panel(), settings.timeout.clone());

    let initial_tab = settings.panel.initial_tab.parse::<Tab>().unwrap_or_else(|e| {
        warn!(LOG_TAG, "{}, falling back to controls", e.msg);
        Tab::Controls
    });

    let dashboard = Arc::new(Dashboard::new(ctx, settings.poll.clone(), &root));
    dashboard.start(initial_tab);
    console::console::run_console(dashboard.clone(), root.clone()).await;

    root.cancel();
    dashboard.shutdown().await;
    info!(LOG_TAG, "control panel stopped");
    Ok(())
}

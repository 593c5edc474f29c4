mod app;
mod controls;
mod scene;

use afterglow_engine::device::GpuInit;
use afterglow_engine::logging::{init_logging, LoggingConfig};
use afterglow_engine::window::{Runtime, RuntimeConfig};
use winit::dpi::LogicalSize;

use app::StudioApp;

fn main() -> anyhow::Result<()> {
    init_logging(LoggingConfig::default());

    log::info!("afterglow studio starting");
    log::info!("  1-9, F1/F2/F7  push effects     0 clear   Z pop last");
    log::info!("  F5/F6          cycle focused object");
    log::info!("  F3/F4          motion blur fade  F8 toggle fps lock");

    Runtime::run(
        RuntimeConfig {
            title: "Afterglow Studio".to_string(),
            initial_size: LogicalSize::new(1280.0, 720.0),
        },
        GpuInit::default(),
        StudioApp::new(),
    )
}

mod hello;

use anyhow::Result;
use winit::dpi::LogicalSize;

use prism_engine::device::GpuInit;
use prism_engine::logging::{init_logging, LoggingConfig};
use prism_engine::render::{TriangleConfig, MAX_BUFFERS_IN_FLIGHT};
use prism_engine::window::{Runtime, RuntimeConfig};

use hello::HelloTriangle;

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());

    let config = RuntimeConfig {
        title: "Hello Triangle".to_string(),
        initial_size: LogicalSize::new(800.0, 600.0),
    };

    // One uniform slot per frame the swapchain may keep queued.
    let gpu_init = GpuInit {
        desired_maximum_frame_latency: MAX_BUFFERS_IN_FLIGHT as u32,
        ..GpuInit::default()
    };

    log::info!("starting {}", config.title);
    Runtime::run(config, gpu_init, HelloTriangle::new(TriangleConfig::default()))
}

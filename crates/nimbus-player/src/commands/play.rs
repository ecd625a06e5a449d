//! Interactive windowed sky

use anyhow::Result;
use nimbus_player::{ConfigOverrides, SkyApp};
use winit::event_loop::{ControlFlow, EventLoop};

pub struct PlayArgs {
    pub overrides: ConfigOverrides,
    pub fullscreen: bool,
}

pub fn run(args: PlayArgs) -> Result<()> {
    let config = args.overrides.resolve()?;

    println!("Nimbus - cumulus sky");
    println!();
    println!("Controls:");
    println!("  Left/Right  - Breeze -/+ {}", config.breeze_step);
    println!("  Up/Down     - Humidity (emission rate) +/- {}", config.rate_step);
    println!("  F11         - Toggle fullscreen");
    println!("  Esc/Q       - Quit");

    // Create and run the event loop
    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = SkyApp::new(config, args.fullscreen);
    event_loop.run_app(&mut app)?;

    match app.take_error() {
        Some(e) => Err(e),
        None => Ok(()),
    }
}

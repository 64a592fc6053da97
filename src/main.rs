// CHIP-8 Front-end - Main Entry Point
//
// Runs the display window with a demonstration backend: it draws a test
// pattern, inverts it on every key press and logs the key commands it
// receives. A real engine plugs in through the same `BackendLink`.

use chip8_frontend::config::CONFIG_FILE;
use chip8_frontend::display::Color;
use chip8_frontend::{
    logging, run_display, BackendLink, FrameBuffer, FrontendConfig, KeyCommand, KeyboardMap,
};
use clap::Parser;
use log::{debug, info, LevelFilter};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "chip8-frontend")]
#[command(about = "Display and keyboard front-end for a CHIP-8 virtual machine")]
struct Cli {
    /// Configuration file (created with defaults if missing)
    #[arg(short, long, default_value = CONFIG_FILE)]
    config: PathBuf,

    /// Window scale factor, overrides the configuration file
    #[arg(short, long)]
    scale: Option<u32>,

    /// Color for lit pixels, e.g. "rgb(0 128 0)" or "#00ff00"
    #[arg(long)]
    foreground: Option<Color>,

    /// Color for unlit pixels
    #[arg(long)]
    background: Option<Color>,

    /// Log level, overrides the configuration file
    #[arg(long)]
    log_level: Option<LevelFilter>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // The log level lives in the config file, so read it before the logger
    // exists.
    let level = cli.log_level.unwrap_or_else(|| {
        FrontendConfig::load_from_file(&cli.config)
            .map(|config| config.log.level)
            .unwrap_or(LevelFilter::Info)
    });
    logging::init(level);
    info!("chip8-frontend v{}", env!("CARGO_PKG_VERSION"));

    let mut config = FrontendConfig::load_or_default(&cli.config);
    config.log.level = level;
    if let Some(scale) = cli.scale {
        config.window = config.window.with_scale(scale);
    }
    if let Some(foreground) = cli.foreground {
        config.display.foreground_color = foreground;
    }
    if let Some(background) = cli.background {
        config.display.background_color = background;
    }
    config.validate()?;

    run_display(&config, demo_backend)?;

    info!("display window closed");
    Ok(())
}

/// Stand-in engine: test pattern that inverts on each keypad press
fn demo_backend(link: BackendLink) {
    let keypad = KeyboardMap::new();
    let mut frame = FrameBuffer::new();
    frame.test_pattern();

    if link.notifications.clear().is_err() || link.notifications.draw(&frame).is_err() {
        return;
    }

    // Ends when the window drops its command sender.
    while let Ok(command) = link.commands.recv() {
        let Some(key) = keypad.key(command.key()) else {
            debug!("no keypad binding for {:?}", command.key());
            continue;
        };
        info!("backend received {:?} (keypad {:X})", command, key);

        if let KeyCommand::KeyDown { .. } = command {
            frame.invert();
            if link.notifications.draw(&frame).is_err() {
                break;
            }
        }
    }
}

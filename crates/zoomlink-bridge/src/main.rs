//! zoomlink - Zoom R16/R24 control surface bridge
//!
//! Connects to the recorder's MIDI port, decodes its messages and drives a
//! session over a simulated DAW host that logs everything it is asked to do.
//!
//! ## Command line flags
//!
//! - `--list-ports`: Print the available MIDI input ports and exit
//! - `--config <path>`: Use a config file other than the default
//! - `--write-config`: Write the effective config back to the config path and exit

mod config;
mod host;

use std::path::PathBuf;

use anyhow::Result;
use zoomlink_core::{Session, TOTAL_TRACKS};
use zoomlink_midi::{list_input_ports, MidiError, ZoomController};

use host::SimulatedHost;

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let list_ports = args.iter().any(|arg| arg == "--list-ports");
    let write_config = args.iter().any(|arg| arg == "--write-config");
    let config_path = args
        .iter()
        .position(|arg| arg == "--config")
        .and_then(|i| args.get(i + 1))
        .map(PathBuf::from)
        .unwrap_or_else(config::default_config_path);

    // Initialize logger - set RUST_LOG=debug for per-event output
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    if list_ports {
        let ports = list_input_ports()?;
        if ports.is_empty() {
            println!("No MIDI input ports found");
        }
        for port in ports {
            println!("{}", port);
        }
        return Ok(());
    }

    let config = config::load_config(&config_path);

    if write_config {
        config::save_config(&config, &config_path)?;
        println!("Config written to {}", config_path.display());
        return Ok(());
    }

    log::info!("zoomlink starting up ({} addressable tracks)", TOTAL_TRACKS);

    let host_config = config.host.clone();
    let session = Session::with_observer(config.session, move |observer| {
        SimulatedHost::new(host_config, observer)
    });

    let controller = match ZoomController::connect(&config.controller) {
        Ok(controller) => controller,
        Err(MidiError::NoDeviceFound(pattern)) => {
            eprintln!("No MIDI input matching '{}' found. Available ports:", pattern);
            for port in list_input_ports().unwrap_or_default() {
                eprintln!("  {}", port);
            }
            eprintln!("Set controller.port_match in {}", config_path.display());
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    println!("Listening on '{}' (Ctrl+C to quit)", controller.port_name());

    // Returns once the input handler is gone and the channel disconnects
    let events = controller.event_receiver();
    while let Ok(event) = events.recv() {
        session.submit(event);
    }

    let state = session.state();
    log::info!(
        "MIDI input closed (mode {:?}, layout {:?}, track bank {}, {} chained events dropped)",
        state.mode,
        state.layout,
        state.current_track_bank,
        session.dropped_events()
    );
    Ok(())
}

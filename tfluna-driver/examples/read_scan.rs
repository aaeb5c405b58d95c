use clap::Parser;
use crossbeam_channel::bounded;
use std::path::PathBuf;
use tfluna_data::{profile_baud_rate, profile_config, SensorProfile};
use tfluna_driver::{
    find_serial_port, load_config, run_session, LineSource, LogRenderer, ScanAssembler,
    SerialLineSource, SessionConfig, UdpLineSource,
};

/// Reads the TF-Luna scanner and logs every assembled frame.
#[derive(Parser, Debug)]
#[command(disable_version_flag = true)]
struct Args {
    /// The device path to a serial port. Listens for UDP datagrams when omitted.
    port: Option<String>,

    /// Pick a serial port automatically instead of listening for UDP.
    #[arg(long)]
    serial: bool,

    /// UDP port of the WiFi bridge.
    #[arg(long, default_value_t = 12345)]
    udp_port: u16,

    /// Use the bare head profile (115200 baud, no offset).
    #[arg(long)]
    basic: bool,

    /// JSON sensor configuration overriding the profile.
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> tfluna_driver::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let profile = if args.basic {
        SensorProfile::Basic
    } else {
        SensorProfile::Visualizer
    };
    let config = match &args.config {
        Some(path) => load_config(path)?,
        None => profile_config(profile),
    };

    let port_name = match args.port {
        Some(port_name) => Some(port_name),
        None if args.serial => Some(find_serial_port()?),
        None => None,
    };
    let source: Box<dyn LineSource> = match port_name {
        Some(port_name) => Box::new(SerialLineSource::open(&port_name, profile_baud_rate(profile))?),
        None => Box::new(UdpLineSource::bind(("0.0.0.0", args.udp_port))?),
    };

    let (terminator_tx, terminator_rx) = bounded(10);
    ctrlc::set_handler(move || {
        log::info!("Received shutdown signal");
        let _ = terminator_tx.send(true);
    })
    .map_err(|e| tfluna_driver::ScanError::Io(std::io::Error::other(e)))?;

    log::info!(
        "Reading LIDAR data in {}... Press Ctrl+C to exit.",
        config.distance_unit.label()
    );
    let mut assembler = ScanAssembler::new(config)?;
    run_session(
        source,
        &mut assembler,
        &mut LogRenderer,
        &terminator_rx,
        &SessionConfig::default(),
    )?;
    Ok(())
}

use clap::Parser;
use piston_window::{EventLoop, PistonWindow, WindowSettings};
use plotters::drawing::IntoDrawingArea;
use plotters::prelude::{ChartBuilder, Circle, LineSeries, BLACK, BLUE, RED, WHITE};
use plotters::style::Color;
use plotters_piston::{draw_piston_window, PistonBackend};
use std::sync::mpsc::TryRecvError;
use tfluna_data::{profile_baud_rate, profile_config, ScanSnapshot, SensorProfile};
use tfluna_driver::{
    find_serial_port, join, run_driver, SerialLineSource, SessionConfig, UdpLineSource,
};

/// Plots the TF-Luna point cloud in a window.
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
}

// 3 meters in the default unit, centimeters
const WINDOW_RANGE: f64 = 300.;
const REFERENCE_RADII: [f64; 2] = [100., 200.];
const FPS: u64 = 10;

fn circle_outline(radius: f64) -> impl Iterator<Item = (f64, f64)> {
    (0..=120).map(move |i| {
        let rad = (i as f64) * std::f64::consts::TAU / 120.;
        (radius * rad.cos(), radius * rad.sin())
    })
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let profile = SensorProfile::Visualizer;
    let config = profile_config(profile);
    let unit = config.distance_unit.label();
    let port_name = match (&args.port, args.serial) {
        (Some(port_name), _) => Ok(Some(port_name.clone())),
        (None, true) => find_serial_port().map(Some),
        (None, false) => Ok(None),
    };
    let driver = port_name.and_then(|port_name| match port_name {
        Some(port_name) => SerialLineSource::open(&port_name, profile_baud_rate(profile))
            .and_then(|source| run_driver(source, config, SessionConfig::default())),
        None => UdpLineSource::bind(("0.0.0.0", args.udp_port))
            .and_then(|source| run_driver(source, config, SessionConfig::default())),
    });
    let (mut driver_threads, snapshot_rx) = match driver {
        Ok(driver) => driver,
        Err(e) => {
            log::error!("Failed to start the scanner: {e}");
            std::process::exit(1);
        }
    };

    let mut window: PistonWindow = WindowSettings::new("LIDAR Visualization (3m radius)", [800, 800])
        .build()
        .unwrap();
    window.set_max_fps(FPS);

    let mut scan = ScanSnapshot::default();
    let mut disconnected = false;
    while !disconnected
        && draw_piston_window(&mut window, |b: PistonBackend| {
            loop {
                match snapshot_rx.try_recv() {
                    Ok(latest) => scan = latest,
                    Err(TryRecvError::Empty) => break,
                    Err(TryRecvError::Disconnected) => {
                        disconnected = true;
                        break;
                    }
                }
            }

            let root = b.into_drawing_area();
            root.fill(&WHITE)?;

            let mut cc = ChartBuilder::on(&root)
                .caption(scan.title(), ("sans-serif", 20))
                .margin(10)
                .x_label_area_size(30)
                .y_label_area_size(40)
                .build_cartesian_2d(-WINDOW_RANGE..WINDOW_RANGE, -WINDOW_RANGE..WINDOW_RANGE)?;
            cc.configure_mesh()
                .x_desc(format!("X ({unit})"))
                .y_desc(format!("Y ({unit})"))
                .draw()?;

            for radius in REFERENCE_RADII {
                cc.draw_series(LineSeries::new(circle_outline(radius), &BLACK.mix(0.3)))?;
            }
            cc.draw_series(LineSeries::new(circle_outline(WINDOW_RANGE), &RED))?;

            let circles: Vec<_> = scan
                .points
                .iter()
                .map(|p| Circle::new((p.x, p.y), 2, BLUE.filled()))
                .collect();
            cc.draw_series(circles)?;

            Ok(())
        })
        .is_some()
    {}

    if disconnected {
        // the reader thread has exited; collect its result
        if let Err(e) = join(&mut driver_threads) {
            log::error!("Scanner stopped: {e}");
            std::process::exit(1);
        }
        log::info!("Scanner stopped");
    }
    drop(driver_threads);
}

//! Entry point for the **handctl** daemon.
//!
//! Spawns the landmark [`FrameSource`](handctl::traits::FrameSource) on a
//! background thread and runs the gesture pipeline on the main thread.
//! SIGINT / SIGTERM stop the pipeline; a held mouse button is released
//! before the process exits.

use handctl::config::{Config, DispatcherKind};
use handctl::controller::GestureController;
use handctl::hyprland::dispatcher::HyprlandDispatcher;
use handctl::ipc::listener::UnixSocketFrameSource;
use handctl::landmarks::LandmarkFrame;
use handctl::output::JsonLinesDispatcher;
use handctl::pipeline::Pipeline;
use handctl::traits::{ActionDispatcher, FrameSource};
use log::{error, info};
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{mpsc, Arc};

/// Default socket path for the frame listener.
fn default_socket_path() -> PathBuf {
    let runtime = std::env::var("XDG_RUNTIME_DIR").unwrap_or_else(|_| "/tmp".into());
    PathBuf::from(runtime).join("handctl.sock")
}

/// Resolve the config directory (`$XDG_CONFIG_HOME/handctl`).
fn config_dir() -> PathBuf {
    let base = std::env::var("XDG_CONFIG_HOME").unwrap_or_else(|_| {
        let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".into());
        format!("{}/.config", home)
    });
    PathBuf::from(base).join("handctl")
}

/// Load `$XDG_CONFIG_HOME/handctl/config.json`.
///
/// A missing file means defaults.  A file that exists but does not parse or
/// validate is fatal.
fn load_config() -> Config {
    let path = config_dir().join("config.json");
    if !path.exists() {
        info!("no config file at {}, using defaults", path.display());
        return Config::default();
    }
    match Config::load(&path) {
        Ok(cfg) => {
            info!("loaded config from {}", path.display());
            cfg
        }
        Err(e) => {
            error!("{}", e);
            std::process::exit(1);
        }
    }
}

//  Main

fn main() {
    env_logger::init();

    let config = load_config();
    let pipeline = Pipeline::new(&config.gestures);

    let stop = Arc::new(AtomicBool::new(false));
    let stop_handler = stop.clone();
    if let Err(e) = ctrlc::set_handler(move || {
        stop_handler.store(true, Ordering::SeqCst);
    }) {
        error!("failed to install signal handler: {}", e);
        std::process::exit(1);
    }

    let (frame_tx, frame_rx) = mpsc::channel::<LandmarkFrame>();
    let socket_path = config.socket_path.clone().unwrap_or_else(default_socket_path);
    spawn_frame_source(socket_path, frame_tx);

    match config.dispatcher {
        DispatcherKind::Stdout => run(
            pipeline,
            JsonLinesDispatcher::new(std::io::stdout()),
            frame_rx,
            &stop,
        ),
        DispatcherKind::Hyprland => match HyprlandDispatcher::new() {
            Ok(d) => run(pipeline, d, frame_rx, &stop),
            Err(e) => {
                error!("failed to connect to hyprland: {}", e);
                std::process::exit(1);
            }
        },
    }
}

fn run<D: ActionDispatcher>(
    pipeline: Pipeline,
    dispatcher: D,
    frames: mpsc::Receiver<LandmarkFrame>,
    stop: &AtomicBool,
) {
    GestureController::new(pipeline, dispatcher).run(frames, stop);
    info!("handctl stopped");
}

//  Helpers

fn spawn_frame_source(path: PathBuf, tx: mpsc::Sender<LandmarkFrame>) {
    std::thread::spawn(move || {
        let mut source = UnixSocketFrameSource::new(&path);
        if let Err(e) = source.run(tx) {
            error!("frame source error: {}", e);
        }
    });
}

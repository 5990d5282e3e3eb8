//! [`ActionDispatcher`] implementation backed by Hyprland IPC.
//!
//! Talks to Hyprland through its command socket at
//! `$XDG_RUNTIME_DIR/hypr/$HYPRLAND_INSTANCE_SIGNATURE/.socket.sock`.
//! Cursor positions are mapped onto the monitor that was focused when the
//! dispatcher was created.
//!
//! Hyprland's dispatchers cannot press or release pointer buttons, so
//! [`mouse_down`](ActionDispatcher::mouse_down),
//! [`mouse_up`](ActionDispatcher::mouse_up) and
//! [`click`](ActionDispatcher::click) report
//! [`HyprlandDispatchError::Unsupported`].

use crate::action::Direction;
use crate::traits::ActionDispatcher;
use log::debug;
use serde::Deserialize;
use std::io::{Read, Write};
use std::os::unix::net::UnixStream;
use std::path::PathBuf;

/// Errors that can occur when talking to Hyprland.
#[derive(Debug, thiserror::Error)]
pub enum HyprlandDispatchError {
    #[error("hyprland IPC error: {0}")]
    Ipc(String),
    #[error("{0} is not supported by the hyprland backend")]
    Unsupported(&'static str),
}

/// Pixel geometry of the monitor the cursor is confined to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonitorGeometry {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
    pub scale: f64,
}

impl MonitorGeometry {
    /// Map a normalised `(x, y)` in `[0, 1]` to layout coordinates.
    ///
    /// Out-of-range input is clamped to the monitor's edges.
    pub fn to_layout(&self, x: f64, y: f64) -> (i32, i32) {
        let scale = if self.scale > 0.0 { self.scale } else { 1.0 };
        let w = self.width as f64 / scale;
        let h = self.height as f64 / scale;
        let px = self.x + (x.clamp(0.0, 1.0) * (w - 1.0).max(0.0)).round() as i32;
        let py = self.y + (y.clamp(0.0, 1.0) * (h - 1.0).max(0.0)).round() as i32;
        (px, py)
    }
}

/// Hyprland-backed action dispatcher.
pub struct HyprlandDispatcher {
    monitor: MonitorGeometry,
}

impl HyprlandDispatcher {
    /// Connect to Hyprland and cache the focused monitor's geometry.
    pub fn new() -> Result<Self, HyprlandDispatchError> {
        let json = ipc_json("monitors")?;
        let monitor = focused_monitor(&json)?;
        debug!("hyprland monitor geometry: {:?}", monitor);
        Ok(Self { monitor })
    }

    /// Use a fixed monitor geometry instead of querying Hyprland.
    pub fn with_monitor(monitor: MonitorGeometry) -> Self {
        Self { monitor }
    }

    pub fn monitor(&self) -> MonitorGeometry {
        self.monitor
    }
}

/// The `movecursor` dispatch for a normalised position.
fn movecursor_args(monitor: &MonitorGeometry, x: f64, y: f64) -> String {
    let (px, py) = monitor.to_layout(x, y);
    format!("movecursor {} {}", px, py)
}

/// The relative workspace dispatch for a swipe.
fn workspace_args(direction: Direction) -> &'static str {
    match direction {
        Direction::Left => "workspace r-1",
        Direction::Right => "workspace r+1",
    }
}

//  Direct Hyprland IPC helpers

fn socket_path() -> Result<PathBuf, HyprlandDispatchError> {
    let runtime_dir = std::env::var("XDG_RUNTIME_DIR")
        .map_err(|_| HyprlandDispatchError::Ipc("XDG_RUNTIME_DIR not set".into()))?;
    let his = std::env::var("HYPRLAND_INSTANCE_SIGNATURE")
        .map_err(|_| HyprlandDispatchError::Ipc("HYPRLAND_INSTANCE_SIGNATURE not set".into()))?;
    Ok(PathBuf::from(format!(
        "{}/hypr/{}/.socket.sock",
        runtime_dir, his
    )))
}

fn ipc_request(command: &str) -> Result<String, HyprlandDispatchError> {
    let path = socket_path()?;
    let mut stream = UnixStream::connect(&path).map_err(|e| {
        HyprlandDispatchError::Ipc(format!("connect to {}: {}", path.display(), e))
    })?;

    stream
        .write_all(command.as_bytes())
        .map_err(|e| HyprlandDispatchError::Ipc(format!("write: {}", e)))?;

    let mut response = Vec::new();
    stream
        .read_to_end(&mut response)
        .map_err(|e| HyprlandDispatchError::Ipc(format!("read: {}", e)))?;

    String::from_utf8(response).map_err(|e| HyprlandDispatchError::Ipc(format!("utf-8: {}", e)))
}

fn ipc_json(data_command: &str) -> Result<String, HyprlandDispatchError> {
    ipc_request(&format!("j/{}", data_command))
}

/// Send a dispatch command and check for `"ok"`.
fn ipc_dispatch(args: &str) -> Result<(), HyprlandDispatchError> {
    let response = ipc_request(&format!("/dispatch {}", args))?;
    if response.trim() == "ok" {
        Ok(())
    } else {
        Err(HyprlandDispatchError::Ipc(format!(
            "dispatch error: {}",
            response
        )))
    }
}

//  Minimal serde structs for the JSON we care about

/// Subset of the JSON object returned by `j/monitors`.
#[derive(Deserialize)]
struct MonitorJson {
    width: u32,
    height: u32,
    x: i32,
    y: i32,
    #[serde(default = "unit_scale")]
    scale: f64,
    #[serde(default)]
    focused: bool,
}

fn unit_scale() -> f64 {
    1.0
}

/// Pick the focused monitor out of a `j/monitors` reply, falling back to
/// the first one listed.
fn focused_monitor(json: &str) -> Result<MonitorGeometry, HyprlandDispatchError> {
    let monitors: Vec<MonitorJson> = serde_json::from_str(json)
        .map_err(|e| HyprlandDispatchError::Ipc(format!("parse: {}", e)))?;
    let m = monitors
        .iter()
        .find(|m| m.focused)
        .or_else(|| monitors.first())
        .ok_or_else(|| HyprlandDispatchError::Ipc("no monitors reported".into()))?;
    Ok(MonitorGeometry {
        x: m.x,
        y: m.y,
        width: m.width,
        height: m.height,
        scale: m.scale,
    })
}

//  ActionDispatcher implementation

impl ActionDispatcher for HyprlandDispatcher {
    type Error = HyprlandDispatchError;

    fn cursor_move(&mut self, x: f64, y: f64) -> Result<(), Self::Error> {
        ipc_dispatch(&movecursor_args(&self.monitor, x, y))
    }

    fn mouse_down(&mut self) -> Result<(), Self::Error> {
        Err(HyprlandDispatchError::Unsupported("mouse down"))
    }

    fn mouse_up(&mut self) -> Result<(), Self::Error> {
        Err(HyprlandDispatchError::Unsupported("mouse up"))
    }

    fn click(&mut self) -> Result<(), Self::Error> {
        Err(HyprlandDispatchError::Unsupported("click"))
    }

    fn switch_desktop(&mut self, direction: Direction) -> Result<(), Self::Error> {
        ipc_dispatch(workspace_args(direction))
    }
}

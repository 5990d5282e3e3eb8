//! **handctl**: hand-gesture control of the pointer and virtual desktops.
//!
//! A hand tracker streams 21-point landmark frames.  Each frame is
//! classified into a static pose (fist, open palm, neutral), the index
//! knuckle is tracked over a short window to detect horizontal
//! swipes, and a small state machine turns poses, swipes and the smoothed
//! hand position into pointer and desktop actions.
//!
//! # Architecture
//!
//! The crate is organised around three traits:
//!
//! * [`traits::FrameSource`]: abstracts the transport that delivers
//!   landmark frames (a Unix socket, a replay file, …).
//! * [`traits::ActionDispatcher`]: abstracts whatever performs the
//!   resulting actions, so the gesture logic is not coupled to any
//!   operating system or compositor.
//! * [`traits::Clock`]: the monotonic time source used for cooldowns.
//!
//! The per-frame logic lives in [`pipeline::Pipeline`], which is pure and
//! synchronous.  Concrete implementations live in [`ipc`] (Unix-socket frame
//! source), [`output`] (JSON-lines actions) and [`hyprland`] (Hyprland IPC).

pub mod action;
pub mod arbiter;
pub mod buffer;
pub mod classifier;
pub mod config;
pub mod controller;
pub mod hyprland;
pub mod ipc;
pub mod landmarks;
pub mod output;
pub mod pipeline;
pub mod smoother;
pub mod swipe;
pub mod traits;

#[cfg(test)]
mod testing;

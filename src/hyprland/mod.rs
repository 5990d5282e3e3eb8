//! Hyprland-specific implementations.
//!
//! Provides a concrete [`ActionDispatcher`](crate::traits::ActionDispatcher)
//! powered by Hyprland's IPC socket.
//!
//! Nothing outside this module should reference Hyprland directly.

pub mod dispatcher;

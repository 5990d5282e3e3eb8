//! Frame input from the hand tracker over a Unix socket.
//!
//! The tracker process connects to the socket and streams
//! newline-delimited JSON landmark frames.

pub mod listener;

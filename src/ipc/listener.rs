//! Unix-socket [`FrameSource`] implementation.
//!
//! Binds a Unix stream socket and accepts one tracker connection at a time.
//! Each line received is parsed as a JSON-encoded
//! [`FrameMessage`](crate::landmarks::FrameMessage).
//!
//! # Wire format
//!
//! ```json
//! {"landmarks":[[0.51,0.80],[0.47,0.74], ... 21 points]}
//! {"landmarks":null}
//! ```
//!
//! When the tracker disconnects, a single [`LandmarkFrame::Absent`] is
//! forwarded so the pipeline treats it like a lost hand.

use crate::landmarks::{FrameMessage, LandmarkFrame};
use crate::traits::FrameSource;
use log::{debug, error, info, warn};
use std::io::{BufRead, BufReader};
use std::os::unix::net::UnixListener;
use std::path::{Path, PathBuf};
use std::sync::mpsc;

/// A [`FrameSource`] that listens on a Unix stream socket for
/// newline-delimited JSON frames.
pub struct UnixSocketFrameSource {
    path: PathBuf,
}

/// Errors produced by the Unix socket frame source.
#[derive(Debug, thiserror::Error)]
pub enum FrameSourceError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl UnixSocketFrameSource {
    /// Create a new source bound to `path`.
    ///
    /// The socket file is created when [`run`](FrameSource::run) is called;
    /// a stale file at the same path is removed first.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Decode one wire line.  Blank lines yield `None`.
pub(crate) fn parse_frame_line(line: &str) -> Option<Result<LandmarkFrame, serde_json::Error>> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }
    Some(serde_json::from_str::<FrameMessage>(line).map(LandmarkFrame::from))
}

impl FrameSource for UnixSocketFrameSource {
    type Error = FrameSourceError;

    /// Bind the socket and start accepting tracker connections.
    ///
    /// This method **blocks** until the sink is closed.  Run it on a
    /// dedicated thread.
    fn run(&mut self, sink: mpsc::Sender<LandmarkFrame>) -> Result<(), Self::Error> {
        let _ = std::fs::remove_file(&self.path);

        let listener = UnixListener::bind(&self.path)?;
        info!("listening for frames on {}", self.path.display());

        for stream in listener.incoming() {
            let stream = match stream {
                Ok(s) => s,
                Err(e) => {
                    error!("accept error: {}", e);
                    continue;
                }
            };
            info!("tracker connected");
            let mut frames = 0u64;
            for line in BufReader::new(stream).lines() {
                let text = match line {
                    Ok(text) => text,
                    Err(e) => {
                        error!("read error: {}", e);
                        break;
                    }
                };
                match parse_frame_line(&text) {
                    None => continue,
                    Some(Ok(frame)) => {
                        frames += 1;
                        if sink.send(frame).is_err() {
                            info!("sink closed, shutting down");
                            return Ok(());
                        }
                    }
                    Some(Err(e)) => warn!("bad frame: {}", e),
                }
            }
            debug!("tracker sent {} frames", frames);
            info!("tracker disconnected");
            if sink.send(LandmarkFrame::Absent).is_err() {
                return Ok(());
            }
        }
        Ok(())
    }
}

//  Tests

#[cfg(test)]
mod tests {
    use super::*;
    use crate::landmarks::{Point, REFERENCE_MCP};
    use std::io::Write;
    use std::os::unix::net::UnixStream;
    use std::sync::atomic::{AtomicU32, Ordering};

    /// Monotonic counter to generate unique socket paths per test.
    static TEST_ID: AtomicU32 = AtomicU32::new(0);

    fn tmp_socket_path() -> PathBuf {
        let id = TEST_ID.fetch_add(1, Ordering::SeqCst);
        std::env::temp_dir().join(format!("handctl-test-{}-{}.sock", std::process::id(), id))
    }

    fn hand_line(x: f64, y: f64) -> String {
        let pts = vec![format!("[{},{}]", x, y); 21].join(",");
        format!(r#"{{"landmarks":[{}]}}"#, pts)
    }

    #[test]
    fn parse_frame_line_variants() {
        assert!(parse_frame_line("   ").is_none());
        let frame = parse_frame_line(&hand_line(0.25, 0.5)).unwrap().unwrap();
        assert_eq!(frame.hand().unwrap().get(REFERENCE_MCP), Point::new(0.25, 0.5));
        let frame = parse_frame_line(r#"{"landmarks":null}"#).unwrap().unwrap();
        assert!(frame.is_absent());
        assert!(parse_frame_line("not json").unwrap().is_err());
    }

    #[test]
    fn frames_over_socket_then_absent_on_disconnect() {
        let path = tmp_socket_path();
        let path_clone = path.clone();
        let (tx, rx) = mpsc::channel();

        let _handle = std::thread::spawn(move || {
            let mut source = UnixSocketFrameSource::new(&path_clone);
            let _ = source.run(tx);
        });

        // Give the listener a moment to bind.
        std::thread::sleep(std::time::Duration::from_millis(150));

        {
            let mut stream = UnixStream::connect(&path).expect("connect");
            writeln!(stream, "{}", hand_line(0.5, 0.5)).unwrap();
            writeln!(stream, "garbage").unwrap();
            writeln!(stream).unwrap();
            writeln!(stream, r#"{{"landmarks":null}}"#).unwrap();
            stream.shutdown(std::net::Shutdown::Write).unwrap();
        }

        std::thread::sleep(std::time::Duration::from_millis(150));
        let frames: Vec<LandmarkFrame> = rx.try_iter().collect();

        assert_eq!(frames.len(), 3);
        assert!(frames[0].hand().is_some());
        assert!(frames[1].is_absent());
        // Disconnect.
        assert!(frames[2].is_absent());

        let _ = std::fs::remove_file(&path);
    }
}

// src/exec/output.rs

//! Forwarding of child process output into the event stream.

use std::time::Duration;

use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::debug;

use super::events::BuildEvent;

/// How long to keep reading after the process exited, in case a leftover
/// child still holds the pipe open.
pub const DRAIN_GRACE: Duration = Duration::from_secs(2);

/// Decode one raw output line.
///
/// Invalid UTF-8 is replaced with U+FFFD rather than rejected, and the
/// trailing `\n` / `\r\n` is stripped.
pub fn decode_line(raw: &[u8]) -> String {
    let text = String::from_utf8_lossy(raw);
    text.trim_end_matches(['\n', '\r']).to_string()
}

/// Spawn a task that reads `reader` line by line and publishes every line as
/// [`BuildEvent::LineReceived`]. Ends at EOF or on a read error.
pub fn spawn_line_forwarder<R>(reader: R, events: mpsc::Sender<BuildEvent>) -> JoinHandle<()>
where
    R: AsyncRead + Unpin + Send + 'static,
{
    tokio::spawn(async move {
        let mut reader = BufReader::new(reader);
        let mut buf = Vec::new();

        loop {
            buf.clear();
            match reader.read_until(b'\n', &mut buf).await {
                Ok(0) => break,
                Ok(_) => {
                    let line = decode_line(&buf);
                    if events.send(BuildEvent::LineReceived(line)).await.is_err() {
                        // Nobody is listening; keep draining so the pipe never fills.
                        continue;
                    }
                }
                Err(e) => {
                    debug!(error = %e, "output stream read failed; stopping forwarder");
                    break;
                }
            }
        }
    })
}

/// Wait for forwarders to reach EOF, then abort any still running.
///
/// All forwarders share one [`DRAIN_GRACE`] deadline.
pub async fn drain_forwarders(forwarders: &mut [JoinHandle<()>]) {
    let all_done = async {
        for handle in forwarders.iter_mut() {
            let _ = handle.await;
        }
    };
    if tokio::time::timeout(DRAIN_GRACE, all_done).await.is_err() {
        debug!("output still open after process exit; aborting forwarders");
    }
    abort_forwarders(forwarders);
}

/// Stop forwarders immediately. Finished ones are left alone.
pub fn abort_forwarders(forwarders: &[JoinHandle<()>]) {
    for handle in forwarders {
        handle.abort();
    }
}

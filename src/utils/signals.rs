//! Signal handling for graceful shutdown

use std::io;

use futures::stream::StreamExt;
use signal_hook::consts::{SIGINT, SIGTERM};
use signal_hook_tokio::Signals;
use tracing::info;

/// Wait for SIGTERM or SIGINT and return the signal number
pub async fn shutdown_signal() -> io::Result<i32> {
    let mut signals = Signals::new([SIGTERM, SIGINT])?;
    let handle = signals.handle();

    let signal = signals.next().await;
    handle.close();

    received(signal)
}

/// A closed stream yields no signal, which is an error rather than a shutdown
fn received(signal: Option<i32>) -> io::Result<i32> {
    match signal {
        Some(signal) => {
            info!("Received signal: {}", signal);
            Ok(signal)
        }
        None => Err(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            "signal stream closed before a signal arrived",
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_received_signal() {
        assert_eq!(received(Some(SIGINT)).unwrap(), SIGINT);
    }

    #[test]
    fn test_closed_stream_is_not_a_signal() {
        let err = received(None).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof);
    }
}

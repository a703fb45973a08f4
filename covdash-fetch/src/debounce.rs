//! Input debouncing.
//!
//! Collapses a burst of inputs into the last one. A value is released once
//! no newer input has arrived for the quiet period, or when the input side
//! closes.

use std::time::Duration;

use futures::Stream;
use tokio::sync::mpsc;
use tokio::time::timeout;

/// Default quiet period of search input.
pub const DEFAULT_QUIET_PERIOD: Duration = Duration::from_millis(300);

/// Debounces values received on a channel.
#[derive(Debug)]
pub struct Debouncer<T> {
    rx: mpsc::Receiver<T>,
    quiet: Duration,
}

impl<T> Debouncer<T> {
    /// Wraps a receiver.
    pub fn new(rx: mpsc::Receiver<T>, quiet: Duration) -> Self {
        Self { rx, quiet }
    }

    /// Creates a channel and a debouncer over its receiving end.
    pub fn channel(buffer: usize, quiet: Duration) -> (mpsc::Sender<T>, Self) {
        let (tx, rx) = mpsc::channel(buffer.max(1));
        (tx, Self::new(rx, quiet))
    }

    /// The quiet period.
    pub fn quiet_period(&self) -> Duration {
        self.quiet
    }

    /// Waits for the next settled value.
    ///
    /// Returns `None` once the channel is closed and drained.
    pub async fn next(&mut self) -> Option<T> {
        let mut latest = self.rx.recv().await?;
        loop {
            match timeout(self.quiet, self.rx.recv()).await {
                Ok(Some(value)) => latest = value,
                Ok(None) | Err(_) => return Some(latest),
            }
        }
    }

    /// Turns the debouncer into a stream of settled values.
    pub fn into_stream(self) -> impl Stream<Item = T> {
        futures::stream::unfold(self, |mut debouncer| async move {
            let value = debouncer.next().await?;
            Some((value, debouncer))
        })
    }
}

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use thiserror::Error;

use crate::shared::record::{DetectionRecord, FrameSource};

/// Forwarding failure. The record travels back to the caller so a retry
/// never needs to clone the frame buffer.
#[derive(Error, Debug)]
pub enum ForwardError {
    #[error("downstream queue is full")]
    QueueFull(DetectionRecord),
    #[error("downstream stage is gone")]
    Disconnected(DetectionRecord),
}

/// Non-blocking handoff to the next pipeline stage.
pub trait RecordSink {
    fn try_forward(&self, record: DetectionRecord) -> Result<(), ForwardError>;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ForwardOutcome {
    Delivered,
    Dropped,
    Disconnected,
    Cancelled,
}

/// Forwards a record, applying the per-source backpressure policy when
/// the downstream queue is full.
///
/// Registration frames must reach the next stage, so they block here and
/// retry on an interval until the queue drains or `cancelled` is raised.
/// Interactive frames are expendable and dropped immediately with a
/// warning.
pub fn forward_with_backpressure(
    sink: &dyn RecordSink,
    record: DetectionRecord,
    retry_interval: Duration,
    cancelled: &AtomicBool,
) -> ForwardOutcome {
    let mut record = record;
    loop {
        record = match sink.try_forward(record) {
            Ok(()) => return ForwardOutcome::Delivered,
            Err(ForwardError::Disconnected(_)) => {
                log::error!("downstream stage is gone, record lost");
                return ForwardOutcome::Disconnected;
            }
            Err(ForwardError::QueueFull(returned)) => match returned.source() {
                FrameSource::Interactive => {
                    log::warn!("downstream queue full, dropping interactive frame");
                    return ForwardOutcome::Dropped;
                }
                FrameSource::Registration => returned,
            },
        };

        if cancelled.load(Ordering::Relaxed) {
            log::info!("shutdown requested, abandoning registration frame retry");
            return ForwardOutcome::Cancelled;
        }
        log::debug!(
            "downstream queue full, retrying registration frame in {:?}",
            retry_interval
        );
        std::thread::sleep(retry_interval);
    }
}

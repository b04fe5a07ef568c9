use crossbeam_channel::{bounded, Receiver, Sender, TrySendError};

use crate::pipeline::record_sink::{ForwardError, RecordSink};
use crate::shared::record::DetectionRecord;

/// Bounded in-process queue between the detection and publish stages.
pub struct ChannelRecordSink {
    tx: Sender<DetectionRecord>,
}

impl ChannelRecordSink {
    /// Creates the sink and the matching consumer end.
    pub fn bounded(capacity: usize) -> (Self, Receiver<DetectionRecord>) {
        let (tx, rx) = bounded(capacity);
        (Self { tx }, rx)
    }
}

impl RecordSink for ChannelRecordSink {
    fn try_forward(&self, record: DetectionRecord) -> Result<(), ForwardError> {
        self.tx.try_send(record).map_err(|e| match e {
            TrySendError::Full(r) => ForwardError::QueueFull(r),
            TrySendError::Disconnected(r) => ForwardError::Disconnected(r),
        })
    }
}

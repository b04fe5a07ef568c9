use thiserror::Error;

use crate::dispatch::domain::present_message::PresentFrame;

/// Status code returned by the visualization service for one message.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SendStatus {
    Accepted,
    Rejected { code: i32 },
}

#[derive(Error, Debug)]
pub enum TransportError {
    #[error("failed to open presenter channel '{channel}' at {host}:{port}: {message}")]
    Open {
        host: String,
        port: u16,
        channel: String,
        message: String,
    },
    #[error("presenter send failed: {0}")]
    Send(String),
}

/// Port for the outbound transport to the visualization service.
///
/// The pipeline only relies on the send contract: one structured
/// message out, one status code back, no further payload guarantees.
pub trait PresenterChannel: Send {
    fn send(&mut self, message: &PresentFrame) -> Result<SendStatus, TransportError>;
}

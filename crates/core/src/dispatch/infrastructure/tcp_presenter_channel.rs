//! Length-prefixed JSON transport to the visualization service.
//!
//! Wire format, both directions framed the same way: a big-endian u32
//! payload length followed by the payload. The service answers every
//! frame with a 4-byte big-endian status code, 0 meaning accepted.

use std::io::{Read, Write};
use std::net::TcpStream;

use serde::Serialize;

use crate::dispatch::domain::present_message::PresentFrame;
use crate::dispatch::domain::presenter_channel::{PresenterChannel, SendStatus, TransportError};
use crate::shared::config::PipelineConfig;

#[derive(Serialize)]
struct OpenRequest<'a> {
    channel: &'a str,
}

pub struct TcpPresenterChannel {
    stream: TcpStream,
}

impl TcpPresenterChannel {
    /// Connects to the service and registers the configured channel name.
    pub fn open(config: &PipelineConfig) -> Result<Self, TransportError> {
        let open_error = |message: String| TransportError::Open {
            host: config.presenter_host.clone(),
            port: config.presenter_port,
            channel: config.channel_name.clone(),
            message,
        };

        let addr = format!("{}:{}", config.presenter_host, config.presenter_port);
        let stream = TcpStream::connect(&addr).map_err(|e| open_error(e.to_string()))?;
        let mut channel = Self { stream };

        let request = OpenRequest {
            channel: &config.channel_name,
        };
        let status = channel
            .exchange(&request)
            .map_err(|e| open_error(e.to_string()))?;
        if status != 0 {
            return Err(open_error(format!("service refused channel, status {status}")));
        }

        log::info!(
            "presenter channel '{}' open at {}",
            config.channel_name,
            addr
        );
        Ok(channel)
    }

    /// Writes one framed JSON payload and reads the status reply.
    fn exchange<T: Serialize>(&mut self, payload: &T) -> std::io::Result<i32> {
        let body = serde_json::to_vec(payload)?;
        let len = u32::try_from(body.len())
            .map_err(|_| std::io::Error::other("payload exceeds frame limit"))?;
        self.stream.write_all(&len.to_be_bytes())?;
        self.stream.write_all(&body)?;
        self.stream.flush()?;

        let mut status = [0u8; 4];
        self.stream.read_exact(&mut status)?;
        Ok(i32::from_be_bytes(status))
    }
}

impl PresenterChannel for TcpPresenterChannel {
    fn send(&mut self, message: &PresentFrame) -> Result<SendStatus, TransportError> {
        let code = self
            .exchange(message)
            .map_err(|e| TransportError::Send(e.to_string()))?;
        if code == 0 {
            Ok(SendStatus::Accepted)
        } else {
            Ok(SendStatus::Rejected { code })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::TcpListener;
    use std::thread;

    use crate::shared::frame::{Frame, PixelFormat};

    fn read_frame(stream: &mut TcpStream) -> Vec<u8> {
        let mut len = [0u8; 4];
        stream.read_exact(&mut len).unwrap();
        let mut body = vec![0u8; u32::from_be_bytes(len) as usize];
        stream.read_exact(&mut body).unwrap();
        body
    }

    fn reply(stream: &mut TcpStream, status: i32) {
        stream.write_all(&status.to_be_bytes()).unwrap();
    }

    fn config(port: u16) -> PipelineConfig {
        PipelineConfig::new(0.9, "127.0.0.1", i64::from(port), "faces/demo").unwrap()
    }

    fn spawn_service(
        statuses: Vec<i32>,
    ) -> (u16, thread::JoinHandle<Vec<serde_json::Value>>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        let handle = thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let mut received = Vec::new();
            for status in statuses {
                let body = read_frame(&mut stream);
                received.push(serde_json::from_slice(&body).unwrap());
                reply(&mut stream, status);
            }
            received
        });
        (port, handle)
    }

    fn message() -> PresentFrame {
        let frame = Frame::new(vec![0xff, 0xd8], 16, 16, PixelFormat::Jpeg);
        PresentFrame::build(frame, &[])
    }

    #[test]
    fn test_open_registers_channel_name() {
        let (port, handle) = spawn_service(vec![0]);
        let channel = TcpPresenterChannel::open(&config(port));
        assert!(channel.is_ok());

        let received = handle.join().unwrap();
        assert_eq!(received[0]["channel"], "faces/demo");
    }

    #[test]
    fn test_open_fails_when_service_refuses() {
        let (port, handle) = spawn_service(vec![7]);
        let result = TcpPresenterChannel::open(&config(port));
        assert!(matches!(result, Err(TransportError::Open { .. })));
        handle.join().unwrap();
    }

    #[test]
    fn test_open_fails_without_listener() {
        // Port 1 is privileged and unbound in the test environment.
        let result = TcpPresenterChannel::open(&config(1));
        assert!(matches!(result, Err(TransportError::Open { .. })));
    }

    #[test]
    fn test_send_accepted() {
        let (port, handle) = spawn_service(vec![0, 0]);
        let mut channel = TcpPresenterChannel::open(&config(port)).unwrap();

        let status = channel.send(&message()).unwrap();
        assert_eq!(status, SendStatus::Accepted);

        let received = handle.join().unwrap();
        assert_eq!(received[1]["format"], "jpeg");
        assert_eq!(received[1]["width"], 1280);
        assert_eq!(received[1]["height"], 720);
    }

    #[test]
    fn test_send_rejected_carries_status_code() {
        let (port, handle) = spawn_service(vec![0, 3]);
        let mut channel = TcpPresenterChannel::open(&config(port)).unwrap();

        let status = channel.send(&message()).unwrap();
        assert_eq!(status, SendStatus::Rejected { code: 3 });
        handle.join().unwrap();
    }
}

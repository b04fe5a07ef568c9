use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("confidence {0} is outside the valid range (0.0, 1.0]")]
    Confidence(f32),
    #[error("presenter host '{0}' is not a dotted-quad IPv4 address")]
    Host(String),
    #[error("presenter port {0} is outside the valid range 1-65535")]
    Port(i64),
    #[error("channel name '{0}' must be non-empty and match [a-zA-Z0-9/]+")]
    ChannelName(String),
}

/// Read-only pipeline configuration, validated once at startup.
///
/// Any invalid value is fatal: the pipeline never processes a record
/// with a half-checked configuration.
#[derive(Clone, Debug, PartialEq)]
pub struct PipelineConfig {
    pub confidence_threshold: f32,
    pub presenter_host: String,
    pub presenter_port: u16,
    pub channel_name: String,
}

impl PipelineConfig {
    pub fn new(
        confidence_threshold: f32,
        presenter_host: &str,
        presenter_port: i64,
        channel_name: &str,
    ) -> Result<Self, ConfigError> {
        if !(confidence_threshold > 0.0 && confidence_threshold <= 1.0) {
            return Err(ConfigError::Confidence(confidence_threshold));
        }
        if !is_dotted_quad(presenter_host) {
            return Err(ConfigError::Host(presenter_host.to_string()));
        }
        if !(1..=65535).contains(&presenter_port) {
            return Err(ConfigError::Port(presenter_port));
        }
        if !is_valid_channel_name(channel_name) {
            return Err(ConfigError::ChannelName(channel_name.to_string()));
        }
        Ok(Self {
            confidence_threshold,
            presenter_host: presenter_host.to_string(),
            presenter_port: presenter_port as u16,
            channel_name: channel_name.to_string(),
        })
    }
}

/// Strict IPv4 check: exactly four octets 0-255, decimal, no leading
/// zeros, no surrounding or trailing garbage.
fn is_dotted_quad(host: &str) -> bool {
    let octets: Vec<&str> = host.split('.').collect();
    if octets.len() != 4 {
        return false;
    }
    octets.iter().all(|octet| {
        if octet.is_empty() || octet.len() > 3 {
            return false;
        }
        if !octet.bytes().all(|b| b.is_ascii_digit()) {
            return false;
        }
        if octet.len() > 1 && octet.starts_with('0') {
            return false;
        }
        octet.parse::<u16>().is_ok_and(|v| v <= 255)
    })
}

fn is_valid_channel_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'/')
}

use std::path::{Path, PathBuf};
use std::process;
use std::sync::atomic::AtomicBool;
use std::thread;

use clap::Parser;

use facecast_core::codec::infrastructure::cpu_image_codec::CpuImageCodec;
use facecast_core::codec::infrastructure::yuv::rgb_to_nv12;
use facecast_core::detection::infrastructure::onnx_model_runner::OnnxModelRunner;
use facecast_core::dispatch::infrastructure::tcp_presenter_channel::TcpPresenterChannel;
use facecast_core::pipeline::detect_stage;
use facecast_core::pipeline::infrastructure::channel_record_sink::ChannelRecordSink;
use facecast_core::pipeline::publish_stage;
use facecast_core::shared::config::PipelineConfig;
use facecast_core::shared::constants::QUEUE_RETRY_INTERVAL;
use facecast_core::shared::frame::{Frame, PixelFormat};
use facecast_core::shared::record::{DetectionRecord, FrameSource};

/// Face detection pipeline publishing annotated frames to a
/// visualization service.
#[derive(Parser)]
#[command(name = "facecast")]
struct Cli {
    /// Input image files, processed in order.
    #[arg(required = true)]
    inputs: Vec<PathBuf>,

    /// Path to the face detection ONNX model.
    #[arg(long)]
    model: PathBuf,

    /// Detection confidence threshold, in (0.0, 1.0].
    #[arg(long, default_value = "0.9")]
    confidence: f32,

    /// Visualization service IPv4 address.
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// Visualization service port.
    #[arg(long, default_value = "7006")]
    port: i64,

    /// Channel name to publish on ([a-zA-Z0-9/]).
    #[arg(long, default_value = "faces/live")]
    channel: String,

    /// Frame source: interactive or registration.
    #[arg(long, default_value = "interactive")]
    source: String,

    /// Queue depth between the detection and publish stages.
    #[arg(long, default_value = "8")]
    queue_depth: usize,
}

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let source = parse_source(&cli.source)?;
    let config = PipelineConfig::new(cli.confidence, &cli.host, cli.port, &cli.channel)?;
    for input in &cli.inputs {
        if !input.exists() {
            return Err(format!("Input file not found: {}", input.display()).into());
        }
    }

    let mut runner = OnnxModelRunner::new(&cli.model)?;
    let mut presenter = TcpPresenterChannel::open(&config)?;
    let (sink, rx) = ChannelRecordSink::bounded(cli.queue_depth);

    let threshold = config.confidence_threshold;
    let inputs = cli.inputs;
    let detect_thread = thread::spawn(move || -> Result<(), String> {
        let codec = CpuImageCodec::new();
        let cancelled = AtomicBool::new(false);
        for input in &inputs {
            let frame = load_frame(input).map_err(|e| e.to_string())?;
            let record = DetectionRecord::new(frame, source);
            let outcome = detect_stage::run(
                &codec,
                &mut runner,
                threshold,
                record,
                &sink,
                QUEUE_RETRY_INTERVAL,
                &cancelled,
            );
            log::debug!("{}: {outcome:?}", input.display());
        }
        Ok(())
    });

    let codec = CpuImageCodec::new();
    let mut published = 0usize;
    for record in &rx {
        // Per-frame publish failures are logged, not fatal: the
        // remaining frames still go out.
        match publish_stage::process(&codec, &mut presenter, record) {
            Ok(status) => {
                log::debug!("frame published, status {status:?}");
                published += 1;
            }
            Err(e) => log::error!("publish failed, skipping frame: {e}"),
        }
    }
    drop(rx);

    detect_thread
        .join()
        .map_err(|_| "detection stage panicked")??;

    log::info!(
        "{published} frame(s) published to '{}'",
        config.channel_name
    );
    Ok(())
}

/// Loads an image file as an NV12 frame, trimming any odd edge row or
/// column since 4:2:0 subsampling needs even dimensions.
fn load_frame(path: &Path) -> Result<Frame, Box<dyn std::error::Error>> {
    let rgb = image::open(path)?.to_rgb8();
    let width = rgb.width() & !1;
    let height = rgb.height() & !1;
    if width == 0 || height == 0 {
        return Err(format!("Image too small to process: {}", path.display()).into());
    }

    let row_bytes = (rgb.width() * 3) as usize;
    let kept_bytes = (width * 3) as usize;
    let mut trimmed = Vec::with_capacity((width * height * 3) as usize);
    for y in 0..height as usize {
        let start = y * row_bytes;
        trimmed.extend_from_slice(&rgb.as_raw()[start..start + kept_bytes]);
    }

    let data = rgb_to_nv12(&trimmed, width, height);
    Ok(Frame::new(data, width, height, PixelFormat::Yuv420sp))
}

fn parse_source(source: &str) -> Result<FrameSource, Box<dyn std::error::Error>> {
    match source {
        "interactive" => Ok(FrameSource::Interactive),
        "registration" => Ok(FrameSource::Registration),
        other => Err(format!(
            "Source must be 'interactive' or 'registration', got '{other}'"
        )
        .into()),
    }
}

//! Glimpse - camera-and-voice scene description client
//!
//! Main entry point: parse arguments, start the orchestrator thread, run
//! the UI.

use anyhow::Result;
use clap::Parser;
use glimpse::config::{ClientConfig, DEFAULT_SERVER_URL};
use glimpse::orchestrator::{self, Orchestrator, OrchestratorParts};
use glimpse::ui::GlimpseApp;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "glimpse", about = "Camera-and-voice scene description client")]
struct Args {
    /// Base URL of the inference server
    #[arg(long, env = "GLIMPSE_SERVER", default_value = DEFAULT_SERVER_URL)]
    server: String,

    /// Camera device index
    #[arg(long, default_value_t = 0)]
    camera: u32,
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "glimpse=debug,info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();
    let config = ClientConfig::new(args.server)?.with_camera_index(args.camera);
    info!("Starting Glimpse against {}", config.server_url);

    let (handle, wiring) = orchestrator::wire(config.channel_buffer_size);

    // Devices and the HTTP client live on the orchestrator thread
    let orch_config = config.clone();
    std::thread::Builder::new()
        .name("orchestrator".to_string())
        .spawn(move || {
            let parts = build_parts(&orch_config);
            match Orchestrator::new(orch_config, parts, wiring) {
                Ok(orchestrator) => orchestrator.run(),
                Err(e) => error!("Failed to start orchestrator: {}", e),
            }
        })?;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([960.0, 640.0])
            .with_min_inner_size([640.0, 480.0])
            .with_title("Glimpse"),
        ..Default::default()
    };

    eframe::run_native(
        "Glimpse",
        options,
        Box::new(|cc| Ok(Box::new(GlimpseApp::new(cc, handle)))),
    )
    .map_err(|e| anyhow::anyhow!("UI error: {}", e))
}

fn build_parts(config: &ClientConfig) -> OrchestratorParts {
    let service = Box::new(glimpse::api::HttpAskService::new(config.server_url.clone()));

    #[cfg(feature = "camera-io")]
    let feed: Option<Box<dyn glimpse::capture::VideoFeed>> =
        match glimpse::capture::CameraFeed::new(config.camera_index) {
            Ok(camera) => Some(Box::new(camera)),
            Err(e) => {
                error!("Camera unavailable: {}", e);
                None
            }
        };
    #[cfg(not(feature = "camera-io"))]
    let feed: Option<Box<dyn glimpse::capture::VideoFeed>> = {
        tracing::warn!("Built without camera-io; frame capture disabled");
        None
    };

    #[cfg(feature = "audio-io")]
    let capture: Option<Box<dyn glimpse::audio::AudioCapture>> =
        match glimpse::audio::MicCapture::new() {
            Ok(mic) => Some(Box::new(mic)),
            Err(e) => {
                error!("Microphone unavailable: {}", e);
                None
            }
        };
    #[cfg(not(feature = "audio-io"))]
    let capture: Option<Box<dyn glimpse::audio::AudioCapture>> = {
        tracing::warn!("Built without audio-io; voice questions disabled");
        None
    };

    #[cfg(feature = "audio-io")]
    let sink: Box<dyn glimpse::audio::SpeechSink> = Box::new(glimpse::audio::RodioSink::new());
    #[cfg(not(feature = "audio-io"))]
    let sink: Box<dyn glimpse::audio::SpeechSink> = Box::new(NullSink);

    OrchestratorParts {
        service,
        feed,
        capture,
        sink,
    }
}

/// Playback stub for builds without audio output
#[cfg(not(feature = "audio-io"))]
struct NullSink;

#[cfg(not(feature = "audio-io"))]
impl glimpse::audio::SpeechSink for NullSink {
    fn play(&mut self, _audio: Vec<u8>) -> glimpse::Result<()> {
        Err(glimpse::GlimpseError::PlaybackError(
            "built without audio-io".to_string(),
        ))
    }
}

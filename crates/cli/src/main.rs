use std::path::{Path, PathBuf};
use std::process;
use std::sync::Arc;
use std::time::Duration;

use clap::{Parser, Subcommand};

use deepshield_core::client::detect_client::DetectClient;
use deepshield_core::client::detect_response::DetectResult;
use deepshield_core::client::media_selection::{MediaSelection, MediaSlot};
use deepshield_core::detection::infrastructure::model_resolver::{self, ModelSource};
use deepshield_core::detection::infrastructure::onnx_facenet_embedder::OnnxFacenetEmbedder;
use deepshield_core::pipeline::compare_media_use_case::CompareMediaUseCase;
use deepshield_core::pipeline::pipeline_logger::LogPipelineLogger;
use deepshield_core::shared::constants::{
    DEFAULT_NUM_FRAMES, DEFAULT_SERVER_URL, EMBEDDING_MODEL_NAME, EMBEDDING_MODEL_URL_ENV,
};
use deepshield_core::video::infrastructure::ffmpeg_media_opener::FfmpegMediaOpener;

/// Compare a real face sample against a suspected deepfake.
#[derive(Parser)]
#[command(name = "deepshield", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Upload both files to a detection server and print the result.
    Detect {
        /// Real video or picture.
        real: PathBuf,

        /// Deep fake video or picture.
        fake: PathBuf,

        /// Detection server base URL.
        #[arg(long, default_value = DEFAULT_SERVER_URL)]
        server: String,

        /// Request timeout in seconds.
        #[arg(long, default_value = "300")]
        timeout: u64,
    },

    /// Run the comparison locally without a server.
    Compare {
        /// Real video or picture.
        real: PathBuf,

        /// Deep fake video or picture.
        fake: PathBuf,

        /// Facenet512 ONNX model (defaults to the cached model).
        #[arg(long)]
        model: Option<PathBuf>,

        /// Frames sampled from each video.
        #[arg(long, default_value_t = DEFAULT_NUM_FRAMES)]
        frames: usize,
    },

    /// Check that a detection server is up.
    Health {
        /// Detection server base URL.
        #[arg(long, default_value = DEFAULT_SERVER_URL)]
        server: String,
    },
}

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    match Cli::parse().command {
        Command::Detect {
            real,
            fake,
            server,
            timeout,
        } => run_detect(&real, &fake, &server, timeout),
        Command::Compare {
            real,
            fake,
            model,
            frames,
        } => run_compare(&real, &fake, model.as_deref(), frames),
        Command::Health { server } => run_health(&server),
    }
}

fn run_detect(
    real: &Path,
    fake: &Path,
    server: &str,
    timeout: u64,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut selection = MediaSelection::new();
    selection.select(MediaSlot::Real, real)?;
    selection.select(MediaSlot::Fake, fake)?;
    let (real, fake) = selection.ready()?;

    let client = DetectClient::new(server, Duration::from_secs(timeout))?;
    eprintln!("Processing...");
    let result = client.detect(&real.path, &fake.path)?;
    println!("{}", render_result(&result));
    Ok(())
}

fn run_compare(
    real: &Path,
    fake: &Path,
    model: Option<&Path>,
    frames: usize,
) -> Result<(), Box<dyn std::error::Error>> {
    validate_inputs(&[real, fake])?;
    if frames == 0 {
        return Err("--frames must be at least 1".into());
    }

    log::info!("Resolving model: {EMBEDDING_MODEL_NAME}");
    let url = std::env::var(EMBEDDING_MODEL_URL_ENV).ok();
    let source = ModelSource {
        explicit: model,
        bundled_dir: None,
        url: url.as_deref(),
    };
    let model_path =
        model_resolver::resolve(EMBEDDING_MODEL_NAME, &source, Some(Box::new(download_progress)))?;
    let embedder = OnnxFacenetEmbedder::new(&model_path)?;

    let use_case =
        CompareMediaUseCase::new(Box::new(FfmpegMediaOpener), Arc::new(embedder), frames);
    let mut logger = LogPipelineLogger::new();
    let report = use_case.execute(real, fake, &mut logger)?;

    let result = DetectResult {
        cosine_similarity: report.cosine_similarity,
        euclidean_similarity: Some(report.euclidean_similarity),
        is_likely_deepfake: report.is_likely_deepfake,
    };
    println!("{}", render_result(&result));
    Ok(())
}

fn run_health(server: &str) -> Result<(), Box<dyn std::error::Error>> {
    let client = DetectClient::new(server, Duration::from_secs(10))?;
    let health = client.health()?;
    println!("{} ({})", health.status, health.timestamp);
    Ok(())
}

fn validate_inputs(paths: &[&Path]) -> Result<(), Box<dyn std::error::Error>> {
    for path in paths {
        if !path.exists() {
            return Err(format!("Input file not found: {}", path.display()).into());
        }
    }
    Ok(())
}

fn render_result(result: &DetectResult) -> String {
    let verdict = result.verdict();
    let mut lines = vec![
        "Detection Results".to_string(),
        format!("  Similarity Score: {}", result.similarity_score()),
    ];
    if let Some(euclidean) = result.euclidean_similarity {
        lines.push(format!("  Euclidean Distance: {euclidean:.2}"));
    }
    lines.push(format!("  Likely Deepfake: {}", verdict.answer()));
    lines.push(format!("  {}", verdict.description()));
    lines.join("\n")
}

fn download_progress(downloaded: u64, total: u64) {
    if total > 0 {
        let pct = (downloaded as f64 / total as f64 * 100.0) as u32;
        eprint!("\rDownloading face embedding model... {pct}%");
        if downloaded >= total {
            eprintln!();
        }
    } else {
        eprint!("\rDownloading face embedding model... {downloaded} bytes");
    }
}

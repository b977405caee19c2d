use std::path::PathBuf;
use anyhow::Context;
use clap::Parser;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;
use rm_detect::common::{ModelConfig, RmImage};
use rm_detect::data::SharedParams;
use rm_detect::detection_runners::InferenceProcess;
use rm_detect::RoiPublisher;

/// Runs the detector over image files and prints the published ROI
/// messages as JSON lines.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// JSON detector configuration.
    #[arg(short, long)]
    config: PathBuf,

    /// Directory for annotated frames (written when display is enabled).
    #[arg(long)]
    save_dir: Option<PathBuf>,

    /// Print per-stage timing.
    #[arg(long)]
    profile: bool,

    /// Input images.
    #[arg(required = true)]
    images: Vec<PathBuf>,
}

/// `RUST_LOG`-style directives on top of an `info` default.
fn log_filter(directives: Option<&str>) -> EnvFilter {
    EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .parse_lossy(directives.unwrap_or_default())
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(std::env::var("RUST_LOG").ok().as_deref()))
        .init();
    let args = Args::parse();

    let config = ModelConfig::from_file(&args.config)?;
    log::info!("Loaded configuration\n{config}");

    let params = SharedParams::new(config.runtime_params());
    let mut yolo = rm_detect::init_detector(&config, params)?;
    let (publisher, receivers) =
        RoiPublisher::with_names(config.camera_model()?, &config.roi_channel_names, config.overflow_policy);

    if let Some(dir) = &args.save_dir {
        std::fs::create_dir_all(dir).with_context(|| format!("cannot create {}", dir.display()))?;
    }

    for (frame_id, path) in args.images.iter().enumerate() {
        let image = image::open(path).with_context(|| format!("cannot open {}", path.display()))?;
        let rm_image = RmImage::new(image, frame_id as u64);

        let output = if args.profile {
            let output = yolo.forward(&rm_image, true)?;
            output.detections.iter().for_each(|d| d.print_detection());
            output
        } else {
            rm_detect::run_detection(&mut yolo, &rm_image)?
        };

        publisher.publish(&output.detections)?;
        for rx in &receivers {
            for roi in rx.try_iter() {
                println!("{}", serde_json::to_string(&roi)?);
            }
        }

        if let (Some(dir), Some(annotated)) = (&args.save_dir, output.annotated) {
            let out = dir.join(format!("{}_{frame_id:05}.png", config.camera_pub_name));
            annotated.save(&out).with_context(|| format!("cannot write {}", out.display()))?;
        }
    }

    Ok(())
}

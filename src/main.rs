//! Console harness feeding camera frames into the head pose tracker.

use anyhow::Result;
use clap::Parser;
use head_pose_tracker::{config::Config, tracker::HeadPoseTracker};
use log::{info, warn};
use opencv::{
    core::Mat,
    prelude::*,
    videoio::{self, VideoCapture},
};
use std::time::Instant;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Camera index to use
    #[arg(long, default_value = "0")]
    cam: i32,

    /// Video file to process instead of the camera
    #[arg(short, long)]
    video: Option<String>,

    /// Path to configuration file (YAML format)
    #[arg(short = 'C', long)]
    config: Option<String>,

    /// Stop after this many frames (0 = unlimited)
    #[arg(long, default_value = "0")]
    max_frames: u64,

    /// Enable debug output
    #[arg(short, long)]
    debug: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    if args.debug {
        env_logger::init_from_env(env_logger::Env::new().default_filter_or("debug"));
    } else {
        env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));
    }

    info!("Head Pose Tracker");

    let config = if let Some(config_path) = &args.config {
        info!("Loading configuration from: {config_path}");
        match Config::from_file(config_path) {
            Ok(cfg) => cfg,
            Err(e) => {
                warn!("Failed to load config file: {e}. Using defaults.");
                Config::default()
            }
        }
    } else {
        Config::default()
    };

    let mut tracker = HeadPoseTracker::new(config);
    tracker.initialize()?;

    let mut cap = if let Some(video_path) = &args.video {
        VideoCapture::from_file(video_path, videoio::CAP_ANY)?
    } else {
        VideoCapture::new(args.cam, videoio::CAP_ANY)?
    };

    let mut frame = Mat::default();
    let mut frames = 0u64;
    let start = Instant::now();

    loop {
        if !cap.read(&mut frame)? {
            break;
        }
        frames += 1;

        #[allow(clippy::cast_possible_truncation)] // session durations fit i64 millis
        let timestamp_ms = start.elapsed().as_millis() as i64;

        match tracker.process_frame(&frame, timestamp_ms)? {
            Some(pose) => println!(
                "[{timestamp_ms:>8}ms] yaw: {:+7.2}°  pitch: {:+7.2}°  roll: {:+7.2}°",
                pose.yaw, pose.pitch, pose.roll
            ),
            None => println!("[{timestamp_ms:>8}ms] no face"),
        }

        if args.max_frames > 0 && frames >= args.max_frames {
            break;
        }
    }

    info!("Processed {frames} frames");
    tracker.release();

    Ok(())
}

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use std::{
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
    time::Instant,
};
use structopt::StructOpt;
use tracing::info;
use tracing_subscriber::layer::SubscriberExt;

mod action;
mod dispatch;
mod error;
mod gesture;
mod hand;
mod keys;
mod pipeline;
mod source;

/// Play the maze with held hand poses.
#[derive(structopt::StructOpt)]
struct Opt {
    #[structopt(short, long, default_value = "info", env = "RUST_LOG")]
    log_level: tracing_subscriber::filter::EnvFilter,

    /// Log key presses instead of sending them to the OS.
    #[structopt(short = "n", long)]
    dry_run: bool,

    #[structopt(short, long)]
    show_progress: bool,

    #[structopt(subcommand)]
    source: source::Source,
}

#[cfg(feature = "keyboard")]
fn key_sink(dry_run: bool) -> Result<Box<dyn keys::KeySink>> {
    if dry_run {
        Ok(Box::new(keys::LogSink))
    } else {
        Ok(Box::new(
            keys::EnigoSink::new().context("failed connecting to the keyboard")?,
        ))
    }
}

#[cfg(not(feature = "keyboard"))]
fn key_sink(dry_run: bool) -> Result<Box<dyn keys::KeySink>> {
    if !dry_run {
        tracing::warn!("built without the keyboard feature, key presses will only be logged");
    }
    Ok(Box::new(keys::LogSink))
}

fn main() -> Result<()> {
    let opt = Opt::from_args();

    tracing::subscriber::set_global_default(
        tracing_subscriber::registry()
            .with(tracing_subscriber::fmt::layer())
            .with(opt.log_level),
    )?;

    let running = Arc::new(AtomicBool::new(true));
    let running_ctrl_c = running.clone();

    ctrlc::set_handler(move || {
        running_ctrl_c.store(false, Ordering::SeqCst);
    })
    .context("failed setting Ctrl-C handler")?;

    let mut source = opt.source.open().context("failed opening landmark source")?;
    let mut pipeline = pipeline::Pipeline::new(key_sink(opt.dry_run)?);

    let pb_gesture = if opt.show_progress {
        Some(
            ProgressBar::new_spinner().with_style(
                ProgressStyle::default_spinner()
                    .tick_chars("⠁⠂⠄⡀⢀⠠⠐⠈ ")
                    .template("{prefix:.bold.dim} {spinner} {wide_msg}"),
            ),
        )
    } else {
        None
    };

    let start = Instant::now();
    let stats = pipeline
        .run(&mut source, &running, pb_gesture.as_ref())
        .context("frame loop failed")?;

    if let Some(pb_gesture) = pb_gesture {
        pb_gesture.finish_and_clear();
    }

    info!(
        message = "done",
        frames = stats.frames,
        dispatches = stats.dispatches,
        elapsed_secs = start.elapsed().as_secs_f64(),
        processing_secs = stats.processing.as_secs_f64()
    );

    Ok(())
}

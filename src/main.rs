use archive_unnest::{
    default_threads, ExtractionOptions, InputError, Walker, DEFAULT_COMMAND_TIMEOUT,
};
use clap::Parser;
use std::num::NonZeroUsize;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{error, info, warn, Level};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

/// Extracts the given archive and all archives nested inside it, recursively.
///
/// Supported archive formats: .7z, .zip, .tar.gz, .tgz, .tar, .tar.bz2, .tbz2,
/// .tar.xz, .txz, .rar
#[derive(Debug, Clone, Parser)]
struct Args {
    /// Archive to extract
    archive: PathBuf,
    /// Directory to extract into
    output: PathBuf,
    /// Number of archives to extract in parallel
    #[clap(short, long, default_value_t = default_threads())]
    threads: NonZeroUsize,
    /// Seconds to wait for the external 7z and unrar tools before giving up
    #[clap(long, default_value_t = DEFAULT_COMMAND_TIMEOUT.as_secs())]
    timeout: u64,
    /// Maximum number of directory levels to scan for nested archives
    #[clap(short, long)]
    depth: Option<NonZeroUsize>,
}

fn main() -> anyhow::Result<()> {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            e.print()?;
            std::process::exit(e.exit_code().max(1));
        }
    };

    let env_filter = EnvFilter::builder()
        .with_default_directive(Level::INFO.into())
        .from_env()?;
    tracing_subscriber::registry()
        .with(fmt::layer().compact().with_file(false))
        .with(env_filter)
        .init();

    let options = ExtractionOptions {
        threads: args.threads,
        command_timeout: Duration::from_secs(args.timeout),
        max_depth: args.depth,
    };
    let walker = Walker::new(options)?;
    info!("Starting with {walker}");

    let cancel = walker.cancel_handle();
    ctrlc::set_handler(move || {
        warn!("Interrupted, waiting for running extractions to finish");
        cancel.cancel();
    })?;

    let report = match walker.run(&args.archive, &args.output) {
        Ok(report) => report,
        Err(e @ InputError::NotAFile(_)) => {
            error!("{e}, exiting.");
            std::process::exit(1);
        }
        Err(e) => return Err(e.into()),
    };
    println!("{report}");
    Ok(())
}

//! Runnable walkthroughs of the schema registry client.
//!
//! Each runner module performs a fixed sequence of registry calls and
//! narrates the results to a writer. The binaries in `src/bin` wire them to
//! stdout.

pub mod artifacts;
pub mod basic;
pub mod config;
pub mod error;
pub mod openapi;
pub mod schemas;
pub mod search;
pub mod spec_summary;

mod display;

use std::fmt::Display;
use std::process::ExitCode;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

pub use config::{SampleConfig, SampleDefaults};
pub use error::SampleError;

/// Install the tracing subscriber used by the binaries.
///
/// Logs go to stderr so they never interleave with the narrated output.
pub fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "librarian_samples=info,librarian_registry=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// Map a runner outcome to the process exit status.
pub fn finish<E: Display>(result: Result<(), E>) -> ExitCode {
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("\nError: {e}");
            ExitCode::FAILURE
        }
    }
}

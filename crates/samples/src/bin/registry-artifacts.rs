use std::process::ExitCode;

use librarian_samples::{artifacts, SampleConfig, SampleError};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    librarian_samples::init_tracing();

    let config = SampleConfig::from_env(&artifacts::DEFAULTS);
    tracing::info!(registry_url = %config.registry_url, "Loaded sample configuration");

    librarian_samples::finish(run(&config).await)
}

async fn run(config: &SampleConfig) -> Result<(), SampleError> {
    let client = config.client()?;
    let mut stdout = std::io::stdout().lock();
    artifacts::run(&client, config, &mut stdout).await
}

use librarian_registry::RegistryError;

use crate::spec_summary::SummaryError;

/// Anything that ends a sample run early.
#[derive(Debug, thiserror::Error)]
pub enum SampleError {
    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error("Failed to write output: {0}")]
    Io(#[from] std::io::Error),

    #[error("Version {version} is not a usable OpenAPI document: {source}")]
    OpenApi {
        version: String,
        #[source]
        source: SummaryError,
    },
}

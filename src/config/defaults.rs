//! Default values for nuget-bom configuration.

use crate::client::NUGET_FLAT_CONTAINER_URL;

/// Default flat-container base URL
pub const DEFAULT_BASE_URL: &str = NUGET_FLAT_CONTAINER_URL;

/// Default number of resolution workers (sequential)
pub const DEFAULT_JOBS: usize = 1;

/// Pretty-print output by default
pub const DEFAULT_PRETTY: bool = true;

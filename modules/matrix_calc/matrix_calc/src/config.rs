use serde::{Deserialize, Serialize};

/// Configuration for the `matrix_calc` module
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MatrixCalcConfig {
    /// Attach the raw request body to request spans and logs.
    #[serde(default)]
    pub log_request_bodies: bool,
}

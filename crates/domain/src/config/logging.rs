use serde::{Deserialize, Serialize};

/// Log verbosity
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// Tracing filter directives (default: "info")
    /// A bare level applies globally; per-module directives narrow it, e.g.
    /// "info,ztnet_dns_infrastructure=debug" to watch refresh cycles and
    /// query handling without debug noise from dependencies.
    /// The RUST_LOG environment variable, when set, takes precedence.
    #[serde(default = "default_filter")]
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_filter(),
        }
    }
}

fn default_filter() -> String {
    "info".to_string()
}

/// Runtime configuration describing how to reach the REST key-value service.
#[derive(Debug, Clone)]
pub struct KvConfig {
    pub base_url: String,
    pub token: String,
}

impl KvConfig {
    /// Construct a configuration from an explicit endpoint and bearer token.
    pub fn new(base_url: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            token: token.into(),
        }
    }
}

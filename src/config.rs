/// Settings shared with request handlers and extractors.
#[derive(Clone)]
pub struct ServerConfig {
    /// Secret used to sign and verify bearer tokens.
    pub secret: String,
}

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
    #[error("terminal I/O failed: {0}")]
    Io(#[from] std::io::Error),
}

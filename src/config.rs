/// Base URL of the Nexus backend API.
/// Configured at compile time:
/// - Development: http://localhost:8000 (default)
/// - Production: https://api.specsnexus.org (via BACKEND_URL env var)
pub const BACKEND_URL: &str = match option_env!("BACKEND_URL") {
    Some(url) => url,
    None => "http://localhost:8000",
};

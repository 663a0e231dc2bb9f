/// Upper bound for the worker pool
pub const MAX_POOL_SIZE: usize = 64;

/// Sequential by default
pub const DEFAULT_POOL_SIZE: usize = 1;

pub const POOL_SIZE_ENV: &str = "SSR_POOL_SIZE";

pub(crate) fn parse_pool_size(raw: Option<&str>, default_value: usize) -> usize {
    raw.map(str::trim)
        .filter(|v| !v.is_empty())
        .and_then(|v| v.parse::<usize>().ok())
        .unwrap_or(default_value)
        .clamp(1, MAX_POOL_SIZE)
}

pub(crate) fn pool_size_from_env() -> usize {
    let raw = std::env::var(POOL_SIZE_ENV).ok();
    parse_pool_size(raw.as_deref(), DEFAULT_POOL_SIZE)
}

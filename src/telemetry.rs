//! Tracing setup.
//!
//! `LOG_LEVEL` is an `EnvFilter` directive string; `LOG_FORMAT` picks `json`,
//! `compact` or the default human-readable output. Generation and build events
//! log under the `worksheet` target, service lifecycle under `worksheet_backend`.

use tracing_subscriber::EnvFilter;

pub const DEFAULT_FILTER: &str = "info,worksheet=debug,worksheet_backend=debug,tower_http=info,axum=info";

/// `LOG_LEVEL` when it parses, otherwise `DEFAULT_FILTER`.
fn filter_from(raw: Option<&str>) -> EnvFilter {
  raw
    .and_then(|directives| EnvFilter::try_new(directives).ok())
    .unwrap_or_else(|| EnvFilter::new(DEFAULT_FILTER))
}

pub fn init_tracing() {
  let level = std::env::var("LOG_LEVEL").ok();
  let builder = tracing_subscriber::fmt()
    .with_env_filter(filter_from(level.as_deref()))
    .with_target(true)
    .with_file(true)
    .with_line_number(true);

  match std::env::var("LOG_FORMAT").as_deref() {
    Ok("json") => builder.json().init(),
    Ok("compact") => builder.compact().init(),
    _ => builder.init(),
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn bad_directives_fall_back_to_the_default() {
    assert_eq!(filter_from(Some("worksheet=loudest")).to_string(), EnvFilter::new(DEFAULT_FILTER).to_string());
    assert_eq!(filter_from(None).to_string(), EnvFilter::new(DEFAULT_FILTER).to_string());
    assert!(filter_from(Some("warn")).to_string().contains("warn"));
  }
}

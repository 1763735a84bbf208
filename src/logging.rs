use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "warn,wordcloud_client=info";

/// Installs the global fmt subscriber. `RUST_LOG` overrides the default
/// filter; repeated calls keep the first subscriber.
pub fn init() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    if tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init()
        .is_err()
    {
        tracing::debug!("tracing subscriber already installed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_twice_is_harmless() {
        init();
        init();
        tracing::info!("logging initialized");
    }
}

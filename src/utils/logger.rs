use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// `level` comes from `[logging] level` in the config; RUST_LOG still wins.
pub fn init_cli_logger(verbose: bool, level: Option<&str>) {
    let default_directive = if verbose {
        "femoral_head=debug,info".to_string()
    } else {
        format!("femoral_head={}", level.unwrap_or("info"))
    };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .compact(),
        )
        .init();
}

/// JSON lines on stderr, for hosts that capture and parse the tool's log.
pub fn init_json_logger(level: Option<&str>) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("femoral_head={}", level.unwrap_or("info"))));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .json(),
        )
        .init();
}

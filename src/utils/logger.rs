use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn filter_for(directive: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directive))
}

fn directive_for(verbose: bool) -> &'static str {
    if verbose {
        "dynamic_pricing=debug,info"
    } else {
        "dynamic_pricing=info"
    }
}

pub fn init_cli_logger(verbose: bool) {
    init_cli_logger_with_directive(directive_for(verbose));
}

/// `directive` uses `EnvFilter` syntax, e.g. `dynamic_pricing=trace`.
/// `RUST_LOG` still wins when set.
pub fn init_cli_logger_with_directive(directive: &str) {
    tracing_subscriber::registry()
        .with(filter_for(directive))
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

pub fn init_json_logger(verbose: bool) {
    tracing_subscriber::registry()
        .with(filter_for(directive_for(verbose)))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .json(), // 機器可讀格式，方便送進日誌收集器
        )
        .init();
}

use clap::Parser;
use rsforest::cli::{execute_command, output, Cli};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, Layer};

fn main() {
    let cli = Cli::parse();

    init_logging(log_level(cli.debug));

    if let Err(e) = execute_command(&cli) {
        output::error(&e);
        std::process::exit(e.exit_code());
    }
}

/// `-d` count to log level; anything past `-ddd` stays at trace.
fn log_level(verbosity: u8) -> LevelFilter {
    match verbosity {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    }
}

/// Logs go to stderr so forest output on stdout stays pipeable.
fn init_logging(level: LevelFilter) {
    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_thread_names(false)
        .with_span_events(FmtSpan::CLOSE);

    tracing_subscriber::registry()
        .with(fmt_layer.with_filter(level))
        .init();

    tracing::debug!(%level, "logging initialized");
}

#[cfg(test)]
mod tests {
    use super::*;
    use rsforest::util::testing;

    // https://docs.rs/clap/latest/clap/_derive/_tutorial/index.html#testing
    #[test]
    fn verify_cli() {
        use clap::CommandFactory;
        testing::init_test_setup();
        Cli::command().debug_assert();
    }

    #[test]
    fn given_debug_count_when_mapping_then_saturates_at_trace() {
        assert_eq!(log_level(0), LevelFilter::WARN);
        assert_eq!(log_level(2), LevelFilter::DEBUG);
        assert_eq!(log_level(3), LevelFilter::TRACE);
        assert_eq!(log_level(9), LevelFilter::TRACE);
    }

    #[test]
    fn given_prune_without_drop_when_parsing_then_rejects() {
        let result = Cli::try_parse_from(["rsforest", "prune", "records.toml"]);
        assert!(result.is_err());
    }

    #[test]
    fn given_repeated_drop_when_parsing_then_collects_keys() {
        let cli = Cli::try_parse_from([
            "rsforest", "-dd", "prune", "records.toml", "--drop", "a", "b",
        ])
        .unwrap();

        assert_eq!(cli.debug, 2);
        match cli.command {
            Some(rsforest::cli::Commands::Prune { drop, .. }) => assert_eq!(drop, vec!["a", "b"]),
            other => panic!("unexpected command: {other:?}"),
        }
    }
}

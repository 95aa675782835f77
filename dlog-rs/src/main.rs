use std::io::{self, Write};

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use dlog::cli::{self, CliArgs};
use dlog::config::{Config, ConfigError};
use dlog::logger::DEFAULT_NAME;
use dlog::{DlogError, Level, Logger};

/// Filter variable for `-d` diagnostics.
const ENV_FILTER: &str = "DLOG_LOG";

fn main() {
    let args = match cli::parse_args() {
        Ok(a) => a,
        Err(e) => {
            eprintln!("dlog: {e}");
            eprintln!("{}", cli::USAGE);
            std::process::exit(1);
        }
    };

    if args.debug {
        init_tracing();
    }

    if let Err(e) = run(args) {
        eprintln!("dlog: {e}");
        std::process::exit(1);
    }
}

fn init_tracing() {
    let env_filter =
        EnvFilter::try_from_env(ENV_FILTER).unwrap_or_else(|_| EnvFilter::new("debug"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

fn run(args: CliArgs) -> dlog::Result<()> {
    // Messages default to trace, so the threshold starts there too.
    let mut logger = Logger::new(DEFAULT_NAME, Level::Trace);

    // Config first; command-line flags override it.
    if let Some(path) = cli::resolve_config(&args.config) {
        let (config, errors) =
            Config::load_file(&path).map_err(|source| DlogError::ReadConfig {
                path: path.clone(),
                source,
            })?;
        for err in errors {
            report_config_error(&path, err);
        }
        config.apply(&mut logger);
    }

    if let Some(name) = args.name {
        logger.set_name(name);
    }
    if let Some(level) = args.level {
        logger.set_level(level);
    }
    if let Some(prefix) = args.prefix {
        logger.set_prefix(prefix);
    }
    if args.color {
        logger.set_color(true);
    }

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let emitted = logger.log(args.message_level, &mut out, &args.template, &args.args)?;
    out.flush()?;
    tracing::debug!(emitted, level = %args.message_level, "done");
    Ok(())
}

/// Config errors are warnings: the rest of the file still applies.
fn report_config_error(path: &std::path::Path, source: ConfigError) {
    let err = DlogError::Config { path: path.to_path_buf(), source };
    eprintln!("dlog: warning: {err}");
}

use std::process;

use flowkit::cli::{run, Cli, CliError, Console};
use flowkit::config::Settings;
use flowkit::exitcode;
use flowkit::infrastructure::di::ServiceContainer;
use flowkit::infrastructure::InfraError;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter, Layer};

fn main() {
    let cli = Cli::parse_lenient();

    setup_logging(cli.verbose);

    let mut console = Console::stdio();
    let container = match build_container(&cli) {
        Ok(container) => container,
        Err(e) => {
            console.error(&e);
            process::exit(e.exit_code());
        }
    };

    let code = run(&cli.invocation(), &container, &mut console);
    if code != exitcode::OK {
        process::exit(code);
    }
}

fn build_container(cli: &Cli) -> Result<ServiceContainer, CliError> {
    let mut settings = Settings::load(None)?;
    if let Some(dir) = &cli.templates_dir {
        settings.templates_dir = dir.clone();
    }

    let project_dir = match &cli.project_dir {
        Some(dir) => dir.clone(),
        None => std::env::current_dir()
            .map_err(|e| InfraError::io("determine current directory", e))?,
    };

    tracing::debug!(
        "templates_dir={} project_dir={}",
        settings.templates_dir.display(),
        project_dir.display()
    );
    Ok(ServiceContainer::new(settings, project_dir))
}

fn setup_logging(verbosity: u8) {
    let level = match verbosity {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };

    // RUST_LOG wins over -v
    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_thread_names(false);

    tracing_subscriber::registry()
        .with(fmt_layer.with_filter(filter))
        .init();

    match level {
        LevelFilter::INFO => tracing::info!("Debug mode: info"),
        LevelFilter::DEBUG => tracing::debug!("Debug mode: debug"),
        LevelFilter::TRACE => tracing::debug!("Debug mode: trace"),
        _ => {}
    }
}

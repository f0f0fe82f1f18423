use anyhow::Context as _;
use clap::error::ErrorKind;
use clap::Parser;
use devctl_cli::cli::{catalogue, Cli};
use devctl_cli::context::Context;
use devctl_cli::{dispatch, output, root};
use devctl_core::auth::HttpAuthClient;
use devctl_core::config::{Config, WarnLevel};
use devctl_core::process::SystemRunner;
use devctl_core::prompt::TermPrompter;
use devctl_core::{engine, DevError};

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => match e.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                let _ = e.print();
                std::process::exit(0);
            }
            _ => {
                eprintln!("{}", e.render().to_string().trim_end());
                eprintln!();
                eprint!("{}", catalogue());
                std::process::exit(1);
            }
        },
    };

    let Some(command) = cli.command else {
        print!("{}", catalogue());
        std::process::exit(0);
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::builder()
                .with_default_directive(tracing::Level::WARN.into())
                .from_env_lossy(),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let root = root::resolve_root(cli.root.as_deref());

    let result = load_config(&root, cli.engine).and_then(|config| {
        let runner = SystemRunner;
        engine::ensure(&config, &runner)?;

        let prompter = TermPrompter::new();
        let auth = HttpAuthClient::new(&config.auth)?;
        let ctx = Context {
            root: &root,
            config: &config,
            runner: &runner,
            prompter: &prompter,
            auth: &auth,
        };
        dispatch(command, &ctx)
    });

    if let Err(e) = result {
        // Print the full error chain (anyhow's alternate Display)
        eprintln!("error: {e:#}");
        let code = e
            .chain()
            .find_map(|c| c.downcast_ref::<DevError>())
            .and_then(DevError::exit_code)
            .filter(|c| *c != 0)
            .unwrap_or(1);
        std::process::exit(code);
    }
}

fn load_config(root: &std::path::Path, engine: Option<String>) -> anyhow::Result<Config> {
    let mut config = Config::load(root)
        .with_context(|| format!("failed to load {}", Config::path(root).display()))?;
    if let Some(engine) = engine {
        config.engine = engine;
    }
    for warning in config.check()? {
        if warning.level == WarnLevel::Warning {
            output::warn(&warning.message);
        }
    }
    Ok(config)
}

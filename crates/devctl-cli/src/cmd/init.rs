use anyhow::Context as _;
use devctl_core::config::Config;
use devctl_core::io;

use crate::context::Context;
use crate::output;

pub const AUTH_URL_VAR: &str = "AUTH_SERVICE_URL";
pub const PUBLIC_AUTH_URL_VAR: &str = "NEXT_PUBLIC_AUTH_URL";

/// Contents of the frontend env file written by `init`.
pub fn frontend_env(config: &Config) -> String {
    format!(
        "{AUTH_URL_VAR}={}\n{PUBLIC_AUTH_URL_VAR}={}\n",
        config.auth.internal_url, config.auth.public_url
    )
}

/// `devctl init` — first-time setup of the whole stack.
///
/// Build, start, wait a fixed delay, migrate, create a superuser
/// interactively, install frontend dependencies, write the frontend env file.
pub fn run(ctx: &Context) -> anyhow::Result<()> {
    let compose = ctx.compose();

    output::step("Building images");
    ctx.run(compose.build())?;

    output::step("Starting services");
    ctx.run(compose.up())?;

    output::step(&format!(
        "Waiting {}s for services",
        ctx.config.readiness_delay_secs
    ));
    ctx.wait_for_services();

    output::step("Applying migrations");
    ctx.run(compose.manage_batch(&[], &["migrate"]))?;

    output::step("Create a backend superuser");
    ctx.run(compose.manage(&["createsuperuser"]))?;

    output::step("Installing frontend dependencies");
    ctx.run(compose.exec_batch(
        &ctx.config.services.frontend,
        &[],
        &["npm", "install", "--legacy-peer-deps"],
    ))?;

    let env_path = ctx.config.frontend_env_path(ctx.root);
    output::step(&format!("Writing {}", env_path.display()));
    io::atomic_write(&env_path, frontend_env(ctx.config).as_bytes())
        .with_context(|| format!("failed to write {}", env_path.display()))?;

    output::success("Development environment is ready.");
    output::print_service_urls(ctx.config);
    Ok(())
}

use std::collections::HashSet;

use anyhow::Context as _;
use devctl_core::auth::{self, CreateOutcome, NewUser};

use crate::context::Context;
use crate::output;

const SUPERUSER_ENV: &str = "DEVCTL_SUPERUSER";

/// Prints `True` or `False`; the username arrives through `SUPERUSER_ENV`.
const SUPERUSER_EXISTS_PY: &str = "import os; \
    from django.contrib.auth import get_user_model; \
    print(get_user_model().objects.filter(username=os.environ['DEVCTL_SUPERUSER']).exists())";

/// `devctl seed-all` — idempotent: safe to run against an already seeded stack.
pub fn run(ctx: &Context) -> anyhow::Result<()> {
    seed_backend_superuser(ctx)?;
    seed_auth_superuser(ctx)?;
    seed_demo_data(ctx)?;
    output::success("Seeding complete.");
    Ok(())
}

fn seed_backend_superuser(ctx: &Context) -> anyhow::Result<()> {
    let su = &ctx.config.superuser;
    output::step(&format!("Backend superuser '{}'", su.username));

    if backend_superuser_exists(ctx)? {
        output::success(&format!("'{}' already exists in the backend", su.username));
        return Ok(());
    }

    let env = [
        ("DJANGO_SUPERUSER_USERNAME", su.username.as_str()),
        ("DJANGO_SUPERUSER_EMAIL", su.email.as_str()),
        ("DJANGO_SUPERUSER_PASSWORD", su.password.as_str()),
    ];
    ctx.run(
        ctx.compose()
            .manage_batch(&env, &["createsuperuser", "--noinput"]),
    )?;
    output::success(&format!("Created '{}' in the backend", su.username));
    Ok(())
}

fn backend_superuser_exists(ctx: &Context) -> anyhow::Result<bool> {
    let username = ctx.config.superuser.username.as_str();
    let out = ctx
        .capture_ok(ctx.compose().manage_batch(
            &[(SUPERUSER_ENV, username)],
            &["shell", "-c", SUPERUSER_EXISTS_PY],
        ))
        .context("failed to look up the backend superuser")?;
    let answer = out
        .stdout
        .lines()
        .map(str::trim)
        .rfind(|l| !l.is_empty())
        .unwrap_or_default();
    Ok(answer == "True")
}

fn seed_auth_superuser(ctx: &Context) -> anyhow::Result<()> {
    let su = &ctx.config.superuser;
    output::step(&format!("Auth service user '{}'", su.username));

    let body = ctx
        .auth
        .create_user(&NewUser::from(su))
        .context("failed to create the superuser in the auth service")?;
    match auth::classify(&body) {
        CreateOutcome::Created => {
            output::success(&format!("Created '{}' in the auth service", su.username))
        }
        CreateOutcome::AlreadyExists => output::success(&format!(
            "'{}' already exists in the auth service",
            su.username
        )),
        CreateOutcome::Unrecognized => output::warn(&format!(
            "unexpected response from the auth service: {}",
            body.trim()
        )),
    }
    Ok(())
}

fn seed_demo_data(ctx: &Context) -> anyhow::Result<()> {
    if ctx.config.seed.demo_commands.is_empty() {
        return Ok(());
    }
    let listing = ctx
        .capture_ok(ctx.compose().manage_batch(&[], &["help"]))
        .context("failed to list backend management commands")?;
    let advertised = advertised_commands(&listing.stdout);

    for command in &ctx.config.seed.demo_commands {
        if !advertised.contains(command.as_str()) {
            tracing::info!(command = %command, "not offered by the backend, skipping");
            continue;
        }
        output::step(&format!("Running {command}"));
        ctx.run(ctx.compose().manage_batch(&[], &[command.as_str()]))?;
    }
    Ok(())
}

/// Command names from a `manage.py help` listing: one per indented line,
/// under `[app]` headers.
fn advertised_commands(listing: &str) -> HashSet<&str> {
    listing
        .lines()
        .filter(|l| l.starts_with(char::is_whitespace))
        .map(str::trim)
        .filter(|l| !l.is_empty() && !l.contains(char::is_whitespace))
        .collect()
}

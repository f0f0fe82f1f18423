use anyhow::Context as _;
use devctl_core::auth::NewUser;
use devctl_core::prompt;

use crate::context::Context;

pub const DEFAULT_ROLE: &str = "Student";

pub fn logs(ctx: &Context) -> anyhow::Result<()> {
    ctx.run(ctx.compose().logs(Some(&ctx.config.services.auth)))?;
    Ok(())
}

pub fn bash(ctx: &Context) -> anyhow::Result<()> {
    ctx.run(ctx.compose().shell(&ctx.config.services.auth))?;
    Ok(())
}

/// `devctl create-user` — collect the six fields and POST them once; the
/// service's response is printed as-is.
pub fn create_user(ctx: &Context) -> anyhow::Result<()> {
    let p = ctx.prompter;
    let user = NewUser {
        email: p.input("Email: ")?.trim().to_string(),
        username: p.input("Username: ")?.trim().to_string(),
        first_name: p.input("First name: ")?.trim().to_string(),
        last_name: p.input("Last name: ")?.trim().to_string(),
        password: p.secret("Password: ")?,
        role: prompt::input_or(p, &format!("Role [{DEFAULT_ROLE}]: "), DEFAULT_ROLE)?,
    };

    let body = ctx
        .auth
        .create_user(&user)
        .with_context(|| format!("failed to create '{}' in the auth service", user.username))?;
    println!("{body}");
    Ok(())
}

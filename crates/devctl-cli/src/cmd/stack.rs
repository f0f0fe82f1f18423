use devctl_core::prompt;

use crate::context::Context;
use crate::output;

pub fn build(ctx: &Context) -> anyhow::Result<()> {
    output::step("Building images");
    ctx.run(ctx.compose().build())?;
    Ok(())
}

pub fn up(ctx: &Context) -> anyhow::Result<()> {
    output::step("Starting services");
    ctx.run(ctx.compose().up())?;
    output::print_service_urls(ctx.config);
    Ok(())
}

pub fn down(ctx: &Context) -> anyhow::Result<()> {
    output::step("Stopping services");
    ctx.run(ctx.compose().down())?;
    Ok(())
}

pub fn restart(ctx: &Context) -> anyhow::Result<()> {
    output::step("Restarting services");
    ctx.run(ctx.compose().restart())?;
    Ok(())
}

/// `devctl clean` — remove containers, networks and every volume, including
/// the database. Only an exact `yes` proceeds.
pub fn clean(ctx: &Context) -> anyhow::Result<()> {
    println!("This removes all containers, networks and volumes of the stack, including the database.");
    if !prompt::confirm(ctx.prompter, "Type 'yes' to continue: ")? {
        output::cancelled();
        return Ok(());
    }
    output::step("Removing containers, networks and volumes");
    ctx.run(ctx.compose().down_purge())?;
    output::success("Environment removed.");
    Ok(())
}

pub fn ps(ctx: &Context) -> anyhow::Result<()> {
    ctx.run(ctx.compose().ps())?;
    Ok(())
}

pub fn status(ctx: &Context) -> anyhow::Result<()> {
    ctx.run(ctx.compose().ps())?;
    output::print_service_urls(ctx.config);
    Ok(())
}

pub fn logs_all(ctx: &Context) -> anyhow::Result<()> {
    ctx.run(ctx.compose().logs(None))?;
    Ok(())
}

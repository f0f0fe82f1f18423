use crate::context::Context;
use crate::output;

pub fn migrate(ctx: &Context) -> anyhow::Result<()> {
    output::step("Applying migrations");
    ctx.run(ctx.compose().manage_batch(&[], &["migrate"]))?;
    Ok(())
}

pub fn makemigrations(ctx: &Context) -> anyhow::Result<()> {
    output::step("Generating migrations");
    ctx.run(ctx.compose().manage_batch(&[], &["makemigrations"]))?;
    Ok(())
}

pub fn createsuperuser(ctx: &Context) -> anyhow::Result<()> {
    ctx.run(ctx.compose().manage(&["createsuperuser"]))?;
    Ok(())
}

pub fn shell(ctx: &Context) -> anyhow::Result<()> {
    ctx.run(ctx.compose().manage(&["shell"]))?;
    Ok(())
}

pub fn bash(ctx: &Context) -> anyhow::Result<()> {
    ctx.run(ctx.compose().shell(&ctx.config.services.backend))?;
    Ok(())
}

pub fn logs(ctx: &Context) -> anyhow::Result<()> {
    ctx.run(ctx.compose().logs(Some(&ctx.config.services.backend)))?;
    Ok(())
}

pub fn test(ctx: &Context) -> anyhow::Result<()> {
    output::step("Running backend tests");
    ctx.run(ctx.compose().manage_batch(&[], &["test"]))?;
    Ok(())
}

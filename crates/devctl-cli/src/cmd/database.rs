use devctl_core::prompt;

use crate::context::Context;
use crate::output;

/// Live row estimate for every user table.
const SUMMARY_SQL: &str = "SELECT relname AS table_name, n_live_tup AS row_count \
                           FROM pg_stat_user_tables ORDER BY relname;";

pub fn summary(ctx: &Context) -> anyhow::Result<()> {
    output::step(&format!("Tables in '{}'", ctx.config.database.name));
    ctx.run(ctx.compose().psql(Some(SUMMARY_SQL)))?;
    Ok(())
}

pub fn shell(ctx: &Context) -> anyhow::Result<()> {
    ctx.run(ctx.compose().psql(None))?;
    Ok(())
}

/// `devctl resetdb` — drop the database volume, start fresh and migrate.
/// Only an exact `yes` proceeds.
pub fn reset(ctx: &Context) -> anyhow::Result<()> {
    let volume = ctx.config.database_volume(ctx.root);
    println!("This deletes the database volume '{volume}' and every record in it.");
    if !prompt::confirm(ctx.prompter, "Type 'yes' to continue: ")? {
        output::cancelled();
        return Ok(());
    }

    let compose = ctx.compose();
    output::step("Stopping services");
    ctx.run(compose.down())?;
    output::step(&format!("Removing volume {volume}"));
    ctx.run(compose.volume_rm(&volume))?;
    output::step("Starting services");
    ctx.run(compose.up())?;
    output::step(&format!(
        "Waiting {}s for services",
        ctx.config.readiness_delay_secs
    ));
    ctx.wait_for_services();
    output::step("Applying migrations");
    ctx.run(compose.manage_batch(&[], &["migrate"]))?;
    output::success("Database reset.");
    Ok(())
}

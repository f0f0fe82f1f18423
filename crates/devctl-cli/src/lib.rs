pub mod cli;
pub mod cmd;
pub mod context;
pub mod output;
pub mod root;

#[cfg(test)]
mod testing;

use cli::Commands;
use context::Context;

/// Run the single handler for `command`.
pub fn dispatch(command: Commands, ctx: &Context) -> anyhow::Result<()> {
    tracing::debug!(?command, root = %ctx.root.display(), "dispatching");
    match command {
        Commands::Init => cmd::init::run(ctx),
        Commands::Build => cmd::stack::build(ctx),
        Commands::Up => cmd::stack::up(ctx),
        Commands::Down => cmd::stack::down(ctx),
        Commands::Restart => cmd::stack::restart(ctx),
        Commands::Clean => cmd::stack::clean(ctx),
        Commands::MakeMigrations => cmd::backend::makemigrations(ctx),
        Commands::Migrate => cmd::backend::migrate(ctx),
        Commands::CreateSuperuser => cmd::backend::createsuperuser(ctx),
        Commands::SeedAll => cmd::seed::run(ctx),
        Commands::DbSummary => cmd::database::summary(ctx),
        Commands::DbShell => cmd::database::shell(ctx),
        Commands::ResetDb => cmd::database::reset(ctx),
        Commands::Shell => cmd::backend::shell(ctx),
        Commands::Bash => cmd::backend::bash(ctx),
        Commands::Logs => cmd::backend::logs(ctx),
        Commands::Test => cmd::backend::test(ctx),
        Commands::AuthLogs => cmd::auth::logs(ctx),
        Commands::AuthBash => cmd::auth::bash(ctx),
        Commands::CreateUser => cmd::auth::create_user(ctx),
        Commands::FrontLogs => cmd::frontend::logs(ctx),
        Commands::FrontBash => cmd::frontend::bash(ctx),
        Commands::Ps => cmd::stack::ps(ctx),
        Commands::Status => cmd::stack::status(ctx),
        Commands::LogsAll => cmd::stack::logs_all(ctx),
    }
}

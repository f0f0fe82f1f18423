use crate::context::Context;

pub fn logs(ctx: &Context) -> anyhow::Result<()> {
    ctx.run(ctx.compose().logs(Some(&ctx.config.services.frontend)))?;
    Ok(())
}

pub fn bash(ctx: &Context) -> anyhow::Result<()> {
    ctx.run(ctx.compose().shell(&ctx.config.services.frontend))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::Harness;

    #[test]
    fn frontend_commands() {
        let h = Harness::new();
        logs(&h.ctx()).unwrap();
        bash(&h.ctx()).unwrap();
        assert_eq!(
            h.runner.commands(),
            ["docker compose logs -f frontend", "docker compose exec frontend sh"]
        );
    }
}

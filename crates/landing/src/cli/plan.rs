//! Plan command - show where every waiting file would be routed

use crate::cli::output::plan_table;
use anyhow::Context;
use landing::{LandingConfig, Plan, Router};
use std::path::PathBuf;

#[derive(Debug)]
pub struct PlanArgs {
    pub config: PathBuf,
    pub json: bool,
}

pub fn run(args: PlanArgs) -> anyhow::Result<()> {
    let config = LandingConfig::load(&args.config)
        .with_context(|| format!("Failed to load config: {}", args.config.display()))?;
    config.validate()?;

    let router = Router::from_config(&config)?;
    let plan = router.plan()?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&plan)?);
    } else {
        print_plan(&plan);
    }

    if plan.has_rejections() {
        anyhow::bail!("{} files were rejected", plan.totals().rejected);
    }
    Ok(())
}

fn print_plan(plan: &Plan) {
    println!("{}", plan_table(plan));

    let totals = plan.totals();
    println!(
        "{} files: {} routed, {} control, {} unmatched, {} rejected",
        totals.total(),
        totals.routed,
        totals.control,
        totals.unmatched,
        totals.rejected
    );
}

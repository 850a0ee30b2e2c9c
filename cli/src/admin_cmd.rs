//! Admin CLI Commands
//!
//! - `intake admin stats` - restaurant coverage
//! - `intake admin db` - document counts per collection
//! - `intake admin delete <id>` - delete after confirmation

use clap::{Parser, Subcommand};
use intake_core::AdminDashboard;

use crate::Context;
use crate::output::{db_stats_lines, record_line, stats_lines};
use crate::prompt::confirm;

#[derive(Debug, Parser)]
pub struct AdminCli {
    #[command(subcommand)]
    pub command: AdminSubcommand,
}

#[derive(Debug, Subcommand)]
pub enum AdminSubcommand {
    /// Restaurant totals and city/state coverage
    Stats(StatsArgs),
    /// Collections and their document counts
    Db(DbArgs),
    /// Delete a restaurant by id
    Delete(AdminDeleteArgs),
}

#[derive(Debug, Parser)]
pub struct StatsArgs {
    /// Output as JSON for automation
    #[arg(long)]
    pub json: bool,

    /// Also list every restaurant, sorted by name
    #[arg(long)]
    pub all: bool,
}

#[derive(Debug, Parser)]
pub struct DbArgs {
    /// Output as JSON for automation
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Parser)]
pub struct AdminDeleteArgs {
    pub id: String,

    /// Skip the confirmation prompt
    #[arg(long, short)]
    pub yes: bool,
}

impl AdminCli {
    pub async fn run(self, ctx: &Context) -> anyhow::Result<()> {
        let client = ctx.api_client()?;
        let mut dashboard = AdminDashboard::new();
        match &self.command {
            AdminSubcommand::Delete(_) => {
                // Only used to name the restaurant in the prompt.
                if let Err(err) = dashboard.load(&client).await {
                    tracing::warn!(error = %err, "Admin data unavailable; deleting by id");
                }
            }
            _ => dashboard.load(&client).await?,
        }

        match self.command {
            AdminSubcommand::Stats(args) => {
                if args.json {
                    let output = serde_json::json!({
                        "stats": dashboard.stats(),
                        "restaurants": dashboard.restaurants(),
                    });
                    println!("{}", serde_json::to_string_pretty(&output)?);
                    return Ok(());
                }
                for line in stats_lines(dashboard.stats()) {
                    println!("{line}");
                }
                if args.all {
                    println!();
                    for record in dashboard.restaurants() {
                        println!("{}", record_line(record));
                    }
                }
            }
            AdminSubcommand::Db(args) => {
                if args.json {
                    println!("{}", serde_json::to_string_pretty(dashboard.db_stats())?);
                    return Ok(());
                }
                for line in db_stats_lines(dashboard.db_stats()) {
                    println!("{line}");
                }
            }
            AdminSubcommand::Delete(args) => {
                let pending = dashboard.request_delete(&args.id).clone();
                if !args.yes && !confirm(&pending.prompt())? {
                    dashboard.cancel_delete();
                    println!("Cancelled");
                    return Ok(());
                }
                dashboard.confirm_delete(&client).await?;
                println!(
                    "Deleted \"{}\"; {} restaurants remain",
                    pending.name,
                    dashboard.stats().total_count
                );
            }
        }
        Ok(())
    }
}

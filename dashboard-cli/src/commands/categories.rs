//! `dashboard categories` — option categories of one guild.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use dashboard_core::{GuildId, OptionCategory};
use dashboard_sync::{managers, WriteAck};

use super::{print_ready_json, report_failure, Session};

/// Arguments for `dashboard categories`.
#[derive(Args, Debug)]
pub struct CategoriesArgs {
    /// Guild whose option categories to load.
    pub guild_id: String,

    /// JSON array of categories to POST; prints the server's response.
    #[arg(long)]
    pub update: Option<String>,
}

impl CategoriesArgs {
    pub async fn run(self, session: &Session) -> Result<()> {
        let guild = GuildId::from(self.guild_id);
        let manager = managers::guild_categories(session.transport.clone(), &guild);
        let label = manager.resource().label();

        if let Some(update) = self.update.as_deref() {
            let update: Vec<OptionCategory> =
                serde_json::from_str(update).context("--update must be a JSON array of categories")?;
            return match manager.write(update).await {
                Ok(WriteAck::Confirmed(response)) => {
                    println!(
                        "{}",
                        serde_json::to_string_pretty(&response).context("failed to render JSON")?
                    );
                    Ok(())
                }
                Ok(WriteAck::Applied(pending)) => pending
                    .settled()
                    .await
                    .or_else(|error| report_failure(session, label, &error)),
                Err(error) => report_failure(session, label, &error),
            };
        }

        manager.activate().await;
        match manager.settled().await {
            Ok(categories) if session.json => print_ready_json(label, &categories),
            Ok(categories) => {
                print_categories(&guild, &categories);
                Ok(())
            }
            Err(error) => report_failure(session, label, &error),
        }
    }
}

fn print_categories(guild: &GuildId, categories: &[OptionCategory]) {
    println!("{} option categories for guild {}", "✓".green(), guild.to_string().bold());
    if categories.is_empty() {
        println!("  (none)");
    }
    for category in categories {
        match category.name() {
            Some(name) => println!("  ·  {name} ({})", category.id),
            None => println!("  ·  {}", category.id),
        }
    }
}

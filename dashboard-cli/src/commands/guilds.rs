//! `dashboard guilds` — the signed-in user's guild collection.

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use tabled::{settings::Style, Table, Tabled};

use dashboard_core::GuildSummary;
use dashboard_sync::managers;

use super::{print_ready_json, report_failure, Session};

/// Arguments for `dashboard guilds`.
#[derive(Args, Debug)]
pub struct GuildsArgs {}

#[derive(Tabled)]
struct GuildRow {
    #[tabled(rename = "id")]
    id: String,
    #[tabled(rename = "name")]
    name: String,
}

impl GuildsArgs {
    pub async fn run(self, session: &Session) -> Result<()> {
        let auth_url = session.config.auth_url();
        let manager = managers::guilds_list(session.transport.clone(), move || {
            eprintln!(
                "{} session expired; sign in at {}",
                "!".yellow(),
                auth_url.bold()
            );
        });
        manager.activate().await;

        match manager.settled().await {
            Ok(guilds) if session.json => print_ready_json(manager.resource().label(), &guilds),
            Ok(guilds) => {
                print_table(&guilds);
                Ok(())
            }
            Err(error) => report_failure(session, manager.resource().label(), &error),
        }
    }
}

fn print_table(guilds: &[GuildSummary]) {
    if guilds.is_empty() {
        println!("No guilds available.");
        return;
    }
    let rows: Vec<GuildRow> = guilds
        .iter()
        .map(|guild| GuildRow {
            id: guild.id.clone(),
            name: guild.name().unwrap_or("-").to_string(),
        })
        .collect();
    let mut table = Table::new(rows);
    table.with(Style::rounded());
    println!("{table}");
}

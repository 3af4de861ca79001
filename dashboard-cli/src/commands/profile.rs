//! `dashboard profile` — settings of the guild being edited.

use anyhow::{bail, Result};
use clap::{Args, Subcommand};
use colored::Colorize;

use dashboard_core::{GuildProfile, GuildProfileField};
use dashboard_sync::{managers, WriteAck};

use super::{print_ready_json, report_failure, Session};

/// Arguments for `dashboard profile`.
#[derive(Args, Debug)]
pub struct ProfileArgs {
    #[command(subcommand)]
    pub command: Option<ProfileCommand>,
}

#[derive(Subcommand, Debug)]
pub enum ProfileCommand {
    /// Edit fields locally and save them back to the server.
    Set {
        /// New guild name.
        #[arg(long)]
        name: Option<String>,

        /// New guild description.
        #[arg(long)]
        description: Option<String>,
    },
}

impl ProfileArgs {
    pub async fn run(self, session: &Session) -> Result<()> {
        let manager = managers::guild_profile(session.transport.clone());
        let label = manager.resource().label();
        manager.activate().await;

        let profile = match manager.settled().await {
            Ok(profile) => profile,
            Err(error) => return report_failure(session, label, &error),
        };

        let Some(ProfileCommand::Set { name, description }) = self.command else {
            return if session.json {
                print_ready_json(label, &profile)
            } else {
                print_profile(&profile);
                Ok(())
            };
        };

        let edits = [
            (GuildProfileField::Name, name),
            (GuildProfileField::Description, description),
        ];
        if edits.iter().all(|(_, value)| value.is_none()) {
            bail!("nothing to set; pass --name and/or --description");
        }
        for (field, value) in edits {
            if let Some(value) = value {
                manager.merge_field(field, value);
            }
        }

        let Some(edited) = manager.snapshot().data().cloned() else {
            bail!("{label} is no longer ready");
        };
        let pending = match manager.write(edited.clone()).await {
            Ok(WriteAck::Applied(pending)) => pending,
            Ok(WriteAck::Confirmed(_)) => {
                print_saved(session, label, &edited)?;
                return Ok(());
            }
            Err(error) => return report_failure(session, label, &error),
        };
        if let Err(error) = pending.settled().await {
            return report_failure(session, label, &error);
        }
        print_saved(session, label, &edited)
    }
}

fn print_saved(session: &Session, label: &str, profile: &GuildProfile) -> Result<()> {
    if session.json {
        return print_ready_json(label, profile);
    }
    println!("{} saved guild {}", "✓".green(), profile.id.bold());
    print_profile(profile);
    Ok(())
}

fn print_profile(profile: &GuildProfile) {
    println!("  id           {}", profile.id);
    println!("  name         {}", profile.name);
    println!("  description  {}", profile.description().unwrap_or("-"));
}

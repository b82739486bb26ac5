//! `roster list`

use std::fs;

use anyhow::{Context, Result};
use colored::*;

use super::{ListArgs, OutputFormat};
use crate::config::Config;
use crate::records::Record;

pub async fn handle_list_command(args: ListArgs, config: &Config) -> Result<()> {
    let ingestor = crate::cli::build_ingestor(config).await?;
    let users = ingestor.list_all().await.context("Failed to list users")?;

    let formatted = format_users(&users, args.format)?;

    if let Some(output_path) = args.output {
        fs::write(&output_path, &formatted)
            .with_context(|| format!("Failed to write output to: {}", output_path.display()))?;
        println!(
            "{} users saved to: {}",
            users.len(),
            output_path.display().to_string().bright_green()
        );
    } else {
        println!("{}", formatted);
    }

    Ok(())
}

pub fn format_users(users: &[Record], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => {
            serde_json::to_string_pretty(users).context("Failed to format JSON output")
        }
        OutputFormat::Csv => users_to_csv(users),
        OutputFormat::Table => Ok(users_to_table(users)),
    }
}

fn users_to_csv(users: &[Record]) -> Result<String> {
    let mut wtr = csv::Writer::from_writer(Vec::new());
    wtr.write_record(["id", "name", "email"])
        .context("Failed to write CSV header")?;

    for user in users {
        wtr.write_record([&user.id, &user.name, &user.email])
            .with_context(|| format!("Failed to write user: {}", user.id))?;
    }

    let bytes = wtr.into_inner().context("Failed to flush CSV writer")?;
    String::from_utf8(bytes).context("CSV output is not UTF-8")
}

fn users_to_table(users: &[Record]) -> String {
    if users.is_empty() {
        return "No users stored.".dimmed().to_string();
    }

    let width = |header: &str, field: fn(&Record) -> &str| {
        users
            .iter()
            .map(|u| field(u).chars().count())
            .chain(std::iter::once(header.len()))
            .max()
            .unwrap_or(0)
    };
    let id_w = width("ID", |u| u.id.as_str());
    let name_w = width("Name", |u| u.name.as_str());

    let header = format!("{:<id_w$}  {:<name_w$}  {}", "ID", "Name", "Email");
    let mut out = format!("{}\n", header.bold());
    for user in users {
        out.push_str(&format!(
            "{:<id_w$}  {:<name_w$}  {}\n",
            user.id, user.name, user.email
        ));
    }
    out.push_str(&format!("\n{} users", users.len()));
    out
}

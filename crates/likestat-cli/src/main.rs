mod output;
mod run;

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use likestat_core::ObjectType;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "likestat")]
#[command(about = "Age and sex breakdown of the users who liked a VK post")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Collect likes, resolve profiles, and print the demographic stats
    Run {
        /// Owner of the liked object; negative for communities
        #[arg(long, allow_negative_numbers = true)]
        owner_id: Option<i64>,

        /// Id of the liked object
        #[arg(long)]
        post_id: Option<u64>,

        /// Kind of the liked object (post, comment, photo, video, note, market)
        #[arg(long, default_value = "post")]
        object_type: ObjectType,

        /// Reference date for ages, `YYYY-MM-DD` (defaults to today)
        #[arg(long, value_parser = parse_date)]
        today: Option<NaiveDate>,

        /// Write the stats to this file instead of `<output dir>/stats.json`
        #[arg(long)]
        output: Option<PathBuf>,

        /// Print the stats without writing them to disk
        #[arg(long, conflicts_with = "output")]
        no_save: bool,
    },
    /// Print the age estimated from a VK birth date (`D.M.YYYY`)
    Age {
        bdate: String,

        /// Reference date, `YYYY-MM-DD` (defaults to today)
        #[arg(long, value_parser = parse_date)]
        today: Option<NaiveDate>,
    },
}

fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|_| format!("invalid date '{raw}', expected YYYY-MM-DD"))
}

fn init_tracing(fallback_level: &str) -> anyhow::Result<()> {
    let env_filter =
        EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(fallback_level))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
    Ok(())
}

fn today_or_local(today: Option<NaiveDate>) -> NaiveDate {
    today.unwrap_or_else(|| chrono::Local::now().date_naive())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            owner_id,
            post_id,
            object_type,
            today,
            output,
            no_save,
        } => {
            let config = likestat_core::load_app_config()?;
            init_tracing(&config.log_level)?;
            tracing::debug!(?config, "configuration loaded");

            let args = run::RunArgs {
                owner_id,
                post_id,
                object_type,
                today: today_or_local(today),
                output,
                no_save,
            };
            run::run(&config, args).await
        }
        Commands::Age { bdate, today } => {
            init_tracing("info")?;
            match likestat_core::estimate_age(Some(&bdate), today_or_local(today)) {
                Some(age) => println!("{age}"),
                None => println!("unknown"),
            }
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests;

//! `likestat run`: the likes → profiles → histogram pipeline for one object.

use std::path::PathBuf;

use anyhow::Context;
use chrono::NaiveDate;
use likestat_core::{AppConfig, EngagementEvent, ObjectType};
use likestat_vk::{run_post_stats, VkClient};

use crate::output;

/// Command-line overrides for a single run.
#[derive(Debug)]
pub(crate) struct RunArgs {
    pub owner_id: Option<i64>,
    pub post_id: Option<u64>,
    pub object_type: ObjectType,
    pub today: NaiveDate,
    pub output: Option<PathBuf>,
    pub no_save: bool,
}

impl RunArgs {
    fn event(&self, config: &AppConfig) -> EngagementEvent {
        EngagementEvent {
            owner_id: self.owner_id.unwrap_or(config.owner_id),
            item_id: self.post_id.unwrap_or(config.post_id),
            object_type: self.object_type,
        }
    }
}

pub(crate) async fn run(config: &AppConfig, args: RunArgs) -> anyhow::Result<()> {
    let event = args.event(config);
    let client = VkClient::from_config(config).context("failed to build VK client")?;

    tracing::info!(%event, today = %args.today, "analysing likes");

    let report = run_post_stats(&client, config, event, args.today)
        .await
        .with_context(|| format!("failed to analyse likes of {event}"))?;

    if !report.complete {
        tracing::warn!(
            %event,
            collected = report.collected,
            resolved = report.resolved,
            skipped_batches = report.skipped_batches,
            "stats are based on incomplete data"
        );
    }

    println!("{}", output::render_json(&report.stats)?);

    if args.no_save {
        return Ok(());
    }
    if report.collected == 0 {
        tracing::info!(%event, "no likes found or access denied; nothing saved");
        return Ok(());
    }

    let path = args
        .output
        .unwrap_or_else(|| output::default_path(&config.output_dir));
    output::save_stats(&report.stats, &path)?;
    tracing::info!(path = %path.display(), "stats saved");

    Ok(())
}

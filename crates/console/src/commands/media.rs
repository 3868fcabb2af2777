// crates/console/src/commands/media.rs
//! Media item commands, including the bulk-processing watcher.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use presswatch_api::ApiClient;
use presswatch_monitor::{BulkMonitor, MonitorEvent, PollConfig};

use super::{clip, fmt_ts};

pub async fn list(client: ApiClient) -> Result<()> {
    let items = client.list_media().await?;
    println!(
        "{:<36} {:<34} {:<18} {:<10} {:<16}",
        "ID", "TITLE", "SOURCE", "STATUS", "SCRAPED"
    );
    for item in &items {
        println!(
            "{:<36} {:<34} {:<18} {:<10} {:<16}",
            item.id,
            clip(item.raw_title.as_deref().unwrap_or("(untitled)"), 34),
            clip(item.source_name.as_deref().unwrap_or("-"), 18),
            item.analysis_status,
            fmt_ts(item.scraped_at.as_deref()),
        );
    }
    println!("\n{} items", items.len());
    Ok(())
}

pub async fn show(client: ApiClient, media_id: &str) -> Result<()> {
    let item = client.media_item(media_id).await?;
    println!("{}", item.raw_title.as_deref().unwrap_or("(untitled)"));
    if let Some(url) = &item.url {
        println!("{url}");
    }
    println!("source: {}", item.source_name.as_deref().unwrap_or("-"));
    println!("status: {}", item.analysis_status);
    for (label, value) in [
        ("industry", &item.industry_name),
        ("tactic", &item.industry_tactic),
        ("stakeholders", &item.stakeholders),
        ("policy", &item.targeted_policy),
        ("geography", &item.geographical_focus),
        ("outcome", &item.outcome_impact),
    ] {
        if let Some(v) = value {
            println!("{label}: {v}");
        }
    }
    if !item.project_analysis.is_empty() {
        println!("\nper-project analyses: {}", item.project_analysis.len());
    }
    Ok(())
}

pub async fn analyze(client: ApiClient, media_id: &str) -> Result<()> {
    client
        .process_media_item(media_id)
        .await
        .with_context(|| format!("analysis of item {media_id} failed"))?;
    println!("analysis started for {media_id}");
    Ok(())
}

/// Start the bulk AI-processing job and watch it to completion with a
/// progress bar. When the job finishes, pull fresh dashboard stats the way
/// the web dashboard refreshes itself after a run.
pub async fn process_all(client: ApiClient) -> Result<()> {
    let api = Arc::new(client.clone());
    let monitor = BulkMonitor::new(api, PollConfig::live_progress());
    let mut events = monitor.subscribe();

    monitor.start().await.context("could not start processing")?;

    let bar = ProgressBar::new(0);
    bar.set_style(
        ProgressStyle::default_bar()
            .template("  {bar:32} {pos}/{len} items ({percent}%) {msg}")
            .context("progress bar template")?,
    );
    bar.enable_steady_tick(Duration::from_millis(100));

    loop {
        match events.recv().await {
            Ok(MonitorEvent::Progress(view)) => {
                bar.set_length(view.total);
                bar.set_position(view.done);
            }
            Ok(MonitorEvent::Warning(w)) => bar.set_message(clip(&w, 48)),
            Ok(MonitorEvent::Completed) => break,
            // Lagged receivers miss intermediate snapshots only; the next
            // event carries current state.
            Err(tokio::sync::broadcast::error::RecvError::Lagged(_)) => continue,
            Err(tokio::sync::broadcast::error::RecvError::Closed) => break,
        }
    }
    bar.finish_and_clear();

    let view = monitor.view();
    println!("processed {}/{} items", view.done, view.total);
    if let Some(w) = view.last_warning {
        println!("note: {w}");
    }

    let stats = client.dashboard_stats().await?;
    println!(
        "awaiting: {}   completed: {}",
        stats.awaiting, stats.completed
    );
    Ok(())
}

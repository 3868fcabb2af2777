// crates/console/src/commands/dashboard.rs
//! Landing dashboard: stat cards plus the ten most recent items.

use std::ops::ControlFlow;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use presswatch_api::ApiClient;
use presswatch_monitor::{PollConfig, Poller};

use super::clip;

const LATEST_COUNT: u32 = 10;
const WATCH_INTERVAL: Duration = Duration::from_secs(5);

async fn render(client: &ApiClient) -> Result<()> {
    let stats = client.dashboard_stats().await?;
    let latest = client.latest_media(LATEST_COUNT).await?;

    println!(
        "Projects: {}   Items: {}   Awaiting: {}   Completed: {}",
        stats.total_projects, stats.total_items, stats.awaiting, stats.completed
    );
    println!();
    println!("{:<40} {:<20} {:<10}", "TITLE", "SOURCE", "STATUS");
    for item in &latest {
        println!(
            "{:<40} {:<20} {:<10}",
            clip(item.title.as_deref().unwrap_or("(untitled)"), 40),
            clip(&item.media_source_name, 20),
            item.analysis_status,
        );
    }
    Ok(())
}

pub async fn run(client: ApiClient, watch: bool) -> Result<()> {
    render(&client).await?;
    if !watch {
        return Ok(());
    }

    // Ambient refresh: next render after one full interval, then every
    // interval until interrupted. Refresh failures are transient; keep the
    // last good render on screen and retry next tick.
    let client = Arc::new(client);
    let poller = Poller::spawn(PollConfig::ambient(WATCH_INTERVAL), move || {
        let client = client.clone();
        async move {
            println!();
            if let Err(e) = render(&client).await {
                tracing::warn!(error = %e, "dashboard refresh failed");
            }
            ControlFlow::Continue(())
        }
    });

    tokio::signal::ctrl_c().await?;
    poller.stop();
    Ok(())
}

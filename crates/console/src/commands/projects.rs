// crates/console/src/commands/projects.rs
//! Project listing, creation, analytics, and insight reports.

use anyhow::{Context, Result};
use presswatch_api::{ApiClient, CountBucket, ProjectCreate};

use super::{clip, fmt_ts};
use crate::cli::ProjectCreateArgs;

pub async fn list(client: ApiClient) -> Result<()> {
    let projects = client.list_projects().await?;
    for p in &projects {
        println!(
            "{}  {}  (client: {})",
            p.id,
            p.name,
            p.client_name.as_deref().unwrap_or("-")
        );
        if !p.thematic_areas.is_empty() {
            println!("    themes: {}", p.thematic_areas.join(", "));
        }
        for s in &p.media_sources {
            println!(
                "    source: {} (last scraped {})",
                s.name,
                fmt_ts(s.last_scraped_at.as_deref())
            );
        }
    }
    println!("\n{} projects", projects.len());
    Ok(())
}

pub async fn create(client: ApiClient, args: ProjectCreateArgs) -> Result<()> {
    let created = client
        .create_project(&ProjectCreate {
            title: args.title,
            description: args.description,
            client_id: args.client,
            media_source_ids: args.sources,
            ..ProjectCreate::default()
        })
        .await
        .context("project creation failed")?;
    println!("created project {} ({})", created.title, created.id);
    Ok(())
}

fn print_buckets(heading: &str, buckets: &[CountBucket]) {
    if buckets.is_empty() {
        return;
    }
    println!("\n{heading}");
    for b in buckets {
        println!("  {:<32} {}", clip(&b.label, 32), b.count);
    }
}

pub async fn dashboard(client: ApiClient, project_id: &str) -> Result<()> {
    let d = client.project_dashboard(project_id).await?;

    println!("{}", d.project.title);
    if let Some(desc) = &d.project.description {
        println!("{desc}");
    }
    println!(
        "client: {}",
        d.project.client_name.as_deref().unwrap_or("-")
    );
    println!(
        "items: {}   extracted: {}   awaiting: {}",
        d.stats.total_items, d.stats.extracted_items, d.stats.awaiting_items
    );

    print_buckets("By source", &d.sources);
    print_buckets("By theme", &d.themes);
    print_buckets("By industry", &d.industry_names);
    print_buckets("By tactic", &d.tactics);
    print_buckets("By geography", &d.geographical_focus);
    print_buckets("By outcome", &d.outcomes);

    if !d.stakeholders.is_empty() {
        println!("\nStakeholders");
        let mut stakeholders: Vec<_> = d.stakeholders.iter().collect();
        stakeholders.sort_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.cmp(b.0)));
        for (name, count) in stakeholders {
            println!("  {:<32} {}", clip(name, 32), count);
        }
    }
    Ok(())
}

pub async fn insights(client: ApiClient, project_id: &str, generate: bool) -> Result<()> {
    if generate {
        let report = client
            .generate_insights(project_id)
            .await
            .context("insight generation failed")?;
        println!("{}", report.insights);
        return Ok(());
    }

    match client.latest_insight(project_id).await? {
        Some(report) => {
            if let Some(at) = &report.generated_at {
                println!("generated {}\n", fmt_ts(Some(at)));
            }
            println!("{}", report.executive_summary);
        }
        None => println!("no insight report yet; run with --generate to create one"),
    }
    Ok(())
}

pub async fn media(client: ApiClient, project_id: &str) -> Result<()> {
    let items = client.project_analysed_media(project_id).await?;
    for item in &items {
        let marker = if item.relevant { "*" } else { " " };
        println!(
            "{marker} {:<40} {:<16}",
            clip(item.title.as_deref().unwrap_or("(untitled)"), 40),
            fmt_ts(item.published_at.as_deref()),
        );
        if !item.matched_thematic_areas.is_empty() {
            let themes: Vec<&str> = item
                .matched_thematic_areas
                .iter()
                .map(|t| t.name.as_str())
                .collect();
            println!("    matched: {}", themes.join(", "));
        }
    }
    let relevant = items.iter().filter(|i| i.relevant).count();
    println!("\n{} analysed, {} relevant", items.len(), relevant);
    Ok(())
}

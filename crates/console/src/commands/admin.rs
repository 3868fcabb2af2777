// crates/console/src/commands/admin.rs
//! Clients, media sources, thematic areas, and scrape triggering.

use anyhow::{Context, Result};
use presswatch_api::{ApiClient, ClientCreate, MediaSourceCreate};

pub async fn create_client(client: ApiClient, name: String, email: Option<String>) -> Result<()> {
    let created = client
        .create_client(&ClientCreate {
            name,
            contact_email: email,
        })
        .await
        .context("client creation failed")?;
    println!("created client {} ({})", created.name, created.id);
    Ok(())
}

pub async fn list_sources(client: ApiClient) -> Result<()> {
    let sources = client.list_media_sources().await?;
    for s in &sources {
        println!(
            "{}  {}  {}",
            s.id,
            s.name,
            s.base_url.as_deref().unwrap_or("-")
        );
    }
    println!("\n{} sources", sources.len());
    Ok(())
}

pub async fn create_source(client: ApiClient, name: String, url: String) -> Result<()> {
    let created = client
        .create_media_source(&MediaSourceCreate {
            name,
            base_url: url,
        })
        .await
        .context("source creation failed")?;
    println!("created source {} ({})", created.name, created.id);
    Ok(())
}

pub async fn list_themes(client: ApiClient, project_id: &str) -> Result<()> {
    let thematics = client.list_thematics(project_id).await?;
    for t in &thematics.thematic_areas {
        println!("{}  {}", t.id, t.name);
        if let Some(desc) = t.description.as_deref().filter(|d| !d.is_empty()) {
            println!("    {desc}");
        }
    }
    println!("\n{} thematic areas", thematics.thematic_areas.len());
    Ok(())
}

pub async fn add_theme(
    client: ApiClient,
    project_id: &str,
    name: &str,
    description: &str,
) -> Result<()> {
    let created = client
        .create_thematic(project_id, name, description)
        .await
        .context("thematic area creation failed")?;
    println!("added theme {} ({})", created.name, created.id);
    Ok(())
}

pub async fn remove_theme(client: ApiClient, thematic_id: &str) -> Result<()> {
    client
        .delete_thematic(thematic_id)
        .await
        .context("thematic area deletion failed")?;
    println!("removed theme {thematic_id}");
    Ok(())
}

pub async fn scrape(client: ApiClient, project_id: &str, source_id: &str) -> Result<()> {
    let outcome = client
        .scrape_rss(project_id, source_id)
        .await
        .context("scrape failed")?;
    println!(
        "scraped {} items from {} ({})",
        outcome.total, outcome.source, outcome.feed_url
    );
    Ok(())
}

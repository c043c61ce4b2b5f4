//! `search` command: run the acquisition pipeline in-process.

use std::sync::Arc;

use anyhow::Context;

use leadscout_fetch::{FetchClient, ProxyPool};
use leadscout_pipeline::{DirectoryAdapter, LeadSearch, SearchOptions, SourceAdapter};

pub(crate) async fn run(
    query: &str,
    location: Option<&str>,
    limit: Option<usize>,
    all_contacts: bool,
    json: bool,
) -> anyhow::Result<()> {
    let config = leadscout_core::load_app_config_from_env()?;

    let fleet = if config.fleet_path.exists() {
        leadscout_core::load_fleet(&config.fleet_path)
            .with_context(|| format!("loading proxy fleet from {}", config.fleet_path.display()))?
            .proxies
    } else {
        tracing::warn!(
            path = %config.fleet_path.display(),
            "no proxy fleet file; fetching direct"
        );
        Vec::new()
    };

    let pool = Arc::new(ProxyPool::from_specs(fleet, config.proxy_block_threshold));
    let fetch = Arc::new(FetchClient::from_app_config(pool, &config));

    let adapters: Vec<Arc<dyn SourceAdapter>> = config
        .directory_base_urls
        .iter()
        .enumerate()
        .map(|(i, base)| {
            Arc::new(DirectoryAdapter::new(
                format!("directory-{}", i + 1),
                base.clone(),
                Arc::clone(&fetch),
            )) as Arc<dyn SourceAdapter>
        })
        .collect();
    anyhow::ensure!(
        !adapters.is_empty(),
        "no directory sources configured; set LEADSCOUT_DIRECTORY_URLS"
    );

    let search = LeadSearch::new(adapters, config.max_concurrent_adapters);
    let options = SearchOptions {
        optimize_contacts: !all_contacts,
        limit,
    };
    let outcome = search.search(query, location, &options).await?;

    if json {
        println!(
            "{}",
            serde_json::json!({
                "businesses": outcome.businesses,
                "sources": outcome.sources,
                "skipped_duplicates": outcome.skipped_duplicates,
            })
        );
        return Ok(());
    }

    if outcome.businesses.is_empty() {
        println!("no businesses found (sources queried: {:?})", outcome.sources);
        return Ok(());
    }

    println!(
        "{} businesses from {:?} ({} duplicates skipped)\n",
        outcome.businesses.len(),
        outcome.sources,
        outcome.skipped_duplicates.len()
    );
    for business in &outcome.businesses {
        println!("• {}", business.name);
        if let Some(phone) = &business.phone_number {
            println!("    phone:   {phone}");
        }
        if let Some(website) = &business.website {
            println!("    website: {website}");
        }
        if let Some(contact) = business.contacts.first() {
            let title = contact.position.as_deref().unwrap_or("-");
            println!("    contact: {} ({title})", contact.name);
        }
        println!("    source:  {}", business.source);
    }
    Ok(())
}

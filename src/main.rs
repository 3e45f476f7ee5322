// cachegate - Read-through caching gateway for REST API clients
// Author: kelexine (https://github.com/kelexine)

use anyhow::{bail, Result};
use cachegate::cli::{Args, Command, FetchArgs};
use cachegate::config::AppConfig;
use cachegate::utils::logging;
use cachegate::{
    AccessPolicy, CacheStore, CachingRestClient, HttpRestClient, MemoryStore, NoopStore,
    ResponseEntity, RestOperations,
};
use clap::Parser;
use futures::future::join_all;
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments
    let args = Args::parse();

    // Phase 1: Load configuration
    let config = AppConfig::load_from(args.config.as_deref())?;

    // Phase 2: Initialize logging
    logging::init(&config.logging)?;
    info!("Starting cachegate v{}", env!("CARGO_PKG_VERSION"));

    match args.command {
        Command::Config => {
            print!("{}", config.to_toml()?);
            Ok(())
        }
        Command::Fetch(fetch) => run_fetch(&config, fetch).await,
    }
}

async fn run_fetch(config: &AppConfig, fetch: FetchArgs) -> Result<()> {
    // Phase 3: Build the upstream client and the cache in front of it
    let client = HttpRestClient::new(&config.client)?;
    let store: Arc<dyn CacheStore> = if config.cache.enabled {
        Arc::new(MemoryStore::from_config(&config.cache))
    } else {
        info!("Response caching disabled");
        Arc::new(NoopStore)
    };

    // Phase 4: Configure fetch auditing
    let policy = Arc::new(AccessPolicy::new());
    policy.set_allowed_uris(
        config
            .audit
            .allowed_uris
            .iter()
            .chain(fetch.allowed.iter())
            .cloned(),
    );
    policy.set_enabled(config.audit.enabled || fetch.audit);

    let gateway = CachingRestClient::new(client, store).with_policy(policy);

    // Phase 5: Fetch every URI concurrently, once per round
    let mut failures = 0;
    for round in 1..=fetch.repeat {
        let results = join_all(
            fetch
                .uris
                .iter()
                .map(|uri| fetch_one(&gateway, uri, fetch.entity)),
        )
        .await;

        for (uri, result) in fetch.uris.iter().zip(results) {
            match result {
                Ok(response) => {
                    println!("{}", json!({ "uri": uri, "round": round, "response": response }));
                }
                Err(e) => {
                    error!("Fetch of {} failed: {}", logging::sanitize_uri(uri), e);
                    failures += 1;
                }
            }
        }
    }

    let stats = gateway.stats();
    info!(
        "Cache stats: {} hits, {} misses, {} stores (hit ratio {:.2})",
        stats.hits,
        stats.misses,
        stats.stores,
        stats.hit_ratio()
    );

    if fetch.metrics {
        print!("{}", cachegate::metrics::gather_metrics());
    }

    if failures > 0 {
        bail!("{} fetch(es) failed", failures);
    }
    Ok(())
}

async fn fetch_one<C, S>(
    gateway: &CachingRestClient<C, S>,
    uri: &str,
    entity: bool,
) -> cachegate::Result<Value>
where
    C: RestOperations,
    S: CacheStore,
{
    if entity {
        let response: ResponseEntity<Value> = gateway.get_for_entity(uri).await?;
        Ok(serde_json::to_value(response)?)
    } else {
        gateway.get_for_object::<Value>(uri).await
    }
}

//! `search` command: drive one pipeline run and render the outcome.
//!
//! Status transitions stream to stdout as the run publishes them; the
//! final snapshot is rendered as a ranked table, or as one JSON document
//! with `--json` (narration suppressed so the output stays parseable).

use std::sync::Arc;
use std::time::Duration;

use nearbrew_core::AppConfig;
use nearbrew_geocode::GeocodeClient;
use nearbrew_places::PlacesClient;
use nearbrew_search::{
    directions_url, LocationProvider, SearchPipeline, SearchSnapshot, SearchStatus,
};

use crate::device::EnvLocationService;

/// Wires clients, the location provider, and the pipeline from
/// configuration.
pub(crate) fn build_pipeline(config: &AppConfig) -> anyhow::Result<SearchPipeline> {
    let geocoder = GeocodeClient::with_base_url(
        config.request_timeout_secs,
        &config.user_agent,
        &config.geocoder_base_url,
    )?;
    let places = PlacesClient::with_base_url(
        config.request_timeout_secs,
        &config.user_agent,
        &config.places_base_url,
    )?;
    let location =
        LocationProvider::new(Arc::new(EnvLocationService::new(config.device_location)));
    Ok(SearchPipeline::new(
        geocoder,
        places,
        location,
        Duration::from_millis(config.fix_wait_ms),
    ))
}

/// Runs one search and renders it. A failed run becomes a non-zero exit.
pub(crate) async fn run(
    pipeline: SearchPipeline,
    postal_code: Option<&str>,
    json: bool,
) -> anyhow::Result<()> {
    let narrator = if json {
        None
    } else {
        let mut updates = pipeline.subscribe();
        Some(tokio::spawn(async move {
            while updates.changed().await.is_ok() {
                println!("{}", updates.borrow_and_update().status);
            }
        }))
    };

    pipeline.run_search(postal_code).await;
    let snapshot = pipeline.snapshot();

    // Dropping the pipeline closes the watch channel; the narrator drains
    // whatever it has not printed yet and exits.
    drop(pipeline);
    if let Some(narrator) = narrator {
        narrator.await?;
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
        if let SearchStatus::Failed(reason) = snapshot.status {
            anyhow::bail!("search failed: {reason}");
        }
        return Ok(());
    }

    render(&snapshot)
}

fn render(snapshot: &SearchSnapshot) -> anyhow::Result<()> {
    match &snapshot.status {
        SearchStatus::Success(_) => {
            println!();
            for (position, place) in snapshot.places.iter().enumerate() {
                let marker = if snapshot.focused == Some(place.id) {
                    '>'
                } else {
                    ' '
                };
                println!(
                    "{marker} {:>2}. {:<32} {:>6.2} mi  {}",
                    position + 1,
                    place.name,
                    place.distance_miles,
                    place.address_line.as_deref().unwrap_or("-")
                );
            }
            if let Some(place) = snapshot
                .places
                .iter()
                .find(|place| snapshot.focused == Some(place.id))
            {
                println!();
                println!(
                    "Directions: {}",
                    directions_url(place.coordinate, &place.name)
                );
            }
            Ok(())
        }
        SearchStatus::Failed(reason) => {
            if let Some(alert) = &snapshot.alert {
                eprintln!("{alert}");
            }
            anyhow::bail!("search failed: {reason}");
        }
        // Empty and the progress states were already narrated.
        _ => Ok(()),
    }
}

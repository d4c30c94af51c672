use super::*;
use std::{sync::Arc, time::Duration};
use venuemap_core::{
    gateways::{geocode::GeoCodingGateway, render::RenderingSurface},
    util::validate::is_within_area,
};

#[derive(Debug, Clone)]
pub struct GeocodingBatches {
    pub batch_size: usize,
    /// Delay between two batches
    pub pacing: Duration,
    pub service_area: MapBbox,
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct GeocodingSummary {
    pub resolved: usize,
    pub not_found: usize,
    pub failed: usize,
}

/// Look up the coordinates of all venues without a position.
///
/// The lookups of a batch run concurrently on the blocking thread pool,
/// the results are applied to the state after each batch.
pub async fn resolve_coordinates<G, R, S>(
    state: &mut MapState<R, S>,
    gateway: Arc<G>,
    batches: &GeocodingBatches,
) -> Result<GeocodingSummary>
where
    G: GeoCodingGateway + Send + Sync + 'static,
    R: RenderingSurface,
    S: CircleRepo,
{
    let pending = state.unresolved_venues();
    let mut summary = GeocodingSummary::default();
    if pending.is_empty() {
        debug!("All venues have coordinates");
        return Ok(summary);
    }
    let batch_size = batches.batch_size.max(1);
    let batch_count = pending.len().div_ceil(batch_size);
    info!(
        "Resolving {} address(es) in {} batch(es)",
        pending.len(),
        batch_count
    );
    for (batch_idx, batch) in pending.chunks(batch_size).enumerate() {
        if batch_idx > 0 && !batches.pacing.is_zero() {
            tokio::time::sleep(batches.pacing).await;
        }
        let handles: Vec<_> = batch
            .iter()
            .cloned()
            .map(|(id, address)| {
                let gateway = Arc::clone(&gateway);
                tokio::task::spawn_blocking(move || {
                    (id, gateway.resolve_address_lat_lng(&address))
                })
            })
            .collect();
        for handle in handles {
            let (id, res) = match handle.await {
                Ok(lookup) => lookup,
                Err(err) => {
                    warn!("Address lookup aborted: {err}");
                    summary.failed += 1;
                    continue;
                }
            };
            match res {
                Ok(Some((lat, lng))) => match MapPoint::try_from_lat_lng_deg(lat, lng) {
                    Ok(pos) if is_within_area(pos, &batches.service_area) => {
                        if state.apply_resolved_position(id, pos) {
                            summary.resolved += 1;
                        }
                    }
                    _ => {
                        debug!("Discarding position ({lat},{lng}) of venue {id}");
                        summary.not_found += 1;
                    }
                },
                Ok(None) => {
                    summary.not_found += 1;
                }
                Err(err) => {
                    let err = usecases::Error::from(err);
                    warn!("Failed to resolve the address of venue {id}: {err}");
                    summary.failed += 1;
                }
            }
        }
        state.finish_geocoding_batch();
        debug!("Finished batch {}/{}", batch_idx + 1, batch_count);
    }
    info!(
        "Resolved {} address(es), {} not found, {} failed",
        summary.resolved, summary.not_found, summary.failed
    );
    Ok(summary)
}

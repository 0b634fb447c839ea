//! Venue catalog with in-memory caching using moka
//!
//! Venues are read from a JSON catalog file. Lookups are served from the
//! cache; a miss re-reads the file so catalog edits show up without a restart.
//! Unknown slugs are remembered briefly so they do not re-read the file on
//! every request.

use moka::future::Cache;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info};

use crate::delivery::models::DistanceRange;
use crate::delivery::ranges::validate_venue_pricing;
use crate::delivery::PricingError;
use crate::error::{AppError, Result};

/// A venue and its delivery pricing, amounts in minor units
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Venue {
    pub slug: String,
    pub latitude: f64,
    pub longitude: f64,
    pub order_minimum: i64,
    pub base_price: i64,
    pub distance_ranges: Vec<DistanceRange>,
}

/// On-disk catalog layout
#[derive(Debug, Deserialize)]
struct VenueCatalog {
    venues: Vec<Venue>,
}

/// Upper bound on how long an unknown slug is answered without a reload
const MISSING_SLUG_TTL: Duration = Duration::from_secs(30);

/// Read-only venue lookup backed by a catalog file
#[derive(Clone)]
pub struct VenueStore {
    path: Arc<PathBuf>,
    /// slug -> Venue
    venues: Cache<String, Arc<Venue>>,
    /// slugs absent from the last catalog read
    missing: Cache<String, ()>,
}

impl VenueStore {
    pub fn new(path: impl Into<PathBuf>, ttl: Duration, capacity: u64) -> Self {
        Self {
            path: Arc::new(path.into()),
            venues: Cache::builder()
                .max_capacity(capacity)
                .time_to_live(ttl)
                .build(),
            missing: Cache::builder()
                .max_capacity(capacity)
                .time_to_live(ttl.min(MISSING_SLUG_TTL))
                .build(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Look up a venue by slug.
    pub async fn get(&self, slug: &str) -> Result<Arc<Venue>> {
        if let Some(cached) = self.venues.get(slug).await {
            debug!("Cache HIT for venue: {}", slug);
            return Ok(cached);
        }
        if self.missing.get(slug).await.is_some() {
            debug!("Negative cache HIT for venue: {}", slug);
            return Err(AppError::VenueNotFound(slug.to_string()));
        }

        debug!("Cache MISS for venue: {}", slug);
        let mut found = None;
        for venue in load_catalog(&self.path).await? {
            let venue = Arc::new(venue);
            if venue.slug == slug {
                found = Some(Arc::clone(&venue));
            }
            self.venues.insert(venue.slug.clone(), venue).await;
        }

        match found {
            Some(venue) => Ok(venue),
            None => {
                self.missing.insert(slug.to_string(), ()).await;
                Err(AppError::VenueNotFound(slug.to_string()))
            }
        }
    }

    /// Load the whole catalog into the cache. Returns the venue count.
    pub async fn warm(&self) -> Result<usize> {
        let venues = load_catalog(&self.path).await?;
        let count = venues.len();
        self.missing.invalidate_all();
        for venue in venues {
            self.venues.insert(venue.slug.clone(), Arc::new(venue)).await;
        }
        info!("Venue cache warmed with {} venue(s) from {}", count, self.path.display());
        Ok(count)
    }

    pub fn stats(&self) -> VenueCacheStats {
        VenueCacheStats {
            venues_cached: self.venues.entry_count(),
        }
    }

    pub fn invalidate_all(&self) {
        self.venues.invalidate_all();
        self.missing.invalidate_all();
        info!("Venue cache invalidated");
    }
}

/// Cache statistics for the health endpoint
#[derive(Debug, Clone, Copy, Serialize)]
pub struct VenueCacheStats {
    pub venues_cached: u64,
}

/// Read and check every venue in the catalog file.
///
/// One malformed venue fails the whole load.
async fn load_catalog(path: &Path) -> Result<Vec<Venue>> {
    let bytes = tokio::fs::read(path).await?;
    let catalog: VenueCatalog = serde_json::from_slice(&bytes)?;

    for venue in &catalog.venues {
        if let Err(e) =
            validate_venue_pricing(venue.order_minimum, venue.base_price, &venue.distance_ranges)
        {
            error!(venue = %venue.slug, "Rejecting venue catalog: {}", e);
            return Err(match e {
                PricingError::MalformedSchedule { message, errors } => {
                    AppError::Pricing(PricingError::MalformedSchedule {
                        message: format!("venue {}: {}", venue.slug, message),
                        errors,
                    })
                }
                other => AppError::Pricing(other),
            });
        }
    }

    Ok(catalog.venues)
}

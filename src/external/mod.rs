#[cfg(test)]
pub(crate) mod fixtures;
pub mod google_maps;
pub mod mapbox;

use async_trait::async_trait;

use crate::{entities::Coordinates, error::Error};

/// Resolves a free-text place name to coordinates.
///
/// `Ok(None)` means the lookup worked but found nothing.
#[async_trait]
pub trait Geocoder: Send + Sync {
    async fn resolve(&self, name: &str) -> Result<Option<Coordinates>, Error>;
}

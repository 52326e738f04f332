//! Location resolution
//!
//! Turns the free-text place name from the inbound query into a geocoded
//! `GeoLocation` via the provider's lookup.

use crate::error::WeatherError;
use crate::models::GeoLocation;
use crate::provider::WeatherProvider;
use tracing::debug;

pub struct LocationResolver;

impl LocationResolver {
    /// Resolve a place name to a location.
    ///
    /// The provider's ranking is trusted: with multiple candidates the first
    /// one wins. Zero candidates fails with `LocationNotFound`; there is no
    /// silent default.
    pub async fn resolve(
        provider: &dyn WeatherProvider,
        place: &str,
    ) -> Result<GeoLocation, WeatherError> {
        let place = place.trim();
        if place.is_empty() {
            return Err(WeatherError::malformed("location must not be empty"));
        }

        debug!(place, "resolving location");
        let candidates = provider.geocode(place).await?;

        let Some(location) = candidates.into_iter().next() else {
            return Err(WeatherError::not_found(place));
        };

        debug!(
            "resolved '{}' to {} at ({:.4}, {:.4})",
            place, location.name, location.latitude, location.longitude
        );
        Ok(location)
    }
}

// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! One-shot acquisition of the user's position for the initial map view.
//!
//! There is no retry: a failure is reported once and the map stays
//! uninitialized for the lifetime of the process.

use serde::Deserialize;

use crate::config::Config;
use crate::error::{AppError, Result};
use crate::models::{Coordinates, MapView};

/// Something that can tell where the user is.
pub trait LocationProvider {
    fn current_position(&self) -> impl std::future::Future<Output = Result<Coordinates>> + Send;
}

/// Position taken from configuration.
#[derive(Debug, Clone, Copy)]
pub struct FixedLocationProvider {
    position: Coordinates,
}

impl FixedLocationProvider {
    pub fn new(position: Coordinates) -> Self {
        Self { position }
    }
}

impl LocationProvider for FixedLocationProvider {
    async fn current_position(&self) -> Result<Coordinates> {
        Ok(self.position)
    }
}

/// Position looked up from a JSON geolocation endpoint.
///
/// The endpoint must answer with `{"latitude": .., "longitude": ..}`.
#[derive(Debug, Clone)]
pub struct HttpLocationProvider {
    client: reqwest::Client,
    url: String,
}

#[derive(Debug, Deserialize)]
struct GeolocationResponse {
    latitude: f64,
    longitude: f64,
}

impl HttpLocationProvider {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            url: url.into(),
        }
    }
}

impl LocationProvider for HttpLocationProvider {
    async fn current_position(&self) -> Result<Coordinates> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| AppError::LocationUnavailable(e.to_string()))?;

        let body: GeolocationResponse = response
            .json()
            .await
            .map_err(|e| AppError::LocationUnavailable(e.to_string()))?;

        let position = Coordinates::new(body.latitude, body.longitude);
        if !is_on_map(position) {
            return Err(AppError::LocationUnavailable(format!(
                "geolocation returned invalid position ({}, {})",
                body.latitude, body.longitude
            )));
        }
        Ok(position)
    }
}

/// Used when nothing is configured; always fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnavailableLocationProvider;

impl LocationProvider for UnavailableLocationProvider {
    async fn current_position(&self) -> Result<Coordinates> {
        Err(AppError::LocationUnavailable(
            "no home position or geolocation URL configured".to_string(),
        ))
    }
}

/// Provider selected from configuration.
#[derive(Debug, Clone)]
pub enum ConfiguredLocation {
    Fixed(FixedLocationProvider),
    Http(HttpLocationProvider),
    Unavailable(UnavailableLocationProvider),
}

impl ConfiguredLocation {
    /// A configured home position wins over the geolocation URL.
    pub fn from_config(config: &Config) -> Self {
        if let Some(home) = config.home_position {
            ConfiguredLocation::Fixed(FixedLocationProvider::new(home))
        } else if let Some(url) = &config.geolocation_url {
            ConfiguredLocation::Http(HttpLocationProvider::new(url.clone()))
        } else {
            ConfiguredLocation::Unavailable(UnavailableLocationProvider)
        }
    }
}

impl LocationProvider for ConfiguredLocation {
    async fn current_position(&self) -> Result<Coordinates> {
        match self {
            ConfiguredLocation::Fixed(p) => p.current_position().await,
            ConfiguredLocation::Http(p) => p.current_position().await,
            ConfiguredLocation::Unavailable(p) => p.current_position().await,
        }
    }
}

/// Resolve the starting map view, or `None` if the position is unavailable.
pub async fn initialize_map<P: LocationProvider>(provider: &P, zoom: u8) -> Option<MapView> {
    match provider.current_position().await {
        Ok(center) => {
            tracing::info!(
                latitude = center.latitude,
                longitude = center.longitude,
                "Map initialized"
            );
            Some(MapView { center, zoom })
        }
        Err(e) => {
            tracing::error!(error = %e, "Could not get the location, map not initialized");
            None
        }
    }
}

fn is_on_map(position: Coordinates) -> bool {
    position.latitude.is_finite()
        && position.longitude.is_finite()
        && (-90.0..=90.0).contains(&position.latitude)
        && (-180.0..=180.0).contains(&position.longitude)
}

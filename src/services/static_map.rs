// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Static route map rendering.
//!
//! Builds a static-image request for the finished route, encoding the path as
//! a precision-5 polyline overlay. Only called at finalization. Every failure
//! (no credential, bad coordinates, service rejection) degrades to `None`.

use crate::config::Config;
use crate::models::{LatLng, Path};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// Polyline precision expected by the map service.
const POLYLINE_PRECISION: u32 = 5;

/// Route overlay stroke: width, color, opacity.
const PATH_STROKE: &str = "path-4+ff5a1f-0.9";

/// Rendered image size (points); served at @2x.
const IMAGE_SIZE: &str = "600x400@2x";

/// Padding around the auto-fitted route (pixels).
const IMAGE_PADDING: u32 = 40;

/// Upper bound for the verification request.
const VERIFY_TIMEOUT: Duration = Duration::from_secs(5);

/// Base map styles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MapStyle {
    Streets,
    #[default]
    Outdoors,
    Light,
    Dark,
    Satellite,
}

impl MapStyle {
    pub fn style_id(self) -> &'static str {
        match self {
            MapStyle::Streets => "mapbox/streets-v12",
            MapStyle::Outdoors => "mapbox/outdoors-v12",
            MapStyle::Light => "mapbox/light-v11",
            MapStyle::Dark => "mapbox/dark-v11",
            MapStyle::Satellite => "mapbox/satellite-streets-v12",
        }
    }
}

impl FromStr for MapStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "streets" => Ok(MapStyle::Streets),
            "outdoors" => Ok(MapStyle::Outdoors),
            "light" => Ok(MapStyle::Light),
            "dark" => Ok(MapStyle::Dark),
            "satellite" => Ok(MapStyle::Satellite),
            other => Err(format!("unknown map style: {}", other)),
        }
    }
}

impl fmt::Display for MapStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.style_id())
    }
}

/// Client for the static map image service.
#[derive(Clone)]
pub struct StaticMapService {
    http: reqwest::Client,
    base_url: String,
    access_token: Option<String>,
    style: MapStyle,
    verify: bool,
}

impl StaticMapService {
    pub fn new(config: &Config) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: config.map_base_url.trim_end_matches('/').to_string(),
            access_token: config.map_access_token.clone(),
            style: config.map_style,
            verify: config.map_verify,
        }
    }

    /// Build the image URL for a route, or `None` when the service is
    /// unavailable or the path cannot be encoded.
    pub fn static_map_url(&self, points: &[LatLng], style: MapStyle) -> Option<String> {
        let token = self.access_token.as_deref()?;
        if points.is_empty() {
            return None;
        }

        let encoded = match polyline::encode_coordinates(
            points.iter().map(|p| geo::Coord::from(*p)),
            POLYLINE_PRECISION,
        ) {
            Ok(encoded) => encoded,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to encode route polyline");
                return None;
            }
        };

        Some(format!(
            "{}/styles/v1/{}/static/{}({})/auto/{}?padding={}&access_token={}",
            self.base_url,
            style.style_id(),
            PATH_STROKE,
            urlencoding::encode(&encoded),
            IMAGE_SIZE,
            IMAGE_PADDING,
            urlencoding::encode(token),
        ))
    }

    /// Render the finished route with the configured style.
    ///
    /// With verification enabled, the URL is only kept if the service accepts
    /// a HEAD request for it (an invalid credential reads as unavailable).
    pub async fn render(&self, path: &Path) -> Option<String> {
        let url = self.static_map_url(path.points(), self.style)?;
        if !self.verify {
            return Some(url);
        }

        match self.http.head(&url).timeout(VERIFY_TIMEOUT).send().await {
            Ok(response) if response.status().is_success() => Some(url),
            Ok(response) => {
                tracing::warn!(status = %response.status(), "Static map request rejected");
                None
            }
            Err(e) => {
                tracing::warn!(error = %e, "Static map request failed");
                None
            }
        }
    }
}

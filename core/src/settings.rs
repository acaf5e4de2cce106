use std::fmt;

use crate::geometry::LngLat;

pub const DEFAULT_TITLE: &str = "Alberta Abandoned Well Finder";
pub const DEFAULT_DATA_SRC: &str = "/abandoned_wells.geojson";
pub const DEFAULT_MAP_STYLE: &str = "mapbox://styles/mapbox/dark-v11";
pub const DEFAULT_CENTER: LngLat = LngLat::new(-116.5765, 53.9333);
pub const DEFAULT_ZOOM: f64 = 5.0;
pub const DEFAULT_FLY_TO_ZOOM: f64 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InitialView {
    pub center: LngLat,
    pub zoom: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ViewerSettings {
    pub title: String,
    pub data_src: String,
    pub map_style: String,
    pub initial_view: InitialView,
    pub fly_to_zoom: f64,
}

impl Default for ViewerSettings {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            data_src: DEFAULT_DATA_SRC.to_string(),
            map_style: DEFAULT_MAP_STYLE.to_string(),
            initial_view: InitialView {
                center: DEFAULT_CENTER,
                zoom: DEFAULT_ZOOM,
            },
            fly_to_zoom: DEFAULT_FLY_TO_ZOOM,
        }
    }
}

/// Map-service access token. Never empty.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(String);

impl AccessToken {
    /// Blank values count as missing.
    pub fn from_env_value(value: Option<&str>) -> Option<Self> {
        let trimmed = value?.trim();
        if trimmed.is_empty() {
            return None;
        }
        Some(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken(..)")
    }
}

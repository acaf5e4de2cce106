use well_finder_core::{AccessToken, InitialView, LngLat, ViewerSettings};

mod generated {
    include!(concat!(env!("OUT_DIR"), "/viewer_config.rs"));
}

/// Settings baked in from `viewer.toml` by the build script.
pub(crate) fn viewer_settings() -> ViewerSettings {
    ViewerSettings {
        title: generated::TITLE.to_string(),
        data_src: generated::DATA_SRC.to_string(),
        map_style: generated::MAP_STYLE.to_string(),
        initial_view: InitialView {
            center: LngLat::new(generated::INITIAL_LONGITUDE, generated::INITIAL_LATITUDE),
            zoom: generated::INITIAL_ZOOM,
        },
        fly_to_zoom: generated::FLY_TO_ZOOM,
    }
}

/// Token forwarded by the build script from the environment or `.env` files.
pub(crate) fn access_token() -> Option<AccessToken> {
    AccessToken::from_env_value(option_env!("WELL_FINDER_MAPBOX_TOKEN"))
}

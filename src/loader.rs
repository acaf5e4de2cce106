use gloo::net::http::Request;

use well_finder_core::{decode_geometry_collection, LoadError, LoadedWells};

/// Fetches and decodes the bundled wells file. Called once per page load.
pub(crate) async fn fetch_wells(src: &str) -> Result<LoadedWells, LoadError> {
    let response = Request::get(src)
        .send()
        .await
        .map_err(transport_error)?;
    if !response.ok() {
        return Err(LoadError::Status {
            status: response.status(),
        });
    }
    let text = response.text().await.map_err(transport_error)?;
    decode_geometry_collection(&text)
}

fn transport_error(err: gloo::net::Error) -> LoadError {
    LoadError::transport(err.to_string())
}

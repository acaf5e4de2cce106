pub const LOAD_FAILURE_PREFIX: &str = "Failed to fetch well data";
pub const UNKNOWN_FAILURE_MESSAGE: &str = "An unknown error occurred.";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LoadError {
    #[error("HTTP error! status: {status}")]
    Status { status: u16 },
    #[error("GeoJSON file is not a valid GeometryCollection.")]
    NotGeometryCollection,
    #[error("{0}")]
    Json(String),
    #[error("{0}")]
    Transport(String),
    #[error("{}", UNKNOWN_FAILURE_MESSAGE)]
    Unknown,
}

impl LoadError {
    /// A network-level failure. Without any detail there is nothing to report.
    pub fn transport(detail: impl Into<String>) -> Self {
        let detail = detail.into();
        if detail.trim().is_empty() {
            LoadError::Unknown
        } else {
            LoadError::Transport(detail)
        }
    }

    /// Message shown in place of the markers.
    pub fn user_message(&self) -> String {
        match self {
            LoadError::Unknown => UNKNOWN_FAILURE_MESSAGE.to_string(),
            other => format!("{LOAD_FAILURE_PREFIX}: {other}"),
        }
    }
}

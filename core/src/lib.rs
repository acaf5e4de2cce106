pub mod action;
pub mod error;
pub mod geometry;
pub mod settings;
pub mod state;
pub mod view;
pub mod viewer;

pub use action::{Effect, MapCommand, ViewerAction};
pub use error::LoadError;
pub use geometry::{decode_geometry_collection, GeometryCollection, LngLat, LoadedWells, Point};
pub use settings::{AccessToken, InitialView, ViewerSettings};
pub use state::{Selection, ViewState};
pub use view::{format_coordinate, Frame, MarkerSpec, PopupSpec, StatusLine, ViewFrame};
pub use viewer::{Outcome, Viewer, ViewerMode};

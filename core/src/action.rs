use crate::error::LoadError;
use crate::geometry::{LngLat, LoadedWells};

#[derive(Clone, Debug)]
pub enum ViewerAction {
    WellsLoaded(Result<LoadedWells, LoadError>),
    MarkerActivated { index: usize },
    PopupClosed,
    /// A click on the map background. Never dismisses the popup.
    MapClicked,
}

/// Commands for the map widget. Nothing is reported back.
#[derive(Clone, Debug, PartialEq)]
pub enum MapCommand {
    FlyTo { center: LngLat, zoom: f64 },
}

#[derive(Clone, Debug, PartialEq)]
pub enum Effect {
    FetchWells { src: String },
    Map(MapCommand),
}

use crate::error::LoadError;
use crate::geometry::{LoadedWells, Point};
use crate::view::{MarkerSpec, PopupSpec, StatusLine, ViewFrame};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Selection {
    pub index: usize,
    pub point: Point,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ViewState {
    wells: Vec<Point>,
    loading: bool,
    error: Option<String>,
    selected: Option<Selection>,
}

impl ViewState {
    pub fn new() -> Self {
        Self {
            wells: Vec::new(),
            loading: true,
            error: None,
            selected: None,
        }
    }

    pub fn wells(&self) -> &[Point] {
        &self.wells
    }

    pub fn loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn selected(&self) -> Option<&Selection> {
        self.selected.as_ref()
    }

    /// Markers are only live once the load succeeded.
    pub fn markers_visible(&self) -> bool {
        !self.loading && self.error.is_none()
    }

    /// Applies the one and only load result. Returns false when a result was already applied.
    pub fn finish_load(&mut self, result: Result<LoadedWells, LoadError>) -> bool {
        if !self.loading {
            return false;
        }
        match result {
            Ok(loaded) => {
                self.wells = loaded.wells;
                self.error = None;
            }
            Err(err) => {
                self.wells.clear();
                self.error = Some(err.user_message());
            }
        }
        self.loading = false;
        true
    }

    pub fn select(&mut self, index: usize) -> Option<Point> {
        if !self.markers_visible() {
            return None;
        }
        let point = *self.wells.get(index)?;
        self.selected = Some(Selection { index, point });
        Some(point)
    }

    pub fn deselect(&mut self) -> bool {
        self.selected.take().is_some()
    }

    pub fn frame(&self) -> ViewFrame {
        let status = if self.loading {
            StatusLine::Loading
        } else if let Some(error) = &self.error {
            StatusLine::Error(error.clone())
        } else {
            StatusLine::Ready
        };
        let markers = if self.markers_visible() {
            self.wells
                .iter()
                .enumerate()
                .map(|(index, point)| MarkerSpec {
                    index,
                    position: point.coordinates,
                })
                .collect()
        } else {
            Vec::new()
        };
        let popup = self
            .selected
            .as_ref()
            .map(|selection| PopupSpec::for_point(selection.index, &selection.point));
        ViewFrame {
            status,
            markers,
            popup,
        }
    }
}

impl Default for ViewState {
    fn default() -> Self {
        Self::new()
    }
}

use std::rc::Rc;

use gloo::events::EventListener;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, HtmlElement};

use crate::mapbox;
use well_finder_core::view::POPUP_TITLE;
use well_finder_core::{AccessToken, LngLat, MarkerSpec, PopupSpec, ViewFrame, ViewerSettings};

/// What the viewer needs from a map widget.
pub(crate) trait MapSurface {
    fn replace_markers(&mut self, markers: &[MarkerSpec]);
    fn show_popup(&mut self, popup: &PopupSpec);
    fn hide_popup(&mut self);
    fn fly_to(&self, center: LngLat, zoom: f64);
}

#[derive(Clone)]
pub(crate) struct SurfaceHooks {
    pub(crate) on_marker: Rc<dyn Fn(usize)>,
    pub(crate) on_popup_close: Rc<dyn Fn()>,
    pub(crate) on_map_click: Rc<dyn Fn()>,
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum PopupChange {
    Keep,
    Show(PopupSpec),
    Hide,
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) struct SurfacePlan {
    /// `Some` when the marker set differs from what is on the map.
    pub(crate) markers: Option<Vec<MarkerSpec>>,
    pub(crate) popup: PopupChange,
}

impl SurfacePlan {
    pub(crate) fn is_noop(&self) -> bool {
        self.markers.is_none() && self.popup == PopupChange::Keep
    }
}

pub(crate) fn surface_plan(previous: Option<&ViewFrame>, next: &ViewFrame) -> SurfacePlan {
    let previous_markers = previous.map(|frame| frame.markers.as_slice()).unwrap_or(&[]);
    let markers = if previous_markers == next.markers.as_slice() {
        None
    } else {
        Some(next.markers.clone())
    };
    let previous_popup = previous.and_then(|frame| frame.popup.as_ref());
    let popup = match (previous_popup, next.popup.as_ref()) {
        (before, after) if before == after => PopupChange::Keep,
        (_, Some(next)) => PopupChange::Show(next.clone()),
        (Some(_), None) => PopupChange::Hide,
        (None, None) => PopupChange::Keep,
    };
    SurfacePlan { markers, popup }
}

pub(crate) fn apply_plan<S: MapSurface>(surface: &mut S, plan: SurfacePlan) {
    if let Some(markers) = plan.markers {
        surface.replace_markers(&markers);
    }
    match plan.popup {
        PopupChange::Keep => {}
        PopupChange::Show(popup) => surface.show_popup(&popup),
        PopupChange::Hide => surface.hide_popup(),
    }
}

struct MountedMarker {
    marker: mapbox::Marker,
    _click: EventListener,
}

pub(crate) struct MapboxSurface {
    map: mapbox::Map,
    document: Document,
    markers: Vec<MountedMarker>,
    popup: mapbox::Popup,
    on_marker: Rc<dyn Fn(usize)>,
    _popup_close: Closure<dyn FnMut()>,
    _map_click: Closure<dyn FnMut()>,
}

impl MapboxSurface {
    pub(crate) fn mount(
        container: &HtmlElement,
        settings: &ViewerSettings,
        token: &AccessToken,
        hooks: SurfaceHooks,
    ) -> Result<Self, JsValue> {
        let document = web_sys::window()
            .and_then(|window| window.document())
            .ok_or_else(|| JsValue::from_str("document unavailable"))?;
        let view = settings.initial_view;
        let map_options = mapbox::options(&[
            ("container", container.clone().into()),
            ("accessToken", JsValue::from_str(token.as_str())),
            ("style", JsValue::from_str(&settings.map_style)),
            ("center", mapbox::lng_lat_array(view.center).into()),
            ("zoom", JsValue::from_f64(view.zoom)),
        ])?;
        let map = mapbox::Map::new(&map_options)?;

        let on_map_click = hooks.on_map_click.clone();
        let map_click = Closure::<dyn FnMut()>::new(move || on_map_click());
        map.on("click", map_click.as_ref().unchecked_ref());

        let popup_options = mapbox::options(&[
            ("anchor", JsValue::from_str("bottom")),
            ("closeOnClick", JsValue::FALSE),
        ])?;
        let popup = mapbox::Popup::new(&popup_options)?;
        let on_popup_close = hooks.on_popup_close.clone();
        let popup_close = Closure::<dyn FnMut()>::new(move || on_popup_close());
        popup.on("close", popup_close.as_ref().unchecked_ref());

        Ok(Self {
            map,
            document,
            markers: Vec::new(),
            popup,
            on_marker: hooks.on_marker,
            _popup_close: popup_close,
            _map_click: map_click,
        })
    }

    pub(crate) fn remove(self) {
        for mounted in &self.markers {
            mounted.marker.remove();
        }
        self.map.remove();
    }

    fn mount_marker(&self, spec: MarkerSpec) -> Result<MountedMarker, JsValue> {
        let marker = mapbox::Marker::new()?;
        marker.set_lng_lat(&mapbox::lng_lat_array(spec.position));
        marker.add_to(&self.map);
        let on_marker = self.on_marker.clone();
        let index = spec.index;
        let click = EventListener::new(&marker.get_element(), "click", move |event| {
            event.stop_propagation();
            on_marker(index);
        });
        Ok(MountedMarker {
            marker,
            _click: click,
        })
    }

    fn popup_content(&self, popup: &PopupSpec) -> Result<Element, JsValue> {
        popup_content(&self.document, popup)
    }
}

impl MapSurface for MapboxSurface {
    fn replace_markers(&mut self, markers: &[MarkerSpec]) {
        for mounted in self.markers.drain(..) {
            mounted.marker.remove();
        }
        let mut mounted = Vec::with_capacity(markers.len());
        for spec in markers {
            match self.mount_marker(*spec) {
                Ok(marker) => mounted.push(marker),
                Err(err) => {
                    gloo::console::error!("failed to place marker", spec.index, err);
                }
            }
        }
        self.markers = mounted;
        gloo::console::log!(format!("placed {} well markers", self.markers.len()));
    }

    fn show_popup(&mut self, popup: &PopupSpec) {
        let content = match self.popup_content(popup) {
            Ok(content) => content,
            Err(err) => {
                gloo::console::error!("failed to build popup", err);
                return;
            }
        };
        self.popup.set_lng_lat(&mapbox::lng_lat_array(popup.anchor));
        self.popup.set_dom_content(&content);
        if !self.popup.is_open() {
            self.popup.add_to(&self.map);
        }
    }

    fn hide_popup(&mut self) {
        if self.popup.is_open() {
            self.popup.remove();
        }
    }

    fn fly_to(&self, center: LngLat, zoom: f64) {
        match mapbox::options(&[
            ("center", mapbox::lng_lat_array(center).into()),
            ("zoom", JsValue::from_f64(zoom)),
        ]) {
            Ok(options) => self.map.fly_to(&options),
            Err(err) => gloo::console::error!("failed to build flyTo options", err),
        }
    }
}

pub(crate) fn popup_content(document: &Document, popup: &PopupSpec) -> Result<Element, JsValue> {
    let root = document.create_element("div")?;
    root.set_class_name("well-popup");
    let title = document.create_element("h3")?;
    title.set_text_content(Some(POPUP_TITLE));
    root.append_child(&title)?;
    for (label, value) in [("Longitude:", &popup.longitude), ("Latitude:", &popup.latitude)] {
        let line = document.create_element("p")?;
        let strong = document.create_element("strong")?;
        strong.set_text_content(Some(label));
        line.append_child(&strong)?;
        line.append_child(&document.create_text_node(&format!(" {value}")))?;
        root.append_child(&line)?;
    }
    Ok(root)
}

#[cfg(test)]
mod tests {
    use super::*;
    use well_finder_core::{Point, StatusLine};

    #[derive(Default)]
    struct RecordingSurface {
        markers: Vec<MarkerSpec>,
        marker_rebuilds: usize,
        popup: Option<PopupSpec>,
    }

    impl MapSurface for RecordingSurface {
        fn replace_markers(&mut self, markers: &[MarkerSpec]) {
            self.markers = markers.to_vec();
            self.marker_rebuilds += 1;
        }

        fn show_popup(&mut self, popup: &PopupSpec) {
            self.popup = Some(popup.clone());
        }

        fn hide_popup(&mut self) {
            self.popup = None;
        }

        fn fly_to(&self, _center: LngLat, _zoom: f64) {}
    }

    fn frame(points: &[(f64, f64)], selected: Option<usize>) -> ViewFrame {
        let markers: Vec<MarkerSpec> = points
            .iter()
            .enumerate()
            .map(|(index, &(lng, lat))| MarkerSpec {
                index,
                position: LngLat::new(lng, lat),
            })
            .collect();
        let popup = selected.map(|index| {
            let (lng, lat) = points[index];
            PopupSpec::for_point(index, &Point::new(lng, lat))
        });
        ViewFrame {
            status: StatusLine::Ready,
            markers,
            popup,
        }
    }

    #[test]
    fn loading_frame_needs_no_changes() {
        let loading = ViewFrame {
            status: StatusLine::Loading,
            markers: Vec::new(),
            popup: None,
        };
        assert!(surface_plan(None, &loading).is_noop());
    }

    #[test]
    fn selection_changes_do_not_rebuild_markers() {
        let points = [(-116.5, 53.9), (-113.4, 53.5)];
        let mut surface = RecordingSurface::default();
        let first = frame(&points, None);
        apply_plan(&mut surface, surface_plan(None, &first));
        assert_eq!(surface.marker_rebuilds, 1);
        assert_eq!(surface.markers.len(), 2);

        let selected = frame(&points, Some(0));
        apply_plan(&mut surface, surface_plan(Some(&first), &selected));
        let moved = frame(&points, Some(1));
        apply_plan(&mut surface, surface_plan(Some(&selected), &moved));
        assert_eq!(surface.marker_rebuilds, 1);
        assert_eq!(surface.popup.as_ref().map(|popup| popup.index), Some(1));

        let closed = frame(&points, None);
        let plan = surface_plan(Some(&moved), &closed);
        assert_eq!(plan.popup, PopupChange::Hide);
        apply_plan(&mut surface, plan);
        assert!(surface.popup.is_none());
    }

    #[test]
    fn failed_load_clears_markers() {
        let ready = frame(&[(1.0, 2.0)], None);
        let failed = ViewFrame {
            status: StatusLine::Error("Failed to fetch well data: HTTP error! status: 404".into()),
            markers: Vec::new(),
            popup: None,
        };
        let plan = surface_plan(Some(&ready), &failed);
        assert_eq!(plan.markers, Some(Vec::new()));
    }
}

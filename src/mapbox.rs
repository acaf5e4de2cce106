//! Bindings for the parts of Mapbox GL JS the viewer drives.
//!
//! The `mapboxgl` global comes from the script tag in `index.html`.

use js_sys::{Array, Function, Object, Reflect};
use wasm_bindgen::prelude::*;
use web_sys::{HtmlElement, Node};

use well_finder_core::LngLat;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = mapboxgl, js_name = Map)]
    pub(crate) type Map;

    #[wasm_bindgen(catch, constructor, js_namespace = mapboxgl, js_class = "Map")]
    pub(crate) fn new(options: &Object) -> Result<Map, JsValue>;

    #[wasm_bindgen(method, js_name = flyTo)]
    pub(crate) fn fly_to(this: &Map, options: &Object);

    #[wasm_bindgen(method)]
    pub(crate) fn on(this: &Map, event: &str, listener: &Function);

    #[wasm_bindgen(method)]
    pub(crate) fn remove(this: &Map);

    #[wasm_bindgen(js_namespace = mapboxgl, js_name = Marker)]
    pub(crate) type Marker;

    #[wasm_bindgen(catch, constructor, js_namespace = mapboxgl, js_class = "Marker")]
    pub(crate) fn new() -> Result<Marker, JsValue>;

    #[wasm_bindgen(method, js_name = setLngLat)]
    pub(crate) fn set_lng_lat(this: &Marker, lng_lat: &Array) -> Marker;

    #[wasm_bindgen(method, js_name = addTo)]
    pub(crate) fn add_to(this: &Marker, map: &Map) -> Marker;

    #[wasm_bindgen(method, js_name = getElement)]
    pub(crate) fn get_element(this: &Marker) -> HtmlElement;

    #[wasm_bindgen(method)]
    pub(crate) fn remove(this: &Marker);

    #[wasm_bindgen(js_namespace = mapboxgl, js_name = Popup)]
    pub(crate) type Popup;

    #[wasm_bindgen(catch, constructor, js_namespace = mapboxgl, js_class = "Popup")]
    pub(crate) fn new(options: &Object) -> Result<Popup, JsValue>;

    #[wasm_bindgen(method, js_name = setLngLat)]
    pub(crate) fn set_lng_lat(this: &Popup, lng_lat: &Array) -> Popup;

    #[wasm_bindgen(method, js_name = setDOMContent)]
    pub(crate) fn set_dom_content(this: &Popup, node: &Node) -> Popup;

    #[wasm_bindgen(method, js_name = addTo)]
    pub(crate) fn add_to(this: &Popup, map: &Map) -> Popup;

    #[wasm_bindgen(method, js_name = isOpen)]
    pub(crate) fn is_open(this: &Popup) -> bool;

    #[wasm_bindgen(method)]
    pub(crate) fn on(this: &Popup, event: &str, listener: &Function);

    #[wasm_bindgen(method)]
    pub(crate) fn remove(this: &Popup);
}

pub(crate) fn lng_lat_array(position: LngLat) -> Array {
    let array = Array::new();
    array.push(&JsValue::from_f64(position.lng));
    array.push(&JsValue::from_f64(position.lat));
    array
}

/// Builds a plain options object from key/value pairs.
pub(crate) fn options(entries: &[(&str, JsValue)]) -> Result<Object, JsValue> {
    let object = Object::new();
    for (key, value) in entries {
        Reflect::set(&object, &JsValue::from_str(key), value)?;
    }
    Ok(object)
}

use std::cell::RefCell;
use std::rc::Rc;

use gloo::console;
use web_sys::HtmlElement;
use yew::prelude::*;

use crate::boot::{self, BootPhase};
use crate::map_runtime;
use crate::map_surface::{apply_plan, surface_plan, MapSurface, MapboxSurface, SurfaceHooks};
use crate::runtime;
use crate::viewer_core::ViewerCore;
use well_finder_core::view::{CONFIG_ERROR_MESSAGE, CONFIG_ERROR_TITLE, LOADING_MESSAGE};
use well_finder_core::{Frame, MapCommand, StatusLine, ViewFrame, ViewerAction};

#[derive(Properties)]
pub(crate) struct AppProps {
    pub(crate) core: Rc<ViewerCore>,
}

impl PartialEq for AppProps {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.core, &other.core)
    }
}

#[function_component(App)]
pub(crate) fn app(props: &AppProps) -> Html {
    let core = props.core.clone();
    let frame = use_state(|| core.snapshot());
    {
        let core = core.clone();
        let frame = frame.clone();
        use_effect_with((), move |_| {
            let core_for_hook = core.clone();
            let frame_for_hook = frame.clone();
            let subscription = core.subscribe(Rc::new(move || {
                frame_for_hook.set(core_for_hook.snapshot());
            }));
            frame.set(core.snapshot());
            move || drop(subscription)
        });
    }

    match &*frame {
        Frame::ConfigError => html! { <ConfigErrorView /> },
        Frame::Map(view) => {
            let status = match &view.status {
                StatusLine::Loading => html! {
                    <p class="loading-message">{ LOADING_MESSAGE }</p>
                },
                StatusLine::Error(message) => html! {
                    <p class="error-message">{ message.clone() }</p>
                },
                StatusLine::Ready => html! {},
            };
            html! {
                <div class="App">
                    <h1 class="app-title">{ core.settings().title }</h1>
                    { status }
                    <MapView core={core.clone()} frame={view.clone()} />
                </div>
            }
        }
    }
}

#[function_component(ConfigErrorView)]
fn config_error_view() -> Html {
    use_effect_with((), |_| boot::ready());
    html! {
        <div class="config-error">
            <h2>{ CONFIG_ERROR_TITLE }</h2>
            <p>{ CONFIG_ERROR_MESSAGE }</p>
        </div>
    }
}

#[derive(Properties)]
struct MapViewProps {
    core: Rc<ViewerCore>,
    frame: ViewFrame,
}

impl PartialEq for MapViewProps {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.core, &other.core) && self.frame == other.frame
    }
}

type SurfaceSlot = Rc<RefCell<Option<MapboxSurface>>>;

#[function_component(MapView)]
fn map_view(props: &MapViewProps) -> Html {
    let container = use_node_ref();
    let surface: SurfaceSlot = use_mut_ref(|| None);
    let drawn = use_mut_ref(|| None::<ViewFrame>);
    {
        let core = props.core.clone();
        let container = container.clone();
        let surface = surface.clone();
        use_effect_with((), move |_| {
            mount_surface(&core, &container, &surface);
            move || {
                map_runtime::set_map_hook(None);
                if let Some(mounted) = surface.borrow_mut().take() {
                    mounted.remove();
                }
            }
        });
    }
    {
        let surface = surface.clone();
        let drawn = drawn.clone();
        use_effect_with(props.frame.clone(), move |frame| {
            if let Some(mounted) = surface.borrow_mut().as_mut() {
                let plan = surface_plan(drawn.borrow().as_ref(), frame);
                if !plan.is_noop() {
                    apply_plan(mounted, plan);
                }
                *drawn.borrow_mut() = Some(frame.clone());
            }
        });
    }
    html! { <div ref={container} class="map-container" /> }
}

fn mount_surface(core: &Rc<ViewerCore>, container: &NodeRef, slot: &SurfaceSlot) {
    let Some(token) = core.token() else {
        return;
    };
    let Some(element) = container.cast::<HtmlElement>() else {
        console::error!("map container missing");
        return;
    };
    boot::set_phase(BootPhase::MountingMap);
    match MapboxSurface::mount(&element, &core.settings(), &token, surface_hooks(core)) {
        Ok(surface) => {
            *slot.borrow_mut() = Some(surface);
            let slot = slot.clone();
            map_runtime::set_map_hook(Some(Rc::new(move |command| {
                let Ok(surface) = slot.try_borrow() else {
                    return;
                };
                if let Some(surface) = surface.as_ref() {
                    match command {
                        MapCommand::FlyTo { center, zoom } => surface.fly_to(center, zoom),
                    }
                }
            })));
            boot::ready();
        }
        Err(err) => {
            console::error!("failed to start map", err);
            boot::fail(
                "map",
                "The map could not be started.",
                "Check that Mapbox GL JS loaded and the access token is valid.",
            );
        }
    }
}

fn surface_hooks(core: &Rc<ViewerCore>) -> SurfaceHooks {
    let on_marker = core.clone();
    let on_close = core.clone();
    let on_click = core.clone();
    SurfaceHooks {
        on_marker: Rc::new(move |index| {
            runtime::dispatch(&on_marker, ViewerAction::MarkerActivated { index });
        }),
        on_popup_close: Rc::new(move || {
            runtime::dispatch(&on_close, ViewerAction::PopupClosed);
        }),
        on_map_click: Rc::new(move || {
            runtime::dispatch(&on_click, ViewerAction::MapClicked);
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use well_finder_core::{AccessToken, LngLat, LoadedWells, Point, ViewerSettings};

    fn loaded_core() -> Rc<ViewerCore> {
        let token = AccessToken::from_env_value(Some("pk.test"));
        let (core, _) = ViewerCore::boot(ViewerSettings::default(), token);
        core.dispatch(ViewerAction::WellsLoaded(Ok(LoadedWells {
            wells: vec![Point::new(-116.5765, 53.9333), Point::new(-113.4909, 53.5444)],
            skipped: 0,
        })));
        core
    }

    fn popup_index(core: &ViewerCore) -> Option<usize> {
        match core.snapshot() {
            Frame::Map(frame) => frame.popup.map(|popup| popup.index),
            Frame::ConfigError => panic!("expected map frame"),
        }
    }

    #[test]
    fn marker_hook_selects_and_flies_to_well() {
        let core = loaded_core();
        let flights = Rc::new(RefCell::new(Vec::new()));
        let sink = flights.clone();
        map_runtime::set_map_hook(Some(Rc::new(move |command| sink.borrow_mut().push(command))));

        let hooks = surface_hooks(&core);
        (hooks.on_marker)(1);
        (hooks.on_map_click)();
        map_runtime::set_map_hook(None);

        assert_eq!(
            *flights.borrow(),
            vec![MapCommand::FlyTo {
                center: LngLat::new(-113.4909, 53.5444),
                zoom: 10.0,
            }]
        );
        assert_eq!(popup_index(&core), Some(1));

        (hooks.on_popup_close)();
        assert_eq!(popup_index(&core), None);
    }

    #[test]
    fn marker_hook_ignores_unknown_index() {
        let core = loaded_core();
        let flights = Rc::new(RefCell::new(Vec::new()));
        let sink = flights.clone();
        map_runtime::set_map_hook(Some(Rc::new(move |command| sink.borrow_mut().push(command))));

        (surface_hooks(&core).on_marker)(7);
        map_runtime::set_map_hook(None);

        assert!(flights.borrow().is_empty());
        assert_eq!(popup_index(&core), None);
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod browser_tests {
    use super::*;
    use crate::app_builder;
    use crate::map_surface::popup_content;
    use gloo::timers::future::TimeoutFuture;
    use js_sys::Date;
    use wasm_bindgen_test::*;
    use web_sys::Element;
    use well_finder_core::{AccessToken, Point, PopupSpec, ViewerSettings};

    wasm_bindgen_test_configure!(run_in_browser);

    fn test_root(id: &str) -> Element {
        let document = web_sys::window()
            .and_then(|window| window.document())
            .expect("document available");
        let root = document.create_element("div").expect("create test root");
        root.set_id(id);
        document
            .body()
            .expect("body available")
            .append_child(&root)
            .expect("append test root");
        root
    }

    async fn wait_for_text(root: &Element, needle: &str) -> String {
        let start = Date::now();
        loop {
            let text = root.text_content().unwrap_or_default();
            if text.contains(needle) {
                return text;
            }
            if Date::now() - start > 5000.0 {
                panic!("'{needle}' not rendered after 5s, got '{text}'");
            }
            TimeoutFuture::new(10).await;
        }
    }

    #[wasm_bindgen_test]
    async fn missing_token_renders_config_error() {
        console_error_panic_hook::set_once();
        let root = test_root("config-error-root");
        let (core, _handle) = app_builder::start(ViewerSettings::default(), None, Some(root.clone()));
        wait_for_text(&root, CONFIG_ERROR_TITLE).await;
        let text = root.text_content().unwrap_or_default();
        assert!(text.contains(CONFIG_ERROR_MESSAGE));
        assert!(root.query_selector(".map-container").unwrap().is_none());
        assert_eq!(core.snapshot(), Frame::ConfigError);
    }

    #[wasm_bindgen_test]
    async fn failed_load_replaces_loading_message() {
        console_error_panic_hook::set_once();
        let root = test_root("load-failure-root");
        let settings = ViewerSettings {
            data_src: "/__missing_wells__.geojson".to_string(),
            ..ViewerSettings::default()
        };
        let token = AccessToken::from_env_value(Some("pk.test"));
        let (core, _handle) = app_builder::start(settings, token, Some(root.clone()));
        let text = wait_for_text(&root, "Failed to fetch well data").await;
        assert!(text.contains("HTTP error! status: 404"), "got '{text}'");
        assert!(root.query_selector(".map-container").unwrap().is_some());
        assert!(!text.contains(LOADING_MESSAGE));
        match core.snapshot() {
            Frame::Map(frame) => assert!(frame.markers.is_empty()),
            Frame::ConfigError => panic!("expected map frame"),
        }
    }

    #[wasm_bindgen_test]
    fn popup_content_lists_coordinates() {
        let document = web_sys::window()
            .and_then(|window| window.document())
            .expect("document available");
        let popup = PopupSpec::for_point(0, &Point::new(-116.57654321, 53.9333));
        let content = popup_content(&document, &popup).expect("popup content");
        let text = content.text_content().unwrap_or_default();
        assert_eq!(text, "Well LocationLongitude: -116.5765Latitude: 53.9333");
    }
}

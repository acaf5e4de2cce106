use std::rc::Rc;

use gloo::console;
use web_sys::Element;

use crate::boot::{self, BootPhase};
use crate::config;
use crate::runtime;
use crate::viewer_core::ViewerCore;
use crate::yew_app::{App, AppProps};
use well_finder_core::view::CONFIG_ERROR_MESSAGE;
use well_finder_core::{AccessToken, ViewerSettings};

pub(crate) fn run() {
    console_error_panic_hook::set_once();
    boot::set_phase(BootPhase::Starting);
    start(config::viewer_settings(), config::access_token(), None);
}

/// Renders the viewer and kicks off its startup effects.
pub(crate) fn start(
    settings: ViewerSettings,
    token: Option<AccessToken>,
    root: Option<Element>,
) -> (Rc<ViewerCore>, yew::AppHandle<App>) {
    let (core, effects) = ViewerCore::boot(settings, token);
    if core.token().is_none() {
        console::error!(CONFIG_ERROR_MESSAGE);
    }
    let props = AppProps { core: core.clone() };
    let handle = match root {
        Some(root) => yew::Renderer::<App>::with_root_and_props(root, props).render(),
        None => yew::Renderer::<App>::with_props(props).render(),
    };
    runtime::run_effects(&core, effects);
    (core, handle)
}

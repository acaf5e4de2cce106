//! Drives the loading overlay defined in `index.html` (`window.__WF_BOOT`).

#[cfg(target_arch = "wasm32")]
use std::cell::Cell;

#[cfg(target_arch = "wasm32")]
use js_sys::{Array, Function, Object, Reflect};
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::{JsCast, JsValue};

#[cfg(target_arch = "wasm32")]
const BOOT_GLOBAL: &str = "__WF_BOOT";

#[cfg(target_arch = "wasm32")]
thread_local! {
    static SETTLED: Cell<bool> = Cell::new(false);
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum BootPhase {
    Starting,
    MountingMap,
}

impl BootPhase {
    fn label(self) -> &'static str {
        match self {
            BootPhase::Starting => "Starting",
            BootPhase::MountingMap => "Map",
        }
    }

    fn detail(self) -> &'static str {
        match self {
            BootPhase::Starting => "Preparing the well viewer",
            BootPhase::MountingMap => "Loading the basemap",
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn call(method: &str, args: &[JsValue]) {
    let Some(window) = web_sys::window() else {
        return;
    };
    let Ok(boot) = Reflect::get(&window, &JsValue::from_str(BOOT_GLOBAL)) else {
        return;
    };
    let Ok(boot) = boot.dyn_into::<Object>() else {
        return;
    };
    let Ok(func) = Reflect::get(&boot, &JsValue::from_str(method))
        .and_then(|value| value.dyn_into::<Function>())
    else {
        return;
    };
    let array = args.iter().collect::<Array>();
    let _ = func.apply(&boot, &array);
}

/// Marks the overlay as finished. Returns false if it already was.
#[cfg(target_arch = "wasm32")]
fn settle() -> bool {
    SETTLED.with(|flag| !flag.replace(true))
}

pub(crate) fn set_phase(phase: BootPhase) {
    #[cfg(target_arch = "wasm32")]
    {
        call(
            "setPhase",
            &[JsValue::from_str(phase.label()), JsValue::from_str(phase.detail())],
        );
    }
    #[cfg(not(target_arch = "wasm32"))]
    let _ = (phase.label(), phase.detail());
}

pub(crate) fn fail(code: &str, message: &str, hint: &str) {
    #[cfg(target_arch = "wasm32")]
    {
        SETTLED.with(|flag| flag.set(true));
        call(
            "fail",
            &[
                JsValue::from_str(code),
                JsValue::from_str(message),
                JsValue::from_str(hint),
            ],
        );
    }
    #[cfg(not(target_arch = "wasm32"))]
    let _ = (code, message, hint);
}

pub(crate) fn ready() {
    #[cfg(target_arch = "wasm32")]
    {
        if settle() {
            call("ready", &[]);
        }
    }
}

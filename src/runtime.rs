use std::rc::Rc;

use gloo::console;
use wasm_bindgen_futures::spawn_local;

use crate::loader;
use crate::map_runtime;
use crate::viewer_core::ViewerCore;
use well_finder_core::{Effect, Outcome, ViewerAction};

pub(crate) fn dispatch(core: &Rc<ViewerCore>, action: ViewerAction) {
    let is_load = matches!(action, ViewerAction::WellsLoaded(_));
    let (outcome, effects) = core.dispatch(action);
    if is_load && outcome == Outcome::Ignored {
        console::warn!("duplicate wells load result ignored");
    }
    run_effects(core, effects);
}

pub(crate) fn run_effects(core: &Rc<ViewerCore>, effects: Vec<Effect>) {
    for effect in effects {
        match effect {
            Effect::FetchWells { src } => spawn_fetch(core.clone(), src),
            Effect::Map(command) => {
                if !map_runtime::issue(command) {
                    console::warn!("map command dropped: map not mounted");
                }
            }
        }
    }
}

fn spawn_fetch(core: Rc<ViewerCore>, src: String) {
    console::log!(format!("loading wells from {src}"));
    spawn_local(async move {
        let result = loader::fetch_wells(&src).await;
        match &result {
            Ok(loaded) => {
                console::log!(format!("loaded {} wells", loaded.wells.len()));
                if loaded.skipped > 0 {
                    console::warn!(format!(
                        "skipped {} geometries that are not valid points",
                        loaded.skipped
                    ));
                }
            }
            Err(err) => console::warn!(format!("wells load failed: {err}")),
        }
        dispatch(&core, ViewerAction::WellsLoaded(result));
    });
}

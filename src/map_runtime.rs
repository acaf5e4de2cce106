use std::cell::RefCell;
use std::rc::Rc;

use well_finder_core::MapCommand;

thread_local! {
    static MAP_HOOK: RefCell<Option<Rc<dyn Fn(MapCommand)>>> = RefCell::new(None);
}

pub(crate) fn set_map_hook(hook: Option<Rc<dyn Fn(MapCommand)>>) {
    MAP_HOOK.with(|slot| {
        *slot.borrow_mut() = hook;
    });
}

/// Hands the command to the mounted map. Returns false when no map is mounted.
pub(crate) fn issue(command: MapCommand) -> bool {
    let hook = MAP_HOOK.with(|slot| slot.borrow().clone());
    match hook {
        Some(hook) => {
            hook(command);
            true
        }
        None => false,
    }
}

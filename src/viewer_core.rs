use std::cell::RefCell;
use std::rc::Rc;

use well_finder_core::{
    AccessToken, Effect, Frame, Outcome, Viewer, ViewerAction, ViewerSettings,
};

pub(crate) type ViewerSubscriber = Rc<dyn Fn()>;

/// Owns the single viewer state for the lifetime of the page.
pub(crate) struct ViewerCore {
    viewer: RefCell<Viewer>,
    frame: RefCell<Frame>,
    subscribers: Rc<RefCell<Vec<ViewerSubscriber>>>,
}

impl ViewerCore {
    pub(crate) fn boot(
        settings: ViewerSettings,
        token: Option<AccessToken>,
    ) -> (Rc<Self>, Vec<Effect>) {
        let (viewer, effects) = Viewer::boot(settings, token);
        let frame = viewer.frame();
        let core = Rc::new(Self {
            viewer: RefCell::new(viewer),
            frame: RefCell::new(frame),
            subscribers: Rc::new(RefCell::new(Vec::new())),
        });
        (core, effects)
    }

    pub(crate) fn subscribe(&self, subscriber: ViewerSubscriber) -> ViewerSubscription {
        self.subscribers.borrow_mut().push(subscriber.clone());
        ViewerSubscription {
            subscriber,
            subscribers: Rc::clone(&self.subscribers),
        }
    }

    pub(crate) fn snapshot(&self) -> Frame {
        self.frame.borrow().clone()
    }

    pub(crate) fn settings(&self) -> ViewerSettings {
        self.viewer.borrow().settings().clone()
    }

    pub(crate) fn token(&self) -> Option<AccessToken> {
        self.viewer.borrow().token().cloned()
    }

    /// Applies one action and notifies subscribers when it changed anything.
    pub(crate) fn dispatch(&self, action: ViewerAction) -> (Outcome, Vec<Effect>) {
        let (outcome, effects) = self.viewer.borrow_mut().apply(action);
        if outcome == Outcome::Applied {
            self.refresh_frame();
            self.notify_subscribers();
        }
        (outcome, effects)
    }

    fn refresh_frame(&self) {
        let next = self.viewer.borrow().frame();
        *self.frame.borrow_mut() = next;
    }

    fn notify_subscribers(&self) {
        let subscribers = self.subscribers.borrow().clone();
        for subscriber in subscribers {
            (subscriber)();
        }
    }
}

pub(crate) struct ViewerSubscription {
    subscriber: ViewerSubscriber,
    subscribers: Rc<RefCell<Vec<ViewerSubscriber>>>,
}

impl Drop for ViewerSubscription {
    fn drop(&mut self) {
        let mut subscribers = self.subscribers.borrow_mut();
        subscribers.retain(|item| !Rc::ptr_eq(item, &self.subscriber));
    }
}

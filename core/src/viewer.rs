use crate::action::{Effect, MapCommand, ViewerAction};
use crate::settings::{AccessToken, ViewerSettings};
use crate::state::ViewState;
use crate::view::Frame;

#[derive(Debug, Clone, PartialEq)]
pub enum ViewerMode {
    /// No access token: terminal until restart.
    Unconfigured,
    Running { token: AccessToken, state: ViewState },
}

#[derive(Debug, Clone)]
pub struct Viewer {
    settings: ViewerSettings,
    mode: ViewerMode,
}

/// What an action changed, for logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Applied,
    Ignored,
}

impl Viewer {
    pub fn boot(settings: ViewerSettings, token: Option<AccessToken>) -> (Self, Vec<Effect>) {
        match token {
            None => (
                Self {
                    settings,
                    mode: ViewerMode::Unconfigured,
                },
                Vec::new(),
            ),
            Some(token) => {
                let effects = vec![Effect::FetchWells {
                    src: settings.data_src.clone(),
                }];
                let viewer = Self {
                    settings,
                    mode: ViewerMode::Running {
                        token,
                        state: ViewState::new(),
                    },
                };
                (viewer, effects)
            }
        }
    }

    pub fn settings(&self) -> &ViewerSettings {
        &self.settings
    }

    pub fn mode(&self) -> &ViewerMode {
        &self.mode
    }

    pub fn token(&self) -> Option<&AccessToken> {
        match &self.mode {
            ViewerMode::Running { token, .. } => Some(token),
            ViewerMode::Unconfigured => None,
        }
    }

    pub fn state(&self) -> Option<&ViewState> {
        match &self.mode {
            ViewerMode::Running { state, .. } => Some(state),
            ViewerMode::Unconfigured => None,
        }
    }

    pub fn apply(&mut self, action: ViewerAction) -> (Outcome, Vec<Effect>) {
        let fly_to_zoom = self.settings.fly_to_zoom;
        let ViewerMode::Running { state, .. } = &mut self.mode else {
            return (Outcome::Ignored, Vec::new());
        };
        match action {
            ViewerAction::WellsLoaded(result) => (outcome(state.finish_load(result)), Vec::new()),
            ViewerAction::MarkerActivated { index } => match state.select(index) {
                Some(point) => (
                    Outcome::Applied,
                    vec![Effect::Map(MapCommand::FlyTo {
                        center: point.coordinates,
                        zoom: fly_to_zoom,
                    })],
                ),
                None => (Outcome::Ignored, Vec::new()),
            },
            ViewerAction::PopupClosed => (outcome(state.deselect()), Vec::new()),
            ViewerAction::MapClicked => (Outcome::Ignored, Vec::new()),
        }
    }

    pub fn frame(&self) -> Frame {
        match &self.mode {
            ViewerMode::Unconfigured => Frame::ConfigError,
            ViewerMode::Running { state, .. } => Frame::Map(state.frame()),
        }
    }
}

fn outcome(changed: bool) -> Outcome {
    if changed {
        Outcome::Applied
    } else {
        Outcome::Ignored
    }
}

mod data;
mod ui;

pub use data::DataState;
pub use ui::{FocusPanel, UIState};

use crate::engine::EngineError;
use crate::tui::render::Renderer;

pub struct AppState {
    pub data: DataState,
    pub ui: UIState,
    pub renderer: Renderer,
}

impl AppState {
    pub fn new() -> Result<Self, EngineError> {
        Ok(Self {
            data: DataState::new()?,
            ui: UIState::new(),
            renderer: Renderer::new(),
        })
    }
}

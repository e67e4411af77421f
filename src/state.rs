//! Shared application state for the front controller. Everything here is read-only after startup.

use crate::config::AppSettings;
use crate::dispatch::Dispatcher;
use crate::response::{JsonViewRenderer, ViewRenderer};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub dispatcher: Dispatcher,
    pub renderer: Arc<dyn ViewRenderer>,
    pub settings: Arc<AppSettings>,
}

impl AppState {
    /// Uses `JsonViewRenderer` until `with_renderer` swaps in a template engine.
    pub fn new(dispatcher: Dispatcher, settings: AppSettings) -> Self {
        AppState {
            dispatcher,
            renderer: Arc::new(JsonViewRenderer),
            settings: Arc::new(settings),
        }
    }

    pub fn with_renderer(mut self, renderer: impl ViewRenderer + 'static) -> Self {
        self.renderer = Arc::new(renderer);
        self
    }
}

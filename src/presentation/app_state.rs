// Application state for HTTP handlers
use crate::application::registry::HandlerRegistry;

pub struct AppState {
    pub registry: HandlerRegistry,
}

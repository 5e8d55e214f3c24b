//! Application state shared across handlers

use std::sync::Arc;

use crate::db::SessionProvider;

/// Shared application state
#[derive(Clone)]
pub struct AppState<P> {
    inner: Arc<AppStateInner<P>>,
}

struct AppStateInner<P> {
    sessions: P,
}

impl<P: SessionProvider> AppState<P> {
    pub fn new(sessions: P) -> Self {
        Self {
            inner: Arc::new(AppStateInner { sessions }),
        }
    }

    pub fn sessions(&self) -> &P {
        &self.inner.sessions
    }
}

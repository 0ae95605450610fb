//! Router seam: where the user is, and how to send them somewhere else.

use std::sync::Mutex;

use tracing::debug;

use crate::observer::{lock, Observable, Subscription};

/// Navigation collaborator used by the route guard and the shells.
pub trait Router: Send + Sync {
    /// Path of the active route.
    fn current_path(&self) -> String;

    /// Move to `path`.
    fn navigate(&self, path: &str);

    /// Run `listener` with the new path after every route change.
    fn on_route_change(&self, listener: Box<dyn Fn(&str) + Send + Sync>) -> Subscription;
}

/// In-process router that keeps a navigation history.
///
/// Navigation is synchronous: `current_path` reflects the new route as soon
/// as `navigate` returns, and listeners are notified before it returns
/// unless the call was made from inside a listener.
pub struct MemoryRouter {
    path: Observable<String>,
    history: Mutex<Vec<String>>,
}

impl MemoryRouter {
    pub fn new(initial_path: impl Into<String>) -> Self {
        let initial_path = initial_path.into();
        Self {
            path: Observable::new(initial_path.clone()),
            history: Mutex::new(vec![initial_path]),
        }
    }

    /// Every path visited, oldest first, starting with the initial one.
    pub fn history(&self) -> Vec<String> {
        lock(&self.history).clone()
    }

    /// Number of `navigate` calls made to `path`.
    pub fn navigations_to(&self, path: &str) -> usize {
        lock(&self.history)
            .iter()
            .skip(1)
            .filter(|visited| visited.as_str() == path)
            .count()
    }

    /// Total number of `navigate` calls.
    pub fn navigation_count(&self) -> usize {
        lock(&self.history).len() - 1
    }
}

impl Router for MemoryRouter {
    fn current_path(&self) -> String {
        self.path.get()
    }

    fn navigate(&self, path: &str) {
        debug!(from = %self.path.get(), to = path, "Navigating");
        lock(&self.history).push(path.to_string());
        self.path.set(path.to_string());
    }

    fn on_route_change(&self, listener: Box<dyn Fn(&str) + Send + Sync>) -> Subscription {
        self.path.subscribe(move |path: &String| listener(path.as_str()))
    }
}

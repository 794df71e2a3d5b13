//! Route lookup by exact `(method, path)`.
//!
//! Routes are registered on a [`RouterBuilder`] during startup and frozen
//! into an immutable [`Router`] before the listener accepts anything.
//! Workers share the frozen table through an `Arc` and never lock it.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::handler::Handler;
use crate::http::request::Method;

type PathTable = HashMap<String, Arc<dyn Handler>>;

/// Mutable route table, used only during setup.
#[derive(Default)]
pub struct RouterBuilder {
    routes: HashMap<Method, PathTable>,
}

impl RouterBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `handler` for `(method, path)`. A later registration of
    /// the same key replaces the earlier one.
    pub fn register<H>(&mut self, method: Method, path: impl Into<String>, handler: H) -> &mut Self
    where
        H: Handler + 'static,
    {
        self.register_shared(method, path, Arc::new(handler))
    }

    /// Like [`register`](Self::register), for one handler serving many paths.
    pub fn register_shared(
        &mut self,
        method: Method,
        path: impl Into<String>,
        handler: Arc<dyn Handler>,
    ) -> &mut Self {
        self.routes
            .entry(method)
            .or_default()
            .insert(path.into(), handler);
        self
    }

    /// Freezes the table.
    pub fn build(self) -> Router {
        Router {
            routes: self.routes,
        }
    }
}

/// Immutable route table shared by all workers.
///
/// Keys are `(method, exact path)`: no patterns, no trailing-slash folding,
/// so `/a` and `/a/` are different routes.
pub struct Router {
    routes: HashMap<Method, PathTable>,
}

impl Router {
    /// Looks up the handler for `method` and a query-less `path`.
    pub fn resolve(&self, method: Method, path: &str) -> Option<&Arc<dyn Handler>> {
        self.routes.get(&method)?.get(path)
    }

    pub fn len(&self) -> usize {
        self.routes.values().map(HashMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Registered keys, sorted by path then method.
    pub fn routes(&self) -> Vec<(Method, &str)> {
        let mut keys: Vec<(Method, &str)> = self
            .routes
            .iter()
            .flat_map(|(method, paths)| paths.keys().map(|path| (*method, path.as_str())))
            .collect();
        keys.sort_by(|a, b| a.1.cmp(b.1).then(a.0.as_str().cmp(b.0.as_str())));
        keys
    }
}

impl fmt::Debug for Router {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.routes().iter().map(|(m, p)| format!("{} {}", m, p)))
            .finish()
    }
}

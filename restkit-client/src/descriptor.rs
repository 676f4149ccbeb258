use std::{collections::HashMap, time::Duration};

use reqwest::Method;

/// Per-call timeout applied when a descriptor does not override it.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(20_000);

/// Static configuration for one REST resource.
///
/// Set once when the client is constructed and never mutated afterwards;
/// custom actions carry their own URL so no call ever rewrites the base
/// path.
#[derive(Debug, Clone)]
pub struct ResourceDescriptor {
    pub(crate) path: String,
    pub(crate) timeout: Duration,
    pub(crate) actions: HashMap<String, CustomAction>,
}

/// An extra endpoint sharing the resource's request and error pipeline.
#[derive(Debug, Clone)]
pub struct CustomAction {
    pub(crate) method: Method,
    pub(crate) url: String,
}

impl ResourceDescriptor {
    /// A descriptor for the given URL path template, e.g. `"projects/:id"`.
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            timeout: DEFAULT_TIMEOUT,
            actions: HashMap::new(),
        }
    }

    /// Override the per-call timeout (default 20 seconds).
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Register a custom action under `name`. The URL template supports the
    /// same placeholder substitution as the base path.
    pub fn action(
        mut self,
        name: impl Into<String>,
        method: Method,
        url: impl Into<String>,
    ) -> Self {
        self.actions.insert(
            name.into(),
            CustomAction {
                method,
                url: url.into(),
            },
        );
        self
    }
}

//! Name → signing method lookup
//!
//! Parsing consults a [`Registry`] to resolve the `alg` named in a token
//! header. The registry is an explicit value rather than process-wide state,
//! so tests can run against an isolated set of methods.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};

use crate::algorithm::{SigningMethod, builtin_methods};

/// Thread-safe table of signing methods keyed by algorithm name
pub struct Registry {
    methods: RwLock<HashMap<String, Arc<dyn SigningMethod>>>,
}

impl Registry {
    /// Empty registry; nothing resolves until methods are registered
    pub fn new() -> Self {
        Self {
            methods: RwLock::new(HashMap::new()),
        }
    }

    /// Registry holding every built-in method
    pub fn with_defaults() -> Self {
        let registry = Self::new();
        for method in builtin_methods() {
            registry.register(method);
        }
        registry
    }

    /// Register `method` under its name; re-registering a name replaces it
    pub fn register(&self, method: Arc<dyn SigningMethod>) {
        let name = method.name().to_string();
        let replaced = self
            .methods
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(name.clone(), method)
            .is_some();
        tracing::debug!(method = %name, replaced, "registered signing method");
    }

    /// Look up a method by algorithm name
    ///
    /// `"none"` never resolves, even if something registered under that name.
    pub fn get(&self, name: &str) -> Option<Arc<dyn SigningMethod>> {
        if name == "none" {
            return None;
        }
        self.methods
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(name)
            .cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Registered names, sorted
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .methods
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .cloned()
            .collect();
        names.sort();
        names
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("methods", &self.names())
            .finish()
    }
}

//! Operation schema table
//!
//! Each operation name maps to the configuration keys it accepts. Builder
//! crates register their schemas at link time:
//!
//! ```ignore
//! inventory::submit!(ficus_pipelines::PartSchema::new(
//!     "DiscoverActivities",
//!     &[ficus_pipelines::keys::ACTIVITY_LEVEL],
//! ));
//! ```
//!
//! `PartSchemas::with_builtins()` then indexes every submitted schema.

use std::collections::HashMap;

use crate::keys::ContextKey;

/// Configuration keys accepted by one operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PartSchema {
    pub name: &'static str,
    pub keys: &'static [ContextKey],
}

impl PartSchema {
    pub const fn new(name: &'static str, keys: &'static [ContextKey]) -> Self {
        Self { name, keys }
    }

    pub fn key(&self, name: &str) -> Option<&ContextKey> {
        self.keys.iter().find(|key| key.name == name)
    }
}

inventory::collect!(PartSchema);

/// Schema lookup by operation name
#[derive(Debug, Clone, Default)]
pub struct PartSchemas {
    schemas: HashMap<&'static str, PartSchema>,
}

impl PartSchemas {
    pub fn new() -> Self {
        Self::default()
    }

    /// Index every schema submitted via `inventory`
    pub fn with_builtins() -> Self {
        let mut schemas = Self::new();
        for schema in inventory::iter::<PartSchema> {
            if schemas.schemas.contains_key(schema.name) {
                log::warn!("Duplicate schema for operation '{}'", schema.name);
            }
            schemas.register(*schema);
        }
        log::debug!("Collected {} operation schemas", schemas.len());
        schemas
    }

    pub fn register(&mut self, schema: PartSchema) {
        self.schemas.insert(schema.name, schema);
    }

    pub fn find(&self, name: &str) -> Option<&PartSchema> {
        self.schemas.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.schemas.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }

    /// All registered operation names, sorted
    pub fn names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.schemas.keys().copied().collect();
        names.sort_unstable();
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keys;

    #[test]
    fn test_schema_key_lookup() {
        static KEYS: &[ContextKey] = &[keys::EVENTS_COUNT];
        let schema = PartSchema::new("FilterTracesByEventsCount", KEYS);
        assert_eq!(schema.key("events_count"), Some(&keys::EVENTS_COUNT));
        assert!(schema.key("activity_level").is_none());
    }

    #[test]
    fn test_register_and_names() {
        let mut schemas = PartSchemas::new();
        schemas.register(PartSchema::new("UseNamesEventLog", &[]));
        schemas.register(PartSchema::new("ClearActivities", &[]));
        assert_eq!(schemas.names(), vec!["ClearActivities", "UseNamesEventLog"]);
        assert!(schemas.contains("ClearActivities"));
    }
}

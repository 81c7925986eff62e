//! Registry for row sources

use crate::error::ProviderError;
use crate::row_source::BoxedRowSource;
use std::collections::HashMap;

/// Function that creates a row source
pub type SourceFactory = fn() -> BoxedRowSource;

/// Information about a registered source
#[derive(Debug, Clone)]
pub struct SourceInfo {
    /// Source ID (e.g., "weekday_dates")
    pub id: String,
    /// Display name (e.g., "Weekday Dates")
    pub display_name: String,
}

/// Registry for row sources
///
/// Owned by the application and handed to whoever builds providers.
#[derive(Default)]
pub struct Registry {
    sources: HashMap<String, (SourceInfo, SourceFactory)>,
}

impl Registry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a row source
    pub fn register_source(&mut self, id: &str, factory: SourceFactory) {
        self.register_source_with_info(id, id, factory);
    }

    /// Register a row source with a display name
    pub fn register_source_with_info(&mut self, id: &str, display_name: &str, factory: SourceFactory) {
        let info = SourceInfo {
            id: id.to_string(),
            display_name: display_name.to_string(),
        };
        self.sources.insert(id.to_string(), (info, factory));
    }

    /// Create a row source by ID
    pub fn create_source(&self, id: &str) -> Result<BoxedRowSource, ProviderError> {
        let (_, factory) = self
            .sources
            .get(id)
            .ok_or_else(|| ProviderError::UnknownSource(id.to_string()))?;
        Ok(factory())
    }

    /// Info for one source
    pub fn source_info(&self, id: &str) -> Option<&SourceInfo> {
        self.sources.get(id).map(|(info, _)| info)
    }

    /// List all registered source IDs, sorted
    pub fn list_sources(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.sources.keys().cloned().collect();
        ids.sort();
        ids
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::row_source::{DefaultsContext, RowSource, SourceMetadata};
    use rg_rows_types::{CellValue, ConfigurationRecord, FieldMetadata, RecordDefaults};

    struct EmptySource(SourceMetadata);

    impl RowSource for EmptySource {
        fn metadata(&self) -> &SourceMetadata {
            &self.0
        }

        fn fields(&self) -> Vec<FieldMetadata> {
            Vec::new()
        }

        fn column_widths(&self) -> Vec<i32> {
            Vec::new()
        }

        fn defaults(&self, _ctx: &DefaultsContext) -> RecordDefaults {
            RecordDefaults::default()
        }

        fn value(&self, _row: u32, _column: usize, _record: &ConfigurationRecord) -> Option<CellValue> {
            None
        }
    }

    fn empty() -> BoxedRowSource {
        Box::new(EmptySource(SourceMetadata {
            id: "empty".to_string(),
            name: "Empty".to_string(),
            description: String::new(),
            columns: Vec::new(),
        }))
    }

    #[test]
    fn test_create_registered_source() {
        let mut registry = Registry::new();
        registry.register_source_with_info("empty", "Empty", empty);
        let source = registry.create_source("empty").unwrap();
        assert_eq!(source.metadata().id, "empty");
        assert_eq!(registry.source_info("empty").unwrap().display_name, "Empty");
        assert_eq!(registry.list_sources(), vec!["empty".to_string()]);
    }

    #[test]
    fn test_display_name_defaults_to_id() {
        let mut registry = Registry::new();
        registry.register_source("empty", empty);
        assert_eq!(registry.source_info("empty").unwrap().display_name, "empty");
        assert!(registry.create_source("empty").is_ok());
    }

    #[test]
    fn test_unknown_source() {
        let registry = Registry::new();
        assert!(matches!(
            registry.create_source("nope"),
            Err(ProviderError::UnknownSource(id)) if id == "nope"
        ));
    }
}

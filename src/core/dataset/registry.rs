use crate::core::dataset::{Dataset, MobileFoodSchedule};
use crate::domain::error::{DataSfError, DataSfResult};

/// Constructor for a dataset accessor
pub type DatasetFactory = fn() -> Box<dyn Dataset>;

/// Registry entry mapping a name and alias to a factory
#[derive(Clone)]
pub struct RegistryEntry {
    pub name: &'static str,
    pub alias: &'static str,
    pub factory: DatasetFactory,
}

impl RegistryEntry {
    pub fn matches(&self, name: &str) -> bool {
        self.name == name || self.alias == name
    }
}

/// Table of supported datasets, built once at startup and passed explicitly
#[derive(Clone, Default)]
pub struct DatasetRegistry {
    entries: Vec<RegistryEntry>,
}

impl DatasetRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding every dataset shipped with the tool
    pub fn with_builtin() -> Self {
        let mut registry = Self::new();
        registry.register(
            MobileFoodSchedule::DATASET_NAME,
            MobileFoodSchedule::DATASET_ALIAS,
            || Box::new(MobileFoodSchedule::new()),
        );
        registry
    }

    /// Register a dataset; later registrations do not shadow earlier ones
    pub fn register(&mut self, name: &'static str, alias: &'static str, factory: DatasetFactory) {
        self.entries.push(RegistryEntry {
            name,
            alias,
            factory,
        });
    }

    /// Build the accessor registered under `name` or its alias
    pub fn resolve(&self, name: &str) -> DataSfResult<Box<dyn Dataset>> {
        self.entries
            .iter()
            .find(|entry| entry.matches(name))
            .map(|entry| (entry.factory)())
            .ok_or_else(|| DataSfError::UnsupportedDataset(name.to_string()))
    }

    pub fn entries(&self) -> &[RegistryEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_by_name_and_alias() {
        let registry = DatasetRegistry::with_builtin();

        let by_name = registry.resolve("mobile_food_schedule").unwrap();
        let by_alias = registry.resolve("mfs").unwrap();
        assert_eq!(by_name.dataset_id(), "jjew-r69b");
        assert_eq!(by_alias.name(), "mobile_food_schedule");
    }

    #[test]
    fn test_unknown_dataset() {
        let registry = DatasetRegistry::with_builtin();
        let err = registry.resolve("film_locations").err().unwrap();
        assert!(matches!(err, DataSfError::UnsupportedDataset(ref name) if name == "film_locations"));
        assert_eq!(err.to_string(), "Dataset film_locations is not supported");
    }

    #[test]
    fn test_empty_registry() {
        let registry = DatasetRegistry::new();
        assert!(registry.is_empty());
        assert!(registry.resolve("mfs").is_err());
    }

    #[test]
    fn test_first_registration_wins() {
        let mut registry = DatasetRegistry::with_builtin();
        registry.register("other", "mfs", || Box::new(MobileFoodSchedule::new()));

        assert_eq!(registry.len(), 2);
        assert_eq!(registry.resolve("mfs").unwrap().name(), "mobile_food_schedule");
    }
}

//! Generator configuration

use crate::library::DEFAULT_LIBRARY_PATH;
use crate::phrases::PHRASES;
use crate::registry::{MethodId, Registry};
use std::path::PathBuf;

/// What to generate and how.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorConfig {
    /// Methods to generate, kept in declared order whatever order they are
    /// given in
    pub methods: Vec<MethodId>,
    /// Phrases every method is fed
    pub phrases: &'static [&'static [u8]],
    /// Skip the library under test; its methods emit settings only
    pub settings_only: bool,
    pub library_path: PathBuf,
    /// Worker count; `None` lets rayon decide
    pub threads: Option<usize>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            methods: MethodId::ALL.to_vec(),
            phrases: PHRASES,
            settings_only: false,
            library_path: PathBuf::from(DEFAULT_LIBRARY_PATH),
            threads: None,
        }
    }
}

impl GeneratorConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_methods(mut self, methods: impl IntoIterator<Item = MethodId>) -> Self {
        self.methods = methods.into_iter().collect();
        self
    }

    pub fn with_phrases(mut self, phrases: &'static [&'static [u8]]) -> Self {
        self.phrases = phrases;
        self
    }

    pub fn with_settings_only(mut self, settings_only: bool) -> Self {
        self.settings_only = settings_only;
        self
    }

    pub fn with_library_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.library_path = path.into();
        self
    }

    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = Some(threads);
        self
    }

    pub fn registry(&self) -> Registry {
        Registry::with_methods(&self.methods)
    }

    /// Whether the library under test has to be loaded.
    pub fn needs_library(&self) -> bool {
        !self.settings_only && self.methods.iter().any(|m| m.needs_library())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = GeneratorConfig::default();
        assert_eq!(config.methods.len(), MethodId::ALL.len());
        assert_eq!(config.library_path, PathBuf::from(".libs/libcrypt.so"));
        assert!(config.needs_library());
        assert_eq!(config.threads, None);
    }

    #[test]
    fn test_library_not_needed() {
        let config = GeneratorConfig::new().with_settings_only(true);
        assert!(!config.needs_library());

        let config = GeneratorConfig::new().with_methods([MethodId::Bcrypt, MethodId::Nt]);
        assert!(!config.needs_library());
    }

    #[test]
    fn test_builder() {
        let config = GeneratorConfig::new()
            .with_library_path("/tmp/libcrypt.so")
            .with_threads(3)
            .with_methods([MethodId::Sunmd5]);
        assert_eq!(config.threads, Some(3));
        assert_eq!(config.library_path, PathBuf::from("/tmp/libcrypt.so"));
        assert_eq!(config.registry().len(), 1);
    }
}

//! Loader configuration for the CIL provider

/// What the CIL provider extracts and how far it follows nested structures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoaderConfig {
    /// Include public types nested in public types (default: true)
    pub include_nested_types: bool,

    /// Maximum depth of an enclosing-type chain before the type is reported as unloadable
    /// (default: 64)
    pub max_nesting_depth: usize,

    /// Maximum nesting of types inside one signature blob (default: 50)
    pub max_signature_depth: usize,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            include_nested_types: true,
            max_nesting_depth: 64,
            max_signature_depth: 50,
        }
    }
}

impl LoaderConfig {
    /// Top-level types only
    #[must_use]
    pub fn minimal() -> Self {
        Self {
            include_nested_types: false,
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presets() {
        let config = LoaderConfig::default();
        assert!(config.include_nested_types);
        assert_eq!(config.max_nesting_depth, 64);
        assert_eq!(config.max_signature_depth, 50);

        let minimal = LoaderConfig::minimal();
        assert!(!minimal.include_nested_types);
        assert_eq!(minimal.max_signature_depth, config.max_signature_depth);
    }
}

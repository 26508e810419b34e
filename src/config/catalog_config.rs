use serde::Deserialize;

use super::ConfigError;

/// How the tree builder loads children from the store.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TraversalStrategy {
    /// One children query per node.
    #[default]
    PerNode,
    /// One children query per tree level.
    PerLevel,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct CatalogConfig {
    #[serde(default)]
    pub strategy: TraversalStrategy,
    /// Maximum number of levels a projection may materialize, root included.
    #[serde(default)]
    pub max_depth: Option<usize>,
}

impl CatalogConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_depth == Some(0) {
            return Err(ConfigError::Invalid(
                "catalog.max_depth must be at least 1 when set".to_string(),
            ));
        }
        Ok(())
    }
}

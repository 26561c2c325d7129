use std::path::Path;

use serde::Deserialize;

use crate::error::{LinkError, Result};
use crate::io::DEFAULT_SHEET_NAME;
use crate::linkage::{KeyNormalization, LinkColumns, LinkOptions, Scorer, Strategy, Threshold};

// ---------------------------------------------------------------------------
// Config file
// ---------------------------------------------------------------------------

/// Linkage settings, read from TOML. Every field has a default, so an empty
/// file is a valid configuration.
///
/// ```toml
/// key_column = "ASIN"
/// target_column = "New EAN"
/// strategy = "fuzzy"
/// threshold = 85
///
/// [normalization]
/// trim = true
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LinkConfig {
    pub key_column: String,
    pub target_column: String,
    pub strategy: StrategyKind,
    pub threshold: i64,
    pub scorer: Scorer,
    pub normalization: KeyNormalization,
    pub sheet_name: String,
    pub preview_rows: usize,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategyKind {
    #[default]
    Exact,
    Fuzzy,
}

impl Default for LinkConfig {
    fn default() -> Self {
        Self {
            key_column: "ASIN".into(),
            target_column: "New EAN".into(),
            strategy: StrategyKind::Exact,
            threshold: i64::from(Threshold::default().value()),
            scorer: Scorer::default(),
            normalization: KeyNormalization::default(),
            sheet_name: DEFAULT_SHEET_NAME.into(),
            preview_rows: 5,
        }
    }
}

// ---------------------------------------------------------------------------
// Parse + Validate
// ---------------------------------------------------------------------------

impl LinkConfig {
    pub fn from_toml(input: &str) -> Result<Self> {
        let config: LinkConfig = toml::from_str(input)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(LinkError::MissingInput(path.to_path_buf()));
        }
        Self::from_toml(&std::fs::read_to_string(path)?)
    }

    pub fn validate(&self) -> Result<()> {
        if self.key_column.is_empty() {
            return Err(LinkError::InvalidConfig("key_column must not be empty".into()));
        }
        if self.target_column.is_empty() {
            return Err(LinkError::InvalidConfig(
                "target_column must not be empty".into(),
            ));
        }
        // Excel caps sheet names at 31 characters.
        if self.sheet_name.is_empty() || self.sheet_name.chars().count() > 31 {
            return Err(LinkError::InvalidConfig(format!(
                "sheet_name must be 1 to 31 characters, got '{}'",
                self.sheet_name
            )));
        }
        Threshold::new(self.threshold)?;
        Ok(())
    }

    /// Resolves the settings into engine options.
    pub fn link_options(&self) -> Result<LinkOptions> {
        self.validate()?;
        let strategy = match self.strategy {
            StrategyKind::Exact => Strategy::Exact,
            StrategyKind::Fuzzy => Strategy::Fuzzy {
                threshold: Threshold::new(self.threshold)?,
                scorer: self.scorer,
            },
        };
        Ok(LinkOptions {
            columns: LinkColumns::new(&self.key_column, &self.target_column),
            strategy,
            normalization: self.normalization,
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

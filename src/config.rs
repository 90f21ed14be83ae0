use serde::{Deserialize, Serialize};

use crate::variant::{RuleVariant, Variant};

/// Options fixed when a game is constructed.
///
/// Every field has a default, so `{}` (or `undefined` from JS) is a valid config.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub variant: Variant,
}

impl GameConfig {
    pub fn new(variant: Variant) -> Self {
        Self { variant }
    }

    pub fn rules(&self) -> Box<dyn RuleVariant> {
        self.variant.rules()
    }
}

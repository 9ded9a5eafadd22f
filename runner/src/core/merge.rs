//! Deep merge of configuration trees.
//!
//! - Trees: merged by key, recursively
//! - Lists: replaced (never concatenated)
//! - Scalars and `null`: replaced
//! - Type mismatch: the redefined value replaces the original outright
//!
//! The result enumerates the original keys first, in original order, followed
//! by keys that only exist in the redefined tree, in their own order.

use super::value::{ConfigTree, ConfigValue};

/// Merge `redefined` over `original`.
pub fn merge(original: ConfigTree, mut redefined: ConfigTree) -> ConfigTree {
    let mut result = ConfigTree::new();

    for (key, value) in original {
        let merged = match (value, redefined.remove(&key)) {
            (ConfigValue::Tree(base), Some(ConfigValue::Tree(overlay))) => {
                ConfigValue::Tree(merge(base, overlay))
            }
            (_, Some(overlay)) => overlay,
            (value, None) => value,
        };
        result.insert(key, merged);
    }

    for (key, value) in redefined {
        result.insert(key, value);
    }

    result
}

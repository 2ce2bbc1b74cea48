//! Ordered option mappings attached to authenticators, identifiers and stages.

use serde_json::{Map, Value};

/// Ordered `name -> value` option mapping.
pub type Options = Map<String, Value>;

/// Overlay `explicit` on top of `defaults`, key by key.
///
/// Keys from `defaults` keep their position; an explicit value replaces the
/// default in place and keys unknown to `defaults` are appended in their
/// declared order.
#[must_use]
pub fn merge(defaults: &Options, explicit: &Options) -> Options {
    let mut merged = defaults.clone();
    for (key, value) in explicit {
        merged.insert(key.clone(), value.clone());
    }
    merged
}

//! Global dependency registry.
//!
//! The registry maps every external import identifier to the global variable a
//! UMD consumer provides for it. It is built once per pipeline run and shared
//! read-only by every package; changing it means building a new `Pipeline`.

use std::sync::Arc;

use indexmap::IndexMap;
use serde::{Serialize, Serializer};
use tabula_config::{TabulaConfig, is_global_name};

use crate::{Error, Result};

/// Immutable table of external identifiers and their UMD global names.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GlobalRegistry {
    globals: IndexMap<String, String>,
}

impl GlobalRegistry {
    /// Build a registry from `(identifier, global name)` pairs.
    ///
    /// # Errors
    ///
    /// Fails on an empty identifier, an invalid global name, an identifier
    /// listed twice, or two identifiers sharing one global name.
    ///
    /// # Example
    ///
    /// ```
    /// use tabula_build::GlobalRegistry;
    ///
    /// let registry =
    ///     GlobalRegistry::new([("react", "React"), ("react-dom", "ReactDOM")]).unwrap();
    /// assert!(registry.is_external("react"));
    /// assert_eq!(registry.global_name_for("react-dom"), Some("ReactDOM"));
    /// assert!(!registry.is_external("lodash"));
    /// ```
    pub fn new<I, K, V>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut globals: IndexMap<String, String> = IndexMap::new();

        for (identifier, global) in entries {
            let identifier = identifier.into();
            let global = global.into();

            if identifier.trim().is_empty() {
                return Err(Error::InvalidRegistry {
                    identifier,
                    reason: "identifier is empty".into(),
                });
            }
            if !is_global_name(&global) {
                return Err(Error::InvalidRegistry {
                    identifier,
                    reason: format!("'{global}' is not a valid global name"),
                });
            }
            if globals.contains_key(&identifier) {
                return Err(Error::InvalidRegistry {
                    identifier,
                    reason: "identifier is listed twice".into(),
                });
            }
            if let Some((other, _)) = globals.iter().find(|(_, existing)| **existing == global) {
                return Err(Error::InvalidRegistry {
                    identifier,
                    reason: format!("global '{global}' is already used by '{other}'"),
                });
            }

            globals.insert(identifier, global);
        }

        Ok(Self { globals })
    }

    /// Registry described by the `globals` table of a config.
    pub fn from_config(config: &TabulaConfig) -> Result<Self> {
        Self::new(config.globals.iter().map(|(k, v)| (k.as_str(), v.as_str())))
    }

    pub fn is_external(&self, identifier: &str) -> bool {
        self.globals.contains_key(identifier)
    }

    pub fn global_name_for(&self, identifier: &str) -> Option<&str> {
        self.globals.get(identifier).map(String::as_str)
    }

    /// Global name of an identifier already known to be external.
    ///
    /// Asking for a non-external identifier is an invariant violation and is
    /// reported as [`Error::NotExternal`] instead of defaulting.
    pub fn require_global(&self, identifier: &str) -> Result<&str> {
        self.global_name_for(identifier)
            .ok_or_else(|| Error::NotExternal {
                identifier: identifier.to_string(),
            })
    }

    /// Identifier whose UMD global is `global`, if any.
    pub fn identifier_for_global(&self, global: &str) -> Option<&str> {
        self.globals
            .iter()
            .find(|(_, name)| name.as_str() == global)
            .map(|(identifier, _)| identifier.as_str())
    }

    /// External identifiers in registration order.
    pub fn identifiers(&self) -> impl Iterator<Item = &str> {
        self.globals.keys().map(String::as_str)
    }

    /// `(identifier, global name)` pairs in registration order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &str)> {
        self.globals.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.globals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.globals.is_empty()
    }
}

/// The externals predicate handed to every package of a run.
///
/// All policies of one run point at the same registry snapshot, so no two
/// packages can disagree on whether an identifier is external.
#[derive(Debug, Clone)]
pub struct ExternalPolicy {
    registry: Arc<GlobalRegistry>,
}

impl ExternalPolicy {
    pub fn new(registry: Arc<GlobalRegistry>) -> Self {
        Self { registry }
    }

    /// `true` means: leave the import out of the bundle, the consumer supplies it.
    pub fn is_external(&self, identifier: &str) -> bool {
        self.registry.is_external(identifier)
    }

    pub fn identifiers(&self) -> impl Iterator<Item = &str> {
        self.registry.identifiers()
    }

    pub fn registry(&self) -> &GlobalRegistry {
        &self.registry
    }

    /// Whether both policies were derived from the same registry snapshot.
    pub fn shares_snapshot(&self, other: &ExternalPolicy) -> bool {
        Arc::ptr_eq(&self.registry, &other.registry)
    }
}

/// Policies are equal only when they view the same snapshot. A registry rebuilt
/// with identical content is a different run and compares unequal.
impl PartialEq for ExternalPolicy {
    fn eq(&self, other: &Self) -> bool {
        self.shares_snapshot(other)
    }
}

impl Serialize for ExternalPolicy {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_seq(self.identifiers())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preserves_registration_order() {
        let registry =
            GlobalRegistry::new([("react", "React"), ("@scope/a", "A"), ("dep-b", "DepB")])
                .unwrap();
        let ids: Vec<_> = registry.identifiers().collect();
        assert_eq!(ids, vec!["react", "@scope/a", "dep-b"]);
        assert_eq!(registry.len(), 3);
    }

    #[test]
    fn rejects_invalid_entries() {
        assert!(matches!(
            GlobalRegistry::new([("", "Empty")]),
            Err(Error::InvalidRegistry { .. })
        ));
        assert!(matches!(
            GlobalRegistry::new([("react", "not-valid")]),
            Err(Error::InvalidRegistry { .. })
        ));
        assert!(matches!(
            GlobalRegistry::new([("react", "React"), ("react", "React")]),
            Err(Error::InvalidRegistry { .. })
        ));
        assert!(matches!(
            GlobalRegistry::new([("preact/compat", "React"), ("react", "React")]),
            Err(Error::InvalidRegistry { .. })
        ));
    }

    #[test]
    fn require_global_rejects_non_external() {
        let registry = GlobalRegistry::new([("react", "React")]).unwrap();
        assert_eq!(registry.require_global("react").unwrap(), "React");
        match registry.require_global("lodash") {
            Err(Error::NotExternal { identifier }) => assert_eq!(identifier, "lodash"),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn entries_follow_registration_order() {
        let registry = GlobalRegistry::new([("react", "React"), ("dep-a", "DepA")]).unwrap();
        let entries: Vec<_> = registry.entries().collect();
        assert_eq!(entries, vec![("react", "React"), ("dep-a", "DepA")]);
    }

    #[test]
    fn identifier_for_global_finds_owner() {
        let registry = GlobalRegistry::new([("@tanstack/react-table", "ReactTable")]).unwrap();
        assert_eq!(
            registry.identifier_for_global("ReactTable"),
            Some("@tanstack/react-table")
        );
        assert_eq!(registry.identifier_for_global("React"), None);
    }

    #[test]
    fn policies_share_one_snapshot() {
        let registry = Arc::new(GlobalRegistry::new([("react", "React")]).unwrap());
        let a = ExternalPolicy::new(Arc::clone(&registry));
        let b = ExternalPolicy::new(Arc::clone(&registry));
        let rebuilt = GlobalRegistry::new([("react", "React")]).unwrap();
        let rebuilt = ExternalPolicy::new(Arc::new(rebuilt));

        assert!(a.shares_snapshot(&b));
        assert_eq!(a, b);
        assert!(!a.shares_snapshot(&rebuilt));
        assert_eq!(a.registry(), rebuilt.registry());
        assert_ne!(a, rebuilt);
        assert!(a.is_external("react"));
        assert!(!a.is_external("react/jsx-runtime"));
    }

    #[test]
    fn policy_serializes_as_identifier_list() {
        let registry = GlobalRegistry::new([("react", "React"), ("dep-a", "DepA")]).unwrap();
        let json = serde_json::to_value(ExternalPolicy::new(Arc::new(registry))).unwrap();
        assert_eq!(json, serde_json::json!(["react", "dep-a"]));
    }
}

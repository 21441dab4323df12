use soul_core::model::Namespace;

/// The suffix-based naming convention bridging registries.
///
/// The convention is a placeholder policy, not a general namespace
/// translation rule, so it is explicit and configurable rather than
/// hard-coded: npm `left-pad` pairs with crate `left-pad-soul` under the
/// default `-soul` suffix. An empty suffix disables the translation and
/// leaves only exact-name probes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamingConvention {
    suffix: String,
}

impl Default for NamingConvention {
    fn default() -> Self {
        Self::new("-soul")
    }
}

impl NamingConvention {
    #[must_use]
    pub fn new(suffix: impl Into<String>) -> Self {
        Self {
            suffix: suffix.into(),
        }
    }

    #[must_use]
    pub fn suffix(&self) -> &str {
        &self.suffix
    }

    /// The base name when `name` carries the suffix.
    ///
    /// Returns `None` for unsuffixed names, an empty suffix, or when
    /// stripping would leave nothing.
    #[must_use]
    pub fn strip<'a>(&self, name: &'a str) -> Option<&'a str> {
        if self.suffix.is_empty() {
            return None;
        }
        name.strip_suffix(self.suffix.as_str())
            .filter(|base| !base.is_empty())
    }

    /// The suffixed form of `name`; already-suffixed names pass through.
    #[must_use]
    pub fn soul_name(&self, name: &str) -> String {
        if self.strip(name).is_some() {
            return name.to_string();
        }
        format!("{name}{}", self.suffix)
    }

    /// Store keys to probe, in order, when resolving `name`.
    ///
    /// Exact matches in both namespaces come first; the suffix
    /// translation is the fallback heuristic. A plain name probes its
    /// suffixed form on the crate side; a suffixed name probes its base
    /// on the npm side.
    #[must_use]
    pub fn candidate_keys(&self, name: &str) -> Vec<String> {
        let mut keys = vec![
            Namespace::Npm.key_for(name),
            Namespace::Crate.key_for(name),
        ];

        if let Some(base) = self.strip(name) {
            keys.push(Namespace::Npm.key_for(base));
        } else if !self.suffix.is_empty() {
            keys.push(Namespace::Crate.key_for(&self.soul_name(name)));
        }

        keys
    }

    /// Store keys where a counterpart for `(namespace, name)` may live,
    /// in probe order on the far side of the pairing.
    #[must_use]
    pub fn counterpart_keys(&self, namespace: Namespace, name: &str) -> Vec<String> {
        let far = namespace.counterpart();
        let mut keys = vec![far.key_for(name)];

        match far {
            Namespace::Crate => {
                let soul = self.soul_name(name);
                if soul != name {
                    keys.push(far.key_for(&soul));
                }
            }
            Namespace::Npm => {
                if let Some(base) = self.strip(name) {
                    keys.push(far.key_for(base));
                }
            }
        }

        keys
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_probe_order_for_plain_name() {
        let convention = NamingConvention::default();
        assert_eq!(
            convention.candidate_keys("left-pad"),
            vec!["npm:left-pad", "crate:left-pad", "crate:left-pad-soul"]
        );
    }

    #[test]
    fn test_probe_order_for_suffixed_name() {
        let convention = NamingConvention::default();
        assert_eq!(
            convention.candidate_keys("left-pad-soul"),
            vec!["npm:left-pad-soul", "crate:left-pad-soul", "npm:left-pad"]
        );
    }

    #[test]
    fn test_counterpart_keys_both_directions() {
        let convention = NamingConvention::default();
        assert_eq!(
            convention.counterpart_keys(Namespace::Npm, "left-pad"),
            vec!["crate:left-pad", "crate:left-pad-soul"]
        );
        assert_eq!(
            convention.counterpart_keys(Namespace::Crate, "left-pad-soul"),
            vec!["npm:left-pad-soul", "npm:left-pad"]
        );
    }

    #[test]
    fn test_custom_suffix() {
        let convention = NamingConvention::new("-rs");
        assert_eq!(convention.soul_name("left-pad"), "left-pad-rs");
        assert_eq!(convention.strip("left-pad-rs"), Some("left-pad"));
        assert_eq!(
            convention.candidate_keys("left-pad"),
            vec!["npm:left-pad", "crate:left-pad", "crate:left-pad-rs"]
        );
    }

    #[test]
    fn test_empty_suffix_disables_translation() {
        let convention = NamingConvention::new("");
        assert_eq!(convention.soul_name("left-pad"), "left-pad");
        assert_eq!(convention.strip("left-pad"), None);
        assert_eq!(
            convention.candidate_keys("left-pad"),
            vec!["npm:left-pad", "crate:left-pad"]
        );
        assert_eq!(
            convention.counterpart_keys(Namespace::Npm, "left-pad"),
            vec!["crate:left-pad"]
        );
    }

    #[test]
    fn test_strip_never_leaves_empty_base() {
        let convention = NamingConvention::default();
        assert_eq!(convention.strip("-soul"), None);
    }
}

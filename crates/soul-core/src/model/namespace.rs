use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// A registry namespace a package name is unique within.
///
/// Store keys are formed by prefixing the bare name with the namespace,
/// e.g. `npm:left-pad` or `crate:left-pad-soul`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Namespace {
    Npm,
    Crate,
}

impl Namespace {
    #[must_use]
    pub fn prefix(self) -> &'static str {
        match self {
            Self::Npm => "npm",
            Self::Crate => "crate",
        }
    }

    /// Store key for a bare package name in this namespace.
    #[must_use]
    pub fn key_for(self, name: &str) -> String {
        format!("{}:{name}", self.prefix())
    }

    /// The namespace on the far side of a cross-registry pairing.
    #[must_use]
    pub fn counterpart(self) -> Self {
        match self {
            Self::Npm => Self::Crate,
            Self::Crate => Self::Npm,
        }
    }

    /// Splits a namespaced store key into namespace and bare name.
    ///
    /// Returns `None` for keys outside the registry namespaces, including
    /// `soul:` content-index keys.
    #[must_use]
    pub fn parse_key(key: &str) -> Option<(Self, &str)> {
        let (prefix, name) = key.split_once(':')?;
        match prefix {
            "npm" => Some((Self::Npm, name)),
            "crate" => Some((Self::Crate, name)),
            _ => None,
        }
    }
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.prefix())
    }
}

impl FromStr for Namespace {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "npm" => Ok(Self::Npm),
            "crate" => Ok(Self::Crate),
            other => Err(Error::InvalidRecord(format!(
                "unknown namespace: {other}"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_for() {
        assert_eq!(Namespace::Npm.key_for("left-pad"), "npm:left-pad");
        assert_eq!(Namespace::Crate.key_for("serde"), "crate:serde");
    }

    #[test]
    fn test_parse_key() {
        assert_eq!(
            Namespace::parse_key("npm:left-pad"),
            Some((Namespace::Npm, "left-pad"))
        );
        assert_eq!(
            Namespace::parse_key("crate:serde"),
            Some((Namespace::Crate, "serde"))
        );
        assert_eq!(Namespace::parse_key("soul:abc123"), None);
        assert_eq!(Namespace::parse_key("left-pad"), None);
    }

    #[test]
    fn test_counterpart() {
        assert_eq!(Namespace::Npm.counterpart(), Namespace::Crate);
        assert_eq!(Namespace::Crate.counterpart(), Namespace::Npm);
    }

    #[test]
    fn test_from_str_rejects_unknown() {
        assert!("npm".parse::<Namespace>().is_ok());
        assert!("pypi".parse::<Namespace>().is_err());
    }
}

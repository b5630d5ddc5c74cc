//! Shared value types used by the config codec, input resolution and the CLI.
//!
//! Each enumeration has exactly one canonical representation: the string used
//! on the wire and in `config.json`. An empty string parses to the `Unset`
//! variant, which means "optional, fill with a default later" and is distinct
//! from an invalid value.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::Error;

/// App config scheme version. Zero means "unset".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ConfigVersion(pub u32);

impl ConfigVersion {
    pub const ZERO: ConfigVersion = ConfigVersion(0);
    pub const V20180301: ConfigVersion = ConfigVersion(20180301);
    pub const V20200603: ConfigVersion = ConfigVersion(20200603);
    /// Version written by a scaffold init.
    pub const DEFAULT: ConfigVersion = Self::V20200603;

    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for ConfigVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ConfigVersion {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(ConfigVersion)
    }
}

impl Serialize for ConfigVersion {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u32(self.0)
    }
}

impl<'de> Deserialize<'de> for ConfigVersion {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        u32::deserialize(deserializer).map(ConfigVersion)
    }
}

/// Implements `Display`, `FromStr` and string serde for a settable enum.
macro_rules! settable_enum {
    (
        $(#[$meta:meta])*
        $name:ident, $kind:literal {
            $($(#[$vmeta:meta])* $variant:ident => $wire:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
        pub enum $name {
            /// No value chosen yet.
            #[default]
            Unset,
            $($(#[$vmeta])* $variant,)+
        }

        impl $name {
            /// Every settable (non-empty) value, in display order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// The wire representation; empty for `Unset`.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $name::Unset => "",
                    $($name::$variant => $wire,)+
                }
            }

            pub fn is_unset(&self) -> bool {
                matches!(self, $name::Unset)
            }

            /// Wire strings of every legal non-empty value.
            pub fn legal_values() -> Vec<&'static str> {
                Self::ALL.iter().map(|v| v.as_str()).collect()
            }

            /// Keep `self` if set, otherwise use `fallback`.
            pub fn or(self, fallback: $name) -> $name {
                if self.is_unset() { fallback } else { self }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    return Ok($name::Unset);
                }
                Self::ALL
                    .iter()
                    .copied()
                    .find(|v| v.as_str().eq_ignore_ascii_case(trimmed))
                    .ok_or_else(|| Error::InvalidValue {
                        kind: $kind,
                        value: s.to_string(),
                        legal: Self::legal_values(),
                    })
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.as_str())
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let raw = String::deserialize(deserializer)?;
                raw.parse().map_err(serde::de::Error::custom)
            }
        }
    };
}

settable_enum! {
    /// Cloud region an app is deployed to.
    Location, "location" {
        Virginia => "US-VA",
        Oregon => "US-OR",
        Frankfurt => "DE-FF",
        Ireland => "IE",
        Sydney => "AU",
        Mumbai => "IN-MB",
        Singapore => "SG",
    }
}

settable_enum! {
    /// Whether an app is served globally or from a single region.
    DeploymentModel, "deployment model" {
        Global => "GLOBAL",
        Local => "LOCAL",
    }
}

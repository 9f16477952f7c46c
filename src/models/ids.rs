use std::fmt;

use serde::{Deserialize, Serialize};

/// Declares a string-backed id with a fixed prefix (`p-001`, `u-002`, ...).
macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident, $prefix:literal) => {
        $(#[$meta])*
        #[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            pub const PREFIX: &'static str = $prefix;

            /// Builds the canonical id for a sequence number, zero padded to three digits.
            pub fn from_sequence(sequence: u64) -> Self {
                Self(format!("{}-{:03}", Self::PREFIX, sequence))
            }

            /// Numeric suffix of a canonical id, `None` for foreign ids.
            pub fn sequence(&self) -> Option<u64> {
                self.0
                    .strip_prefix(Self::PREFIX)
                    .and_then(|rest| rest.strip_prefix('-'))
                    .and_then(|digits| digits.parse().ok())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }
    };
}

entity_id!(
    /// Identifier of a [`Project`](crate::models::project::Project)
    ProjectId,
    "p"
);
entity_id!(
    /// Identifier of a [`Member`](crate::models::member::Member)
    MemberId,
    "u"
);
entity_id!(
    /// Identifier of a [`Task`](crate::models::task::Task)
    TaskId,
    "t"
);

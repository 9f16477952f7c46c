use thiserror::Error;

/// Error returned when a user-supplied label does not match any variant.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("Unknown {kind} '{value}', expected one of: {expected}")]
pub struct ParseLabelError {
    pub kind: &'static str,
    pub value: String,
    pub expected: String,
}

/// Lowercases and strips separators so "In progress", "in-progress" and
/// "InProgress" compare equal.
pub(crate) fn normalize_label(value: &str) -> String {
    value
        .chars()
        .filter(|c| !matches!(c, ' ' | '-' | '_' | '/'))
        .flat_map(char::to_lowercase)
        .collect()
}

/// Declares a closed enum with an English display label and any number of
/// accepted input aliases (the dashboard's Spanish labels among them).
macro_rules! labelled_enum {
    (
        $(#[$meta:meta])*
        $name:ident ($kind:literal, default = $default:ident) {
            $($variant:ident => $label:literal $(| $alias:literal)*),+ $(,)?
        }
    ) => {
        #[derive(serde::Serialize, serde::Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
        $(#[$meta])*
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn label(self) -> &'static str {
                match self {
                    $($name::$variant => $label),+
                }
            }
        }

        impl Default for $name {
            fn default() -> Self {
                $name::$default
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.label())
            }
        }

        impl std::str::FromStr for $name {
            type Err = $crate::models::ParseLabelError;

            fn from_str(value: &str) -> Result<Self, Self::Err> {
                let needle = $crate::models::normalize_label(value);
                $(
                    if needle == $crate::models::normalize_label(stringify!($variant))
                        || needle == $crate::models::normalize_label($label)
                        $(|| needle == $crate::models::normalize_label($alias))*
                    {
                        return Ok($name::$variant);
                    }
                )+
                Err($crate::models::ParseLabelError {
                    kind: $kind,
                    value: value.to_string(),
                    expected: $name::ALL
                        .iter()
                        .map(|variant| variant.label())
                        .collect::<Vec<_>>()
                        .join(", "),
                })
            }
        }
    };
}

pub mod ids;
pub mod member;
pub mod project;
pub mod seed;
pub mod store;
pub mod task;

labelled_enum! {
    /// Urgency shared by projects and tasks
    Priority ("priority", default = Medium) {
        Low => "low" | "baja",
        Medium => "medium" | "media",
        High => "high" | "alta",
        Urgent => "urgent" | "urgente",
    }
}

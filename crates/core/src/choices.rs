//! Closed choice sets for project state.
//!
//! Each variant carries two strings: the storage value written to the
//! database and sent over the wire (e.g. `"IN_PROGRESS"`), and a display
//! label for UI layers and reports (e.g. `"In Progress"`).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// A single `{ value, label }` pair, as exposed by the choices endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Choice {
    pub value: &'static str,
    pub label: &'static str,
}

macro_rules! define_choice_enum {
    (
        $(#[$meta:meta])*
        $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident => ($value:literal, $label:literal) ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $( $(#[$vmeta])* #[serde(rename = $value)] $variant ),+
        }

        impl $name {
            /// Every variant, in declaration order.
            pub const ALL: &'static [$name] = &[$( $name::$variant ),+];

            /// Storage / wire value.
            pub fn as_str(self) -> &'static str {
                match self {
                    $( $name::$variant => $value ),+
                }
            }

            /// Human-readable label.
            pub fn label(self) -> &'static str {
                match self {
                    $( $name::$variant => $label ),+
                }
            }

            /// All `{ value, label }` pairs, in declaration order.
            pub fn choices() -> Vec<Choice> {
                Self::ALL
                    .iter()
                    .map(|c| Choice { value: c.as_str(), label: c.label() })
                    .collect()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = CoreError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $( $value => Ok($name::$variant), )+
                    other => Err(CoreError::Validation(format!(
                        concat!("Invalid ", stringify!($name), " '{}'. Must be one of: {}"),
                        other,
                        [$( $value ),+].join(", ")
                    ))),
                }
            }
        }

        impl TryFrom<String> for $name {
            type Error = CoreError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                value.parse()
            }
        }
    };
}

define_choice_enum! {
    /// Where a submitted project sits in the triage workflow.
    ///
    /// No transition rules are enforced; any status may be set directly.
    ProjectStatus {
        New => ("NEW", "New"),
        Accepted => ("ACCEPTED", "Accepted"),
        Rejected => ("REJECTED", "Rejected"),
        InProgress => ("IN_PROGRESS", "In Progress"),
        Completed => ("COMPLETED", "Completed"),
    }
}

define_choice_enum! {
    /// Staff-assigned urgency of a project.
    ProjectPriority {
        High => ("HIGH", "High"),
        Medium => ("MEDIUM", "Medium"),
        Low => ("LOW", "Low"),
    }
}

impl Default for ProjectStatus {
    fn default() -> Self {
        Self::New
    }
}

impl Default for ProjectPriority {
    fn default() -> Self {
        Self::Medium
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_values_and_labels() {
        assert_eq!(ProjectStatus::InProgress.as_str(), "IN_PROGRESS");
        assert_eq!(ProjectStatus::InProgress.label(), "In Progress");
        assert_eq!(ProjectStatus::New.label(), "New");
        assert_eq!(ProjectStatus::ALL.len(), 5);
    }

    #[test]
    fn priority_values_and_labels() {
        assert_eq!(ProjectPriority::High.as_str(), "HIGH");
        assert_eq!(ProjectPriority::Low.label(), "Low");
        assert_eq!(ProjectPriority::ALL.len(), 3);
    }

    #[test]
    fn defaults_are_new_and_medium() {
        assert_eq!(ProjectStatus::default(), ProjectStatus::New);
        assert_eq!(ProjectPriority::default(), ProjectPriority::Medium);
    }

    #[test]
    fn parse_from_storage_value() {
        assert_eq!(
            "COMPLETED".parse::<ProjectStatus>().unwrap(),
            ProjectStatus::Completed
        );
        assert_eq!(
            ProjectPriority::try_from("LOW".to_string()).unwrap(),
            ProjectPriority::Low
        );
    }

    #[test]
    fn parse_rejects_labels_and_unknown_values() {
        assert!("In Progress".parse::<ProjectStatus>().is_err());
        let err = "URGENT".parse::<ProjectPriority>().unwrap_err();
        assert!(err.to_string().contains("HIGH, MEDIUM, LOW"));
    }

    #[test]
    fn serde_uses_storage_value() {
        let json = serde_json::to_string(&ProjectStatus::InProgress).unwrap();
        assert_eq!(json, "\"IN_PROGRESS\"");

        let parsed: ProjectPriority = serde_json::from_str("\"HIGH\"").unwrap();
        assert_eq!(parsed, ProjectPriority::High);
    }

    #[test]
    fn choices_preserve_declaration_order() {
        let choices = ProjectStatus::choices();
        assert_eq!(
            choices.first(),
            Some(&Choice {
                value: "NEW",
                label: "New"
            })
        );
        assert_eq!(choices.last().map(|c| c.value), Some("COMPLETED"));
    }
}

//! Lifecycle and play-state markers.

/// Where an action currently sits in its lifecycle.
///
/// ```text
/// Unbegun ──begin──▶ Active ──complete──▶ Completed
///    ▲                  │                    │
///    └──────rewind──────┴────────────────────┘
///
/// any ──kill──▶ Killed ──begin──▶ Active   (pooled reuse)
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LifecycleState {
    /// Freshly acquired or rewound; `begin` has not run for this activation.
    #[default]
    Unbegun,

    /// Begun and receiving updates.
    Active,

    /// `complete` has run for this activation.
    Completed,

    /// Released all external references. Only `begin` (after reconfiguring)
    /// brings the action back.
    Killed,
}

impl LifecycleState {
    /// Returns `true` if this state is `Active`.
    #[inline]
    pub fn is_active(self) -> bool {
        matches!(self, LifecycleState::Active)
    }

    /// Returns `true` if this state is `Completed`.
    #[inline]
    pub fn is_completed(self) -> bool {
        matches!(self, LifecycleState::Completed)
    }

    /// Returns `true` if this state is `Killed`.
    #[inline]
    pub fn is_killed(self) -> bool {
        matches!(self, LifecycleState::Killed)
    }
}

/// Per-child completion marker kept by composite actions.
///
/// Composites consult this table to skip finished children and to make sure
/// each child is completed exactly once per activation.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PlayState {
    /// The child has not been completed yet.
    #[default]
    Incomplete,

    /// The child received its `complete` call.
    Complete,
}

impl PlayState {
    /// Returns `true` if this state is `Complete`.
    #[inline]
    pub fn is_complete(self) -> bool {
        matches!(self, PlayState::Complete)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn states_render_in_snake_case() {
        assert_eq!(LifecycleState::Completed.to_string(), "completed");
        assert_eq!(PlayState::Incomplete.as_ref(), "incomplete");
    }

    #[test]
    fn states_parse_case_insensitively() {
        assert_eq!(
            LifecycleState::from_str("ACTIVE").ok(),
            Some(LifecycleState::Active)
        );
        assert_eq!(PlayState::from_str("complete").ok(), Some(PlayState::Complete));
        assert!(PlayState::from_str("done").is_err());
    }

    #[test]
    fn defaults_are_initial_states() {
        assert_eq!(LifecycleState::default(), LifecycleState::Unbegun);
        assert!(!PlayState::default().is_complete());
    }
}

//! Router lifecycle states

use std::fmt;

/// Lifecycle state of the router engine
///
/// The state only ever advances `Uninitialized` → `Initialized` → `Running`
/// and retreats `Running` → `Initialized` → `Uninitialized`. Transitions are
/// performed by the manager while holding its guard lock, so no other
/// ordering is observable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouterState {
    /// The engine has not been initialized
    Uninitialized,
    /// The engine is initialized but not serving
    Initialized,
    /// The engine is started and serving
    Running,
}

impl RouterState {
    /// Whether the engine is currently serving
    pub fn is_running(self) -> bool {
        matches!(self, Self::Running)
    }

    /// Whether `init` has been performed and not yet undone
    pub fn is_initialized(self) -> bool {
        !matches!(self, Self::Uninitialized)
    }
}

impl fmt::Display for RouterState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Uninitialized => write!(f, "uninitialized"),
            Self::Initialized => write!(f, "initialized"),
            Self::Running => write!(f, "running"),
        }
    }
}

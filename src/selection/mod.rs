mod query;

use serde::{Deserialize, Serialize};

use crate::ranking::Platform;

/// What the caller wants to see: a platform set, a genre set and one week.
///
/// Empty platform or genre lists mean "no restriction". A missing week means
/// "no restriction" to the filter and "use the most recent week" to
/// [`Selection::resolve_week`]. Callers translate URL state or CLI flags into
/// this value; nothing in the library reads ambient state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    pub platforms: Vec<Platform>,
    pub genres: Vec<String>,
    pub week: Option<String>,
}

impl Selection {
    pub fn new(platforms: Vec<Platform>, genres: Vec<String>, week: Option<String>) -> Self {
        Self {
            platforms,
            genres,
            week,
        }
    }

    /// The selected week, treating an empty string as absent
    pub fn week(&self) -> Option<&str> {
        self.week.as_deref().filter(|w| !w.is_empty())
    }

    pub fn is_unrestricted(&self) -> bool {
        self.platforms.is_empty() && self.genres.is_empty() && self.week().is_none()
    }

    /// Fill in a missing week with the first entry of `weeks`.
    ///
    /// `weeks` is expected most-recent-first, as returned by
    /// [`crate::ranking::available_weeks`].
    pub fn resolve_week(&self, weeks: &[String]) -> Selection {
        let mut resolved = self.clone();
        if resolved.week().is_none() {
            resolved.week = weeks.first().cloned();
        }
        resolved
    }
}

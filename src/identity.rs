use tracing::debug;

use crate::models::booking::RequesterIdentity;

/// Identity of whoever is filling in the form, for one request.
///
/// Built from the profile the identity plugin hands to the page. An absent
/// profile is an anonymous requester, never an error.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionContext {
    profile: Option<RequesterIdentity>,
}

impl SessionContext {
    pub fn anonymous() -> Self {
        Self { profile: None }
    }

    /// Context for a plugin profile. A profile is kept as given, blank id included.
    pub fn from_profile(profile: Option<RequesterIdentity>) -> Self {
        if let Some(p) = &profile {
            if p.id.trim().is_empty() {
                debug!("Identity profile has no user id, keeping display name only");
            }
        }

        Self { profile }
    }

    pub fn identity(&self) -> Option<&RequesterIdentity> {
        self.profile.as_ref()
    }

    /// A profile with a usable user id is present.
    pub fn is_authenticated(&self) -> bool {
        self.profile
            .as_ref()
            .is_some_and(|p| !p.id.trim().is_empty())
    }
}

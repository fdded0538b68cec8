use crate::activity::Activity;
use crate::error::{RegistryError, Result};
use std::collections::BTreeMap;

// ---------------------------------------------------------------------------
// CapacityPolicy
// ---------------------------------------------------------------------------

/// Whether `max_participants` is checked on enroll.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CapacityPolicy {
    /// Capacity is informational only; enroll never fails for a full roster.
    #[default]
    Advisory,
    /// Enroll into a full activity fails with `ActivityFull`.
    Enforced,
}

impl CapacityPolicy {
    pub fn from_enforce_flag(enforce: bool) -> Self {
        if enforce {
            CapacityPolicy::Enforced
        } else {
            CapacityPolicy::Advisory
        }
    }
}

// ---------------------------------------------------------------------------
// Registry
// ---------------------------------------------------------------------------

/// In-memory catalog of activities and their rosters.
///
/// Each (email, activity) pair is either not enrolled or enrolled; `enroll`
/// and `withdraw` are the only transitions and each rejects the call that
/// would repeat the current state.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    activities: BTreeMap<String, Activity>,
    capacity: CapacityPolicy,
}

impl Registry {
    pub fn new(activities: BTreeMap<String, Activity>) -> Self {
        Self {
            activities,
            capacity: CapacityPolicy::default(),
        }
    }

    /// Builder: set the capacity policy.
    pub fn with_capacity_policy(mut self, capacity: CapacityPolicy) -> Self {
        self.capacity = capacity;
        self
    }

    pub fn capacity_policy(&self) -> CapacityPolicy {
        self.capacity
    }

    /// Every activity with its current roster.
    pub fn list(&self) -> &BTreeMap<String, Activity> {
        &self.activities
    }

    pub fn get(&self, name: &str) -> Result<&Activity> {
        self.activities
            .get(name)
            .ok_or_else(|| RegistryError::ActivityNotFound(name.to_string()))
    }

    pub fn len(&self) -> usize {
        self.activities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.activities.is_empty()
    }

    /// Append `email` to the roster of `name`.
    pub fn enroll(&mut self, name: &str, email: &str) -> Result<String> {
        let capacity = self.capacity;
        let activity = self
            .activities
            .get_mut(name)
            .ok_or_else(|| RegistryError::ActivityNotFound(name.to_string()))?;

        if activity.is_enrolled(email) {
            return Err(RegistryError::AlreadySignedUp {
                activity: name.to_string(),
                email: email.to_string(),
            });
        }
        if capacity == CapacityPolicy::Enforced && activity.is_full() {
            return Err(RegistryError::ActivityFull(name.to_string()));
        }

        activity.participants.push(email.to_string());
        tracing::info!(activity = name, email, "participant signed up");
        Ok(format!("Signed up {email} for {name}"))
    }

    /// Remove `email` from the roster of `name`.
    pub fn withdraw(&mut self, name: &str, email: &str) -> Result<String> {
        let activity = self
            .activities
            .get_mut(name)
            .ok_or_else(|| RegistryError::ActivityNotFound(name.to_string()))?;

        let Some(pos) = activity.participants.iter().position(|p| p == email) else {
            return Err(RegistryError::NotSignedUp {
                activity: name.to_string(),
                email: email.to_string(),
            });
        };

        activity.participants.remove(pos);
        tracing::info!(activity = name, email, "participant unregistered");
        Ok(format!("Unregistered {email} from {name}"))
    }
}

use crate::activity::Activity;
use crate::error::{RegistryError, Result};
use std::collections::BTreeMap;
use std::path::Path;

/// Activity name → activity, as seeded at startup.
pub type Catalog = BTreeMap<String, Activity>;

/// The activities Mergington High School offers out of the box.
pub fn default_catalog() -> Catalog {
    let entries = [
        (
            "Chess Club",
            Activity::new(
                "Learn strategies and compete in chess tournaments",
                "Fridays, 3:30 PM - 5:00 PM",
                12,
            )
            .with_participants(["michael@mergington.edu", "daniel@mergington.edu"]),
        ),
        (
            "Programming Class",
            Activity::new(
                "Learn programming fundamentals and build software projects",
                "Tuesdays and Thursdays, 3:30 PM - 4:30 PM",
                20,
            )
            .with_participants(["emma@mergington.edu", "sophia@mergington.edu"]),
        ),
        (
            "Gym Class",
            Activity::new(
                "Physical education and sports activities",
                "Mondays, Wednesdays, Fridays, 2:00 PM - 3:00 PM",
                30,
            )
            .with_participants(["john@mergington.edu", "olivia@mergington.edu"]),
        ),
        (
            "Soccer Team",
            Activity::new(
                "Join the school soccer team and compete in matches",
                "Tuesdays and Thursdays, 4:00 PM - 5:30 PM",
                22,
            )
            .with_participants(["liam@mergington.edu", "noah@mergington.edu"]),
        ),
        (
            "Basketball Team",
            Activity::new(
                "Practice and play basketball with the school team",
                "Wednesdays and Fridays, 3:30 PM - 5:00 PM",
                15,
            )
            .with_participants(["ava@mergington.edu", "mia@mergington.edu"]),
        ),
        (
            "Art Club",
            Activity::new(
                "Explore your creativity through painting and drawing",
                "Thursdays, 3:30 PM - 5:00 PM",
                15,
            )
            .with_participants(["amelia@mergington.edu", "harper@mergington.edu"]),
        ),
        (
            "Drama Club",
            Activity::new(
                "Act, direct, and produce plays and performances",
                "Mondays and Wednesdays, 4:00 PM - 5:30 PM",
                20,
            )
            .with_participants(["ella@mergington.edu", "scarlett@mergington.edu"]),
        ),
        (
            "Math Club",
            Activity::new(
                "Solve challenging problems and participate in math competitions",
                "Tuesdays, 3:30 PM - 4:30 PM",
                10,
            )
            .with_participants(["james@mergington.edu", "benjamin@mergington.edu"]),
        ),
        (
            "Debate Team",
            Activity::new(
                "Develop public speaking and argumentation skills",
                "Fridays, 4:00 PM - 5:30 PM",
                12,
            )
            .with_participants(["charlotte@mergington.edu", "henry@mergington.edu"]),
        ),
    ];

    entries
        .into_iter()
        .map(|(name, activity)| (name.to_string(), activity))
        .collect()
}

/// Load a catalog from a YAML mapping of name → activity.
pub fn load(path: &Path) -> Result<Catalog> {
    let data = std::fs::read_to_string(path)?;
    let catalog: Catalog = serde_yaml::from_str(&data)?;
    validate(&catalog)?;
    tracing::debug!(path = %path.display(), activities = catalog.len(), "loaded catalog");
    Ok(catalog)
}

/// Reject catalogs that would break registry invariants from the first request.
pub fn validate(catalog: &Catalog) -> Result<()> {
    for (name, activity) in catalog {
        if name.trim().is_empty() {
            return Err(RegistryError::InvalidCatalog(
                "activity name must not be empty".to_string(),
            ));
        }
        if activity.max_participants == 0 {
            return Err(RegistryError::InvalidCatalog(format!(
                "'{name}' must allow at least one participant"
            )));
        }
        if let Some(email) = activity.duplicate_participant() {
            return Err(RegistryError::InvalidCatalog(format!(
                "'{name}' lists {email} more than once"
            )));
        }
    }
    Ok(())
}

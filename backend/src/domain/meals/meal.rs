//! Meal entity and its validated components.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::MealValidationError;
use crate::domain::UserId;

/// Convert epoch milliseconds into a UTC timestamp.
pub fn from_epoch_millis(millis: i64) -> Result<DateTime<Utc>, MealValidationError> {
    DateTime::from_timestamp_millis(millis)
        .ok_or(MealValidationError::TimestampOutOfRange { millis })
}

/// Meal identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MealId(Uuid);

impl MealId {
    /// Parse a meal id from its textual UUID form.
    pub fn new(id: impl AsRef<str>) -> Result<Self, MealValidationError> {
        Uuid::parse_str(id.as_ref())
            .map(Self)
            .map_err(|_| MealValidationError::InvalidId)
    }

    /// Generate a fresh random id.
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wrap a UUID read from storage.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for MealId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Meal name exactly as the caller supplied it. Any string is accepted,
/// including the empty string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MealName(String);

impl MealName {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }
}

impl AsRef<str> for MealName {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for MealName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

/// Free-form description. May be empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MealDescription(String);

impl MealDescription {
    pub fn new(description: impl Into<String>) -> Self {
        Self(description.into())
    }
}

impl AsRef<str> for MealDescription {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

/// Caller-supplied meal fields, used for both creation and replacement.
///
/// `occurred_at` is truncated to millisecond precision to match storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MealDraft {
    name: MealName,
    description: MealDescription,
    occurred_at: DateTime<Utc>,
    is_on_diet: bool,
}

impl MealDraft {
    /// Assemble a draft from validated parts.
    pub fn new(
        name: MealName,
        description: MealDescription,
        occurred_at: DateTime<Utc>,
        is_on_diet: bool,
    ) -> Self {
        let occurred_at =
            DateTime::from_timestamp_millis(occurred_at.timestamp_millis()).unwrap_or(occurred_at);
        Self {
            name,
            description,
            occurred_at,
            is_on_diet,
        }
    }

    pub fn name(&self) -> &MealName {
        &self.name
    }

    pub fn description(&self) -> &MealDescription {
        &self.description
    }

    pub fn occurred_at(&self) -> DateTime<Utc> {
        self.occurred_at
    }

    pub fn is_on_diet(&self) -> bool {
        self.is_on_diet
    }
}

/// A recorded meal.
///
/// ## Invariants
/// - `owner` never changes after creation.
/// - `created_at` is assigned once by the service clock.
///
/// # Examples
/// ```
/// use chrono::Utc;
/// use daily_diet::domain::{Meal, MealDescription, MealDraft, MealName, UserId};
///
/// let draft = MealDraft::new(
///     MealName::new("Porridge"),
///     MealDescription::default(),
///     Utc::now(),
///     true,
/// );
/// let owner = UserId::random();
/// let meal = Meal::record(owner.clone(), draft, Utc::now());
/// assert_eq!(meal.owner(), &owner);
/// assert!(meal.is_on_diet());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Meal {
    id: MealId,
    owner: UserId,
    details: MealDraft,
    created_at: DateTime<Utc>,
}

impl Meal {
    /// Rebuild a meal from stored parts.
    pub fn new(id: MealId, owner: UserId, details: MealDraft, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            owner,
            details,
            created_at,
        }
    }

    /// Record a new meal under a fresh id.
    pub fn record(owner: UserId, details: MealDraft, created_at: DateTime<Utc>) -> Self {
        Self::new(MealId::random(), owner, details, created_at)
    }

    /// Replace the descriptive fields, keeping id, owner, and creation time.
    #[must_use]
    pub fn with_details(self, details: MealDraft) -> Self {
        Self { details, ..self }
    }

    pub fn id(&self) -> MealId {
        self.id
    }

    pub fn owner(&self) -> &UserId {
        &self.owner
    }

    pub fn details(&self) -> &MealDraft {
        &self.details
    }

    pub fn name(&self) -> &MealName {
        self.details.name()
    }

    pub fn description(&self) -> &MealDescription {
        self.details.description()
    }

    pub fn occurred_at(&self) -> DateTime<Utc> {
        self.details.occurred_at()
    }

    pub fn is_on_diet(&self) -> bool {
        self.details.is_on_diet()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

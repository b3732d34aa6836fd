//! User entity, roles, and validated onboarding input.
//!
//! Keep inbound payload parsing outside the domain by exposing constructors
//! that validate string inputs before a handler talks to a port or service.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Role a user takes on after onboarding.
///
/// The role is immutable once set; a user cannot switch between posting
/// jobs and proposing on them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserRole {
    /// Posts jobs and reviews proposals.
    Client,
    /// Browses jobs and submits proposals.
    Freelancer,
}

impl UserRole {
    /// Storage representation of the role.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Client => "CLIENT",
            Self::Freelancer => "FREELANCER",
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserRole {
    type Err = UserValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "CLIENT" => Ok(Self::Client),
            "FREELANCER" => Ok(Self::Freelancer),
            other => Err(UserValidationError::UnknownRole {
                value: other.to_owned(),
            }),
        }
    }
}

/// Opaque subject identifier issued by the external identity provider.
///
/// ## Invariants
/// - Non-empty once trimmed; surrounding whitespace is stripped.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub struct ExternalId(String);

impl ExternalId {
    /// Construct a subject id from the verified identity header value.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, UserValidationError> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            return Err(UserValidationError::EmptySubject);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the subject id as a string slice.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for ExternalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Validation failures for user-related inputs.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserValidationError {
    /// The external subject id was empty.
    #[error("identity subject must not be empty")]
    EmptySubject,
    /// The role string is not one of the recognized values.
    #[error("unknown role: {value}")]
    UnknownRole {
        /// Offending input value.
        value: String,
    },
    /// The email address was empty.
    #[error("email must not be empty")]
    EmptyEmail,
    /// The email address is not plausibly an address.
    #[error("email is not a valid address")]
    InvalidEmail,
    /// The display name was empty.
    #[error("name must not be empty")]
    EmptyName,
    /// The hourly rate must be a positive, finite number.
    #[error("hourly rate must be a positive number")]
    InvalidHourlyRate,
}

/// Application user profile.
///
/// A record with `role: None` belongs to a subject that authenticated but
/// has not completed onboarding; no role-gated operation accepts it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Stable local identifier.
    pub id: Uuid,
    /// Identity-provider subject this profile is bound to. Immutable.
    pub external_id: ExternalId,
    /// Contact email supplied at onboarding.
    pub email: String,
    /// Display name shown to the other party.
    pub name: String,
    /// Avatar URL, when the provider supplied one.
    pub profile_picture: Option<String>,
    /// Role chosen at onboarding; `None` until onboarding completes.
    pub role: Option<UserRole>,
    /// Freelancer biography; always `None` for clients.
    pub bio: Option<String>,
    /// Freelancer skill set, normalized; always empty for clients.
    pub skills: Vec<String>,
    /// Freelancer hourly rate; always `None` for clients.
    pub hourly_rate: Option<f64>,
    /// Monetary balance. Settlement is out of scope; onboarding sets 0.
    pub balance: f64,
    /// Record creation time.
    pub created_at: DateTime<Utc>,
    /// Last modification time.
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Whether this profile has completed onboarding.
    pub fn is_onboarded(&self) -> bool {
        self.role.is_some()
    }
}

/// Normalize a skill list: trim entries, drop empties, deduplicate while
/// preserving first-seen order.
pub fn normalize_skills<I, S>(skills: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut seen = Vec::new();
    for skill in skills {
        let trimmed = skill.as_ref().trim();
        if trimmed.is_empty() {
            continue;
        }
        if seen.iter().any(|existing: &String| existing == trimmed) {
            continue;
        }
        seen.push(trimmed.to_owned());
    }
    seen
}

/// Validated onboarding submission.
///
/// Freelancer-only fields (`skills`, `bio`, `hourly_rate`) are retained only
/// when the requested role is [`UserRole::Freelancer`]; they are cleared for
/// clients so a stale submission cannot smuggle freelancer state onto a
/// client profile.
#[derive(Debug, Clone, PartialEq)]
pub struct OnboardingProfile {
    email: String,
    name: String,
    profile_picture: Option<String>,
    role: UserRole,
    bio: Option<String>,
    skills: Vec<String>,
    hourly_rate: Option<f64>,
}

/// Raw onboarding fields prior to validation.
#[derive(Debug, Clone, Default)]
pub struct OnboardingInput {
    /// Contact email claim.
    pub email: String,
    /// Display name claim.
    pub name: String,
    /// Avatar URL claim.
    pub profile_picture: Option<String>,
    /// Requested role string, `CLIENT` or `FREELANCER`.
    pub role: String,
    /// Freelancer biography.
    pub bio: Option<String>,
    /// Freelancer skills, unnormalized.
    pub skills: Vec<String>,
    /// Freelancer hourly rate.
    pub hourly_rate: Option<f64>,
}

impl OnboardingProfile {
    /// Validate raw onboarding input.
    pub fn try_from_input(input: OnboardingInput) -> Result<Self, UserValidationError> {
        let email = input.email.trim().to_owned();
        if email.is_empty() {
            return Err(UserValidationError::EmptyEmail);
        }
        if !email.contains('@') || email.starts_with('@') || email.ends_with('@') {
            return Err(UserValidationError::InvalidEmail);
        }

        let name = input.name.trim().to_owned();
        if name.is_empty() {
            return Err(UserValidationError::EmptyName);
        }

        let role = input.role.parse::<UserRole>()?;

        let (bio, skills, hourly_rate) = match role {
            UserRole::Freelancer => {
                if let Some(rate) = input.hourly_rate {
                    if !rate.is_finite() || rate <= 0.0 {
                        return Err(UserValidationError::InvalidHourlyRate);
                    }
                }
                (
                    input.bio.and_then(|bio| {
                        let trimmed = bio.trim().to_owned();
                        (!trimmed.is_empty()).then_some(trimmed)
                    }),
                    normalize_skills(input.skills),
                    input.hourly_rate,
                )
            }
            UserRole::Client => (None, Vec::new(), None),
        };

        Ok(Self {
            email,
            name,
            profile_picture: input.profile_picture,
            role,
            bio,
            skills,
            hourly_rate,
        })
    }

    /// Contact email.
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Avatar URL claim.
    pub fn profile_picture(&self) -> Option<&str> {
        self.profile_picture.as_deref()
    }

    /// Role requested at onboarding.
    pub fn role(&self) -> UserRole {
        self.role
    }

    /// Freelancer biography, cleared for clients.
    pub fn bio(&self) -> Option<&str> {
        self.bio.as_deref()
    }

    /// Normalized skills, empty for clients.
    pub fn skills(&self) -> &[String] {
        &self.skills
    }

    /// Hourly rate, cleared for clients.
    pub fn hourly_rate(&self) -> Option<f64> {
        self.hourly_rate
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    fn freelancer_input() -> OnboardingInput {
        OnboardingInput {
            email: "jane@example.com".into(),
            name: "Jane Freelancer".into(),
            profile_picture: None,
            role: "FREELANCER".into(),
            bio: Some("Full-stack developer.".into()),
            skills: vec!["React".into(), " React ".into(), "".into(), "Node.js".into()],
            hourly_rate: Some(50.0),
        }
    }

    #[rstest]
    #[case("", UserValidationError::EmptyEmail)]
    #[case("   ", UserValidationError::EmptyEmail)]
    #[case("not-an-address", UserValidationError::InvalidEmail)]
    #[case("@example.com", UserValidationError::InvalidEmail)]
    fn invalid_emails_are_rejected(#[case] email: &str, #[case] expected: UserValidationError) {
        let input = OnboardingInput {
            email: email.into(),
            ..freelancer_input()
        };
        let err = OnboardingProfile::try_from_input(input).expect_err("must fail");
        assert_eq!(err, expected);
    }

    #[test]
    fn unknown_role_is_rejected() {
        let input = OnboardingInput {
            role: "ADMIN".into(),
            ..freelancer_input()
        };
        let err = OnboardingProfile::try_from_input(input).expect_err("must fail");
        assert!(matches!(err, UserValidationError::UnknownRole { .. }));
    }

    #[test]
    fn freelancer_skills_are_normalized() {
        let profile =
            OnboardingProfile::try_from_input(freelancer_input()).expect("valid input");
        assert_eq!(profile.skills(), ["React", "Node.js"]);
        assert_eq!(profile.hourly_rate(), Some(50.0));
    }

    #[test]
    fn client_onboarding_clears_freelancer_fields() {
        let input = OnboardingInput {
            role: "CLIENT".into(),
            ..freelancer_input()
        };
        let profile = OnboardingProfile::try_from_input(input).expect("valid input");
        assert!(profile.skills().is_empty());
        assert_eq!(profile.bio(), None);
        assert_eq!(profile.hourly_rate(), None);
    }

    #[rstest]
    #[case(0.0)]
    #[case(-10.0)]
    #[case(f64::NAN)]
    fn non_positive_hourly_rate_is_rejected(#[case] rate: f64) {
        let input = OnboardingInput {
            hourly_rate: Some(rate),
            ..freelancer_input()
        };
        let err = OnboardingProfile::try_from_input(input).expect_err("must fail");
        assert_eq!(err, UserValidationError::InvalidHourlyRate);
    }

    #[test]
    fn subject_ids_are_trimmed_and_non_empty() {
        let id = ExternalId::new("  user_2zJeVe  ").expect("valid subject");
        assert_eq!(id.as_str(), "user_2zJeVe");
        assert!(ExternalId::new("   ").is_err());
    }
}

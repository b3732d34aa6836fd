//! Identity bridge: binds verified external subjects to local profiles.
//!
//! Onboarding is the only write path for profile data. It is idempotent:
//! once a role is set, further calls report "already onboarded" and change
//! nothing, which also makes the role immutable.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::info;
use uuid::Uuid;

use crate::domain::ports::{OnboardOutcome, OnboardRequest, OnboardingCommand, UserRepository};
use crate::domain::service_support::{map_user_repo_error, map_user_validation_error};
use crate::domain::{Error, OnboardingProfile, User};

/// Onboarding service implementing the driving port.
#[derive(Clone)]
pub struct OnboardingService<U> {
    users: Arc<U>,
    clock: Arc<dyn Clock>,
}

impl<U> OnboardingService<U> {
    /// Create a new service over a user repository.
    pub fn new(users: Arc<U>, clock: Arc<dyn Clock>) -> Self {
        Self { users, clock }
    }
}

#[async_trait]
impl<U> OnboardingCommand for OnboardingService<U>
where
    U: UserRepository,
{
    async fn onboard(&self, request: OnboardRequest) -> Result<OnboardOutcome, Error> {
        let existing = self
            .users
            .find_by_external_id(&request.subject)
            .await
            .map_err(map_user_repo_error)?;

        if let Some(user) = existing {
            if user.is_onboarded() {
                return Ok(OnboardOutcome {
                    user,
                    already_onboarded: true,
                    created: false,
                });
            }
            let profile =
                OnboardingProfile::try_from_input(request.input).map_err(map_user_validation_error)?;
            let user = self.apply_profile(user, &profile);
            self.users.upsert(&user).await.map_err(map_user_repo_error)?;
            info!(user_id = %user.id, role = %profile.role(), "onboarded existing profile");
            return Ok(OnboardOutcome {
                user,
                already_onboarded: false,
                created: false,
            });
        }

        let profile =
            OnboardingProfile::try_from_input(request.input).map_err(map_user_validation_error)?;
        let now = self.clock.utc();
        let user = User {
            id: Uuid::new_v4(),
            external_id: request.subject,
            email: profile.email().to_owned(),
            name: profile.name().to_owned(),
            profile_picture: profile.profile_picture().map(str::to_owned),
            role: Some(profile.role()),
            bio: profile.bio().map(str::to_owned),
            skills: profile.skills().to_vec(),
            hourly_rate: profile.hourly_rate(),
            balance: 0.0,
            created_at: now,
            updated_at: now,
        };
        self.users.upsert(&user).await.map_err(map_user_repo_error)?;
        info!(user_id = %user.id, role = %profile.role(), "onboarded new profile");
        Ok(OnboardOutcome {
            user,
            already_onboarded: false,
            created: true,
        })
    }
}

impl<U> OnboardingService<U> {
    fn apply_profile(&self, mut user: User, profile: &OnboardingProfile) -> User {
        user.email = profile.email().to_owned();
        user.name = profile.name().to_owned();
        user.profile_picture = profile.profile_picture().map(str::to_owned);
        user.role = Some(profile.role());
        user.bio = profile.bio().map(str::to_owned);
        user.skills = profile.skills().to_vec();
        user.hourly_rate = profile.hourly_rate();
        user.updated_at = self.clock.utc();
        user
    }
}

#[cfg(test)]
#[path = "onboarding_service_tests.rs"]
mod tests;

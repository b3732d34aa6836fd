//! Tests for the onboarding service.

use std::sync::Arc;

use mockall::predicate::eq;

use super::OnboardingService;
use crate::domain::ports::{MockUserRepository, OnboardRequest, OnboardingCommand};
use crate::domain::test_fixtures::{client_user, fixed_clock, subject};
use crate::domain::{ErrorCode, OnboardingInput, UserRole};

fn freelancer_input() -> OnboardingInput {
    OnboardingInput {
        email: "jane@example.com".into(),
        name: "Jane Freelancer".into(),
        profile_picture: Some("https://i.pravatar.cc/200?img=2".into()),
        role: "FREELANCER".into(),
        bio: Some("Experienced full-stack developer.".into()),
        skills: vec!["React".into(), "Node.js".into()],
        hourly_rate: Some(50.0),
    }
}

fn service(users: MockUserRepository) -> OnboardingService<MockUserRepository> {
    OnboardingService::new(Arc::new(users), fixed_clock())
}

#[tokio::test]
async fn first_contact_creates_a_freelancer_profile() {
    let caller = subject("user_2zOxga");
    let mut users = MockUserRepository::new();
    users
        .expect_find_by_external_id()
        .with(eq(caller.clone()))
        .times(1)
        .return_once(|_| Ok(None));
    users.expect_upsert().times(1).return_once(|_| Ok(()));

    let outcome = service(users)
        .onboard(OnboardRequest {
            subject: caller.clone(),
            input: freelancer_input(),
        })
        .await
        .expect("onboarding succeeds");

    assert!(outcome.created);
    assert!(!outcome.already_onboarded);
    assert_eq!(outcome.user.external_id, caller);
    assert_eq!(outcome.user.role, Some(UserRole::Freelancer));
    assert_eq!(outcome.user.skills, ["React", "Node.js"]);
    assert_eq!(outcome.user.balance, 0.0);
}

#[tokio::test]
async fn repeated_onboarding_is_a_no_op_and_keeps_the_role() {
    let existing = client_user("user_2zJeVe");
    let caller = existing.external_id.clone();
    let mut users = MockUserRepository::new();
    users
        .expect_find_by_external_id()
        .times(1)
        .return_once(move |_| Ok(Some(existing)));
    // No upsert: the second call must not write anything.
    users.expect_upsert().times(0);

    let outcome = service(users)
        .onboard(OnboardRequest {
            subject: caller,
            // the second call even asks for a different role
            input: freelancer_input(),
        })
        .await
        .expect("idempotent call succeeds");

    assert!(outcome.already_onboarded);
    assert!(!outcome.created);
    assert_eq!(outcome.user.role, Some(UserRole::Client));
}

#[tokio::test]
async fn client_onboarding_clears_freelancer_fields() {
    let mut users = MockUserRepository::new();
    users.expect_find_by_external_id().return_once(|_| Ok(None));
    users.expect_upsert().times(1).return_once(|_| Ok(()));

    let input = OnboardingInput {
        role: "CLIENT".into(),
        ..freelancer_input()
    };
    let outcome = service(users)
        .onboard(OnboardRequest {
            subject: subject("user_2zJeVe"),
            input,
        })
        .await
        .expect("onboarding succeeds");

    assert_eq!(outcome.user.role, Some(UserRole::Client));
    assert!(outcome.user.skills.is_empty());
    assert_eq!(outcome.user.bio, None);
    assert_eq!(outcome.user.hourly_rate, None);
}

#[tokio::test]
async fn unknown_role_is_an_invalid_request() {
    let mut users = MockUserRepository::new();
    users.expect_find_by_external_id().return_once(|_| Ok(None));
    users.expect_upsert().times(0);

    let input = OnboardingInput {
        role: "ADMIN".into(),
        ..freelancer_input()
    };
    let error = service(users)
        .onboard(OnboardRequest {
            subject: subject("user_2zJeVe"),
            input,
        })
        .await
        .expect_err("invalid role must fail");

    assert_eq!(error.code(), ErrorCode::InvalidRequest);
}

//! Tests for the proposal lifecycle service.

use std::sync::Arc;

use mockall::predicate::eq;
use uuid::Uuid;

use super::ProposalService;
use crate::domain::ports::{
    AcceptanceOutcome, ListingTag, MockJobRepository, MockListingInvalidation,
    MockProposalRepository, MockUserRepository, ProposalsCommand, SubmitProposalRequest,
};
use crate::domain::test_fixtures::{
    client_user, fixed_clock, freelancer_user, open_job, pending_proposal, subject,
};
use crate::domain::{ErrorCode, JobStatus, ProposalStatus, User};

type Service = ProposalService<
    MockProposalRepository,
    MockJobRepository,
    MockUserRepository,
    MockListingInvalidation,
>;

fn service(
    proposals: MockProposalRepository,
    jobs: MockJobRepository,
    users: MockUserRepository,
    invalidation: MockListingInvalidation,
) -> Service {
    ProposalService::new(
        Arc::new(proposals),
        Arc::new(jobs),
        Arc::new(users),
        Arc::new(invalidation),
        fixed_clock(),
    )
}

fn users_resolving(user: User) -> MockUserRepository {
    let mut users = MockUserRepository::new();
    users
        .expect_find_by_external_id()
        .return_once(move |_| Ok(Some(user)));
    users
}

fn submit_request(raw_subject: &str, job_id: Uuid) -> SubmitProposalRequest {
    SubmitProposalRequest {
        subject: subject(raw_subject),
        job_id,
        cover_letter: "I can build this in 3 days.".into(),
        proposed_price: 450.0,
    }
}

#[tokio::test]
async fn submitting_stores_a_pending_proposal_and_invalidates_the_job() {
    let freelancer = freelancer_user("user_2zOxga", &["React"]);
    let freelancer_id = freelancer.id;
    let job = open_job(Uuid::new_v4(), &["React"]);
    let job_id = job.id;
    let mut jobs = MockJobRepository::new();
    jobs.expect_find_by_id()
        .with(eq(job_id))
        .return_once(move |_| Ok(Some(job)));
    let mut proposals = MockProposalRepository::new();
    proposals
        .expect_has_active_for()
        .with(eq(job_id), eq(freelancer_id))
        .return_once(|_, _| Ok(false));
    proposals.expect_insert().times(1).return_once(|_| Ok(()));
    let mut invalidation = MockListingInvalidation::new();
    invalidation
        .expect_invalidate()
        .withf(move |tags| tags == [ListingTag::OpenJobs, ListingTag::Job(job_id)])
        .times(1)
        .return_const(());

    let proposal = service(proposals, jobs, users_resolving(freelancer), invalidation)
        .submit(submit_request("user_2zOxga", job_id))
        .await
        .expect("submission succeeds");

    assert_eq!(proposal.status, ProposalStatus::Pending);
    assert_eq!(proposal.job_id, job_id);
    assert_eq!(proposal.freelancer_id, freelancer_id);
}

#[tokio::test]
async fn clients_cannot_submit_proposals() {
    let client = client_user("user_2zJeVe");
    let error = service(
        MockProposalRepository::new(),
        MockJobRepository::new(),
        users_resolving(client),
        MockListingInvalidation::new(),
    )
    .submit(submit_request("user_2zJeVe", Uuid::new_v4()))
    .await
    .expect_err("wrong role must fail");

    assert_eq!(error.code(), ErrorCode::Forbidden);
}

#[tokio::test]
async fn proposing_on_your_own_job_is_forbidden() {
    let freelancer = freelancer_user("user_2zOxga", &["React"]);
    let job = open_job(freelancer.id, &["React"]);
    let job_id = job.id;
    let mut jobs = MockJobRepository::new();
    jobs.expect_find_by_id().return_once(move |_| Ok(Some(job)));

    let error = service(
        MockProposalRepository::new(),
        jobs,
        users_resolving(freelancer),
        MockListingInvalidation::new(),
    )
    .submit(submit_request("user_2zOxga", job_id))
    .await
    .expect_err("own job must fail");

    assert_eq!(error.code(), ErrorCode::Forbidden);
}

#[tokio::test]
async fn closed_jobs_do_not_accept_proposals() {
    let freelancer = freelancer_user("user_2zOxga", &["React"]);
    let mut job = open_job(Uuid::new_v4(), &["React"]);
    job.status = JobStatus::InProgress;
    job.assigned_freelancer_id = Some(Uuid::new_v4());
    let job_id = job.id;
    let mut jobs = MockJobRepository::new();
    jobs.expect_find_by_id().return_once(move |_| Ok(Some(job)));

    let error = service(
        MockProposalRepository::new(),
        jobs,
        users_resolving(freelancer),
        MockListingInvalidation::new(),
    )
    .submit(submit_request("user_2zOxga", job_id))
    .await
    .expect_err("assigned job must fail");

    assert_eq!(error.code(), ErrorCode::InvalidState);
}

#[tokio::test]
async fn duplicate_active_proposals_conflict() {
    let freelancer = freelancer_user("user_2zOxga", &["React"]);
    let job = open_job(Uuid::new_v4(), &["React"]);
    let job_id = job.id;
    let mut jobs = MockJobRepository::new();
    jobs.expect_find_by_id().return_once(move |_| Ok(Some(job)));
    let mut proposals = MockProposalRepository::new();
    proposals
        .expect_has_active_for()
        .return_once(|_, _| Ok(true));
    proposals.expect_insert().times(0);

    let error = service(
        proposals,
        jobs,
        users_resolving(freelancer),
        MockListingInvalidation::new(),
    )
    .submit(submit_request("user_2zOxga", job_id))
    .await
    .expect_err("duplicate must fail");

    assert_eq!(error.code(), ErrorCode::Conflict);
}

#[tokio::test]
async fn accepting_assigns_the_job_and_rejects_siblings() {
    let client = client_user("user_2zJeVe");
    let job = open_job(client.id, &["React"]);
    let job_id = job.id;
    let freelancer_id = Uuid::new_v4();
    let proposal = pending_proposal(job_id, freelancer_id);
    let proposal_id = proposal.id;
    let mut accepted = proposal.clone();
    accepted.status = ProposalStatus::Accepted;
    let mut assigned = job.clone();
    assigned.status = JobStatus::InProgress;
    assigned.assigned_freelancer_id = Some(freelancer_id);

    let mut jobs = MockJobRepository::new();
    jobs.expect_find_by_id().return_once(move |_| Ok(Some(job)));
    let mut proposals = MockProposalRepository::new();
    proposals
        .expect_find_by_id()
        .with(eq(proposal_id))
        .return_once(move |_| Ok(Some(proposal)));
    proposals
        .expect_accept_and_assign()
        .with(eq(proposal_id), eq(job_id), eq(freelancer_id))
        .times(1)
        .return_once(move |_, _, _| {
            Ok(AcceptanceOutcome::Accepted {
                proposal: accepted,
                job: assigned,
                rejected_siblings: 2,
            })
        });
    let mut invalidation = MockListingInvalidation::new();
    invalidation.expect_invalidate().times(1).return_const(());

    let outcome = service(proposals, jobs, users_resolving(client), invalidation)
        .accept(subject("user_2zJeVe"), proposal_id)
        .await
        .expect("acceptance succeeds");

    assert_eq!(outcome.proposal.status, ProposalStatus::Accepted);
    assert_eq!(outcome.job.status, JobStatus::InProgress);
    assert_eq!(outcome.job.assigned_freelancer_id, Some(freelancer_id));
    assert_eq!(outcome.rejected_siblings, 2);
}

#[tokio::test]
async fn a_lost_assignment_race_surfaces_as_conflict() {
    let client = client_user("user_2zJeVe");
    let job = open_job(client.id, &["React"]);
    let job_id = job.id;
    let proposal = pending_proposal(job_id, Uuid::new_v4());
    let proposal_id = proposal.id;

    let mut jobs = MockJobRepository::new();
    jobs.expect_find_by_id().return_once(move |_| Ok(Some(job)));
    let mut proposals = MockProposalRepository::new();
    proposals
        .expect_find_by_id()
        .return_once(move |_| Ok(Some(proposal)));
    proposals
        .expect_accept_and_assign()
        .return_once(|_, _, _| Ok(AcceptanceOutcome::JobUnavailable));
    proposals.expect_update_status().times(0);

    let error = service(
        proposals,
        jobs,
        users_resolving(client),
        MockListingInvalidation::new(),
    )
    .accept(subject("user_2zJeVe"), proposal_id)
    .await
    .expect_err("lost race must fail");

    assert_eq!(error.code(), ErrorCode::Conflict);
}

#[tokio::test]
async fn terminal_proposals_cannot_be_accepted() {
    let client = client_user("user_2zJeVe");
    let job = open_job(client.id, &["React"]);
    let mut proposal = pending_proposal(job.id, Uuid::new_v4());
    proposal.status = ProposalStatus::Withdrawn;
    let proposal_id = proposal.id;

    let mut jobs = MockJobRepository::new();
    jobs.expect_find_by_id().return_once(move |_| Ok(Some(job)));
    let mut proposals = MockProposalRepository::new();
    proposals
        .expect_find_by_id()
        .return_once(move |_| Ok(Some(proposal)));
    proposals.expect_accept_and_assign().times(0);

    let error = service(
        proposals,
        jobs,
        users_resolving(client),
        MockListingInvalidation::new(),
    )
    .accept(subject("user_2zJeVe"), proposal_id)
    .await
    .expect_err("terminal proposal must fail");

    assert_eq!(error.code(), ErrorCode::InvalidState);
}

#[tokio::test]
async fn deciding_on_a_foreign_job_reads_as_not_found() {
    let client = client_user("user_2zJeVe");
    let foreign_job = open_job(Uuid::new_v4(), &["React"]);
    let proposal = pending_proposal(foreign_job.id, Uuid::new_v4());
    let proposal_id = proposal.id;

    let mut jobs = MockJobRepository::new();
    jobs.expect_find_by_id()
        .return_once(move |_| Ok(Some(foreign_job)));
    let mut proposals = MockProposalRepository::new();
    proposals
        .expect_find_by_id()
        .return_once(move |_| Ok(Some(proposal)));
    proposals.expect_update_status().times(0);

    let error = service(
        proposals,
        jobs,
        users_resolving(client),
        MockListingInvalidation::new(),
    )
    .reject(subject("user_2zJeVe"), proposal_id)
    .await
    .expect_err("foreign job must read as absent");

    assert_eq!(error.code(), ErrorCode::NotFound);
}

#[tokio::test]
async fn rejecting_a_pending_proposal_succeeds() {
    let client = client_user("user_2zJeVe");
    let job = open_job(client.id, &["React"]);
    let job_id = job.id;
    let proposal = pending_proposal(job_id, Uuid::new_v4());
    let proposal_id = proposal.id;
    let mut rejected = proposal.clone();
    rejected.status = ProposalStatus::Rejected;

    let mut jobs = MockJobRepository::new();
    jobs.expect_find_by_id().return_once(move |_| Ok(Some(job)));
    let mut proposals = MockProposalRepository::new();
    proposals
        .expect_find_by_id()
        .return_once(move |_| Ok(Some(proposal)));
    proposals
        .expect_update_status()
        .with(eq(proposal_id), eq(ProposalStatus::Rejected))
        .return_once(move |_, _| Ok(rejected));
    let mut invalidation = MockListingInvalidation::new();
    invalidation
        .expect_invalidate()
        .withf(move |tags| tags == [ListingTag::Job(job_id)])
        .times(1)
        .return_const(());

    let result = service(proposals, jobs, users_resolving(client), invalidation)
        .reject(subject("user_2zJeVe"), proposal_id)
        .await
        .expect("rejection succeeds");

    assert_eq!(result.status, ProposalStatus::Rejected);
}

#[tokio::test]
async fn withdrawing_someone_elses_proposal_reads_as_not_found() {
    let freelancer = freelancer_user("user_2zOxga", &["React"]);
    let proposal = pending_proposal(Uuid::new_v4(), Uuid::new_v4());
    let proposal_id = proposal.id;
    let mut proposals = MockProposalRepository::new();
    proposals
        .expect_find_by_id()
        .return_once(move |_| Ok(Some(proposal)));
    proposals.expect_update_status().times(0);

    let error = service(
        proposals,
        MockJobRepository::new(),
        users_resolving(freelancer),
        MockListingInvalidation::new(),
    )
    .withdraw(subject("user_2zOxga"), proposal_id)
    .await
    .expect_err("foreign proposal must read as absent");

    assert_eq!(error.code(), ErrorCode::NotFound);
}

#[tokio::test]
async fn withdrawing_an_own_pending_proposal_succeeds() {
    let freelancer = freelancer_user("user_2zOxga", &["React"]);
    let proposal = pending_proposal(Uuid::new_v4(), freelancer.id);
    let proposal_id = proposal.id;
    let job_id = proposal.job_id;
    let mut withdrawn = proposal.clone();
    withdrawn.status = ProposalStatus::Withdrawn;
    let mut proposals = MockProposalRepository::new();
    proposals
        .expect_find_by_id()
        .return_once(move |_| Ok(Some(proposal)));
    proposals
        .expect_update_status()
        .with(eq(proposal_id), eq(ProposalStatus::Withdrawn))
        .return_once(move |_, _| Ok(withdrawn));
    let mut invalidation = MockListingInvalidation::new();
    invalidation
        .expect_invalidate()
        .withf(move |tags| tags == [ListingTag::OpenJobs, ListingTag::Job(job_id)])
        .times(1)
        .return_const(());

    let result = service(
        proposals,
        MockJobRepository::new(),
        users_resolving(freelancer),
        invalidation,
    )
    .withdraw(subject("user_2zOxga"), proposal_id)
    .await
    .expect("withdrawal succeeds");

    assert_eq!(result.status, ProposalStatus::Withdrawn);
}

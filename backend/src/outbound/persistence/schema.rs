//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match the database migrations exactly. They are
//! used by Diesel for compile-time query validation and type-safe SQL
//! generation. Regenerate with `diesel print-schema` when migrations
//! change.

diesel::table! {
    /// Marketplace profiles bound to identity-provider subjects.
    users (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Identity-provider subject; unique.
        external_id -> Varchar,
        /// Contact email.
        email -> Varchar,
        /// Display name.
        name -> Varchar,
        /// Optional avatar URL.
        profile_picture -> Nullable<Varchar>,
        /// `CLIENT` or `FREELANCER`; null until onboarding completes.
        role -> Nullable<Varchar>,
        /// Freelancer bio.
        bio -> Nullable<Text>,
        /// Freelancer skill names.
        skills -> Array<Text>,
        /// Freelancer hourly rate; null for clients.
        hourly_rate -> Nullable<Float8>,
        /// Account balance.
        balance -> Float8,
        /// Record creation timestamp.
        created_at -> Timestamptz,
        /// Last modification timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Job postings.
    jobs (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Short title.
        title -> Varchar,
        /// Full description.
        description -> Text,
        /// Offered budget.
        budget -> Float8,
        /// Skills required of applicants.
        required_skills -> Array<Text>,
        /// Lifecycle status, stored as its wire name.
        status -> Varchar,
        /// Optional completion deadline.
        deadline -> Nullable<Date>,
        /// Owning client.
        client_id -> Uuid,
        /// Winning freelancer once assigned.
        assigned_freelancer_id -> Nullable<Uuid>,
        /// Record creation timestamp.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Proposals submitted against jobs.
    proposals (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Target job; cascades on job deletion.
        job_id -> Uuid,
        /// Submitting freelancer.
        freelancer_id -> Uuid,
        /// Pitch text.
        cover_letter -> Text,
        /// Asking price.
        proposed_price -> Float8,
        /// Lifecycle status, stored as its wire name.
        status -> Varchar,
        /// Record creation timestamp.
        created_at -> Timestamptz,
    }
}

diesel::joinable!(jobs -> users (client_id));
diesel::joinable!(proposals -> jobs (job_id));

diesel::allow_tables_to_appear_in_same_query!(users, jobs, proposals);

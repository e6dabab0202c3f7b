//! Local mirror keys.
//!
//! One fixed key per persisted collection. The mapping is 1:1 and never
//! namespaced per user; the session only ever clears [`CURRENT_USER`].

/// The authenticated session user, stored without a password.
pub const CURRENT_USER: &str = "currentUser";
/// Full member roster, including plaintext passwords for the offline check.
pub const USERS: &str = "users";
/// Works awaiting review.
pub const SUBMITTED_WORKS: &str = "submittedWorks";
/// Works promoted to the front page.
pub const FEATURED_WORKS: &str = "featuredWorks";
/// Message-board entries.
pub const MESSAGES: &str = "messages";
/// Voting activities.
pub const VOTING_ACTIVITIES: &str = "votingActivities";
/// Knowledge-base articles.
pub const PHOTOGRAPHY_KNOWLEDGE: &str = "photographyKnowledge";

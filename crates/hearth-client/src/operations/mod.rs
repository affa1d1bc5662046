//! One method per (resource × verb), grouped by resource family.
//!
//! Every operation takes a [`RequestContext`](crate::RequestContext) carrying
//! the cancellation token and an optional idempotency key.

pub mod catalogue;
pub mod households;
pub mod invitations;
pub mod meal_plans;
pub mod meals;
pub mod preferences;
pub mod recipes;
pub mod settings;
pub mod users;
pub mod webhooks;

pub use catalogue::CatalogueRecord;

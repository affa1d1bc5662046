//! Wire shapes of every entity the service exposes.
//!
//! Each entity has a read shape (what the server returns), a creation input
//! and, where the service supports it, an update input. Update fields the
//! record allows to be empty are [`Field`](crate::field::Field)s; required
//! ones are `Option`s decoded with [`non_null`](crate::field::non_null).

pub mod catalogue;
pub mod households;
pub mod invitations;
pub mod meal_plans;
pub mod meals;
pub mod preferences;
pub mod recipe_steps;
pub mod recipes;
pub mod settings;
pub mod users;
pub mod webhooks;

pub use catalogue::*;
pub use households::*;
pub use invitations::*;
pub use meal_plans::*;
pub use meals::*;
pub use preferences::*;
pub use recipe_steps::*;
pub use recipes::*;
pub use settings::*;
pub use users::*;
pub use webhooks::*;

//! Shared Wire Types

mod ride;
mod user;

pub use ride::{Ride, RideEvent, RideStatus};
pub use user::{AuthUser, IdType, Role, Session, UserProfile};

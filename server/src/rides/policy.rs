//! Transition Authorization Policy
//!
//! Who may drive a ride forward is a policy decision, separate from which
//! transitions are legal. The default matches the product's behavior: both
//! the rider and the assigned driver can mark a ride ongoing, completed, or
//! cancelled. A stricter deployment swaps the policy without touching the
//! state machine.

use uuid::Uuid;
use yc_common::{Ride, RideStatus};

/// Decides whether `actor` may move `ride` to `to`.
///
/// Claims are not policy-gated: the claim guard (`driver_id` still null) is
/// the whole rule, enforced by the storage layer.
pub trait TransitionPolicy: Send + Sync {
    /// Whether the transition is allowed for this actor.
    fn allows(&self, actor: Uuid, ride: &Ride, to: RideStatus) -> bool;
}

/// Default policy: any party to the ride may advance it.
#[derive(Debug, Clone, Copy, Default)]
pub struct ParticipantPolicy;

impl TransitionPolicy for ParticipantPolicy {
    fn allows(&self, actor: Uuid, ride: &Ride, _to: RideStatus) -> bool {
        ride.is_participant(actor)
    }
}

/// Stricter policy: only the assigned driver advances to `ongoing` and
/// `completed`; either party may cancel.
#[derive(Debug, Clone, Copy, Default)]
pub struct DriverDrivesPolicy;

impl TransitionPolicy for DriverDrivesPolicy {
    fn allows(&self, actor: Uuid, ride: &Ride, to: RideStatus) -> bool {
        match to {
            RideStatus::Cancelled => ride.is_participant(actor),
            _ => ride.driver_id == Some(actor),
        }
    }
}

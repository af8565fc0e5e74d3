//! Ride HTTP Handlers

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::{DateTime, Utc};
use uuid::Uuid;
use validator::Validate;
use yc_common::{Ride, RideEvent, RideStatus};

use super::error::{RideError, RideResult};
use super::types::{AdvanceStatusRequest, AssignedQuery, CreateRideRequest, CreatedRide};
use crate::api::AppState;
use crate::auth::ActorId;
use crate::db::{
    advance_ride_status, claim_ride, find_ride, insert_ride, list_ride_events,
    list_rides_for_driver, list_rides_for_rider, list_unclaimed_rides, NewRide,
};

/// Request a ride.
///
/// The ride is created in `requested` state; a future `scheduled_at` is an
/// attribute of the ride, not a separate lifecycle branch.
///
/// POST /rides
#[tracing::instrument(skip(state, body), fields(rider_id = %actor))]
pub async fn request_ride(
    State(state): State<AppState>,
    ActorId(actor): ActorId,
    Json(body): Json<CreateRideRequest>,
) -> RideResult<(StatusCode, Json<CreatedRide>)> {
    // Validate input first; nothing is written on a validation failure.
    body.validate()
        .map_err(|e| RideError::Validation(e.to_string()))?;
    if body.origin_address.trim().is_empty() {
        return Err(RideError::Validation("Origin address is required".into()));
    }
    if body.destination_address.trim().is_empty() {
        return Err(RideError::Validation(
            "Destination address is required".into(),
        ));
    }

    let scheduled_at = body
        .scheduled_at
        .as_deref()
        .map(|raw| {
            DateTime::parse_from_rfc3339(raw)
                .map(|t| t.with_timezone(&Utc))
                .map_err(|_| {
                    RideError::Validation("Scheduled time must be an RFC 3339 timestamp".into())
                })
        })
        .transpose()?;

    let ride = insert_ride(
        &state.db,
        &NewRide {
            rider_id: actor,
            origin_address: body.origin_address,
            origin_lat: body.origin_lat,
            origin_lng: body.origin_lng,
            destination_address: body.destination_address,
            destination_lat: body.destination_lat,
            destination_lng: body.destination_lng,
            vehicle_type: body.vehicle_type.unwrap_or_else(|| "car".into()),
            scheduled_at,
        },
    )
    .await?;

    tracing::info!(ride_id = %ride.id, "Ride requested");

    Ok((StatusCode::CREATED, Json(CreatedRide { id: ride.id })))
}

/// Single ride lookup (the rider's status polling loop).
///
/// GET /rides/{id}
pub async fn get_ride(
    State(state): State<AppState>,
    _actor: ActorId,
    Path(id): Path<Uuid>,
) -> RideResult<Json<Ride>> {
    let ride = find_ride(&state.db, id).await?.ok_or(RideError::NotFound)?;
    Ok(Json(ride))
}

/// Claimable rides, newest first (the driver's polling feed).
///
/// GET /rides/unclaimed
pub async fn list_unclaimed(
    State(state): State<AppState>,
    _actor: ActorId,
) -> RideResult<Json<Vec<Ride>>> {
    Ok(Json(list_unclaimed_rides(&state.db).await?))
}

/// The acting rider's rides, newest first.
///
/// GET /rides/mine
pub async fn list_mine(
    State(state): State<AppState>,
    ActorId(actor): ActorId,
) -> RideResult<Json<Vec<Ride>>> {
    Ok(Json(list_rides_for_rider(&state.db, actor).await?))
}

/// The acting driver's rides, optionally filtered by status
/// (`?status=accepted,ongoing` for active drives, `completed,cancelled` for
/// history).
///
/// GET /rides/assigned
pub async fn list_assigned(
    State(state): State<AppState>,
    ActorId(actor): ActorId,
    Query(query): Query<AssignedQuery>,
) -> RideResult<Json<Vec<Ride>>> {
    let statuses = match query.status.as_deref() {
        None | Some("") => Vec::new(),
        Some(raw) => raw
            .split(',')
            .map(|name| name.trim().parse::<RideStatus>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(RideError::Validation)?,
    };

    Ok(Json(
        list_rides_for_driver(&state.db, actor, &statuses).await?,
    ))
}

/// A ride's transition history, oldest first.
///
/// GET /rides/{id}/events
pub async fn list_events(
    State(state): State<AppState>,
    _actor: ActorId,
    Path(id): Path<Uuid>,
) -> RideResult<Json<Vec<RideEvent>>> {
    find_ride(&state.db, id).await?.ok_or(RideError::NotFound)?;
    Ok(Json(list_ride_events(&state.db, id).await?))
}

/// Attach the acting driver to an unclaimed ride.
///
/// POST /rides/{id}/claim
#[tracing::instrument(skip(state), fields(driver_id = %actor))]
pub async fn claim(
    State(state): State<AppState>,
    ActorId(actor): ActorId,
    Path(id): Path<Uuid>,
) -> RideResult<Json<Ride>> {
    let ride = try_claim(&state, id, actor).await?;
    tracing::info!(ride_id = %ride.id, "Ride claimed");
    Ok(Json(ride))
}

/// Advance the ride lifecycle.
///
/// A target of `accepted` is the claim in other clothes: the acting user
/// becomes the driver, under the same at-most-one-driver guard.
///
/// POST /rides/{id}/status
#[tracing::instrument(skip(state, body), fields(actor_id = %actor, to = %body.status))]
pub async fn advance_status(
    State(state): State<AppState>,
    ActorId(actor): ActorId,
    Path(id): Path<Uuid>,
    Json(body): Json<AdvanceStatusRequest>,
) -> RideResult<Json<Ride>> {
    if body.status == RideStatus::Accepted {
        let ride = try_claim(&state, id, actor).await?;
        return Ok(Json(ride));
    }

    let ride = find_ride(&state.db, id).await?.ok_or(RideError::NotFound)?;
    let updated = advance_fetched(&state, ride, actor, body.status, body.note).await?;
    Ok(Json(updated))
}

/// Cancel a ride from any non-terminal state. `driver_id` is kept as-is so
/// the history still shows who had the ride.
///
/// POST /rides/{id}/cancel
#[tracing::instrument(skip(state), fields(actor_id = %actor))]
pub async fn cancel(
    State(state): State<AppState>,
    ActorId(actor): ActorId,
    Path(id): Path<Uuid>,
) -> RideResult<Json<Ride>> {
    let ride = find_ride(&state.db, id).await?.ok_or(RideError::NotFound)?;

    let note = if ride.rider_id == actor {
        "Cancelled by rider".to_owned()
    } else {
        "Cancelled by driver".to_owned()
    };

    let updated = advance_fetched(&state, ride, actor, RideStatus::Cancelled, Some(note)).await?;
    Ok(Json(updated))
}

/// The claim with its failure classification.
///
/// The update itself is the atomic check-and-set; when it matches nothing,
/// fresh state tells the caller why.
async fn try_claim(state: &AppState, ride_id: Uuid, driver_id: Uuid) -> RideResult<Ride> {
    if let Some(claimed) = claim_ride(&state.db, ride_id, driver_id).await? {
        return Ok(claimed);
    }

    let ride = find_ride(&state.db, ride_id)
        .await?
        .ok_or(RideError::NotFound)?;
    if ride.driver_id.is_some() {
        Err(RideError::AlreadyClaimed)
    } else {
        Err(RideError::InvalidTransition {
            from: ride.status,
            to: RideStatus::Accepted,
        })
    }
}

/// Validate and apply a non-claim transition on an already-fetched ride.
///
/// The write is a compare-and-set on the status the caller validated; a
/// lost race converges when the other writer applied the same transition
/// and fails with the fresh status otherwise.
async fn advance_fetched(
    state: &AppState,
    ride: Ride,
    actor: Uuid,
    to: RideStatus,
    note: Option<String>,
) -> RideResult<Ride> {
    if !state.transition_policy.allows(actor, &ride, to) {
        return Err(RideError::Forbidden);
    }
    if !ride.status.can_transition_to(to) {
        return Err(RideError::InvalidTransition {
            from: ride.status,
            to,
        });
    }

    match advance_ride_status(&state.db, ride.id, ride.status, to, actor, note.as_deref()).await? {
        Some(updated) => {
            tracing::info!(ride_id = %updated.id, from = %ride.status, to = %to, "Ride advanced");
            Ok(updated)
        }
        None => {
            let fresh = find_ride(&state.db, ride.id)
                .await?
                .ok_or(RideError::NotFound)?;
            if fresh.status == to {
                Ok(fresh)
            } else {
                Err(RideError::InvalidTransition {
                    from: fresh.status,
                    to,
                })
            }
        }
    }
}

//! Database Queries
//!
//! Runtime queries (no compile-time `DATABASE_URL` required).
//!
//! All query functions include error context logging to aid debugging.
//! Ride status changes are applied as conditional updates: the `WHERE`
//! clause carries the lifecycle guard, so a lost race updates zero rows
//! instead of clobbering another writer.

use sqlx::{FromRow, PgPool, Postgres, Row, Transaction};
use tracing::error;
use uuid::Uuid;
use yc_common::{Ride, RideEvent, RideStatus, UserProfile};

use super::models::{NewProfile, NewRide, NewUser, User};

/// Log and return a database error with context.
///
/// This helper ensures all database errors are logged with relevant context
/// before being propagated, making production debugging easier.
macro_rules! db_error {
    ($query:expr) => {
        |e| {
            error!(query = $query, error = %e, "Database query failed");
            e
        }
    };
    ($query:expr, $($field:tt)*) => {
        |e| {
            error!(query = $query, $($field)*, error = %e, "Database query failed");
            e
        }
    };
}

/// Whether `err` is a unique-constraint violation.
///
/// The `users.username` unique index is the authority on username
/// uniqueness; callers translate this into their "taken" error.
#[must_use]
pub fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db) if db.code().as_deref() == Some("23505"))
}

// ============================================================================
// User Queries
// ============================================================================

/// Find user by ID.
pub async fn find_user_by_id(pool: &PgPool, id: Uuid) -> sqlx::Result<Option<User>> {
    sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
        .map_err(db_error!("find_user_by_id", user_id = %id))
}

/// Find user by username (case sensitive, as stored).
pub async fn find_user_by_username(pool: &PgPool, username: &str) -> sqlx::Result<Option<User>> {
    sqlx::query_as::<_, User>("SELECT * FROM users WHERE username = $1")
        .bind(username)
        .fetch_optional(pool)
        .await
        .map_err(db_error!("find_user_by_username", username = %username))
}

/// Insert a credential row. A duplicate username surfaces as a unique
/// violation (see [`is_unique_violation`]).
pub async fn insert_user(pool: &PgPool, user: &NewUser) -> sqlx::Result<User> {
    sqlx::query_as::<_, User>(
        r"INSERT INTO users (username, password_hash, role)
          VALUES ($1, $2, $3)
          RETURNING *",
    )
    .bind(&user.username)
    .bind(&user.password_hash)
    .bind(user.role)
    .fetch_one(pool)
    .await
}

/// Delete a user row (cascades to the profile).
pub async fn delete_user(pool: &PgPool, id: Uuid) -> sqlx::Result<()> {
    sqlx::query("DELETE FROM users WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await
        .map_err(db_error!("delete_user", user_id = %id))?;
    Ok(())
}

// ============================================================================
// Profile Queries
// ============================================================================

/// Find a profile by user id.
pub async fn find_profile(pool: &PgPool, id: Uuid) -> sqlx::Result<Option<UserProfile>> {
    sqlx::query_as::<_, UserProfile>("SELECT * FROM profiles WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
        .map_err(db_error!("find_profile", user_id = %id))
}

/// Insert a profile row keyed to an existing user.
pub async fn insert_profile(pool: &PgPool, id: Uuid, profile: &NewProfile) -> sqlx::Result<()> {
    sqlx::query(
        r"INSERT INTO profiles
            (id, username, full_name, phone, city, role,
             national_id_url, driver_license_url, id_number, id_type)
          VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)",
    )
    .bind(id)
    .bind(&profile.username)
    .bind(&profile.full_name)
    .bind(&profile.phone)
    .bind(&profile.city)
    .bind(profile.role)
    .bind(&profile.national_id_url)
    .bind(&profile.driver_license_url)
    .bind(&profile.id_number)
    .bind(profile.id_type)
    .execute(pool)
    .await
    .map_err(db_error!("insert_profile", user_id = %id))?;
    Ok(())
}

/// Create a user and its profile.
///
/// The two inserts are separate store operations, not one transaction: when
/// the profile insert fails, the just-created user is deleted so no orphaned
/// credential row survives. A failed rollback is logged; the caller still
/// sees the original profile error.
pub async fn create_account(
    pool: &PgPool,
    user: NewUser,
    profile: NewProfile,
) -> sqlx::Result<User> {
    let user = insert_user(pool, &user).await?;

    if let Err(e) = insert_profile(pool, user.id, &profile).await {
        error!(
            user_id = %user.id,
            username = %user.username,
            error = %e,
            "Profile creation failed after user insert - removing user"
        );
        if let Err(rollback_err) = delete_user(pool, user.id).await {
            error!(
                user_id = %user.id,
                error = %rollback_err,
                "Failed to remove user after profile error"
            );
        }
        return Err(e);
    }

    Ok(user)
}

// ============================================================================
// Ride Queries
// ============================================================================

/// Append a transition to the ride's history, inside the caller's
/// transaction so the event commits with the status change it records.
async fn insert_ride_event(
    tx: &mut Transaction<'_, Postgres>,
    ride_id: Uuid,
    actor_id: Option<Uuid>,
    from_status: Option<RideStatus>,
    to_status: RideStatus,
    note: Option<&str>,
) -> sqlx::Result<()> {
    sqlx::query(
        r"INSERT INTO ride_events (ride_id, actor_id, from_status, to_status, note)
          VALUES ($1, $2, $3, $4, $5)",
    )
    .bind(ride_id)
    .bind(actor_id)
    .bind(from_status)
    .bind(to_status)
    .bind(note)
    .execute(&mut **tx)
    .await?;
    Ok(())
}

/// Create a ride in `requested` state and record its creation event.
pub async fn insert_ride(pool: &PgPool, ride: &NewRide) -> sqlx::Result<Ride> {
    let mut tx = pool.begin().await?;

    let created = sqlx::query_as::<_, Ride>(
        r"INSERT INTO rides
            (rider_id, origin_address, origin_lat, origin_lng,
             destination_address, destination_lat, destination_lng,
             vehicle_type, scheduled_at)
          VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
          RETURNING *",
    )
    .bind(ride.rider_id)
    .bind(&ride.origin_address)
    .bind(ride.origin_lat)
    .bind(ride.origin_lng)
    .bind(&ride.destination_address)
    .bind(ride.destination_lat)
    .bind(ride.destination_lng)
    .bind(&ride.vehicle_type)
    .bind(ride.scheduled_at)
    .fetch_one(&mut *tx)
    .await
    .map_err(db_error!("insert_ride", rider_id = %ride.rider_id))?;

    insert_ride_event(
        &mut tx,
        created.id,
        Some(ride.rider_id),
        None,
        created.status,
        None,
    )
    .await
    .map_err(db_error!("insert_ride_event", ride_id = %created.id))?;

    tx.commit().await?;
    Ok(created)
}

/// Find a ride by id.
pub async fn find_ride(pool: &PgPool, id: Uuid) -> sqlx::Result<Option<Ride>> {
    sqlx::query_as::<_, Ride>("SELECT * FROM rides WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
        .map_err(db_error!("find_ride", ride_id = %id))
}

/// All unclaimed rides, most recent first (the driver polling feed).
pub async fn list_unclaimed_rides(pool: &PgPool) -> sqlx::Result<Vec<Ride>> {
    sqlx::query_as::<_, Ride>(
        r"SELECT * FROM rides
          WHERE driver_id IS NULL AND status IN ('requested', 'scheduled')
          ORDER BY created_at DESC",
    )
    .fetch_all(pool)
    .await
    .map_err(db_error!("list_unclaimed_rides"))
}

/// Attach a driver to an unclaimed ride.
///
/// This is the single check-and-set that arbitrates concurrent claims: the
/// `WHERE` clause only matches while `driver_id` is null and the status is
/// claimable, so of N racing drivers exactly one update applies. Returns
/// `None` when the guard did not match; the caller classifies why.
pub async fn claim_ride(
    pool: &PgPool,
    ride_id: Uuid,
    driver_id: Uuid,
) -> sqlx::Result<Option<Ride>> {
    let mut tx = pool.begin().await?;

    let row = sqlx::query(
        r"WITH old AS (SELECT id, status FROM rides WHERE id = $1)
          UPDATE rides SET
              driver_id = $2,
              status = 'accepted',
              accepted_at = COALESCE(accepted_at, now()),
              updated_at = now()
          FROM old
          WHERE rides.id = old.id
            AND rides.driver_id IS NULL
            AND rides.status IN ('requested', 'scheduled')
          RETURNING rides.*, old.status AS previous_status",
    )
    .bind(ride_id)
    .bind(driver_id)
    .fetch_optional(&mut *tx)
    .await
    .map_err(db_error!("claim_ride", ride_id = %ride_id, driver_id = %driver_id))?;

    let Some(row) = row else {
        return Ok(None);
    };

    let previous: RideStatus = row.try_get("previous_status")?;
    let claimed = Ride::from_row(&row)?;

    insert_ride_event(
        &mut tx,
        claimed.id,
        Some(driver_id),
        Some(previous),
        RideStatus::Accepted,
        None,
    )
    .await
    .map_err(db_error!("insert_ride_event", ride_id = %claimed.id))?;

    tx.commit().await?;
    Ok(Some(claimed))
}

/// Apply a validated status transition as a compare-and-set on `from`.
///
/// The caller has already checked the lifecycle table; this function only
/// guarantees the write is conditional on the status it validated against.
/// Timestamp columns are write-once: `COALESCE` keeps an existing value.
/// Returns `None` when the status moved underneath the caller.
pub async fn advance_ride_status(
    pool: &PgPool,
    ride_id: Uuid,
    from: RideStatus,
    to: RideStatus,
    actor_id: Uuid,
    note: Option<&str>,
) -> sqlx::Result<Option<Ride>> {
    let stamp = to
        .timestamp_column()
        .map(|col| format!(", {col} = COALESCE({col}, now())"))
        .unwrap_or_default();
    let sql = format!(
        r"UPDATE rides SET status = $1, updated_at = now(){stamp}
          WHERE id = $2 AND status = $3
          RETURNING *",
    );

    let mut tx = pool.begin().await?;

    let updated = sqlx::query_as::<_, Ride>(&sql)
        .bind(to)
        .bind(ride_id)
        .bind(from)
        .fetch_optional(&mut *tx)
        .await
        .map_err(db_error!("advance_ride_status", ride_id = %ride_id, to = %to))?;

    let Some(updated) = updated else {
        return Ok(None);
    };

    insert_ride_event(&mut tx, updated.id, Some(actor_id), Some(from), to, note)
        .await
        .map_err(db_error!("insert_ride_event", ride_id = %updated.id))?;

    tx.commit().await?;
    Ok(Some(updated))
}

/// A rider's rides, most recent first.
pub async fn list_rides_for_rider(pool: &PgPool, rider_id: Uuid) -> sqlx::Result<Vec<Ride>> {
    sqlx::query_as::<_, Ride>(
        "SELECT * FROM rides WHERE rider_id = $1 ORDER BY created_at DESC",
    )
    .bind(rider_id)
    .fetch_all(pool)
    .await
    .map_err(db_error!("list_rides_for_rider", rider_id = %rider_id))
}

/// A driver's rides, optionally filtered by status, most recent first.
pub async fn list_rides_for_driver(
    pool: &PgPool,
    driver_id: Uuid,
    statuses: &[RideStatus],
) -> sqlx::Result<Vec<Ride>> {
    if statuses.is_empty() {
        return sqlx::query_as::<_, Ride>(
            "SELECT * FROM rides WHERE driver_id = $1 ORDER BY created_at DESC",
        )
        .bind(driver_id)
        .fetch_all(pool)
        .await
        .map_err(db_error!("list_rides_for_driver", driver_id = %driver_id));
    }

    let names: Vec<String> = statuses.iter().map(|s| s.as_str().to_owned()).collect();
    sqlx::query_as::<_, Ride>(
        r"SELECT * FROM rides
          WHERE driver_id = $1 AND status = ANY($2::ride_status[])
          ORDER BY created_at DESC",
    )
    .bind(driver_id)
    .bind(names)
    .fetch_all(pool)
    .await
    .map_err(db_error!("list_rides_for_driver", driver_id = %driver_id))
}

/// A ride's transition history, oldest first.
pub async fn list_ride_events(pool: &PgPool, ride_id: Uuid) -> sqlx::Result<Vec<RideEvent>> {
    sqlx::query_as::<_, RideEvent>(
        "SELECT * FROM ride_events WHERE ride_id = $1 ORDER BY created_at",
    )
    .bind(ride_id)
    .fetch_all(pool)
    .await
    .map_err(db_error!("list_ride_events", ride_id = %ride_id))
}

// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use chargewatch_domain::{PostalCode, Station, StationStatus};
use diesel::prelude::*;
use diesel::SqliteConnection;
use tracing::{debug, info};

use crate::diesel_schema::stations;
use crate::error::PersistenceError;

/// Registers a station with an explicit id, in service.
///
/// # Errors
///
/// Returns `PersistenceError::UniqueViolation` if the id is taken.
pub fn create_station(
    conn: &mut SqliteConnection,
    station_id: i64,
    postal_code: &PostalCode,
    street: &str,
    district: &str,
) -> Result<Station, PersistenceError> {
    diesel::insert_into(stations::table)
        .values((
            stations::station_id.eq(station_id),
            stations::postal_code.eq(postal_code.value()),
            stations::street.eq(street),
            stations::district.eq(district),
            stations::status.eq(StationStatus::Available.as_str()),
        ))
        .execute(conn)?;

    info!(station_id, postal_code = postal_code.value(), "Station created");

    Ok(Station {
        station_id,
        postal_code: postal_code.value().to_string(),
        street: street.to_string(),
        district: district.to_string(),
        status: StationStatus::Available,
    })
}

/// Writes a station's operational flag. Returns false if no station matched.
///
/// # Errors
///
/// Returns an error if the update fails.
pub fn set_station_status(
    conn: &mut SqliteConnection,
    station_id: i64,
    status: StationStatus,
) -> Result<bool, PersistenceError> {
    let rows: usize = diesel::update(stations::table)
        .filter(stations::station_id.eq(station_id))
        .set(stations::status.eq(status.as_str()))
        .execute(conn)?;
    debug!(station_id, %status, rows, "Station status updated");
    Ok(rows > 0)
}

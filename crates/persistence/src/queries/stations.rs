// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use chargewatch_domain::{PostalCode, Station, StationStatus};
use diesel::prelude::*;
use diesel::SqliteConnection;

use super::parse_column;
use crate::diesel_schema::stations;
use crate::error::PersistenceError;

/// Diesel Queryable struct for station rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = stations)]
struct StationRow {
    station_id: i64,
    postal_code: String,
    street: String,
    district: String,
    status: String,
}

impl StationRow {
    fn into_domain(self) -> Result<Station, PersistenceError> {
        Ok(Station {
            station_id: self.station_id,
            postal_code: self.postal_code,
            street: self.street,
            district: self.district,
            status: parse_column("status", &self.status)?,
        })
    }
}

/// Retrieves a station by ID.
///
/// # Errors
///
/// Returns an error if the query fails or the row cannot be reconstructed.
pub fn get_station(
    conn: &mut SqliteConnection,
    station_id: i64,
) -> Result<Option<Station>, PersistenceError> {
    stations::table
        .filter(stations::station_id.eq(station_id))
        .select(StationRow::as_select())
        .first::<StationRow>(conn)
        .optional()?
        .map(StationRow::into_domain)
        .transpose()
}

/// Lists the in-service stations in a postal code, ordered by station id.
///
/// # Errors
///
/// Returns an error if the query fails or a row cannot be reconstructed.
pub fn find_available_stations_by_postal_code(
    conn: &mut SqliteConnection,
    postal_code: &PostalCode,
) -> Result<Vec<Station>, PersistenceError> {
    let rows: Vec<StationRow> = stations::table
        .filter(stations::postal_code.eq(postal_code.value()))
        .filter(stations::status.eq(StationStatus::Available.as_str()))
        .order(stations::station_id.asc())
        .select(StationRow::as_select())
        .load(conn)?;
    rows.into_iter().map(StationRow::into_domain).collect()
}

// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Notification bodies broadcast on lifecycle transitions.
//!
//! Bodies are HTML fragments; the UI renders them verbatim.

use crate::types::Station;

/// Formats the message sent to every user when a station is reported broken.
#[must_use]
pub fn malfunction_message(station: &Station) -> String {
    format!(
        "<h5>MALFUNCTION REPORTED FOR STATION ID: {}</h5>\
         <ul><li>Street: {}</li><li>Postal Code: {}</li><li>District: {}</li></ul>\
         <strong>Please use a nearby charging station while the issue is being addressed.</strong>",
        station.station_id, station.street, station.postal_code, station.district
    )
}

/// Formats the message sent to every user when a station is repaired.
#[must_use]
pub fn resolution_message(station: &Station) -> String {
    format!(
        "<h5>ISSUE RESOLVED FOR STATION ID: {}</h5>\
         <ul><li>Street: {}</li><li>Postal Code: {}</li><li>District: {}</li></ul>\
         <strong>The reported malfunction has been resolved and the station is fully operational again.</strong>",
        station.station_id, station.street, station.postal_code, station.district
    )
}

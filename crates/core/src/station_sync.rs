// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use chargewatch_domain::StationStatus;
use tracing::{debug, warn};

use crate::store::{StationStore, StoreError};

/// Keeps a station's operational flag in step with its reports.
#[derive(Debug, Clone, Copy, Default)]
pub struct StationStatusSync;

impl StationStatusSync {
    /// Writes the station flag. Idempotent; returns false if the station is unknown.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    pub fn set_status<S: StationStore + ?Sized>(
        store: &mut S,
        station_id: i64,
        status: StationStatus,
    ) -> Result<bool, StoreError> {
        let updated: bool = store.set_station_status(station_id, status)?;
        if updated {
            debug!(station_id, %status, "Station status written");
        } else {
            warn!(station_id, %status, "Station not found while setting status");
        }
        Ok(updated)
    }
}

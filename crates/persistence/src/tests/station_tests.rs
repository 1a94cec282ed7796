// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use chargewatch::StationStore;
use chargewatch_domain::{PostalCode, Station, StationStatus};

use super::create_seeded_persistence;
use crate::PersistenceError;

#[test]
fn test_station_round_trip() {
    let (mut persistence, seed) = create_seeded_persistence();

    let station: Station = persistence.get_station(seed.station_id).unwrap().unwrap();

    assert_eq!(station.postal_code, "10115");
    assert_eq!(station.district, "Mitte");
    assert_eq!(station.status, StationStatus::Available);
}

#[test]
fn test_unknown_station_is_none() {
    let (mut persistence, _seed) = create_seeded_persistence();
    assert!(persistence.get_station(404).unwrap().is_none());
}

#[test]
fn test_duplicate_station_id_is_rejected() {
    let (mut persistence, seed) = create_seeded_persistence();

    let result: Result<Station, PersistenceError> = persistence.create_station(
        seed.station_id,
        &PostalCode::new("10117").unwrap(),
        "Unter den Linden 5",
        "Mitte",
    );

    assert!(matches!(result, Err(PersistenceError::UniqueViolation(_))));
}

#[test]
fn test_set_station_status() {
    let (mut persistence, seed) = create_seeded_persistence();

    assert!(persistence
        .set_station_status(seed.station_id, StationStatus::OutOfService)
        .unwrap());
    assert!(!persistence.set_station_status(404, StationStatus::OutOfService).unwrap());

    let station: Station = persistence.get_station(seed.station_id).unwrap().unwrap();
    assert_eq!(station.status, StationStatus::OutOfService);
}

#[test]
fn test_available_stations_by_postal_code() {
    let (mut persistence, seed) = create_seeded_persistence();
    let postal_code: PostalCode = PostalCode::new("10115").unwrap();
    persistence
        .create_station(2, &postal_code, "Chausseestrasse 10", "Mitte")
        .unwrap();
    persistence
        .create_station(3, &PostalCode::new("12043").unwrap(), "Karl-Marx-Strasse 1", "Neukoelln")
        .unwrap();
    persistence
        .set_station_status(seed.station_id, StationStatus::OutOfService)
        .unwrap();

    let stations: Vec<Station> = persistence
        .find_available_stations_by_postal_code(&postal_code)
        .unwrap();

    assert_eq!(stations.iter().map(|s| s.station_id).collect::<Vec<i64>>(), vec![2]);
}

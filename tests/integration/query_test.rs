//! Catalog queries against the fixture database.

use flight_delays::db::Value;
use flight_delays::query::{Params, QueryKind};
use pretty_assertions::assert_eq;

use super::fixture::flight_queries;

fn ids(records: &[flight_delays::db::Record]) -> Vec<i64> {
    records
        .iter()
        .map(|r| match r.get("ID") {
            Some(Value::Int(id)) => *id,
            other => panic!("unexpected ID {other:?}"),
        })
        .collect()
}

#[tokio::test]
async fn test_flight_by_id_returns_one_record() {
    let (_dir, queries) = flight_queries().await;

    let records = queries.flight_by_id(4).await.unwrap();
    assert_eq!(records.len(), 1);

    let flight = &records[0];
    assert_eq!(flight.get("ID"), Some(&Value::Int(4)));
    assert_eq!(flight.get("FLIGHT_ID"), Some(&Value::Int(4)));
    assert_eq!(flight.get("ORIGIN_AIRPORT"), Some(&Value::from("JFK")));
    assert_eq!(flight.get("DESTINATION_AIRPORT"), Some(&Value::from("ORD")));
    assert_eq!(flight.get("AIRLINE"), Some(&Value::from("Delta Air Lines Inc.")));
    assert_eq!(flight.get("AIRLINE_ID"), Some(&Value::Int(2)));
    assert_eq!(flight.get("DELAY"), Some(&Value::Int(45)));

    queries.close().await.unwrap();
}

#[tokio::test]
async fn test_flight_by_id_absent_is_empty_not_error() {
    let (_dir, queries) = flight_queries().await;

    let records = queries.flight_by_id(999).await.unwrap();
    assert!(records.is_empty());

    queries.close().await.unwrap();
}

#[tokio::test]
async fn test_flights_by_date() {
    let (_dir, queries) = flight_queries().await;

    let records = queries.flights_by_date(1, 3, 2015).await.unwrap();
    assert_eq!(ids(&records), vec![1, 2, 3, 6]);
    for record in &records {
        assert_eq!(record.get("DAY"), Some(&Value::Int(1)));
        assert_eq!(record.get("MONTH"), Some(&Value::Int(3)));
        assert_eq!(record.get("YEAR"), Some(&Value::Int(2015)));
    }
    // The empty delay comes back as text, untouched.
    assert_eq!(records[2].get("DELAY"), Some(&Value::from("")));

    assert!(queries.flights_by_date(2, 3, 2016).await.unwrap().is_empty());

    queries.close().await.unwrap();
}

#[tokio::test]
async fn test_flights_by_airport() {
    let (_dir, queries) = flight_queries().await;

    let records = queries.flights_by_airport("LAX").await.unwrap();
    assert_eq!(ids(&records), vec![1, 2, 3]);

    queries.close().await.unwrap();
}

#[tokio::test]
async fn test_flights_by_airline() {
    let (_dir, queries) = flight_queries().await;

    let records = queries
        .flights_by_airline("Delta Air Lines Inc.")
        .await
        .unwrap();
    assert_eq!(records.len(), 3);
    for record in &records {
        assert_eq!(record.get("AIRLINE"), Some(&Value::from("Delta Air Lines Inc.")));
        // ID is the airline identifier for this query.
        assert_eq!(record.get("ID"), Some(&Value::Int(2)));
    }
    assert_eq!(
        records[0].columns(),
        ["ORIGIN_AIRPORT", "DESTINATION_AIRPORT", "DELAY", "AIRLINE", "ID"]
    );

    assert!(queries.flights_by_airline("Virgin America").await.unwrap().is_empty());

    queries.close().await.unwrap();
}

#[tokio::test]
async fn test_delayed_and_departed_by_airline() {
    let (_dir, queries) = flight_queries().await;

    let records = queries.delayed_and_departed_by_airline().await.unwrap();
    assert_eq!(records.len(), 2);

    let delta = &records[0];
    assert_eq!(delta.get("AIRLINE"), Some(&Value::from("Delta Air Lines Inc.")));
    assert_eq!(delta.get("num_of_delayed_flights"), Some(&Value::Int(1)));
    assert_eq!(delta.get("num_of_flights"), Some(&Value::Int(2)));

    let united = &records[1];
    assert_eq!(united.get("AIRLINE"), Some(&Value::from("United Air Lines Inc.")));
    assert_eq!(united.get("num_of_delayed_flights"), Some(&Value::Int(1)));
    assert_eq!(united.get("num_of_flights"), Some(&Value::Int(3)));

    queries.close().await.unwrap();
}

#[tokio::test]
async fn test_delay_and_departure_time_skips_unknown_delays() {
    let (_dir, queries) = flight_queries().await;

    let records = queries.delay_and_departure_time().await.unwrap();
    let pairs: Vec<(Value, Value)> = records
        .iter()
        .map(|r| {
            (
                r.get("DEPARTURE_TIME").cloned().unwrap(),
                r.get("DELAY").cloned().unwrap(),
            )
        })
        .collect();

    assert_eq!(
        pairs,
        vec![
            (Value::from("0915"), Value::Int(12)),
            (Value::from("1030"), Value::Int(0)),
            (Value::from("0530"), Value::Int(45)),
            (Value::from("0700"), Value::Int(0)),
        ]
    );

    queries.close().await.unwrap();
}

#[tokio::test]
async fn test_route_delay_truncates_percentages() {
    let (_dir, queries) = flight_queries().await;

    let records = queries.route_delay().await.unwrap();
    let routes: Vec<(String, String, Value)> = records
        .iter()
        .map(|r| {
            (
                r.get("ORIGIN_AIRPORT").unwrap().to_string(),
                r.get("DESTINATION_AIRPORT").unwrap().to_string(),
                r.get("percentage_delay").cloned().unwrap(),
            )
        })
        .collect();

    assert_eq!(
        routes,
        vec![
            ("JFK".to_string(), "ORD".to_string(), Value::Int(50)),
            ("LAX".to_string(), "SFO".to_string(), Value::Int(33)),
            ("SFO".to_string(), "LAX".to_string(), Value::Int(0)),
        ]
    );

    queries.close().await.unwrap();
}

#[tokio::test]
async fn test_route_delay_with_coordinates() {
    let (_dir, queries) = flight_queries().await;

    let records = queries.route_delay_with_coordinates().await.unwrap();
    assert_eq!(records.len(), 3);

    let jfk = &records[0];
    assert_eq!(jfk.get("origin_airport"), Some(&Value::from("JFK")));
    assert_eq!(jfk.get("origin_latitude"), Some(&Value::Float(40.64)));
    assert_eq!(jfk.get("destination_airport"), Some(&Value::from("ORD")));
    assert_eq!(jfk.get("destination_longitude"), Some(&Value::Float(-87.90)));
    assert_eq!(jfk.get("percentage_delay"), Some(&Value::Int(50)));

    queries.close().await.unwrap();
}

#[tokio::test]
async fn test_execute_named_validates_parameters() {
    let (_dir, queries) = flight_queries().await;

    let result = queries
        .execute_named("flights_by_airport", &Params::new().with("iata", "JFK"))
        .await
        .unwrap();
    assert_eq!(result.row_count(), 2);

    let err = queries
        .execute(QueryKind::FlightById, &Params::new().with("id", "4"))
        .await
        .unwrap_err();
    assert_eq!(err.category(), "Query Error");

    let err = queries
        .execute(
            QueryKind::RouteDelay,
            &Params::new().with("limit", 10_i64),
        )
        .await
        .unwrap_err();
    assert!(err.to_string().contains("Unexpected parameter 'limit'"));

    queries.close().await.unwrap();
}

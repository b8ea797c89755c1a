//! Shaping real query results into chart series.

use flight_delays::charts::shape::{
    airline_delay_percentages, hourly_delays, route_coordinates, route_delays,
};
use flight_delays::charts::{Chart, TextPresenter};

use super::fixture::flight_queries;

#[tokio::test]
async fn test_airline_percentages_from_database() {
    let (_dir, queries) = flight_queries().await;

    let records = queries.delayed_and_departed_by_airline().await.unwrap();
    let series = airline_delay_percentages(&records).unwrap();

    assert_eq!(series.airlines, ["Delta Air Lines Inc.", "United Air Lines Inc."]);
    assert_eq!(series.percentages[0], 50.0);
    assert_eq!(series.percentages[1], 1.0 / 3.0 * 100.0);

    queries.close().await.unwrap();
}

#[tokio::test]
async fn test_hourly_delays_from_database() {
    let (_dir, queries) = flight_queries().await;

    let records = queries.delay_and_departure_time().await.unwrap();
    let series = hourly_delays(&records).unwrap();

    assert_eq!(series.hours, [9, 10, 5, 7]);
    assert_eq!(series.delays, [12, 0, 45, 0]);

    let shares = series.share_by_hour();
    assert_eq!(shares[9], 25.0);
    assert_eq!(shares[12], 0.0);

    queries.close().await.unwrap();
}

#[tokio::test]
async fn test_route_charts_render_as_text() {
    let (_dir, queries) = flight_queries().await;

    let routes = route_delays(&queries.route_delay().await.unwrap()).unwrap();
    assert_eq!(routes.percentages, [50, 33, 0]);

    let heat_map = Chart::route_heat_map(&routes, 500);
    let text = TextPresenter::new(100, 12).render(&heat_map);
    assert!(text.contains("Origin -> Destination"));
    assert!(text.contains("JFK"));

    let coordinates =
        route_coordinates(&queries.route_delay_with_coordinates().await.unwrap()).unwrap();
    assert_eq!(coordinates.routes.len(), 3);
    assert_eq!(coordinates.routes[1].origin, "LAX");
    assert_eq!(coordinates.routes[1].origin_longitude, -118.41);

    let map = Chart::route_map(coordinates, 2);
    match &map {
        Chart::RouteMap(sampled) => assert_eq!(sampled.routes.len(), 2),
        other => panic!("unexpected chart {other:?}"),
    }
    let text = TextPresenter::new(60, 20).render(&map);
    assert!(text.contains("Percentage of Delayed Flights per Route"));

    queries.close().await.unwrap();
}

//! Driving the menu end to end with scripted input.

use flight_delays::app::App;
use flight_delays::charts::TextPresenter;
use flight_delays::cli::OutputFormat;
use flight_delays::config::ChartConfig;
use pretty_assertions::assert_eq;

use super::fixture::flight_queries;

async fn run_session(input: &str, output: OutputFormat) -> String {
    let (_dir, queries) = flight_queries().await;
    let mut app = App::new(
        queries,
        Box::new(TextPresenter::new(80, 20)),
        ChartConfig::default(),
        output,
    );

    let mut out = Vec::new();
    app.run(input.as_bytes(), &mut out).await.unwrap();
    app.shutdown().await.unwrap();
    String::from_utf8(out).unwrap()
}

/// Lines printed between the prompt and the next menu.
fn listing(output: &str, prompt: &str) -> Vec<String> {
    let start = output.find(prompt).unwrap() + prompt.len();
    output[start..]
        .lines()
        .take_while(|line| *line != "Menu:")
        .map(str::to_string)
        .collect()
}

#[tokio::test]
async fn test_flights_by_date_listing() {
    let output = run_session("2\n01/03/2015\n9\n", OutputFormat::Text).await;

    assert_eq!(
        listing(&output, "Enter date in DD/MM/YYYY format: "),
        vec![
            "Got 4 results.",
            "1. LAX -> SFO by United Air Lines Inc., Delay: 12 Minutes",
            "2. LAX -> SFO by United Air Lines Inc.",
            "3. LAX -> SFO by Delta Air Lines Inc.",
            "6. SFO -> LAX by United Air Lines Inc.",
        ]
    );
}

#[tokio::test]
async fn test_invalid_date_is_retried() {
    let output = run_session("2\n2015-03-01\n02/03/2015\n9\n", OutputFormat::Text).await;

    assert!(output.contains("Enter date in DD/MM/YYYY format: Try again...\n"));
    assert!(output.contains("Got 2 results."));
    assert!(output.contains("4. JFK -> ORD by Delta Air Lines Inc., Delay: 45 Minutes"));
}

#[tokio::test]
async fn test_airport_code_is_upper_cased() {
    let output = run_session("4\nsfo\n9\n", OutputFormat::Text).await;

    assert_eq!(
        listing(&output, "Enter origin airport IATA code: "),
        vec!["Got 1 results.", "6. SFO -> LAX by United Air Lines Inc."]
    );
}

#[tokio::test]
async fn test_json_listing() {
    let output = run_session("1\n4\n9\n", OutputFormat::Json).await;

    let json_start = output.find('[').unwrap();
    let json_end = output.rfind(']').unwrap() + 1;
    let parsed: serde_json::Value = serde_json::from_str(&output[json_start..json_end]).unwrap();

    assert_eq!(parsed.as_array().unwrap().len(), 1);
    assert_eq!(parsed[0]["ID"], 4);
    assert_eq!(parsed[0]["AIRLINE"], "Delta Air Lines Inc.");
}

#[tokio::test]
async fn test_chart_actions_render() {
    let output = run_session("5\n6\n7\n8\n9\n", OutputFormat::Text).await;

    assert!(output.contains("Percentage of Delayed Flights by Airline"));
    assert!(output.contains("Percentage of Delayed Flights per Hour of the Day"));
    assert!(output.contains("(Origin -> Destination)"));
    assert!(!output.contains("Error showing results"));
    assert!(output.ends_with("Bye!\n"));
}

#[tokio::test]
async fn test_json_listing_reports_blank_delay_as_zero() {
    let output = run_session("2\n01/03/2015\n9\n", OutputFormat::Json).await;

    let json_start = output.find('[').unwrap();
    let json_end = output.rfind(']').unwrap() + 1;
    let parsed: serde_json::Value = serde_json::from_str(&output[json_start..json_end]).unwrap();

    let delays: Vec<i64> = parsed
        .as_array()
        .unwrap()
        .iter()
        .map(|flight| flight["DELAY"].as_i64().unwrap())
        .collect();
    assert_eq!(delays, vec![12, -3, 0, 0]);
}

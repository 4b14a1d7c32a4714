//! The two GraphQL operations the provider is queried with, and typed
//! decoding of their responses.
//!
//! Decoding never indexes into untyped JSON: every absent or malformed level
//! of the response becomes a [`FetchError::Schema`] naming the missing path.

use crate::error::FetchError;
use crate::event::{Fixture, Market};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

pub const TOURNAMENT_FIXTURES: &str = "TournamentFixtures";
pub const EVENT_MARKETS: &str = "EventMarkets";

const TOURNAMENT_FIXTURES_QUERY: &str = r#"
    query TournamentFixtures($slug: String!) {
        slugTournament(slug: $slug) {
            fixtures {
                id
                name
                startTime
            }
        }
    }
"#;

const EVENT_MARKETS_QUERY: &str = r#"
    query EventMarkets($eventId: ID!) {
        event(id: $eventId) {
            name
            markets {
                name
                outcomes {
                    label
                    odds
                }
            }
        }
    }
"#;

/// POST body shared by both operations.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphQlRequest {
    pub operation_name: &'static str,
    pub variables: serde_json::Value,
    pub query: &'static str,
}

impl GraphQlRequest {
    pub fn tournament_fixtures(slug: &str) -> Self {
        Self {
            operation_name: TOURNAMENT_FIXTURES,
            variables: serde_json::json!({ "slug": slug }),
            query: TOURNAMENT_FIXTURES_QUERY,
        }
    }

    pub fn event_markets(event_id: &str) -> Self {
        Self {
            operation_name: EVENT_MARKETS,
            variables: serde_json::json!({ "eventId": event_id }),
            query: EVENT_MARKETS_QUERY,
        }
    }
}

#[derive(Debug, Deserialize)]
struct Envelope<T> {
    data: Option<T>,
    #[serde(default)]
    errors: Vec<GraphQlErrorMessage>,
}

#[derive(Debug, Deserialize)]
struct GraphQlErrorMessage {
    message: String,
}

#[derive(Debug, Deserialize)]
struct TournamentFixturesData {
    #[serde(rename = "slugTournament")]
    slug_tournament: Option<TournamentNode>,
}

#[derive(Debug, Deserialize)]
struct TournamentNode {
    fixtures: Option<Vec<Fixture>>,
}

#[derive(Debug, Deserialize)]
struct EventMarketsData {
    event: Option<EventNode>,
}

#[derive(Debug, Deserialize)]
struct EventNode {
    #[serde(default)]
    name: Option<String>,
    markets: Option<Vec<Market>>,
}

/// Markets of one event, plus the event name when the provider sends it.
#[derive(Debug, Clone, PartialEq)]
pub struct EventMarkets {
    pub event_name: Option<String>,
    pub markets: Vec<Market>,
}

/// Response payload together with any provider error messages sent alongside it.
struct Decoded<T> {
    data: Option<T>,
    errors: Vec<String>,
}

impl<T> Decoded<T> {
    fn missing(&self, operation: &'static str, path: &str) -> FetchError {
        if self.errors.is_empty() {
            FetchError::schema(operation, format!("missing `{}`", path))
        } else {
            FetchError::schema(
                operation,
                format!("missing `{}`; provider errors: {}", path, self.errors.join("; ")),
            )
        }
    }
}

fn decode_envelope<T: DeserializeOwned>(
    operation: &'static str,
    body: &[u8],
) -> Result<Decoded<T>, FetchError> {
    let envelope: Envelope<T> = serde_json::from_slice(body)
        .map_err(|e| FetchError::schema(operation, format!("invalid JSON body: {}", e)))?;

    Ok(Decoded {
        data: envelope.data,
        errors: envelope.errors.into_iter().map(|e| e.message).collect(),
    })
}

pub fn decode_fixtures(body: &[u8]) -> Result<Vec<Fixture>, FetchError> {
    let mut decoded: Decoded<TournamentFixturesData> = decode_envelope(TOURNAMENT_FIXTURES, body)?;

    let tournament = decoded
        .data
        .take()
        .ok_or_else(|| decoded.missing(TOURNAMENT_FIXTURES, "data"))?
        .slug_tournament
        .ok_or_else(|| decoded.missing(TOURNAMENT_FIXTURES, "data.slugTournament"))?;

    tournament
        .fixtures
        .ok_or_else(|| decoded.missing(TOURNAMENT_FIXTURES, "data.slugTournament.fixtures"))
}

pub fn decode_markets(body: &[u8]) -> Result<EventMarkets, FetchError> {
    let mut decoded: Decoded<EventMarketsData> = decode_envelope(EVENT_MARKETS, body)?;

    let event = decoded
        .data
        .take()
        .ok_or_else(|| decoded.missing(EVENT_MARKETS, "data"))?
        .event
        .ok_or_else(|| decoded.missing(EVENT_MARKETS, "data.event"))?;
    let markets = event
        .markets
        .ok_or_else(|| decoded.missing(EVENT_MARKETS, "data.event.markets"))?;

    Ok(EventMarkets {
        event_name: event.name,
        markets,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::OddsValue;

    #[test]
    fn request_body_carries_operation_name_and_variables() {
        let body = serde_json::to_value(GraphQlRequest::event_markets("evt-42")).unwrap();
        assert_eq!(body["operationName"], "EventMarkets");
        assert_eq!(body["variables"]["eventId"], "evt-42");
        assert!(body["query"].as_str().unwrap().contains("event(id: $eventId)"));

        let body = serde_json::to_value(GraphQlRequest::tournament_fixtures("nba")).unwrap();
        assert_eq!(body["operationName"], "TournamentFixtures");
        assert_eq!(body["variables"]["slug"], "nba");
    }

    #[test]
    fn decodes_fixtures_in_provider_order() {
        let body = br#"{"data":{"slugTournament":{"fixtures":[
            {"id":"b","name":"Heat - Bulls","startTime":"2026-10-21T00:00:00Z"},
            {"id":"a","name":"Lakers - Celtics","startTime":"2026-10-20T23:30:00Z"}
        ]}}}"#;

        let fixtures = decode_fixtures(body).unwrap();
        let ids: Vec<&str> = fixtures.iter().map(|f| f.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a"]);
        assert_eq!(fixtures[1].name, "Lakers - Celtics");
    }

    #[test]
    fn empty_fixture_list_is_not_a_schema_error() {
        let fixtures = decode_fixtures(br#"{"data":{"slugTournament":{"fixtures":[]}}}"#).unwrap();
        assert!(fixtures.is_empty());
    }

    #[test]
    fn missing_levels_are_schema_errors() {
        let cases: [&[u8]; 4] = [
            br#"{}"#,
            br#"{"data":null}"#,
            br#"{"data":{"slugTournament":null}}"#,
            br#"{"data":{"slugTournament":{}}}"#,
        ];
        for body in cases {
            let err = decode_fixtures(body).unwrap_err();
            assert!(err.is_schema(), "expected schema error for {:?}", String::from_utf8_lossy(body));
        }

        let err = decode_markets(br#"{"data":{"event":{"name":"x"}}}"#).unwrap_err();
        assert!(err.to_string().contains("data.event.markets"));
    }

    #[test]
    fn provider_errors_are_reported() {
        let body = br#"{"data":null,"errors":[{"message":"rate limited"}]}"#;
        let err = decode_markets(body).unwrap_err();
        assert!(err.is_schema());
        assert!(err.to_string().contains("rate limited"));
    }

    #[test]
    fn provider_errors_are_reported_for_null_nested_levels() {
        let body = br#"{"data":{"event":null},"errors":[{"message":"event not found"}]}"#;
        let err = decode_markets(body).unwrap_err();
        assert!(err.is_schema());
        assert!(err.to_string().contains("data.event"));
        assert!(err.to_string().contains("event not found"));

        let body = br#"{"data":{"slugTournament":null},"errors":[{"message":"unknown slug"},{"message":"try again"}]}"#;
        let err = decode_fixtures(body).unwrap_err();
        assert!(err.to_string().contains("data.slugTournament"));
        assert!(err.to_string().contains("unknown slug; try again"));
    }

    #[test]
    fn non_json_body_is_schema_error() {
        let err = decode_fixtures(b"<html>oops</html>").unwrap_err();
        assert!(err.is_schema());
    }

    #[test]
    fn decodes_markets_and_event_name() {
        let body = br#"{"data":{"event":{"name":"Lakers - Celtics","markets":[
            {"name":"Player Points","outcomes":[{"label":"A","odds":1.5},{"label":"B","odds":"2/1"}]},
            {"name":"Winner","outcomes":[]}
        ]}}}"#;

        let decoded = decode_markets(body).unwrap();
        assert_eq!(decoded.event_name.as_deref(), Some("Lakers - Celtics"));
        assert_eq!(decoded.markets.len(), 2);
        assert_eq!(decoded.markets[0].outcomes[1].odds, OddsValue::Text("2/1".to_string()));
    }
}

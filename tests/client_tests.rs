use nba_prop_odds::{OddsProvider, Settings, StakeClient};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// Serve exactly one HTTP response and hand back the request body it received.
async fn serve_once(status: &'static str, body: &'static str) -> (String, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let server = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let request = read_request(&mut socket).await;

        let response = format!(
            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status,
            body.len(),
            body
        );
        socket.write_all(response.as_bytes()).await.unwrap();
        socket.shutdown().await.ok();
        request
    });

    (format!("http://{}/_api/graphql", addr), server)
}

async fn read_request(socket: &mut tokio::net::TcpStream) -> String {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];
    loop {
        let n = socket.read(&mut chunk).await.unwrap();
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);

        let text = String::from_utf8_lossy(&buf);
        if let Some(split) = text.find("\r\n\r\n") {
            let content_length = text[..split]
                .lines()
                .find_map(|line| {
                    let (name, value) = line.split_once(':')?;
                    name.eq_ignore_ascii_case("content-length")
                        .then(|| value.trim().parse::<usize>().ok())
                        .flatten()
                })
                .unwrap_or(0);
            if buf.len() >= split + 4 + content_length {
                return text[split + 4..].to_string();
            }
        }
    }
    String::from_utf8_lossy(&buf).to_string()
}

fn client_for(endpoint: String) -> StakeClient {
    let settings = Settings {
        endpoint,
        request_timeout_secs: Some(5),
        ..Settings::default()
    };
    StakeClient::new(&settings).unwrap()
}

#[tokio::test]
async fn fixtures_request_posts_named_operation() {
    let (endpoint, server) = serve_once(
        "200 OK",
        r#"{"data":{"slugTournament":{"fixtures":[{"id":"evt-1","name":"Lakers - Celtics","startTime":"2026-10-20T23:30:00Z"}]}}}"#,
    )
    .await;

    let fixtures = client_for(endpoint).fetch_fixtures("nba").await.unwrap();
    assert_eq!(fixtures.len(), 1);
    assert_eq!(fixtures[0].id, "evt-1");

    let request: serde_json::Value = serde_json::from_str(&server.await.unwrap()).unwrap();
    assert_eq!(request["operationName"], "TournamentFixtures");
    assert_eq!(request["variables"]["slug"], "nba");
    assert!(request["query"].as_str().unwrap().contains("slugTournament"));
}

#[tokio::test]
async fn markets_request_carries_event_id() {
    let (endpoint, server) = serve_once(
        "200 OK",
        r#"{"data":{"event":{"name":"Lakers - Celtics","markets":[{"name":"Player Points","outcomes":[{"label":"A","odds":1.5}]}]}}}"#,
    )
    .await;

    let event = client_for(endpoint).fetch_markets("evt-1").await.unwrap();
    assert_eq!(event.markets.len(), 1);
    assert_eq!(event.markets[0].outcomes[0].label, "A");

    let request: serde_json::Value = serde_json::from_str(&server.await.unwrap()).unwrap();
    assert_eq!(request["operationName"], "EventMarkets");
    assert_eq!(request["variables"]["eventId"], "evt-1");
}

#[tokio::test]
async fn non_success_status_is_transport_error() {
    let (endpoint, server) = serve_once("500 Internal Server Error", r#"{"error":"boom"}"#).await;

    let err = client_for(endpoint).fetch_fixtures("nba").await.unwrap_err();
    assert!(err.is_transport(), "expected transport error, got {err}");
    assert!(err.to_string().contains("500"));

    let _ = server.await;
}

#[tokio::test]
async fn malformed_body_is_schema_error() {
    let (endpoint, server) = serve_once("200 OK", r#"{"data":{"event":null}}"#).await;

    let err = client_for(endpoint).fetch_markets("evt-1").await.unwrap_err();
    assert!(err.is_schema(), "expected schema error, got {err}");

    let _ = server.await;
}

#[tokio::test]
async fn unreachable_endpoint_is_transport_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let err = client_for(format!("http://{}/_api/graphql", addr))
        .fetch_fixtures("nba")
        .await
        .unwrap_err();
    assert!(err.is_transport());
}

// Integration tests for one full decision tick against a mock game server

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use flagrunner::{
    DecisionEngine, ErrorPolicy, GameClient, TeamCredentials, TickOutcome, TickScheduler,
};
use mockito::{Matcher, Server, ServerGuard};
use std::time::Duration;

const STATE: &str = r#"{
    "teams": ["Team 1", "Team 2"],
    "actors": [
        {"type": "Generic", "team": "Team 1", "ident": 0, "flag": null, "coordinates": {"x": 0, "y": 0}},
        {"type": "Runner", "team": "Team 1", "ident": 1, "flag": "Team 2", "coordinates": {"x": 0, "y": 0}},
        {"type": "Generic", "team": "Team 2", "ident": 0, "flag": null, "coordinates": {"x": 7, "y": 7}}
    ],
    "flags": [
        {"team": "Team 1", "coordinates": {"x": 1, "y": 2}},
        {"team": "Team 2", "coordinates": {"x": 0, "y": 1}}
    ],
    "bases": [
        {"team": "Team 1", "coordinates": {"x": 2, "y": 0}},
        {"team": "Team 2", "coordinates": {"x": 8, "y": 8}}
    ],
    "walls": [],
    "scores": {"Team 1": 0, "Team 2": 0},
    "tick": 4,
    "time_of_next_execution": "2026-10-16T12:00:00.500000"
}"#;

fn auth_header() -> String {
    format!("Basic {}", BASE64.encode("Team 1:1"))
}

async fn mock_timing(server: &mut ServerGuard, tick: u64) -> mockito::Mock {
    server
        .mock("GET", "/states/timing")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(format!(
            r#"{{"tick": {}, "time_to_next_execution": 0.5, "time_of_next_execution": "2026-10-16T12:00:00.500000"}}"#,
            tick
        ))
        .create_async()
        .await
}

async fn mock_order(server: &mut ServerGuard, path: &str, direction: &str) -> mockito::Mock {
    server
        .mock("POST", path)
        .match_query(Matcher::UrlEncoded("direction".into(), direction.into()))
        .match_header("authorization", auth_header().as_str())
        .with_status(202)
        .with_body(r#"{"message": "Order added."}"#)
        .expect(1)
        .create_async()
        .await
}

fn scheduler(server: &ServerGuard) -> TickScheduler<GameClient> {
    let client = GameClient::new(
        &format!("{}/", server.url()),
        TeamCredentials::new("Team 1", "1"),
        Duration::from_secs(5),
    )
    .unwrap();
    TickScheduler::new(client, DecisionEngine::new("Team 1"), ErrorPolicy::default())
}

#[tokio::test]
async fn test_full_tick_submits_orders_in_sequence() {
    let mut server = Server::new_async().await;
    let _timing = mock_timing(&mut server, 4).await;
    let state = server
        .mock("GET", "/states/game_state")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(STATE)
        .expect(1)
        .create_async()
        .await;
    // Seeker grabs the adjacent enemy flag; carrier walks two cells to base.
    let grab_up = mock_order(&mut server, "/orders/grabput/0", "up").await;
    let move_right = mock_order(&mut server, "/orders/move/1", "right").await;
    let put_right = mock_order(&mut server, "/orders/grabput/1", "right").await;

    let mut s = scheduler(&server);
    let outcome = s.step().await.unwrap();

    match outcome {
        TickOutcome::Acted { tick, orders, report } => {
            assert_eq!(tick, 4);
            assert_eq!(orders.len(), 3);
            assert_eq!(report.accepted, 3);
            assert_eq!(report.failed, 0);
        }
        other => panic!("expected Acted, got {:?}", other),
    }

    state.assert_async().await;
    grab_up.assert_async().await;
    move_right.assert_async().await;
    put_right.assert_async().await;
}

#[tokio::test]
async fn test_same_tick_does_not_refetch_state() {
    let mut server = Server::new_async().await;
    let _timing = mock_timing(&mut server, 9).await;
    let state = server
        .mock("GET", "/states/game_state")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(STATE)
        .expect(1)
        .create_async()
        .await;
    let _orders = server
        .mock("POST", Matcher::Regex(r"^/orders/".to_string()))
        .match_query(Matcher::Any)
        .with_status(202)
        .expect(3)
        .create_async()
        .await;

    let mut s = scheduler(&server);
    assert!(matches!(s.step().await.unwrap(), TickOutcome::Acted { .. }));
    assert_eq!(
        s.step().await.unwrap(),
        TickOutcome::Waiting(Duration::from_millis(500))
    );

    state.assert_async().await;
}

#[tokio::test]
async fn test_rejected_order_halts_the_tick() {
    let mut server = Server::new_async().await;
    let _timing = mock_timing(&mut server, 1).await;
    let _state = server
        .mock("GET", "/states/game_state")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(STATE)
        .create_async()
        .await;
    let rejected = server
        .mock("POST", "/orders/grabput/0")
        .match_query(Matcher::Any)
        .with_status(401)
        .expect(1)
        .create_async()
        .await;
    let never = server
        .mock("POST", "/orders/move/1")
        .match_query(Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let mut s = scheduler(&server);
    let err = s.step().await.unwrap_err();

    assert!(format!("{:#}", err).contains("rejected team credentials"));
    rejected.assert_async().await;
    never.assert_async().await;
}

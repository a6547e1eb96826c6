//! Integration tests for the planet routes.

mod common;

use common::TestHarness;

#[tokio::test]
async fn list_planets_empty() {
    let (_h, addr) = TestHarness::with_server().await;
    let resp = reqwest::get(format!("http://{addr}/planets")).await.unwrap();
    assert_eq!(resp.status(), 200);
    let planets: Vec<serde_json::Value> = resp.json().await.unwrap();
    assert!(planets.is_empty());
}

#[tokio::test]
async fn list_planets_never_nests_relations() {
    let (h, addr) = TestHarness::with_server().await;
    let busy = h.create_planet("Kepler-442b");
    let quiet = h.create_planet("Jinxon");
    for i in 0..5 {
        let s = h.create_scientist(&format!("Scientist {i}"), "exobiology");
        h.create_mission(&format!("Visit {i}"), s.id, busy.id);
    }

    let planets: Vec<serde_json::Value> = reqwest::get(format!("http://{addr}/planets"))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(planets.len(), 2);
    assert_eq!(planets[0]["id"], busy.id.get());
    assert_eq!(planets[1]["id"], quiet.id.get());

    for planet in &planets {
        let mut keys: Vec<&str> = planet.as_object().unwrap().keys().map(String::as_str).collect();
        keys.sort_unstable();
        assert_eq!(keys, ["distance_from_earth", "id", "name", "nearest_star"]);
    }
}

#[tokio::test]
async fn planets_are_read_only() {
    let (_h, addr) = TestHarness::with_server().await;
    let resp = reqwest::Client::new()
        .post(format!("http://{addr}/planets"))
        .json(&serde_json::json!({"name": "New World"}))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 405);
}

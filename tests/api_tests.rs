use axum::http::StatusCode;
use axum_test::TestServer;
use serde_json::{json, Value};

use icadus_api::{
    api::{create_router, AppState},
    services::Catalog,
};

const CATALOG_CSV: &str = "\
Title,Year,TMDb ID,Deep Tags,Overview,Poster URL
Heat,1995,949,\"Crime, Heist, Thriller\",Cops and robbers.,https://img/949.jpg
Se7en,1995,807,\"Crime, Thriller, Dark\",Seven sins.,
Ronin,1998,8195,\"Heist, Action\",Mercenaries chase a case.,
Zodiac,2007,1949,\"Crime, Mystery\",A cartoonist hunts a killer.,
Barbie,2023,346698,\"Comedy, Fantasy\",Barbieland.,
Clue,1985,15196,\"Comedy, Mystery\",A dinner party murder.,
Alien,1979,348,\"Horror, Sci-Fi\",In space no one can hear you scream.,
Drive,2011,64690,\"Crime, Neo-Noir, Action\",A getaway driver.,
Paddington,2014,116149,\"Family, Comedy\",A bear in London.,
Thief,1981,11524,\"Crime, Heist, Neo-Noir\",One last score.,
";

fn create_test_server() -> TestServer {
    let catalog = Catalog::from_csv(CATALOG_CSV.as_bytes()).unwrap();
    let state = AppState::with_catalog(catalog, Some(7));
    let app = create_router(state);
    TestServer::new(app).unwrap()
}

fn empty_server() -> TestServer {
    let state = AppState::with_catalog(Catalog::default(), Some(7));
    TestServer::new(create_router(state)).unwrap()
}

#[tokio::test]
async fn test_health_check() {
    let server = create_test_server();
    let response = server.get("/health").await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_home_reports_catalog_size() {
    let server = create_test_server();
    let body: Value = server.get("/").await.json();
    assert_eq!(body["movies"], 10);
}

#[tokio::test]
async fn test_search() {
    let server = create_test_server();
    let response = server.get("/search").add_query_param("query", "IE").await;
    response.assert_status_ok();

    let hits: Vec<Value> = response.json();
    let titles: Vec<&str> = hits.iter().map(|h| h["title"].as_str().unwrap()).collect();
    assert_eq!(titles, vec!["Barbie", "Alien", "Thief"]);
    assert_eq!(hits[0]["id"], "346698");
    assert_eq!(hits[0]["year"], 2023);
}

#[tokio::test]
async fn test_get_movie() {
    let server = create_test_server();
    let response = server.get("/movies/949").await;
    response.assert_status_ok();

    let movie: Value = response.json();
    assert_eq!(movie["title"], "Heat");
    assert_eq!(movie["tags"], json!(["Crime", "Heist", "Thriller"]));

    server
        .get("/movies/0")
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_list_moods() {
    let server = create_test_server();
    let moods: Vec<String> = server.get("/moods").await.json();
    assert!(moods.contains(&"scared".to_string()));
}

#[tokio::test]
async fn test_next_batch_cold_start() {
    let server = create_test_server();
    let response = server
        .post("/next_batch")
        .json(&json!({ "rated_movies": {}, "viewed_ids": ["949"] }))
        .await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["is_calibrated"], false);

    let movies = body["movies"].as_array().unwrap();
    assert_eq!(movies.len(), 5);
    for movie in movies {
        assert_ne!(movie["id"], "949");
        let score = movie["score"].as_i64().unwrap();
        assert!((1..=50).contains(&score));
        assert!(movie["reason"].is_string());
    }
}

#[tokio::test]
async fn test_next_batch_calibrated() {
    let server = create_test_server();
    let response = server
        .post("/next_batch")
        .json(&json!({
            "rated_movies": {
                "Heat": 5, "Thief": 5, "Se7en": 5, "Ronin": 4, "Drive": 4, "Barbie": 1
            },
            "viewed_ids": []
        }))
        .await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["is_calibrated"], true);
    // Rated titles are not viewed yet, so they stay in the feed
    assert_eq!(body["movies"][0]["title"], "Heat");
    assert_eq!(body["movies"][0]["score"], 100);
    assert_eq!(body["movies"][0]["reason"], "Because you like Crime, Heist, Thriller");
    assert_eq!(body["movies"][4]["title"], "Zodiac");
    assert_eq!(body["movies"][4]["score"], 50);
}

#[tokio::test]
async fn test_next_batch_drops_viewed_rated_title() {
    let server = create_test_server();
    let body: Value = server
        .post("/next_batch")
        .json(&json!({
            "rated_movies": {
                "Heat": 5, "Thief": 5, "Se7en": 5, "Ronin": 4, "Drive": 4, "Barbie": 1
            },
            "viewed_ids": ["949"]
        }))
        .await
        .json();

    let titles: Vec<&str> = body["movies"]
        .as_array()
        .unwrap()
        .iter()
        .map(|m| m["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["Se7en", "Thief", "Drive", "Zodiac", "Ronin"]);
}

#[tokio::test]
async fn test_next_batch_rejects_bad_rating() {
    let server = create_test_server();
    let response = server
        .post("/next_batch")
        .json(&json!({ "rated_movies": { "Heat": 7 }, "viewed_ids": [] }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);

    let body: Value = response.json();
    assert!(body["error"].as_str().unwrap().contains("between 1 and 5"));
}

#[tokio::test]
async fn test_recommend_with_soul_mate() {
    let server = create_test_server();
    let response = server
        .post("/recommend")
        .json(&json!({
            "seed_movies": ["Heat", "Se7en"],
            "rated_movies": ["Zodiac"],
            "disliked_movies": ["Barbie"],
            "viewed_ids": ["8195"]
        }))
        .await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["soul_mate"]["name"], "Crime Buff");

    let movies = body["movies"].as_array().unwrap();
    assert!(!movies.is_empty());
    for movie in movies {
        let title = movie["title"].as_str().unwrap();
        assert!(!["Heat", "Se7en", "Zodiac", "Barbie", "Ronin"].contains(&title));
        assert!(movie["score"].as_i64().unwrap() > 0);
    }
}

#[tokio::test]
async fn test_recommend_unknown_seed() {
    let server = create_test_server();
    let response = server
        .post("/recommend")
        .json(&json!({ "seed_movies": ["Nope"] }))
        .await;
    response.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_empty_catalog_still_serves() {
    let server = empty_server();

    let hits: Vec<Value> = server
        .get("/search")
        .add_query_param("query", "heat")
        .await
        .json();
    assert!(hits.is_empty());

    let body: Value = server
        .post("/next_batch")
        .json(&json!({ "rated_movies": { "Heat": 5 }, "viewed_ids": [] }))
        .await
        .json();
    assert_eq!(body["is_calibrated"], false);
    assert!(body["movies"].as_array().unwrap().is_empty());
}

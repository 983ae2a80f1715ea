//! Stand-in for the Tailspin Toys backend API, for manual gateway runs.
//!
//! Run with `cargo run --example mock_backend`, then point the gateway at
//! `http://localhost:5100` (the default) and browse `/api/games`.

use std::net::SocketAddr;

use axum::{
    extract::Path, http::StatusCode, response::IntoResponse, routing::get, Json, Router,
};
use serde::Serialize;

#[derive(Serialize, Clone)]
struct Game {
    id: u32,
    title: &'static str,
    description: &'static str,
    star_rating: f32,
    category: &'static str,
    publisher: &'static str,
}

fn seed_games() -> Vec<Game> {
    vec![
        Game {
            id: 1,
            title: "Galactic Defenders",
            description: "Defend the galaxy from waves of alien invaders in this cooperative deck builder.",
            star_rating: 4.5,
            category: "Strategy",
            publisher: "Nebula Games",
        },
        Game {
            id: 2,
            title: "Dungeon Crawlers",
            description: "Explore procedurally generated dungeons with up to four friends.",
            star_rating: 4.2,
            category: "Adventure",
            publisher: "Torchlight Studios",
        },
        Game {
            id: 3,
            title: "Skyward Racers",
            description: "High-speed airship racing across floating islands.",
            star_rating: 3.9,
            category: "Racing",
            publisher: "Nebula Games",
        },
    ]
}

async fn list_games() -> Json<Vec<Game>> {
    Json(seed_games())
}

async fn get_game(Path(id): Path<u32>) -> impl IntoResponse {
    match seed_games().into_iter().find(|game| game.id == id) {
        Some(game) => Json(game).into_response(),
        None => (
            StatusCode::NOT_FOUND,
            Json(serde_json::json!({"error": "Game not found"})),
        )
            .into_response(),
    }
}

#[tokio::main]
async fn main() {
    let app = Router::new()
        .route("/api/games", get(list_games))
        .route("/api/games/{id}", get(get_game));

    let addr = SocketAddr::from(([127, 0, 0, 1], 5100));
    println!("Mock Tailspin backend listening on http://{addr}");

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}

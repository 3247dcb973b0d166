use crate::{
    crossword::{self, Layout, SvgOptions, WordListRules, SVG_FILENAME},
    error::ApiError,
    models::Word,
    AppState,
};
use axum::{
    extract::{rejection::JsonRejection, Query, State},
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CrosswordRequest {
    /// Delimiter-separated words, e.g. "cat, dog, fish"
    pub word_list: String,
}

#[derive(Debug, Serialize)]
pub struct CrosswordResponse {
    pub words: Vec<Word>,
    pub grid: crossword::Grid,
    /// Words that found no intersection and were left off the grid
    pub unplaced: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct SvgQuery {
    #[serde(default)]
    pub answers: bool,
}

/// Parse the submitted word list and lay it out
fn build_layout(state: &AppState, word_list: &str) -> Result<(Vec<String>, Layout), ApiError> {
    let rules = WordListRules::from(&state.config.crossword);
    let words = crossword::parse_word_list(word_list, &rules)?;
    let layout = crossword::generate_layout(&words)?;

    tracing::debug!(
        "Laid out {} of {} words on a {}x{} grid ({} cells filled):\n{}",
        layout.placements.len(),
        words.len(),
        layout.grid.size(),
        layout.grid.size(),
        layout.grid.filled_count(),
        layout.grid
    );

    Ok((words, layout))
}

/// Generate a crossword, store its words and return them with their positions
pub async fn create_crossword(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<CrosswordRequest>, JsonRejection>,
) -> Result<Json<CrosswordResponse>, ApiError> {
    tracing::info!("Generating crossword");
    let Json(payload) = payload?;

    let (words, layout) = build_layout(&state, &payload.word_list)?;
    let created = state.store.create_words(&words).await;

    // Created records follow input order, so the record at `idx` belongs to
    // the placement whose word_index is `idx`
    let mut records = Vec::with_capacity(created.len());
    for (idx, word) in created.into_iter().enumerate() {
        match layout.placement_for(idx) {
            Some(placement) => {
                let updated = state
                    .store
                    .update_word_position(word.id, placement.clone())
                    .await?;
                records.push(updated);
            }
            None => records.push(word),
        }
    }

    let unplaced: Vec<String> = layout.unplaced(&words).into_iter().map(String::from).collect();
    if !unplaced.is_empty() {
        tracing::warn!("Could not place {} word(s): {:?}", unplaced.len(), unplaced);
    }

    tracing::info!(
        "Crossword generated: {} words placed, {} dropped",
        records.iter().filter(|word| word.is_placed()).count(),
        unplaced.len()
    );

    Ok(Json(CrosswordResponse {
        words: records,
        grid: layout.grid,
        unplaced,
    }))
}

/// Generate a crossword and return it as a downloadable SVG puzzle
pub async fn export_svg(
    State(state): State<Arc<AppState>>,
    Query(query): Query<SvgQuery>,
    payload: Result<Json<CrosswordRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(payload) = payload?;
    let (_, layout) = build_layout(&state, &payload.word_list)?;
    let options = SvgOptions {
        cell_size: state.config.crossword.svg_cell_size,
        show_answers: query.answers,
    };
    let svg = crossword::render_svg(&layout, &options);

    Ok((
        [
            (header::CONTENT_TYPE, "image/svg+xml".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", SVG_FILENAME),
            ),
        ],
        svg,
    )
        .into_response())
}

/// List every stored word with its current position
pub async fn list_words(State(state): State<Arc<AppState>>) -> Json<Vec<Word>> {
    Json(state.store.get_words().await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        config::{Config, CrosswordConfig, ServerConfig},
        routes::create_routes,
        store::MemStorage,
    };
    use axum::{
        body::Body,
        http::{Request, StatusCode},
        Router,
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    fn test_app() -> Router {
        let state = Arc::new(AppState {
            config: Config {
                server: ServerConfig {
                    host: "127.0.0.1".to_string(),
                    port: 0,
                    frontend_dir: "./public".to_string(),
                },
                crossword: CrosswordConfig::default(),
            },
            store: Box::new(MemStorage::new()),
        });
        create_routes().with_state(state)
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_json(response: Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_health_check() {
        let response = test_app()
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["status"], "ok");
        assert_eq!(body["service"], "crossword-backend");
    }

    #[tokio::test]
    async fn test_create_crossword() {
        let response = test_app()
            .oneshot(post_json(
                "/api/crossword",
                json!({ "wordList": "cat, dog, car" }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;

        let words = body["words"].as_array().unwrap();
        assert_eq!(words.len(), 3);
        assert_eq!(words[0]["id"], 1);
        assert_eq!(words[0]["word"], "cat");
        assert_eq!(
            words[0]["position"],
            json!({ "x": 1, "y": 2, "direction": "across", "number": 1 })
        );
        assert_eq!(words[1]["word"], "dog");
        assert!(words[1]["position"].is_null());
        assert_eq!(
            words[2]["position"],
            json!({ "x": 1, "y": 2, "direction": "down", "number": 2 })
        );
        assert!(words[0]["createdAt"].is_string());

        assert_eq!(body["unplaced"], json!(["dog"]));
        let grid = body["grid"].as_array().unwrap();
        assert_eq!(grid.len(), 5);
        assert_eq!(grid[2], json!(["", "c", "a", "t", ""]));
        assert_eq!(grid[4][1], "r");
        assert_eq!(grid[0][0], "");
    }

    #[tokio::test]
    async fn test_positions_follow_words_when_sorting_reorders() {
        let response = test_app()
            .oneshot(post_json(
                "/api/crossword",
                json!({ "wordList": "ant, elephant" }),
            ))
            .await
            .unwrap();

        let body = body_json(response).await;
        let words = body["words"].as_array().unwrap();
        assert_eq!(words[0]["word"], "ant");
        assert_eq!(
            words[0]["position"],
            json!({ "x": 6, "y": 5, "direction": "down", "number": 2 })
        );
        assert_eq!(words[1]["word"], "elephant");
        assert_eq!(
            words[1]["position"],
            json!({ "x": 1, "y": 5, "direction": "across", "number": 1 })
        );
    }

    #[tokio::test]
    async fn test_too_few_words_is_bad_request() {
        let response = test_app()
            .oneshot(post_json("/api/crossword", json!({ "wordList": "cat, a" })))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["message"], "Please enter at least 2 words");
    }

    fn post_raw(uri: &str, body: &'static str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body))
            .unwrap()
    }

    #[tokio::test]
    async fn test_malformed_body_is_bad_request_with_message() {
        let bodies = [r#"{}"#, "not json", r#"{"wordList": 5}"#];

        for body in bodies {
            for uri in ["/api/crossword", "/api/crossword/svg"] {
                let response = test_app().oneshot(post_raw(uri, body)).await.unwrap();

                assert_eq!(
                    response.status(),
                    StatusCode::BAD_REQUEST,
                    "{} with body {}",
                    uri,
                    body
                );
                let json = body_json(response).await;
                assert!(
                    json["message"].as_str().is_some_and(|m| !m.is_empty()),
                    "{} with body {} returned {}",
                    uri,
                    body,
                    json
                );
            }
        }
    }

    #[tokio::test]
    async fn test_missing_word_list_is_reported() {
        let response = test_app()
            .oneshot(post_json("/api/crossword", json!({})))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert!(body["message"].as_str().unwrap().contains("wordList"));
    }

    #[tokio::test]
    async fn test_words_are_listed_after_generation() {
        let app = test_app();
        app.clone()
            .oneshot(post_json("/api/crossword", json!({ "wordList": "cat, car" })))
            .await
            .unwrap();

        let response = app
            .oneshot(Request::builder().uri("/api/words").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        let words = body.as_array().unwrap();
        assert_eq!(words.len(), 2);
        assert!(words.iter().all(|w| !w["position"].is_null()));
    }

    #[tokio::test]
    async fn test_export_svg() {
        let response = test_app()
            .oneshot(post_json(
                "/api/crossword/svg?answers=true",
                json!({ "wordList": "cat, car" }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::CONTENT_TYPE], "image/svg+xml");
        assert_eq!(
            response.headers()[header::CONTENT_DISPOSITION],
            "attachment; filename=\"crossword-puzzle.svg\""
        );

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let svg = String::from_utf8(bytes.to_vec()).unwrap();
        assert!(svg.starts_with("<svg"));
        assert_eq!(svg.matches(r#"class="letter""#).count(), 5);
    }
}

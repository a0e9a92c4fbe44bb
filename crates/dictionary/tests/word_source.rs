use std::collections::HashMap;

use axum::{
    extract::{Path, Query},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use dictionary::{Dictionary, DictionaryError, Endpoints, PartOfSpeech, WordSource};
use serde_json::{json, Value};

async fn serve(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

fn dictionary_for(base: &str) -> Dictionary {
    Dictionary::with_endpoints(Endpoints {
        random_word: format!("{base}/api"),
        dictionary: format!("{base}/api/v2/entries/en"),
    })
}

fn random_word(word: &'static str) -> Router {
    Router::new().route(
        "/api",
        get(move |Query(params): Query<HashMap<String, String>>| async move {
            if params.get("words").map(String::as_str) == Some("1") {
                (StatusCode::OK, Json(json!([word])))
            } else {
                (StatusCode::BAD_REQUEST, Json(json!({ "error": "words" })))
            }
        }),
    )
}

fn ephemeral_entry() -> Value {
    json!([{
        "word": "ephemeral",
        "phonetic": "/ɪˈfɛm(ə)ɹəl/",
        "phonetics": [{ "text": "/ɪˈfɛm(ə)ɹəl/", "audio": "" }],
        "meanings": [{
            "partOfSpeech": "adjective",
            "definitions": [{ "definition": "lasting for a very short time" }]
        }]
    }])
}

#[tokio::test]
async fn fetches_and_stamps_the_word_of_the_day() {
    let app = random_word("ephemeral").route(
        "/api/v2/entries/en/:word",
        get(|Path(word): Path<String>| async move {
            if word == "ephemeral" {
                (StatusCode::OK, Json(ephemeral_entry()))
            } else {
                (StatusCode::NOT_FOUND, Json(json!({ "title": "No Definitions Found" })))
            }
        }),
    );
    let base = serve(app).await;

    let word = dictionary_for(&base).fetch_daily_word().await.unwrap();

    assert_eq!(word.word, "ephemeral");
    assert_eq!(word.meanings.len(), 1);
    assert_eq!(word.meanings[0].part_of_speech, PartOfSpeech::Adjective);
    assert_eq!(
        word.meanings[0].definitions[0].definition,
        "lasting for a very short time"
    );
    assert!(word.meanings[0].definitions[0].synonyms.is_empty());
    assert!(word.fetch_date.is_some());
}

#[tokio::test]
async fn unknown_word_is_reported_as_not_found() {
    let app = random_word("zzzzz").route(
        "/api/v2/entries/en/:word",
        get(|| async { (StatusCode::NOT_FOUND, Json(json!({ "title": "No Definitions Found" }))) }),
    );
    let base = serve(app).await;

    let error = dictionary_for(&base).fetch_daily_word().await.unwrap_err();

    match error {
        DictionaryError::NotFound(not_found) => assert_eq!(not_found.word(), "zzzzz"),
        other => panic!("expected not found, got {other:?}"),
    }
}

#[tokio::test]
async fn random_word_failure_aborts_before_lookup() {
    let app = Router::new()
        .route(
            "/api",
            get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, Json(json!([]))) }),
        )
        .route(
            "/api/v2/entries/en/:word",
            get(|| async { (StatusCode::OK, Json(ephemeral_entry())) }),
        );
    let base = serve(app).await;

    let error = dictionary_for(&base).fetch_daily_word().await.unwrap_err();

    assert!(matches!(
        error,
        DictionaryError::Status { service: "random word", status: 500 }
    ));
}

#[tokio::test]
async fn empty_random_word_list_is_unavailable() {
    let app = Router::new().route("/api", get(|| async { Json(json!([])) }));
    let base = serve(app).await;

    let error = dictionary_for(&base).fetch_daily_word().await.unwrap_err();

    assert!(matches!(error, DictionaryError::Empty("random word")));
}

#[tokio::test]
async fn empty_or_malformed_definitions_are_unavailable() {
    let app = Router::new()
        .route("/api/v2/entries/en/empty", get(|| async { Json(json!([])) }))
        .route(
            "/api/v2/entries/en/garbled",
            get(|| async { Json(json!({ "unexpected": true })) }),
        )
        .route(
            "/api/v2/entries/en/limited",
            get(|| async { (StatusCode::TOO_MANY_REQUESTS, Json(json!({}))) }),
        );
    let base = serve(app).await;
    let dict = dictionary_for(&base);

    let empty = dict.get_definition("empty").await.unwrap_err();
    assert!(matches!(empty, DictionaryError::Empty("dictionary")));

    let garbled = dict.get_definition("garbled").await.unwrap_err();
    assert!(matches!(garbled, DictionaryError::Deserialize(_)));

    let limited = dict.get_definition("limited").await.unwrap_err();
    assert!(matches!(
        limited,
        DictionaryError::Status { service: "dictionary", status: 429 }
    ));
    assert!(!limited.is_not_found());
}

#[tokio::test]
async fn reserved_characters_stay_inside_the_word() {
    let app = Router::new().route(
        "/api/v2/entries/en/:word",
        get(|Path(word): Path<String>| async move {
            Json(json!([{
                "word": word,
                "meanings": [{
                    "partOfSpeech": "noun",
                    "definitions": [{ "definition": "echo" }]
                }]
            }]))
        }),
    );
    let base = serve(app).await;

    let word = dictionary_for(&base).get_definition("and/or?#").await.unwrap();

    assert_eq!(word.word, "and/or?#");
}

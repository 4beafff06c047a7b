use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use dev_quiz::{Difficulty, GeminiSource, GeneratorConfig, QuestionSource, QuizGenerationError, Topic};
use serde_json::json;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

/// Loopback HTTP server that answers every request with one canned response.
struct CannedServer {
    base_url: String,
    hits: Arc<AtomicUsize>,
}

impl CannedServer {
    async fn start(status: &'static str, body: String) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        let hits = Arc::new(AtomicUsize::new(0));

        let counter = Arc::clone(&hits);
        tokio::spawn(async move {
            while let Ok((stream, _)) = listener.accept().await {
                counter.fetch_add(1, Ordering::SeqCst);
                respond(stream, status, &body).await;
            }
        });

        Self {
            base_url: format!("http://127.0.0.1:{port}"),
            hits,
        }
    }

    fn source(&self) -> GeminiSource {
        GeminiSource::new(GeneratorConfig {
            api_key: "test-key".to_string(),
            base_url: self.base_url.clone(),
            model: "test-model".to_string(),
        })
    }

    fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }
}

async fn respond(mut stream: TcpStream, status: &str, body: &str) {
    let mut request = Vec::new();
    let mut buf = [0u8; 4096];

    let header_end = loop {
        let n = stream.read(&mut buf).await.unwrap();
        if n == 0 {
            return;
        }
        request.extend_from_slice(&buf[..n]);
        if let Some(pos) = request.windows(4).position(|w| w == b"\r\n\r\n") {
            break pos + 4;
        }
    };

    let headers = String::from_utf8_lossy(&request[..header_end]).to_ascii_lowercase();
    let content_length = headers
        .lines()
        .find_map(|line| line.strip_prefix("content-length:"))
        .and_then(|value| value.trim().parse::<usize>().ok())
        .unwrap_or(0);

    while request.len() < header_end + content_length {
        let n = stream.read(&mut buf).await.unwrap();
        if n == 0 {
            break;
        }
        request.extend_from_slice(&buf[..n]);
    }

    let response = format!(
        "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
        body.len()
    );
    stream.write_all(response.as_bytes()).await.unwrap();
    stream.shutdown().await.unwrap();
}

/// A `generateContent` reply whose text is `text`.
fn reply_with_text(text: String) -> String {
    json!({
        "candidates": [{
            "content": { "parts": [{ "text": text }] }
        }]
    })
    .to_string()
}

fn questions_json(count: usize) -> String {
    let questions: Vec<_> = (0..count)
        .map(|i| {
            json!({
                "id": format!("q{i}"),
                "question": format!("What does snippet {i} print?"),
                "codeSnippet": "print(1)",
                "options": ["1", "2", "3", "4"],
                "correctAnswerIndex": i % 4,
                "explanation": "It prints one."
            })
        })
        .collect();
    serde_json::Value::Array(questions).to_string()
}

#[tokio::test]
async fn test_well_formed_reply_yields_questions() {
    let server = CannedServer::start("200 OK", reply_with_text(questions_json(5))).await;

    let questions = server
        .source()
        .fetch_questions(Topic::Python, Difficulty::Beginner, 5)
        .await
        .unwrap();

    assert_eq!(questions.len(), 5);
    assert_eq!(questions[2].correct_answer, 2);
    assert_eq!(server.hits(), 1);
}

#[tokio::test]
async fn test_quota_exhausted_is_rate_limited() {
    let body = json!({
        "error": { "code": 429, "status": "RESOURCE_EXHAUSTED", "message": "Quota exceeded" }
    })
    .to_string();
    let server = CannedServer::start("429 Too Many Requests", body).await;

    let err = server
        .source()
        .fetch_questions(Topic::Cpp, Difficulty::Advanced, 10)
        .await
        .unwrap_err();

    assert_eq!(err, QuizGenerationError::RateLimited);
    assert_eq!(server.hits(), 1);
}

#[tokio::test]
async fn test_empty_question_array_is_generation_failure() {
    let server = CannedServer::start("200 OK", reply_with_text("[]".to_string())).await;

    let err = server
        .source()
        .fetch_questions(Topic::Java, Difficulty::Intermediate, 10)
        .await
        .unwrap_err();

    assert!(matches!(err, QuizGenerationError::GenerationFailed { .. }));
    assert_eq!(server.hits(), 1);
}

#[tokio::test]
async fn test_reply_without_candidates_is_generation_failure() {
    let server = CannedServer::start("200 OK", "{}".to_string()).await;

    let err = server
        .source()
        .fetch_questions(Topic::Python, Difficulty::Beginner, 5)
        .await
        .unwrap_err();

    assert!(matches!(err, QuizGenerationError::GenerationFailed { .. }));
    assert_eq!(server.hits(), 1);
}

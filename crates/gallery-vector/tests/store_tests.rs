use std::fs;
use std::path::Path;
use std::time::Duration;

use gallery_core::Error;
use gallery_vector::{EmbeddingSource, EmbeddingStore};
use tempfile::TempDir;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

const TIMEOUT: Duration = Duration::from_secs(5);

fn write(dir: &TempDir, name: &str, body: &str) -> EmbeddingSource {
    let path = dir.path().join(name);
    fs::write(&path, body).expect("write fixture");
    EmbeddingSource::File(path)
}

#[tokio::test]
async fn loads_records_in_file_order() {
    let tmp = TempDir::new().expect("tmp");
    let source = write(
        &tmp,
        "image-embeddings.json",
        r#"{"images": [
            {"id": "harbor", "url": "images/harbor.jpg", "embedding": [0.1, 0.2, 0.3]},
            {"id": "forest", "url": "images/forest.jpg", "embedding": [0.3, 0.2, 0.1], "caption": "ignored"}
        ]}"#,
    );
    let store = EmbeddingStore::load(&source, TIMEOUT).await.expect("load");
    assert_eq!(store.len(), 2);
    assert_eq!(store.dim(), Some(3));
    assert_eq!(store.records()[0].id, "harbor");
    assert_eq!(store.records()[1].url, "images/forest.jpg");
}

#[tokio::test]
async fn empty_image_list_is_an_empty_store() {
    let tmp = TempDir::new().expect("tmp");
    let source = write(&tmp, "e.json", r#"{"images": []}"#);
    let store = EmbeddingStore::load(&source, TIMEOUT).await.expect("load");
    assert!(store.is_empty());
    assert_eq!(store.dim(), None);
}

#[tokio::test]
async fn missing_file_is_a_load_error() {
    let tmp = TempDir::new().expect("tmp");
    let source = EmbeddingSource::File(tmp.path().join("nope.json"));
    let err = EmbeddingStore::load(&source, TIMEOUT).await.expect_err("should fail");
    assert!(matches!(err, Error::Load(_)), "{err}");
}

#[tokio::test]
async fn malformed_documents_are_rejected() {
    let tmp = TempDir::new().expect("tmp");
    for (name, body) in [
        ("not-json.json", "{ images: "),
        ("no-images.json", r#"{"pictures": []}"#),
        ("bad-vector.json", r#"{"images": [{"id": "a", "url": "a.jpg", "embedding": "0.1,0.2"}]}"#),
        ("no-url.json", r#"{"images": [{"id": "a", "embedding": [0.1]}]}"#),
    ] {
        let err = EmbeddingStore::load(&write(&tmp, name, body), TIMEOUT).await.expect_err(name);
        assert!(matches!(err, Error::Load(_)), "{name}: {err}");
    }
}

#[test]
fn inconsistent_dimensions_fail_the_whole_load() {
    let err = EmbeddingStore::from_json(
        br#"{"images": [
            {"id": "a", "url": "a.jpg", "embedding": [1, 0]},
            {"id": "b", "url": "b.jpg", "embedding": [1, 0, 0]}
        ]}"#,
    )
    .expect_err("mixed dims");
    let msg = err.to_string();
    assert!(msg.contains("'b'") && msg.contains("3-d") && msg.contains("expected 2"), "{msg}");
}

#[test]
fn empty_embedding_is_rejected() {
    let err = EmbeddingStore::from_json(br#"{"images": [{"id": "a", "url": "a.jpg", "embedding": []}]}"#)
        .expect_err("empty embedding");
    assert!(matches!(err, Error::Load(_)));
}

#[test]
fn source_parsing_distinguishes_urls_and_paths() {
    let base = Path::new("/srv/gallery");
    assert_eq!(
        EmbeddingSource::parse("https://example.com/e.json", base),
        EmbeddingSource::Url("https://example.com/e.json".to_string())
    );
    assert_eq!(
        EmbeddingSource::parse("image-embeddings.json", base),
        EmbeddingSource::File(base.join("image-embeddings.json"))
    );
    assert_eq!(EmbeddingSource::parse("/abs/e.json", base).to_string(), "/abs/e.json");
}

/// Serve one HTTP connection on localhost. `reply` of `None` accepts and never answers.
async fn serve_once(reply: Option<String>) -> EmbeddingSource {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let url = format!("http://{}/image-embeddings.json", listener.local_addr().expect("addr"));
    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.expect("accept");
        let mut buf = [0u8; 1024];
        let _ = socket.read(&mut buf).await;
        match reply {
            Some(reply) => {
                let _ = socket.write_all(reply.as_bytes()).await;
                let _ = socket.shutdown().await;
            }
            None => tokio::time::sleep(Duration::from_secs(30)).await,
        }
    });
    EmbeddingSource::Url(url)
}

#[tokio::test]
async fn silent_server_times_out() {
    let source = serve_once(None).await;
    let err = EmbeddingStore::load(&source, Duration::from_millis(100)).await.expect_err("should time out");
    assert!(matches!(err, Error::Timeout { operation: "embeddings load", .. }), "{err}");
    assert_eq!(err.to_string(), "embeddings load timed out after 100ms");
}

#[tokio::test]
async fn http_error_status_is_a_load_error() {
    let source = serve_once(Some("HTTP/1.1 404 Not Found\r\nContent-Length: 0\r\nConnection: close\r\n\r\n".to_string())).await;
    let err = EmbeddingStore::load(&source, TIMEOUT).await.expect_err("404");
    assert!(matches!(err, Error::Load(ref msg) if msg.contains("404")), "{err}");
}

#[tokio::test]
async fn loads_from_url() {
    const BODY: &str = r#"{"images": [{"id": "dock", "url": "images/dock.jpg", "embedding": [0.5, 0.5]}]}"#;
    let reply = format!(
        "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{BODY}",
        BODY.len()
    );
    let source = serve_once(Some(reply)).await;
    let store = EmbeddingStore::load(&source, TIMEOUT).await.expect("load over http");
    assert_eq!(store.len(), 1);
    assert_eq!(store.records()[0].id, "dock");
}

use dashboard_engine::{
    FailureKind, JobSuccess, ReqwestTransport, Transport, TransportSettings, UploadFile,
    SERVER_ERROR_FALLBACK,
};
use pretty_assertions::assert_eq;
use wiremock::matchers::{body_string_contains, header, header_regex, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const JOB_ROUTES: [&str; 6] = [
    "sheets/updateCashPosition",
    "sheets/syncPayments",
    "transactions/sync",
    "invoices/populateRBGInvoices",
    "statements/card1212",
    "statements/card0296",
];

fn transport_for(server: &MockServer) -> ReqwestTransport {
    ReqwestTransport::new(TransportSettings::new(server.uri())).expect("client")
}

#[tokio::test]
async fn post_returns_success_message_for_every_route() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(header("content-type", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"message": "X"})))
        .mount(&server)
        .await;

    let transport = transport_for(&server);
    for route in JOB_ROUTES {
        let result = transport.invoke(route, None).await;
        assert_eq!(
            result,
            Ok(JobSuccess {
                message: "X".to_string()
            })
        );
    }

    let requests = server.received_requests().await.expect("recorded");
    let paths: Vec<_> = requests.iter().map(|r| r.url.path().to_string()).collect();
    let expected: Vec<_> = JOB_ROUTES.iter().map(|r| format!("/{r}")).collect();
    assert_eq!(paths, expected);
    assert!(requests.iter().all(|r| r.body.is_empty()));
}

#[tokio::test]
async fn error_status_uses_body_message_for_every_route() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(500)
                .set_body_json(serde_json::json!({"code": 500, "message": "boom"})),
        )
        .mount(&server)
        .await;

    let transport = transport_for(&server);
    for route in JOB_ROUTES {
        let err = transport.invoke(route, None).await.unwrap_err();
        assert_eq!(err.kind, FailureKind::HttpStatus(500));
        assert_eq!(err.message, "boom");
    }
}

#[tokio::test]
async fn error_status_with_empty_body_uses_fallback() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/transactions/sync"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let err = transport_for(&server)
        .invoke("transactions/sync", None)
        .await
        .unwrap_err();
    assert_eq!(err.message, SERVER_ERROR_FALLBACK);
    assert_eq!(err.message, "Server error");
}

#[tokio::test]
async fn error_status_without_message_field_uses_fallback() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(502).set_body_json(serde_json::json!({"code": 502})))
        .mount(&server)
        .await;

    let err = transport_for(&server)
        .invoke("sheets/syncPayments", None)
        .await
        .unwrap_err();
    assert_eq!(err.kind, FailureKind::HttpStatus(502));
    assert_eq!(err.message, SERVER_ERROR_FALLBACK);
}

/// Serves one response whose body stops short of its declared length.
fn serve_truncated_once(status_line: &'static str) -> std::net::SocketAddr {
    use std::io::{Read, Write};

    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind");
    let addr = listener.local_addr().expect("addr");
    std::thread::spawn(move || {
        let (mut stream, _) = listener.accept().expect("accept");
        let mut request = Vec::new();
        let mut chunk = [0u8; 1024];
        while !request.windows(4).any(|window| window == b"\r\n\r\n") {
            match stream.read(&mut chunk) {
                Ok(0) | Err(_) => break,
                Ok(n) => request.extend_from_slice(&chunk[..n]),
            }
        }
        let response = format!(
            "HTTP/1.1 {status_line}\r\ncontent-type: application/json\r\ncontent-length: 64\r\n\r\n{{\"code\":500,\"mess"
        );
        let _ = stream.write_all(response.as_bytes());
    });
    addr
}

#[tokio::test]
async fn error_status_with_truncated_body_keeps_status() {
    let addr = serve_truncated_once("500 Internal Server Error");
    let transport =
        ReqwestTransport::new(TransportSettings::new(format!("http://{addr}"))).expect("client");

    let err = transport.invoke("transactions/sync", None).await.unwrap_err();
    assert_eq!(err.kind, FailureKind::HttpStatus(500));
    assert_eq!(err.message, SERVER_ERROR_FALLBACK);
}

#[tokio::test]
async fn success_with_malformed_body_is_failure() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>not json</html>"))
        .mount(&server)
        .await;

    let err = transport_for(&server)
        .invoke("invoices/populateRBGInvoices", None)
        .await
        .unwrap_err();
    assert_eq!(err.kind, FailureKind::MalformedResponse);
    assert!(!err.message.is_empty());
}

#[tokio::test]
async fn leading_slash_route_hits_single_slash_path() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/sheets/syncPayments"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"message": "synced"})))
        .expect(1)
        .mount(&server)
        .await;

    let base = format!("{}/", server.uri());
    let transport = ReqwestTransport::new(TransportSettings::new(base)).expect("client");
    let result = transport.invoke("/sheets/syncPayments", None).await;
    assert_eq!(result.map(|ok| ok.message), Ok("synced".to_string()));
}

#[tokio::test]
async fn upload_sends_multipart_file_field() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/statements/card1212"))
        .and(header_regex("content-type", "^multipart/form-data; boundary="))
        .and(body_string_contains(r#"name="file"; filename="march.csv""#))
        .and(body_string_contains("date,amount"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"message": "imported"})))
        .expect(1)
        .mount(&server)
        .await;

    let upload = UploadFile {
        file_name: "march.csv".to_string(),
        bytes: b"date,amount\n2025-03-01,12.50\n".to_vec(),
    };
    let result = transport_for(&server)
        .invoke("statements/card1212", Some(upload))
        .await;
    assert_eq!(result.map(|ok| ok.message), Ok("imported".to_string()));
}

#[tokio::test]
async fn connection_refused_is_network_failure() {
    // Reserve a port, then release it so nothing is listening there.
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);

    let transport =
        ReqwestTransport::new(TransportSettings::new(format!("http://{addr}"))).expect("client");
    let err = transport.invoke("sheets/updateCashPosition", None).await.unwrap_err();
    assert_eq!(err.kind, FailureKind::Network);
    assert!(!err.message.is_empty());

    let err = transport.health().await.unwrap_err();
    assert_eq!(err.kind, FailureKind::Network);
}

#[tokio::test]
async fn health_returns_status_field() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/actuator/health"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"status": "UP"})))
        .mount(&server)
        .await;

    assert_eq!(transport_for(&server).health().await, Ok("UP".to_string()));
}

#[tokio::test]
async fn health_error_status_describes_code() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/actuator/health"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let err = transport_for(&server).health().await.unwrap_err();
    assert_eq!(err.kind, FailureKind::HttpStatus(503));
    assert_eq!(err.message, "HTTP error! status: 503");
}

#[tokio::test]
async fn health_without_status_field_is_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/actuator/health"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"groups": []})))
        .mount(&server)
        .await;

    let err = transport_for(&server).health().await.unwrap_err();
    assert_eq!(err.kind, FailureKind::MalformedResponse);
}

// テスト用ループバックHTTPサーバー

use http_body_util::{BodyExt, Full};
use hyper::body::{Bytes, Incoming};
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper::{Request, Response, StatusCode};
use hyper_util::rt::TokioIo;
use std::convert::Infallible;
use std::sync::{Arc, Mutex};

/// サーバーが受信したリクエスト
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub body: String,
}

type Handler = Arc<dyn Fn(&RecordedRequest) -> (StatusCode, String) + Send + Sync>;
type Recorded = Arc<Mutex<Vec<RecordedRequest>>>;

/// 127.0.0.1の空きポートで待ち受け、固定のハンドラーで応答するサーバー
pub struct TestServer {
    pub base_url: String,
    requests: Recorded,
}

impl TestServer {
    /// サーバーをバックグラウンドで開始する
    pub async fn start<F>(handler: F) -> Self
    where
        F: Fn(&RecordedRequest) -> (StatusCode, String) + Send + Sync + 'static,
    {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let handler: Handler = Arc::new(handler);
        let requests: Recorded = Arc::new(Mutex::new(Vec::new()));
        let recorded = Arc::clone(&requests);

        tokio::spawn(async move {
            while let Ok((stream, _)) = listener.accept().await {
                let handler = Arc::clone(&handler);
                let recorded = Arc::clone(&recorded);
                tokio::spawn(async move {
                    let io = TokioIo::new(stream);
                    let service = service_fn(move |req| {
                        handle_request(req, Arc::clone(&handler), Arc::clone(&recorded))
                    });
                    if let Err(err) = http1::Builder::new().serve_connection(io, service).await {
                        log::error!("HTTP接続処理エラー: {err}");
                    }
                });
            }
        });

        Self {
            base_url: format!("http://{addr}"),
            requests,
        }
    }

    /// これまでに受信したリクエストを取得する
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }
}

async fn handle_request(
    req: Request<Incoming>,
    handler: Handler,
    recorded: Recorded,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let method = req.method().to_string();
    let path = req.uri().path().to_string();
    let body = match req.into_body().collect().await {
        Ok(collected) => String::from_utf8_lossy(&collected.to_bytes()).into_owned(),
        Err(_) => String::new(),
    };

    let request = RecordedRequest { method, path, body };
    let (status, response_body) = handler(&request);
    recorded.lock().unwrap().push(request);

    Ok(Response::builder()
        .status(status)
        .header("Content-Type", "application/json")
        .body(Full::new(Bytes::from(response_body)))
        .unwrap())
}

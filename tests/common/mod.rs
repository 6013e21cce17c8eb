//! Shared utilities for integration testing.

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

/// A canned provider reply.
#[derive(Clone)]
pub struct Reply {
    pub status: u16,
    pub body: String,
    pub delay: Duration,
}

impl Reply {
    pub fn ok(body: impl Into<String>) -> Self {
        Self {
            status: 200,
            body: body.into(),
            delay: Duration::ZERO,
        }
    }

    pub fn status(status: u16) -> Self {
        Self {
            status,
            body: "{}".to_string(),
            delay: Duration::ZERO,
        }
    }

    pub fn after(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

fn status_line(status: u16) -> String {
    let reason = reqwest::StatusCode::from_u16(status)
        .ok()
        .and_then(|code| code.canonical_reason())
        .unwrap_or("Unknown");
    format!("{} {}", status, reason)
}

/// Start a mock provider on an ephemeral port and return its base URL.
///
/// Every request is answered with `reply` after its delay, regardless of path.
pub async fn start_provider(reply: Reply) -> String {
    start_programmable_provider(move || {
        let reply = reply.clone();
        async move { reply }
    })
    .await
}

/// Start a mock provider whose reply is computed per request.
pub async fn start_programmable_provider<F, Fut>(f: F) -> String
where
    F: Fn() -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Reply> + Send + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr: SocketAddr = listener.local_addr().unwrap();
    let f = Arc::new(f);

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut socket, _)) => {
                    let f = f.clone();
                    tokio::spawn(async move {
                        // Drain the request head; the reply does not depend on it.
                        let mut buf = [0u8; 2048];
                        let _ = socket.read(&mut buf).await;

                        let reply = f().await;
                        tokio::time::sleep(reply.delay).await;

                        let response = format!(
                            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                            status_line(reply.status),
                            reply.body.len(),
                            reply.body
                        );
                        let _ = socket.write_all(response.as_bytes()).await;
                        let _ = socket.shutdown().await;
                    });
                }
                Err(_) => break,
            }
        }
    });

    format!("http://{}", addr)
}

/// A base URL nothing listens on.
pub fn closed_port_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    format!("http://127.0.0.1:{}", port)
}

pub const VIACEP_BODY: &str = r#"{"cep":"22735-140","logradouro":"Rua Mário Covas Júnior","complemento":"","bairro":"Taquara","localidade":"Rio de Janeiro","uf":"RJ","ibge":"3304557","gia":"","ddd":"21","siafi":"6001"}"#;

pub const OPENCEP_BODY: &str = r#"{"cep":"22735-140","logradouro":"Rua Mário Covas Júnior","complemento":"","bairro":"Taquara","localidade":"Rio de Janeiro","uf":"RJ","ibge":"3304557"}"#;

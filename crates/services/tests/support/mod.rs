#![allow(dead_code)]

use std::net::SocketAddr;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

pub const FEED: &str = r#"[
    {
        "title": "Mathematics",
        "desc": "Did you pass the third grade?",
        "questions": [
            { "text": "What is 2+2?", "answer": "1", "answers": ["4", "22", "An irrational number", "Nobody knows"] },
            { "text": "What is 3*3?", "answer": "3", "answers": ["6", "33", "9", "3"] }
        ]
    },
    {
        "title": "Marvel Super Heroes",
        "desc": "Avengers, Assemble!",
        "questions": [
            { "text": "Who is Iron Man?", "answer": "1", "answers": ["Tony Stark", "Obadiah Stane", "A rock hit by Megadeth", "Nobody knows"] }
        ]
    }
]"#;

/// Serve `body` with `status` to every connection until the test runtime shuts down.
pub async fn serve(status: &'static str, body: &'static str) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        while let Ok((mut stream, _)) = listener.accept().await {
            let mut request = Vec::new();
            let mut buf = [0_u8; 1024];
            loop {
                let n = stream.read(&mut buf).await.unwrap_or(0);
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
                if request.windows(4).any(|w| w == b"\r\n\r\n") {
                    break;
                }
            }
            let response = format!(
                "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            let _ = stream.write_all(response.as_bytes()).await;
            let _ = stream.shutdown().await;
        }
    });
    format!("http://{addr}/questions.json")
}

/// An address nothing is listening on.
pub async fn closed_addr() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    addr
}

pub fn client() -> reqwest::Client {
    reqwest::Client::builder().no_proxy().build().unwrap()
}

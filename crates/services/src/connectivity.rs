use std::net::SocketAddr;
use std::time::Duration;

use async_trait::async_trait;
use tokio::net::TcpStream;
use url::{Host, Url};

/// Checks whether the network path to a content source looks usable before a
/// transfer is attempted.
#[async_trait]
pub trait ConnectivityProbe: Send + Sync {
    async fn is_reachable(&self, url: &Url) -> bool;
}

/// Always reports reachable and leaves failure detection to the transfer itself.
#[derive(Debug, Clone, Copy, Default)]
pub struct AssumeReachable;

#[async_trait]
impl ConnectivityProbe for AssumeReachable {
    async fn is_reachable(&self, _url: &Url) -> bool {
        true
    }
}

/// Opens a TCP connection to the source's host and port.
#[derive(Debug, Clone, Copy)]
pub struct TcpProbe {
    timeout: Duration,
}

impl TcpProbe {
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(3);

    #[must_use]
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }
}

impl Default for TcpProbe {
    fn default() -> Self {
        Self::new(Self::DEFAULT_TIMEOUT)
    }
}

#[async_trait]
impl ConnectivityProbe for TcpProbe {
    async fn is_reachable(&self, url: &Url) -> bool {
        let Some(port) = url.port_or_known_default() else {
            return false;
        };
        let connect = async {
            match url.host() {
                Some(Host::Domain(domain)) => TcpStream::connect((domain, port)).await,
                Some(Host::Ipv4(ip)) => TcpStream::connect(SocketAddr::from((ip, port))).await,
                Some(Host::Ipv6(ip)) => TcpStream::connect(SocketAddr::from((ip, port))).await,
                None => Err(std::io::ErrorKind::InvalidInput.into()),
            }
        };

        match tokio::time::timeout(self.timeout, connect).await {
            Ok(Ok(_stream)) => true,
            Ok(Err(err)) => {
                tracing::debug!(%url, %err, "connectivity probe failed");
                false
            }
            Err(_) => {
                tracing::debug!(%url, timeout = ?self.timeout, "connectivity probe timed out");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::net::TcpListener;

    #[tokio::test]
    async fn assume_reachable_is_always_true() {
        let url = Url::parse("http://192.0.2.1/questions.json").unwrap();
        assert!(AssumeReachable.is_reachable(&url).await);
    }

    #[tokio::test]
    async fn tcp_probe_sees_listening_socket() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let url = Url::parse(&format!("http://{addr}/q.json")).unwrap();

        assert!(TcpProbe::default().is_reachable(&url).await);
    }

    #[tokio::test]
    async fn tcp_probe_reports_closed_port() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        let url = Url::parse(&format!("http://{addr}/q.json")).unwrap();

        assert!(!TcpProbe::new(Duration::from_millis(500)).is_reachable(&url).await);
    }
}

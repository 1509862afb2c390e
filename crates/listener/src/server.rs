use std::io::{self, Write};
use std::net::SocketAddr;

use feed_http::connection::{ReaderConfig, StreamReader};
use feed_http::protocol::{ParseError, Request};
use tokio::io::AsyncRead;
use tokio::net::TcpListener;
use tracing::{error, info, warn};

use crate::ListenerConfig;

/// Accepts connections and prints every request read from them.
///
/// Each connection gets its own task and is closed after one request, whether
/// it parsed or not. A bad request only ends its own connection.
#[derive(Debug)]
pub struct Listener {
    tcp_listener: TcpListener,
    reader: ReaderConfig,
}

impl Listener {
    pub async fn bind(config: &ListenerConfig) -> io::Result<Self> {
        let tcp_listener = TcpListener::bind(config.address()).await?;
        Ok(Self { tcp_listener, reader: config.reader() })
    }

    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.tcp_listener.local_addr()
    }

    pub async fn run(self) {
        loop {
            let (tcp_stream, remote_addr) = match self.tcp_listener.accept().await {
                Ok(stream_and_addr) => stream_and_addr,
                Err(e) => {
                    warn!(cause = %e, "failed to accept");
                    continue;
                }
            };

            let reader = self.reader;
            tokio::spawn(async move {
                if let Ok(request) = handle_connection(tcp_stream, remote_addr, reader).await {
                    print_request(&request);
                }
            });
        }
    }
}

/// Reads one request from `stream`, logging how the connection ended.
pub async fn handle_connection<R>(stream: R, remote_addr: SocketAddr, config: ReaderConfig) -> Result<Request, ParseError>
where
    R: AsyncRead + Unpin,
{
    let mut reader = StreamReader::with_config(stream, config);

    match reader.read_request().await {
        Ok(request) => {
            info!(%remote_addr, body_size = request.body().len(), "finished process, connection shutdown");
            Ok(request)
        }
        Err(e) if e.is_truncated() => {
            warn!(%remote_addr, cause = %e, "peer closed the connection early");
            Err(e)
        }
        Err(e) => {
            error!(%remote_addr, cause = %e, "can't read request, connection shutdown");
            Err(e)
        }
    }
}

fn print_request(request: &Request) {
    let mut stdout = io::stdout().lock();
    if let Err(e) = writeln!(stdout, "{request}").and_then(|()| stdout.flush()) {
        error!(cause = %e, "can't print request");
    }
}

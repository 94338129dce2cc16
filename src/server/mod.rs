//! One-shot HTTP server for handing a trace to the browser-based viewer.
//!
//! Serves a single byte buffer on a loopback address. Any GET, regardless of
//! path, receives the full buffer with a JSON content type and a
//! CORS-allow-all header (the Perfetto UI fetches the trace cross-origin
//! from its own host). After the first successful GET the server shuts down
//! gracefully and [`OneShotServer::serve`] returns.
//!
//! The "already served" state is a channel captured by the request handler,
//! not a process-wide flag.

use crate::utils::error::ServeError;
use hyper::body::Bytes;
use hyper::header::{self, HeaderValue};
use hyper::service::{make_service_fn, service_fn};
use hyper::{Body, Method, Request, Response, Server};
use log::debug;
use std::convert::Infallible;
use std::net::{SocketAddr, TcpListener};
use tokio::sync::mpsc;

/// A server that serves one payload to one GET request, then terminates
///
/// **Public** - used by the serve command
pub struct OneShotServer {
    listener: TcpListener,
    data: Bytes,
}

impl OneShotServer {
    /// Bind the listener without starting to serve
    ///
    /// **Public** - binding is split from serving so callers can learn the
    /// bound port (relevant when `addr` uses port 0)
    pub fn bind(addr: SocketAddr, data: Vec<u8>) -> Result<Self, ServeError> {
        let listener = TcpListener::bind(addr).map_err(|source| ServeError::Bind { addr, source })?;
        // hyper drives the listener from the async runtime
        listener.set_nonblocking(true)?;

        Ok(Self {
            listener,
            data: Bytes::from(data),
        })
    }

    /// Address the listener is actually bound to
    pub fn local_addr(&self) -> Result<SocketAddr, ServeError> {
        Ok(self.listener.local_addr()?)
    }

    /// Serve until one GET has been answered, blocking the calling thread
    ///
    /// **Public** - main entry point
    ///
    /// # Errors
    /// * `ServeError::Runtime` - async runtime failed to start
    /// * `ServeError::Http` - transport failure while serving
    pub fn serve(self) -> Result<(), ServeError> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(ServeError::Runtime)?;

        runtime.block_on(self.serve_until_sent())
    }

    async fn serve_until_sent(self) -> Result<(), ServeError> {
        let (sent_tx, mut sent_rx) = mpsc::unbounded_channel::<()>();
        let data = self.data;

        let make_service = make_service_fn(move |_conn| {
            let data = data.clone();
            let sent_tx = sent_tx.clone();
            async move {
                Ok::<_, Infallible>(service_fn(move |req| {
                    handle_request(req, data.clone(), sent_tx.clone())
                }))
            }
        });

        let server = Server::from_tcp(self.listener)?
            .serve(make_service)
            .with_graceful_shutdown(async move {
                let _ = sent_rx.recv().await;
            });

        server.await?;
        Ok(())
    }
}

/// Handle a single request
///
/// **Private** - GET gets the payload and flags the server for shutdown;
/// everything else (CORS preflight and friends) gets an empty 200 and keeps
/// the server alive, matching the viewer's probing behavior.
async fn handle_request(
    req: Request<Body>,
    data: Bytes,
    sent_tx: mpsc::UnboundedSender<()>,
) -> Result<Response<Body>, Infallible> {
    if req.method() == Method::GET {
        debug!("GET {} -> {} bytes", req.uri().path(), data.len());

        let mut response = Response::new(Body::from(data));
        let headers = response.headers_mut();
        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/json"),
        );
        headers.insert(
            header::ACCESS_CONTROL_ALLOW_ORIGIN,
            HeaderValue::from_static("*"),
        );

        let _ = sent_tx.send(());
        Ok(response)
    } else {
        debug!("{} {} -> empty 200", req.method(), req.uri().path());
        Ok(Response::new(Body::empty()))
    }
}

//! Shared plumbing for small TCP client/server programs: opening sockets,
//! a task-per-connection accept loop with graceful stop, and console helpers.

use crate::error::{AssertError, NetError};
use crate::lang::assert;
pub use crate::storage::config::ServerSettings;
use async_trait::async_trait;
use std::fmt::Display;
use std::net::SocketAddr;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::thread;
use std::time::Duration;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::net::{TcpListener, TcpSocket, TcpStream};
use tokio::task::JoinHandle;

const LISTEN_BACKLOG: u32 = 1024;

/// Serves one accepted connection until the peer goes away
#[async_trait]
pub trait ClientRequestHandler: Send + Sync + 'static {
    async fn service(&self, stream: TcpStream, peer: SocketAddr, debug: bool) -> Result<(), NetError>;
}

pub async fn open_listener(address: SocketAddr, reuse_address: bool) -> Result<TcpListener, NetError> {
    let bind_error = |source| NetError::Bind {
        address: address.to_string(),
        source,
    };

    let socket = if address.is_ipv4() {
        TcpSocket::new_v4()
    } else {
        TcpSocket::new_v6()
    }
    .map_err(bind_error)?;
    socket.set_reuseaddr(reuse_address).map_err(bind_error)?;
    socket.bind(address).map_err(bind_error)?;
    socket.listen(LISTEN_BACKLOG).map_err(bind_error)
}

pub async fn open_socket(address: SocketAddr, tcp_nodelay: bool) -> Result<TcpStream, NetError> {
    let stream = TcpStream::connect(address)
        .await
        .map_err(|source| NetError::Connect {
            address: address.to_string(),
            source,
        })?;
    stream.set_nodelay(tcp_nodelay)?;
    Ok(stream)
}

/// Replace `{0}`, `{1}`, ... with the matching argument; unmatched placeholders are left as is
pub fn format_message(template: &str, arguments: &[&dyn Display]) -> String {
    let mut message = template.to_string();
    for (index, argument) in arguments.iter().enumerate() {
        message = message.replace(&format!("{{{}}}", index), &argument.to_string());
    }
    message
}

pub async fn pause(milliseconds: u64) -> bool {
    tokio::time::sleep(Duration::from_millis(milliseconds)).await;
    true
}

/// A running server started by [`start_server`]
#[derive(Debug)]
pub struct ServerHandle {
    name: String,
    local_addr: SocketAddr,
    running: Arc<AtomicBool>,
    join: JoinHandle<()>,
}

impl ServerHandle {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst) && !self.join.is_finished()
    }

    /// Stop accepting connections and wait for the accept loop to exit
    pub async fn stop(self) {
        self.running.store(false, Ordering::SeqCst);
        if let Err(err) = self.join.await {
            log::warn!("{} terminated abnormally: {}", self.name, err);
        }
    }
}

/// Bind the configured address and accept connections on a background task,
/// handing each one to `handler` on its own task.
pub async fn start_server<H: ClientRequestHandler>(
    name: &str,
    settings: &ServerSettings,
    handler: H,
) -> Result<ServerHandle, NetError> {
    let address = settings.socket_address().await?;
    let listener = open_listener(address, settings.reuse_address).await?;
    let local_addr = listener.local_addr()?;

    log::info!(
        "Started {} listening on port ({}) bound to address ({})...",
        name,
        local_addr.port(),
        local_addr.ip()
    );

    let running = Arc::new(AtomicBool::new(true));
    let join = tokio::spawn(accept_loop(
        name.to_string(),
        listener,
        settings.clone(),
        Arc::new(handler),
        Arc::clone(&running),
    ));

    Ok(ServerHandle {
        name: name.to_string(),
        local_addr,
        running,
        join,
    })
}

async fn accept_loop<H: ClientRequestHandler>(
    name: String,
    listener: TcpListener,
    settings: ServerSettings,
    handler: Arc<H>,
    running: Arc<AtomicBool>,
) {
    let timeout = settings.accept_timeout();
    let clients = AtomicUsize::new(0);

    while running.load(Ordering::SeqCst) {
        let (stream, peer) = match tokio::time::timeout(timeout, listener.accept()).await {
            Err(_) => continue,
            Ok(Ok(accepted)) => accepted,
            Ok(Err(err)) => {
                log::error!("{} failed to accept a connection: {}", name, err);
                running.store(false, Ordering::SeqCst);
                break;
            }
        };

        if let Err(err) = stream.set_nodelay(settings.tcp_nodelay) {
            log::debug!("Unable to set TCP_NODELAY for {}: {}", peer, err);
        }

        let task_name = format!(
            "Client Request Handler {}",
            clients.fetch_add(1, Ordering::SeqCst)
        );
        let handler = Arc::clone(&handler);
        let debug = settings.debug;
        tokio::spawn(async move {
            log::debug!("{} serving client ({})", task_name, peer);
            if let Err(err) = handler.service(stream, peer, debug).await {
                if debug {
                    log::warn!("{} lost client ({}): {}", task_name, peer, err);
                }
            }
            log::debug!("Client ({}) connection closed; {} exiting", peer, task_name);
        });
    }

    log::info!(
        "{} listening on port ({}) stopped.",
        name,
        listener.local_addr().map(|addr| addr.port()).unwrap_or_default()
    );
}

/// Read lines until one matches `input` (ignoring case), printing `message` after every other line.
/// End of input counts as a match.
pub async fn wait_for_user_input<R>(reader: R, input: &str, message: &str) -> std::io::Result<()>
where
    R: AsyncBufRead + Unpin,
{
    let mut lines = reader.lines();
    while let Some(line) = lines.next_line().await? {
        if line.trim().eq_ignore_ascii_case(input) {
            return Ok(());
        }
        eprintln!("{}", message);
    }
    Ok(())
}

/// A fixed group of named OS threads running the same job
pub struct ThreadCollection {
    threads: Vec<thread::JoinHandle<()>>,
}

impl ThreadCollection {
    /// Threads are named `"<basename> <n>"` counting from 0
    pub fn spawn<F>(count: usize, runner: F, basename: Option<&str>) -> crate::Result<Self>
    where
        F: Fn() + Send + Sync + 'static,
    {
        let basename = assert::not_null(basename, "The basename of the Thread cannot be null!")?;
        let runner = Arc::new(runner);
        let mut threads = Vec::with_capacity(count);

        for index in 0..count {
            let runner = Arc::clone(&runner);
            let handle = thread::Builder::new()
                .name(format!("{} {}", basename.trim(), index))
                .spawn(move || runner())
                .map_err(NetError::Io)?;
            threads.push(handle);
        }

        Ok(Self { threads })
    }

    pub fn len(&self) -> usize {
        self.threads.len()
    }

    pub fn is_empty(&self) -> bool {
        self.threads.is_empty()
    }

    /// Wait for every thread; an error names the threads that panicked
    pub fn join(self) -> Result<(), AssertError> {
        let mut panicked = Vec::new();
        for handle in self.threads {
            let name = handle.thread().name().unwrap_or("unnamed").to_string();
            if handle.join().is_err() {
                panicked.push(name);
            }
        }

        if panicked.is_empty() {
            Ok(())
        } else {
            Err(AssertError::IllegalState(format!(
                "Threads ({}) terminated with a panic!",
                panicked.join(", ")
            )))
        }
    }
}

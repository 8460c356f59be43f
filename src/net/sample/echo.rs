use crate::error::NetError;
use crate::net::client_server::{ClientRequestHandler, ServerSettings, open_socket};
use async_trait::async_trait;
use std::net::SocketAddr;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::net::TcpStream;
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};

pub const EXIT_COMMAND: &str = "exit";

/// Writes every newline-terminated line straight back to the client
#[derive(Debug, Clone, Copy, Default)]
pub struct EchoHandler;

#[async_trait]
impl ClientRequestHandler for EchoHandler {
    async fn service(&self, stream: TcpStream, peer: SocketAddr, debug: bool) -> Result<(), NetError> {
        log::info!("Receiving echo requests from client ({})...", peer.ip());

        let (reader, mut writer) = stream.into_split();
        let mut lines = BufReader::new(reader).lines();

        loop {
            let line = match lines.next_line().await {
                Ok(Some(line)) => line,
                Ok(None) => break,
                Err(err) => {
                    if debug {
                        log::warn!("Failed to read message from echo client ({}): {}", peer.ip(), err);
                    }
                    break;
                }
            };
            log::info!("{}: \"{}\"", peer.ip(), line);
            writer.write_all(format!("{}\n", line).as_bytes()).await?;
        }

        log::info!("Echo client ({}) connection closed.", peer.ip());
        Ok(())
    }
}

/// A connected echo client
pub struct EchoClient {
    reader: BufReader<OwnedReadHalf>,
    writer: OwnedWriteHalf,
}

impl EchoClient {
    pub async fn connect(address: SocketAddr, tcp_nodelay: bool) -> Result<Self, NetError> {
        let (reader, writer) = open_socket(address, tcp_nodelay).await?.into_split();
        Ok(Self {
            reader: BufReader::new(reader),
            writer,
        })
    }

    /// Send one line and wait for the echo; `None` if the server hung up
    pub async fn echo(&mut self, line: &str) -> Result<Option<String>, NetError> {
        self.writer.write_all(format!("{}\n", line).as_bytes()).await?;
        self.writer.flush().await?;

        let mut reply = String::new();
        if self.reader.read_line(&mut reply).await? == 0 {
            return Ok(None);
        }
        Ok(Some(reply.trim_end_matches(['\r', '\n']).to_string()))
    }
}

/// Relay lines from `input` to the echo server until `exit`, reporting each exchange to `output`
pub async fn run_echo_client<R, W>(settings: &ServerSettings, input: R, mut output: W) -> Result<usize, NetError>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let address = settings.socket_address().await?;
    let mut client = EchoClient::connect(address, settings.tcp_nodelay).await?;
    output
        .write_all(
            format!(
                "Connected to Echo Server @ ({}) on port ({})...\n",
                address.ip(),
                address.port()
            )
            .as_bytes(),
        )
        .await?;

    let mut exchanged = 0;
    let mut lines = input.lines();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.eq_ignore_ascii_case(EXIT_COMMAND) {
            break;
        }

        output
            .write_all(format!("Client says... \"{}\"\n", line).as_bytes())
            .await?;
        let Some(reply) = client.echo(line).await? else {
            break;
        };
        output
            .write_all(format!("Server says... \"{}\"\n", reply).as_bytes())
            .await?;
        exchanged += 1;
    }

    output.flush().await?;
    Ok(exchanged)
}

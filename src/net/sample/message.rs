use crate::error::NetError;
use crate::net::client_server::ClientRequestHandler;
use async_trait::async_trait;
use std::io;
use std::net::SocketAddr;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::net::TcpStream;

pub const ACK: u8 = 1;

/// Reads 4-byte big-endian length-prefixed payloads and acknowledges each with [`ACK`]
#[derive(Debug, Clone, Copy, Default)]
pub struct MessageHandler;

#[async_trait]
impl ClientRequestHandler for MessageHandler {
    async fn service(&self, stream: TcpStream, peer: SocketAddr, debug: bool) -> Result<(), NetError> {
        let (reader, mut writer) = stream.into_split();
        let mut reader = BufReader::new(reader);

        loop {
            let payload_size = match reader.read_i32().await {
                Ok(size) => size,
                Err(err) if err.kind() == io::ErrorKind::UnexpectedEof => break,
                Err(err) => return Err(err.into()),
            };
            let payload_size = usize::try_from(payload_size).map_err(|_| {
                io::Error::new(
                    io::ErrorKind::InvalidData,
                    format!("negative payload size ({})", payload_size),
                )
            })?;

            if debug {
                log::info!("Reading ({}) bytes from client ({})...", payload_size, peer.ip());
            }

            discard_payload(&mut reader, payload_size as u64).await?;

            if debug {
                log::info!("Sending ack...");
            }
            writer.write_u8(ACK).await?;
        }

        Ok(())
    }
}

/// Consume exactly `size` bytes without buffering them
async fn discard_payload<R>(reader: &mut R, size: u64) -> io::Result<()>
where
    R: AsyncRead + Unpin,
{
    let consumed = tokio::io::copy(&mut reader.take(size), &mut tokio::io::sink()).await?;
    if consumed < size {
        return Err(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            format!("payload ended after ({}) of ({}) bytes", consumed, size),
        ));
    }
    Ok(())
}

/// Send one framed payload and report whether the server acknowledged it
pub async fn send_message<S>(stream: &mut S, payload: &[u8]) -> Result<bool, NetError>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    let size = i32::try_from(payload.len())
        .map_err(|_| io::Error::new(io::ErrorKind::InvalidInput, "payload exceeds i32::MAX bytes"))?;

    stream.write_i32(size).await?;
    stream.write_all(payload).await?;
    stream.flush().await?;

    Ok(stream.read_u8().await? == ACK)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::net::client_server::{ServerSettings, open_socket, start_server};

    #[tokio::test]
    async fn test_messages_are_acknowledged() {
        let settings = ServerSettings {
            host: "127.0.0.1".to_string(),
            port: 0,
            accept_timeout_ms: 50,
            debug: true,
            ..ServerSettings::default()
        };
        let server = start_server("Message Server", &settings, MessageHandler)
            .await
            .expect("Failed to start message server");

        let mut stream = open_socket(server.local_addr(), true).await.unwrap();
        assert!(send_message(&mut stream, b"hello").await.unwrap());
        assert!(send_message(&mut stream, &[]).await.unwrap());
        assert!(send_message(&mut stream, &vec![7_u8; 64 * 1024]).await.unwrap());

        server.stop().await;
    }

    #[tokio::test]
    async fn test_discard_payload_stops_at_declared_size() {
        let mut input: &[u8] = b"abcdef";
        discard_payload(&mut input, 4).await.unwrap();
        assert_eq!(input, b"ef");
    }

    #[tokio::test]
    async fn test_discard_payload_reports_truncated_frame() {
        // A huge declared size with a short body must fail on EOF, not allocate up front
        let mut input: &[u8] = b"short";
        let err = discard_payload(&mut input, i32::MAX as u64).await.unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof);
        assert!(err.to_string().contains("after (5) of (2147483647) bytes"));
    }

    #[tokio::test]
    async fn test_frame_layout() {
        let (mut client, mut server) = tokio::io::duplex(64);

        let writer = tokio::spawn(async move { send_message(&mut client, b"abc").await });

        let mut frame = [0_u8; 7];
        server.read_exact(&mut frame).await.unwrap();
        assert_eq!(frame, [0, 0, 0, 3, b'a', b'b', b'c']);
        server.write_u8(0).await.unwrap();

        assert!(!writer.await.unwrap().unwrap());
    }
}

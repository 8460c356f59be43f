use crate::io::streams;
use std::net::{TcpListener, TcpStream};

/// Shut down both halves of `stream`; `false` for `None` or on failure
pub fn close_stream(stream: Option<TcpStream>) -> bool {
    streams::close(stream)
}

pub fn close_listener(listener: Option<TcpListener>) -> bool {
    streams::close(listener)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_close_none() {
        assert!(!close_stream(None));
        assert!(!close_listener(None));
    }

    #[test]
    fn test_close_connected_pair() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let address = listener.local_addr().unwrap();
        let client = TcpStream::connect(address).unwrap();
        let (server_side, _) = listener.accept().unwrap();

        assert!(close_stream(Some(client)));
        assert!(close_stream(Some(server_side)));
        assert!(close_listener(Some(listener)));
    }
}

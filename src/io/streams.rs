//! Stream helpers: quiet close, chunked copy and value serialization

use crate::error::DataError;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fs::File;
use std::io::{self, BufWriter, Read, Write};
use std::net::{Shutdown, TcpListener, TcpStream};

pub const BUFFER_SIZE: usize = 8192;

/// A resource that can fail while releasing itself
pub trait Closeable {
    fn close(self) -> io::Result<()>;
}

impl Closeable for File {
    fn close(self) -> io::Result<()> {
        self.sync_all()
    }
}

impl<W: Write> Closeable for BufWriter<W> {
    fn close(self) -> io::Result<()> {
        self.into_inner().map(drop).map_err(|err| err.into_error())
    }
}

impl Closeable for TcpStream {
    fn close(self) -> io::Result<()> {
        match self.shutdown(Shutdown::Both) {
            Err(err) if err.kind() != io::ErrorKind::NotConnected => Err(err),
            _ => Ok(()),
        }
    }
}

impl Closeable for TcpListener {
    fn close(self) -> io::Result<()> {
        drop(self);
        Ok(())
    }
}

/// Close `resource`, reporting whether it was present and closed cleanly
pub fn close<C: Closeable>(resource: Option<C>) -> bool {
    match resource {
        Some(resource) => match resource.close() {
            Ok(()) => true,
            Err(err) => {
                log::debug!("Ignoring failure while closing resource: {}", err);
                false
            }
        },
        None => false,
    }
}

/// Copy everything from `reader` to `writer`, flushing after each chunk
pub fn copy<R: Read, W: Write>(reader: &mut R, writer: &mut W) -> io::Result<u64> {
    let mut buffer = [0_u8; BUFFER_SIZE];
    let mut total = 0_u64;

    loop {
        let length = match reader.read(&mut buffer) {
            Ok(0) => break,
            Ok(length) => length,
            Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
            Err(err) => return Err(err),
        };
        writer.write_all(&buffer[..length])?;
        writer.flush()?;
        total += length as u64;
    }

    Ok(total)
}

pub fn to_byte_array<R: Read>(mut reader: R) -> io::Result<Vec<u8>> {
    let mut bytes = Vec::with_capacity(BUFFER_SIZE);
    copy(&mut reader, &mut bytes)?;
    Ok(bytes)
}

pub fn serialize_object<T: Serialize + ?Sized>(value: &T) -> Result<Vec<u8>, DataError> {
    Ok(serde_json::to_vec(value)?)
}

pub fn deserialize_object<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, DataError> {
    Ok(serde_json::from_slice(bytes)?)
}

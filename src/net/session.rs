// src/net/session.rs

//! Non-blocking wrapper around one accepted `TcpStream`.

use std::io::{self, Read, Write};
use std::net::{Shutdown, SocketAddr, TcpStream};

use bytes::BytesMut;

use crate::mux::Connection;

const READ_CHUNK: usize = 512;

/// What a one-byte `peek` says about the socket right now.
enum Probe {
    Ready,
    Quiet,
    Eof,
}

/// One seated client socket, switched to non-blocking mode so the polling
/// passes never stall on it.
pub struct TcpSession {
    stream: TcpStream,
    peer: SocketAddr,
    closed: bool,
}

impl TcpSession {
    pub fn new(stream: TcpStream, peer: SocketAddr) -> io::Result<Self> {
        stream.set_nonblocking(true)?;
        // Command/echo traffic is tiny; Nagle only adds latency here.
        stream.set_nodelay(true)?;
        Ok(Self {
            stream,
            peer,
            closed: false,
        })
    }

    pub fn peer_addr(&self) -> SocketAddr {
        self.peer
    }

    fn probe(&self) -> Probe {
        let mut byte = [0u8; 1];
        match self.stream.peek(&mut byte) {
            Ok(0) => Probe::Eof,
            Ok(_) => Probe::Ready,
            Err(e) if e.kind() == io::ErrorKind::WouldBlock => Probe::Quiet,
            Err(_) => Probe::Eof,
        }
    }
}

impl Connection for TcpSession {
    fn is_alive(&self) -> bool {
        // Buffered bytes keep the session alive even after the peer's FIN,
        // so a final message is still drained and echoed.
        !self.closed && !matches!(self.probe(), Probe::Eof)
    }

    fn bytes_available(&self) -> bool {
        !self.closed && matches!(self.probe(), Probe::Ready)
    }

    fn read_available(&mut self) -> io::Result<Vec<u8>> {
        let mut buf = BytesMut::with_capacity(READ_CHUNK);
        let mut chunk = [0u8; READ_CHUNK];
        loop {
            match self.stream.read(&mut chunk) {
                Ok(0) => {
                    self.closed = true;
                    break;
                }
                Ok(n) => buf.extend_from_slice(&chunk[..n]),
                Err(e) if e.kind() == io::ErrorKind::WouldBlock => break,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }
        Ok(buf.to_vec())
    }

    fn write_all(&mut self, buf: &[u8]) -> io::Result<()> {
        // Greeting and echo writes are small. A socket buffer full enough to
        // return WouldBlock means the client stopped reading; the caller
        // treats the error by releasing the slot.
        let mut written = 0;
        while written < buf.len() {
            match self.stream.write(&buf[written..]) {
                Ok(0) => return Err(io::ErrorKind::WriteZero.into()),
                Ok(n) => written += n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }
        Ok(())
    }

    fn close(&mut self) {
        if !self.closed {
            let _ = self.stream.shutdown(Shutdown::Both);
            self.closed = true;
        }
    }
}

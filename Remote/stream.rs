use std::io::{self, Read};
use std::net::{Shutdown, TcpStream};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// How long a single `read` call blocks before the wrapper re-checks whether it has been closed.
/// Short enough that ejection is noticed promptly, long enough not to spin the worker thread.
const POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Wraps a `TcpStream`'s read side so it can be read from the worker thread executing a player's
/// call while being shut down from the referee thread that ejects that player. The original this
/// is grounded on (`readable_stream_wrapper.py`) polls with `select()` under a lock shared with
/// `close()`; a `TcpStream`'s own read timeout gives the same short-poll-and-check-closed
/// behavior without needing a lock, since `set_read_timeout` already makes a blocked read return
/// promptly on its own.
pub struct ReadableStreamWrapper {
    stream: TcpStream,
    closed: Arc<AtomicBool>,
}

impl ReadableStreamWrapper {
    pub fn new(stream: TcpStream) -> io::Result<Self> {
        stream.set_read_timeout(Some(POLL_INTERVAL))?;
        Ok(Self { stream, closed: Arc::new(AtomicBool::new(false)) })
    }

    /// A handle that can close this stream from another thread. Closing is idempotent: a second
    /// `close()` call is a no-op.
    pub fn closer(&self) -> StreamCloser {
        StreamCloser {
            stream: self.stream.try_clone().expect("tcp stream handles are always cloneable"),
            closed: Arc::clone(&self.closed),
        }
    }
}

impl Read for ReadableStreamWrapper {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        loop {
            if self.closed.load(Ordering::Acquire) {
                return Err(io::Error::new(io::ErrorKind::NotConnected, "stream was closed"));
            }
            match self.stream.read(buf) {
                Ok(n) => return Ok(n),
                Err(e) if matches!(e.kind(), io::ErrorKind::WouldBlock | io::ErrorKind::TimedOut) => continue,
                Err(e) => return Err(e),
            }
        }
    }
}

/// A cloneable handle that shuts down the paired [`ReadableStreamWrapper`]'s socket, in both
/// directions, from any thread. Used as a [`players::player::PlayerApi`] ejection hook.
pub struct StreamCloser {
    stream: TcpStream,
    closed: Arc<AtomicBool>,
}

impl StreamCloser {
    pub fn close(&self) {
        if self.closed.swap(true, Ordering::AcqRel) {
            return;
        }
        let _ = self.stream.shutdown(Shutdown::Both);
    }

    /// Duplicates this handle onto a fresh socket descriptor so it can be moved into a closure
    /// independent of the `PlayerProxy` it was taken from.
    pub fn try_clone(&self) -> io::Result<StreamCloser> {
        Ok(StreamCloser { stream: self.stream.try_clone()?, closed: Arc::clone(&self.closed) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::TcpListener;
    use std::thread;

    fn loopback_pair() -> (TcpStream, TcpStream) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        let client = thread::spawn(move || TcpStream::connect(addr).unwrap());
        let (server, _) = listener.accept().unwrap();
        (server, client.join().unwrap())
    }

    #[test]
    fn reads_bytes_written_by_the_peer() {
        use std::io::Write;
        let (server, mut client) = loopback_pair();
        let mut wrapper = ReadableStreamWrapper::new(server).unwrap();
        client.write_all(b"hello").unwrap();
        let mut buf = [0u8; 5];
        wrapper.read_exact(&mut buf).unwrap();
        assert_eq!(&buf, b"hello");
    }

    #[test]
    fn closing_from_another_thread_unblocks_a_pending_read() {
        let (server, _client) = loopback_pair();
        let mut wrapper = ReadableStreamWrapper::new(server).unwrap();
        let closer = wrapper.closer();
        let handle = thread::spawn(move || {
            thread::sleep(Duration::from_millis(30));
            closer.close();
        });
        let mut buf = [0u8; 1];
        let err = wrapper.read(&mut buf).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotConnected);
        handle.join().unwrap();
    }

    #[test]
    fn close_is_idempotent() {
        let (server, _client) = loopback_pair();
        let wrapper = ReadableStreamWrapper::new(server).unwrap();
        let closer = wrapper.closer();
        closer.close();
        closer.close();
    }
}

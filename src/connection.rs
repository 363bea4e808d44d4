use crate::error::{BulbError, Result};
use tokio::io::AsyncWriteExt;
use tokio::net::TcpStream;

/// Open a fresh TCP connection, write `payload`, and close
///
/// Nothing is read back. The stream is dropped on every path, including a
/// failed write. No timeout is applied.
pub(crate) async fn send_once(addr: &str, payload: &[u8]) -> Result<()> {
    let connection_failed = |source: std::io::Error| BulbError::ConnectionFailed {
        addr: addr.to_string(),
        source,
    };

    let mut stream = TcpStream::connect(addr).await.map_err(connection_failed)?;
    stream.write_all(payload).await.map_err(connection_failed)?;
    drop(stream);

    Ok(())
}

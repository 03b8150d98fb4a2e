// src/exec/interceptor.rs

//! Live passthrough plus buffered capture of the runner's stdout.

use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tracing::warn;

const CHUNK_SIZE: usize = 8 * 1024;

/// Everything the child wrote to stdout, in order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CapturedOutput {
    bytes: Vec<u8>,
}

impl CapturedOutput {
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl From<Vec<u8>> for CapturedOutput {
    fn from(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }
}

impl From<&str> for CapturedOutput {
    fn from(s: &str) -> Self {
        Self {
            bytes: s.as_bytes().to_vec(),
        }
    }
}

/// Read `reader` to EOF, forwarding each chunk to `live` and appending it
/// to the returned capture.
///
/// Each chunk is read once and fanned out to both sinks. If the live sink
/// stops accepting data the stream is still drained into the capture, so the
/// child never blocks on a full pipe.
pub async fn tee<R, W>(mut reader: R, live: &mut W) -> std::io::Result<CapturedOutput>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin + ?Sized,
{
    let mut captured = Vec::new();
    let mut chunk = vec![0u8; CHUNK_SIZE];
    let mut live_open = true;

    loop {
        let n = reader.read(&mut chunk).await?;
        if n == 0 {
            break;
        }

        captured.extend_from_slice(&chunk[..n]);

        if live_open {
            let forwarded = async {
                live.write_all(&chunk[..n]).await?;
                live.flush().await
            };
            if let Err(e) = forwarded.await {
                warn!(error = %e, "console passthrough failed; continuing capture only");
                live_open = false;
            }
        }
    }

    Ok(CapturedOutput::from(captured))
}

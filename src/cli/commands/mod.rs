//! CLI command implementations.

pub mod pretty;
pub mod progress;

use anyhow::{Context, Result};
use std::path::Path;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncReadExt, BufReader};

/// Path argument that selects standard input.
pub const STDIN_PATH: &str = "-";

/// Open a log file, or standard input for `-`, as a buffered async reader.
pub async fn open_input(path: &Path) -> Result<Box<dyn AsyncBufRead + Unpin + Send>> {
    if path.as_os_str() == STDIN_PATH {
        return Ok(Box::new(BufReader::new(tokio::io::stdin())));
    }
    let file = tokio::fs::File::open(path)
        .await
        .with_context(|| format!("Failed to open {}", path.display()))?;
    Ok(Box::new(BufReader::new(file)))
}

/// Read the next line, decoding invalid UTF-8 lossily.
///
/// The trailing `\n` or `\r\n` is stripped. Returns `None` at end of input.
pub async fn read_line_lossy<R>(reader: &mut R, buf: &mut Vec<u8>) -> std::io::Result<Option<String>>
where
    R: AsyncBufRead + Unpin + ?Sized,
{
    buf.clear();
    if reader.read_until(b'\n', buf).await? == 0 {
        return Ok(None);
    }
    let line = String::from_utf8_lossy(buf);
    Ok(Some(line.trim_end_matches('\n').trim_end_matches('\r').to_string()))
}

/// Read everything that is left, decoding invalid UTF-8 lossily.
pub async fn read_to_string_lossy<R>(reader: &mut R) -> std::io::Result<String>
where
    R: AsyncBufRead + Unpin + ?Sized,
{
    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes).await?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

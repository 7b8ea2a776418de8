use std::fs;
use std::io;
use std::path::Path;

use clap::ValueEnum;
use compio::BufResult;
use compio::fs::File;
use compio::io::AsyncReadAt;
use snafu::ResultExt;

/// Bytes compared per read when checking content.
const CHUNK_SIZE: usize = 8 * 1024;

use super::reconciler::{InspectSnafu, ReadSnafu, ReconcileError};

/// How two regular files are judged identical.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum CompareMode {
    /// Size, then every byte.
    #[default]
    Content,
    /// Size and modification time only. Falls back to content when a timestamp is unavailable.
    Metadata,
}

pub(super) async fn files_match(
    source: &Path,
    replica: &Path,
    mode: CompareMode,
) -> Result<bool, ReconcileError> {
    let source_meta = fs::metadata(source).context(InspectSnafu { path: source })?;
    let replica_meta = fs::metadata(replica).context(InspectSnafu { path: replica })?;

    if source_meta.len() != replica_meta.len() {
        return Ok(false);
    }

    if mode == CompareMode::Metadata {
        if let (Ok(source_time), Ok(replica_time)) =
            (source_meta.modified(), replica_meta.modified())
        {
            return Ok(source_time == replica_time);
        }
    }

    let source_file = File::open(source).await.context(ReadSnafu { path: source })?;
    let replica_file = File::open(replica).await.context(ReadSnafu { path: replica })?;

    let len = source_meta.len();
    let mut pos = 0u64;
    while pos < len {
        let want = CHUNK_SIZE.min((len - pos) as usize);
        let source_chunk = read_chunk(&source_file, pos, want)
            .await
            .context(ReadSnafu { path: source })?;
        let replica_chunk = read_chunk(&replica_file, pos, want)
            .await
            .context(ReadSnafu { path: replica })?;
        if source_chunk != replica_chunk {
            return Ok(false);
        }
        pos += want as u64;
    }
    Ok(true)
}

/// Reads up to `len` bytes at `pos`, retrying short reads. Stops early only at end of file.
async fn read_chunk(file: &File, pos: u64, len: usize) -> io::Result<Vec<u8>> {
    let mut chunk = Vec::with_capacity(len);
    while chunk.len() < len {
        let offset = pos + chunk.len() as u64;
        let BufResult(read, buf) = file
            .read_at(Vec::with_capacity(len - chunk.len()), offset)
            .await;
        let read = read?;
        if read == 0 {
            break;
        }
        chunk.extend_from_slice(&buf[..read]);
    }
    chunk.truncate(len);
    Ok(chunk)
}

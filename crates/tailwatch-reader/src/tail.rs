//! Reverse block reading of the last lines of a log file

use std::fs::File;
use std::io::{Read, Seek, SeekFrom};
use std::path::Path;

use tailwatch_core::prelude::*;

/// Bytes read per backwards step
pub const BLOCK_SIZE: u64 = 1024;

/// Return the last `n` non-empty lines of `path`, oldest first.
///
/// Reads backwards from the end in [`BLOCK_SIZE`] blocks and stops as soon as
/// `n` complete non-empty lines are buffered, so the cost depends on the size
/// of the tail rather than the size of the file. Invalid UTF-8 is dropped.
pub fn tail_lines(path: &Path, n: usize) -> Result<Vec<String>> {
    if n == 0 {
        return Ok(Vec::new());
    }

    let io_err = |e: std::io::Error| Error::tail_read(path, e.to_string());

    let mut file = File::open(path).map_err(io_err)?;
    let mut pos = file.seek(SeekFrom::End(0)).map_err(io_err)?;
    let mut buf: Vec<u8> = Vec::new();

    while pos > 0 {
        let read_size = BLOCK_SIZE.min(pos);
        pos -= read_size;
        file.seek(SeekFrom::Start(pos)).map_err(io_err)?;

        let mut block = vec![0u8; read_size as usize];
        file.read_exact(&mut block).map_err(io_err)?;
        block.extend_from_slice(&buf);
        buf = block;

        if count_complete_lines(&buf, pos == 0) >= n {
            break;
        }
    }

    let text = decode_lenient(&buf);
    let text = if pos == 0 {
        text.trim_start_matches('\u{feff}')
    } else {
        text.as_str()
    };

    let lines: Vec<&str> = text.lines().filter(|l| !l.trim().is_empty()).collect();
    let start = lines.len().saturating_sub(n);
    Ok(lines[start..].iter().map(|l| l.to_string()).collect())
}

/// Count non-empty lines in `buf`, ignoring the leading fragment unless the
/// buffer starts at the beginning of the file
fn count_complete_lines(buf: &[u8], at_file_start: bool) -> usize {
    let mut segments = buf.split(|b| *b == b'\n');
    if !at_file_start {
        segments.next();
    }
    segments
        .filter(|s| !decode_lenient(s).trim().is_empty())
        .count()
}

/// Decode UTF-8, silently dropping invalid byte sequences
pub fn decode_lenient(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len());
    for chunk in bytes.utf8_chunks() {
        out.push_str(chunk.valid());
    }
    out
}

// Copyright 2026 abhirupbanerjee
// Licensed under the Apache License, Version 2.0

//! Caller-owned output buffers.
//!
//! Every write leaves the buffer NUL-terminated with all bytes after the
//! text zeroed, so a host can decode the whole buffer and trim.

const TRUNCATION_MARKER: &[u8] = b"...";

/// Write `text` plus a terminating NUL.
///
/// Returns the bytes written, NUL excluded. When the text does not fit,
/// returns `Err(required)` with the capacity needed, NUL included, and
/// leaves the buffer untouched.
pub fn write_text(buf: &mut [u8], text: &str) -> Result<usize, usize> {
    let required = text.len() + 1;
    if buf.len() < required {
        return Err(required);
    }
    buf[..text.len()].copy_from_slice(text.as_bytes());
    buf[text.len()..].fill(0);
    Ok(text.len())
}

/// Write a diagnostic, truncating to fit.
///
/// A truncated message ends with `...` before the terminating NUL and is
/// cut on a UTF-8 boundary. An empty buffer is left alone.
pub fn write_message(buf: &mut [u8], message: &str) {
    if buf.is_empty() {
        return;
    }
    if write_text(buf, message).is_ok() {
        return;
    }

    let room = buf.len() - 1;
    let marker = TRUNCATION_MARKER.len().min(room);
    let mut keep = room - marker;
    while !message.is_char_boundary(keep) {
        keep -= 1;
    }
    buf[..keep].copy_from_slice(&message.as_bytes()[..keep]);
    buf[keep..keep + marker].copy_from_slice(&TRUNCATION_MARKER[..marker]);
    buf[keep + marker..].fill(0);
}

/// Zero the whole buffer.
pub fn clear(buf: &mut [u8]) {
    buf.fill(0);
}

/// Decode a buffer written by this module, trimming NULs and whitespace.
pub fn read_text(buf: &[u8]) -> String {
    String::from_utf8_lossy(buf)
        .trim_matches(|c: char| c <= ' ')
        .to_string()
}

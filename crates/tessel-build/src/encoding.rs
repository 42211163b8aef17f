/*
 * encoding.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Byte-order-mark detection when loading template files.
//!
//! The core compiler only accepts decoded text; this module resolves the
//! byte-level encoding. The mark decides the charset, and is stripped from
//! the decoded result; without one, content is read as UTF-8.

use crate::error::{BuildError, BuildResult};
use std::fs;
use std::path::Path;

/// Read a template file as text, honoring a leading byte-order mark.
///
/// Supported marks: UTF-32 (BE `00 00 FE FF`, LE `FF FE 00 00`), UTF-8
/// (`EF BB BF`), UTF-16 (BE `FE FF`, LE `FF FE`).
pub fn read_text_detecting_bom(path: &Path) -> BuildResult<String> {
    let bytes = fs::read(path)?;
    decode(&bytes).map_err(|detail| BuildError::Decode {
        path: path.to_path_buf(),
        detail,
    })
}

fn decode(bytes: &[u8]) -> Result<String, String> {
    match bytes {
        // UTF-32 marks subsume the UTF-16 ones; they must match first.
        [0x00, 0x00, 0xFE, 0xFF, payload @ ..] => decode_utf32(payload, u32::from_be_bytes),
        [0xFF, 0xFE, 0x00, 0x00, payload @ ..] => decode_utf32(payload, u32::from_le_bytes),
        [0xEF, 0xBB, 0xBF, payload @ ..] => decode_utf8(payload),
        [0xFE, 0xFF, payload @ ..] => decode_utf16(payload, u16::from_be_bytes),
        [0xFF, 0xFE, payload @ ..] => decode_utf16(payload, u16::from_le_bytes),
        _ => decode_utf8(bytes),
    }
}

fn decode_utf8(payload: &[u8]) -> Result<String, String> {
    String::from_utf8(payload.to_vec()).map_err(|error| format!("invalid UTF-8: {error}"))
}

fn decode_utf16(payload: &[u8], read: fn([u8; 2]) -> u16) -> Result<String, String> {
    if payload.len() % 2 != 0 {
        return Err("truncated UTF-16 code unit".to_string());
    }
    let units = payload.chunks_exact(2).map(|pair| read([pair[0], pair[1]]));
    std::char::decode_utf16(units)
        .collect::<Result<String, _>>()
        .map_err(|error| format!("invalid UTF-16: {error}"))
}

fn decode_utf32(payload: &[u8], read: fn([u8; 4]) -> u32) -> Result<String, String> {
    if payload.len() % 4 != 0 {
        return Err("truncated UTF-32 code unit".to_string());
    }
    payload
        .chunks_exact(4)
        .map(|quad| {
            let value = read([quad[0], quad[1], quad[2], quad[3]]);
            char::from_u32(value).ok_or_else(|| format!("invalid UTF-32 code point {value:#x}"))
        })
        .collect()
}

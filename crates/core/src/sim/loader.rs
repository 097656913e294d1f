//! Memory image loading and workload staging.
//!
//! A workload is a pair of word-indexed text images: `<name>.exe` for the
//! instruction memory and `<name>.data` for the data memory. Each line is
//! one 32-bit little-endian word written as eight lowercase hex digits (no
//! `0x` prefix), optionally followed by a `//` comment; blank lines are
//! allowed. The data image may be empty, and a missing data file is treated
//! as an empty one.

use std::fs;
use std::path::{Path, PathBuf};

use crate::common::error::SimError;

/// A staged workload: both memory images, parsed.
#[derive(Debug, Clone)]
pub struct Workload {
    /// Instruction memory image.
    pub exe: Vec<u32>,
    /// Data memory image (possibly empty).
    pub data: Vec<u32>,
}

/// Parses one image from text. `path` is used only for error reporting.
///
/// # Errors
///
/// Returns [`SimError::BadImageLine`] for any line that is not a bare hex
/// word after comment stripping.
pub fn parse_hex_image(text: &str, path: &Path) -> Result<Vec<u32>, SimError> {
    let mut words = Vec::new();
    for (idx, raw) in text.lines().enumerate() {
        let line = raw.split("//").next().unwrap_or("").trim();
        if line.is_empty() {
            continue;
        }
        let ok = line.len() <= 8 && line.chars().all(|c| c.is_ascii_hexdigit());
        if !ok {
            return Err(SimError::BadImageLine {
                path: path.to_path_buf(),
                line: idx + 1,
                text: line.to_string(),
            });
        }
        let word = u32::from_str_radix(line, 16).map_err(|_| SimError::BadImageLine {
            path: path.to_path_buf(),
            line: idx + 1,
            text: line.to_string(),
        })?;
        words.push(word);
    }
    Ok(words)
}

/// Reads and parses an image file.
///
/// # Errors
///
/// I/O failures and malformed lines are fatal.
pub fn load_hex_image(path: &Path) -> Result<Vec<u32>, SimError> {
    let text = fs::read_to_string(path).map_err(|source| SimError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_hex_image(&text, path)
}

/// Reinterprets raw bytes as little-endian words, zero-padding the trailing
/// partial word. This is how binary programs become image files.
pub fn words_from_le_bytes(bytes: &[u8]) -> Vec<u32> {
    bytes
        .chunks(4)
        .map(|chunk| {
            let mut word = [0u8; 4];
            word[..chunk.len()].copy_from_slice(chunk);
            u32::from_le_bytes(word)
        })
        .collect()
}

/// Formats words as image-file text: eight lowercase hex digits per line.
pub fn format_hex_image(words: &[u32]) -> String {
    let mut out = String::new();
    for word in words {
        out.push_str(&format!("{word:08x}\n"));
    }
    out
}

fn copy_into(src: &Path, work_dir: &Path) -> Result<PathBuf, SimError> {
    let file_name = src.file_name().unwrap_or_default();
    let dst = work_dir.join(file_name);
    let _ = fs::copy(src, &dst).map_err(|source| SimError::Io {
        path: src.to_path_buf(),
        source,
    })?;
    Ok(dst)
}

/// Stages a named workload: copies `<name>.exe` and `<name>.data` from the
/// source directory into the working directory, then parses both from there.
/// A missing `.data` image stages as empty; a missing `.exe` is an error.
///
/// # Errors
///
/// Fails on a missing `.exe`, I/O trouble, or malformed image lines.
pub fn stage_workload(name: &str, src_dir: &Path, work_dir: &Path) -> Result<Workload, SimError> {
    let exe_src = src_dir.join(format!("{name}.exe"));
    if !exe_src.is_file() {
        return Err(SimError::MissingWorkload { path: exe_src });
    }
    fs::create_dir_all(work_dir).map_err(|source| SimError::Io {
        path: work_dir.to_path_buf(),
        source,
    })?;

    let exe_path = copy_into(&exe_src, work_dir)?;
    let exe = load_hex_image(&exe_path)?;

    let data_src = src_dir.join(format!("{name}.data"));
    let data = if data_src.is_file() {
        let data_path = copy_into(&data_src, work_dir)?;
        load_hex_image(&data_path)?
    } else {
        Vec::new()
    };

    Ok(Workload { exe, data })
}

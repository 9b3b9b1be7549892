// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Artifact persistence.
//!
//! Every artifact is one self-describing file: a structured JSON record (maps
//! of terms, ids and counts) wrapped in a small binary envelope.
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────┐
//! │ HEADER (12 bytes)                                          │
//! │   magic: [u8; 4] = "FZDX"                                  │
//! │   version: u8, flags: u8 (bit 0 = brotli), kind: u8        │
//! │   reserved: u8, payload_len: u32                           │
//! ├────────────────────────────────────────────────────────────┤
//! │ PAYLOAD (JSON, optionally brotli-compressed)               │
//! ├────────────────────────────────────────────────────────────┤
//! │ FOOTER (8 bytes): crc32 + magic "XDZF"                     │
//! └────────────────────────────────────────────────────────────┘
//! ```
//!
//! JSON keeps integer counts exact and round-trips `f64` losslessly, which is
//! all the artifacts need. Brotli makes the neighborhood maps tolerable on disk.
//!
//! A directory of artifacts is always written as a whole: [`replace_dir`]
//! fills a staging directory next to the target and swaps it in only after
//! every file has been written.

mod header;

pub use header::{
    ArtifactFooter, ArtifactHeader, ArtifactKind, FormatFlags, FOOTER_MAGIC, MAGIC, VERSION,
};

use std::fs;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::config::StoreConfig;
use crate::error::{Error, Result};

/// Brotli quality for payloads. Build is one-shot, so favor size.
const BROTLI_QUALITY: u32 = 9;
const BROTLI_LGWIN: u32 = 22;
const BROTLI_BUFFER: usize = 4096;

/// File name for an artifact in its directory.
pub fn artifact_path(dir: &Path, name: &str) -> PathBuf {
    dir.join(format!("{}.fzdx", name))
}

/// Serialize `value` and write it as a complete artifact file.
pub fn write_artifact<T: Serialize>(
    path: &Path,
    kind: ArtifactKind,
    value: &T,
    config: &StoreConfig,
) -> Result<()> {
    let json = serde_json::to_vec(value).map_err(|source| Error::Decode {
        path: path.to_path_buf(),
        source,
    })?;

    let (flags, payload) = if config.compress {
        (FormatFlags::new().with_brotli(), compress(&json).map_err(|e| Error::io(path, e))?)
    } else {
        (FormatFlags::new(), json)
    };

    let payload_len = u32::try_from(payload.len())
        .map_err(|_| Error::corrupt(path, format!("payload of {} bytes is too large", payload.len())))?;

    let header = ArtifactHeader {
        version: VERSION,
        flags,
        kind,
        payload_len,
    };

    let mut bytes = Vec::with_capacity(header.total_size());
    header.write(&mut bytes).map_err(|e| Error::io(path, e))?;
    bytes.extend_from_slice(&payload);
    let footer = ArtifactFooter {
        crc32: ArtifactFooter::compute_crc32(&bytes),
    };
    footer.write(&mut bytes).map_err(|e| Error::io(path, e))?;

    fs::write(path, &bytes).map_err(|e| Error::io(path, e))?;
    tracing::debug!(path = %path.display(), kind = kind.name(), bytes = bytes.len(), "wrote artifact");
    Ok(())
}

/// Read an artifact file, validate its envelope and decode the payload.
pub fn read_artifact<T: DeserializeOwned>(path: &Path, kind: ArtifactKind) -> Result<T> {
    let bytes = fs::read(path).map_err(|e| Error::io(path, e))?;
    let (header, payload) = open_envelope(path, &bytes)?;

    if header.kind != kind {
        return Err(Error::corrupt(
            path,
            format!("expected {} artifact, found {}", kind.name(), header.kind.name()),
        ));
    }

    let json = if header.flags.is_brotli() {
        decompress(payload).map_err(|e| Error::corrupt(path, format!("brotli: {}", e)))?
    } else {
        payload.to_vec()
    };

    serde_json::from_slice(&json).map_err(|source| Error::Decode {
        path: path.to_path_buf(),
        source,
    })
}

/// Summary of an artifact's envelope, as reported by `fuzzdex inspect`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactInfo {
    pub kind: ArtifactKind,
    pub version: u8,
    pub compressed: bool,
    pub payload_len: usize,
    pub file_len: usize,
    pub crc32: u32,
}

/// Validate an artifact's envelope without decoding its payload.
pub fn inspect(path: &Path) -> Result<ArtifactInfo> {
    let bytes = fs::read(path).map_err(|e| Error::io(path, e))?;
    let (header, payload) = open_envelope(path, &bytes)?;
    let footer = ArtifactFooter::read(&bytes).map_err(|e| Error::corrupt(path, e.to_string()))?;
    Ok(ArtifactInfo {
        kind: header.kind,
        version: header.version,
        compressed: header.flags.is_brotli(),
        payload_len: payload.len(),
        file_len: bytes.len(),
        crc32: footer.crc32,
    })
}

/// Split a file into header and payload, checking size, footer and checksum.
fn open_envelope<'a>(path: &Path, bytes: &'a [u8]) -> Result<(ArtifactHeader, &'a [u8])> {
    if bytes.len() < ArtifactHeader::SIZE + ArtifactFooter::SIZE {
        return Err(Error::corrupt(path, format!("file is only {} bytes", bytes.len())));
    }

    let header =
        ArtifactHeader::read(&mut &bytes[..]).map_err(|e| Error::corrupt(path, e.to_string()))?;
    if header.total_size() != bytes.len() {
        return Err(Error::corrupt(
            path,
            format!(
                "size mismatch: header implies {} bytes, file has {}",
                header.total_size(),
                bytes.len()
            ),
        ));
    }

    let footer = ArtifactFooter::read(bytes).map_err(|e| Error::corrupt(path, e.to_string()))?;
    let content = &bytes[..bytes.len() - ArtifactFooter::SIZE];
    let actual = ArtifactFooter::compute_crc32(content);
    if actual != footer.crc32 {
        return Err(Error::corrupt(
            path,
            format!("checksum mismatch: stored {:08x}, computed {:08x}", footer.crc32, actual),
        ));
    }

    Ok((header, &content[ArtifactHeader::SIZE..]))
}

fn compress(data: &[u8]) -> std::io::Result<Vec<u8>> {
    let mut out = Vec::new();
    {
        let mut writer =
            brotli::CompressorWriter::new(&mut out, BROTLI_BUFFER, BROTLI_QUALITY, BROTLI_LGWIN);
        writer.write_all(data)?;
        writer.flush()?;
    }
    Ok(out)
}

fn decompress(data: &[u8]) -> std::io::Result<Vec<u8>> {
    let mut out = Vec::new();
    brotli::Decompressor::new(data, BROTLI_BUFFER).read_to_end(&mut out)?;
    Ok(out)
}

/// Replace directory `target` wholesale with the files written by `fill`.
///
/// `fill` writes into a fresh staging directory beside `target`. Only when it
/// succeeds is the old directory removed and the staging directory renamed
/// into place. On failure the staging directory is deleted and `target` is
/// left untouched.
pub fn replace_dir<F>(target: &Path, fill: F) -> Result<()>
where
    F: FnOnce(&Path) -> Result<()>,
{
    let parent = match target.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    };
    fs::create_dir_all(&parent).map_err(|e| Error::io(&parent, e))?;

    let staging = tempfile::Builder::new()
        .prefix(".fuzzdex-staging-")
        .tempdir_in(&parent)
        .map_err(|e| Error::io(&parent, e))?;

    fill(staging.path())?;

    let staged = staging.keep();
    if target.exists() {
        fs::remove_dir_all(target).map_err(|e| Error::io(target, e))?;
    }
    fs::rename(&staged, target).map_err(|e| Error::io(target, e))?;
    Ok(())
}

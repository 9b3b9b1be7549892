// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Artifact header and footer structures.
//!
//! The header is 12 bytes of fixed-size fields, parsed in one read before
//! anything else. It says what the file holds, whether the payload is brotli
//! compressed, and how long the payload is.
//!
//! The footer is 8 bytes: a CRC32 checksum over everything before it, plus a
//! magic number ("XDZF", the header magic reversed). If the footer is wrong,
//! something got corrupted or truncated. Don't trust the data.

use std::io::{self, Read, Write};

use crc32fast::Hasher as Crc32Hasher;

// ============================================================================
// CONSTANTS
// ============================================================================

/// Magic bytes: "FZDX" in ASCII (header)
pub const MAGIC: [u8; 4] = [0x46, 0x5A, 0x44, 0x58];

/// Footer magic: "XDZF" (reversed, marks valid file end)
pub const FOOTER_MAGIC: [u8; 4] = [0x58, 0x44, 0x5A, 0x46];

/// Current format version
pub const VERSION: u8 = 1;

// ============================================================================
// FLAGS
// ============================================================================

/// Format flags
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FormatFlags(pub(crate) u8);

impl FormatFlags {
    pub const BROTLI: u8 = 0b0000_0001;

    pub fn new() -> Self {
        Self(0)
    }

    pub fn with_brotli(mut self) -> Self {
        self.0 |= Self::BROTLI;
        self
    }

    pub fn is_brotli(self) -> bool {
        self.0 & Self::BROTLI != 0
    }
}

// ============================================================================
// ARTIFACT KINDS
// ============================================================================

/// What an artifact file holds. Stored in the header so a file renamed into
/// the wrong slot is rejected instead of misread.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ArtifactKind {
    Postings = 1,
    TermCounts = 2,
    Documents = 3,
    Lengths = 4,
    IndexManifest = 5,
    DeleteLevel = 6,
    Counter = 7,
    SpellSettings = 8,
    DistanceLevel = 9,
}

impl ArtifactKind {
    pub fn from_byte(byte: u8) -> Option<Self> {
        Some(match byte {
            1 => Self::Postings,
            2 => Self::TermCounts,
            3 => Self::Documents,
            4 => Self::Lengths,
            5 => Self::IndexManifest,
            6 => Self::DeleteLevel,
            7 => Self::Counter,
            8 => Self::SpellSettings,
            9 => Self::DistanceLevel,
            _ => return None,
        })
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Postings => "postings",
            Self::TermCounts => "term counts",
            Self::Documents => "documents",
            Self::Lengths => "document lengths",
            Self::IndexManifest => "index manifest",
            Self::DeleteLevel => "delete neighborhood",
            Self::Counter => "frequency dictionary",
            Self::SpellSettings => "spell settings",
            Self::DistanceLevel => "edit neighborhood",
        }
    }
}

// ============================================================================
// HEADER
// ============================================================================

/// Artifact header (12 bytes fixed size)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactHeader {
    pub version: u8,
    pub flags: FormatFlags,
    pub kind: ArtifactKind,
    pub payload_len: u32,
}

impl ArtifactHeader {
    // 4 (magic) + 1 (version) + 1 (flags) + 1 (kind) + 1 (reserved) + 4 (payload_len) = 12
    pub const SIZE: usize = 12;

    pub fn write<W: Write>(&self, w: &mut W) -> io::Result<()> {
        w.write_all(&MAGIC)?;
        w.write_all(&[self.version, self.flags.0, self.kind as u8, 0])?;
        w.write_all(&self.payload_len.to_le_bytes())?;
        Ok(())
    }

    pub fn read<R: Read>(r: &mut R) -> io::Result<Self> {
        let mut magic = [0u8; 4];
        r.read_exact(&mut magic)?;
        if magic != MAGIC {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!("Invalid magic: expected FZDX, got {:?}", magic),
            ));
        }

        let mut buf = [0u8; 8]; // 12 - 4 (magic) = 8
        r.read_exact(&mut buf)?;

        if buf[0] != VERSION {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!("Unsupported format version {} (expected {})", buf[0], VERSION),
            ));
        }

        let kind = ArtifactKind::from_byte(buf[2]).ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::InvalidData,
                format!("Unknown artifact kind {}", buf[2]),
            )
        })?;

        Ok(Self {
            version: buf[0],
            flags: FormatFlags(buf[1]),
            kind,
            // buf[3] is reserved
            payload_len: u32::from_le_bytes([buf[4], buf[5], buf[6], buf[7]]),
        })
    }

    /// Total file size implied by this header
    pub fn total_size(&self) -> usize {
        Self::SIZE + self.payload_len as usize + ArtifactFooter::SIZE
    }
}

// ============================================================================
// FOOTER (8 bytes)
// ============================================================================

/// Footer with CRC32 checksum and magic number
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactFooter {
    /// CRC32 checksum of header + payload (everything before footer)
    pub crc32: u32,
}

impl ArtifactFooter {
    pub const SIZE: usize = 8; // 4 bytes CRC32 + 4 bytes magic

    pub fn write<W: Write>(&self, w: &mut W) -> io::Result<()> {
        w.write_all(&self.crc32.to_le_bytes())?;
        w.write_all(&FOOTER_MAGIC)?;
        Ok(())
    }

    pub fn read(bytes: &[u8]) -> io::Result<Self> {
        if bytes.len() < Self::SIZE {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "File too short for footer",
            ));
        }

        let footer_start = bytes.len() - Self::SIZE;

        let magic = &bytes[footer_start + 4..];
        if magic != FOOTER_MAGIC {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!("Invalid footer magic: expected XDZF, got {:?}", magic),
            ));
        }

        let crc32 = u32::from_le_bytes([
            bytes[footer_start],
            bytes[footer_start + 1],
            bytes[footer_start + 2],
            bytes[footer_start + 3],
        ]);

        Ok(Self { crc32 })
    }

    /// Compute CRC32 over the given bytes
    pub fn compute_crc32(data: &[u8]) -> u32 {
        let mut hasher = Crc32Hasher::new();
        hasher.update(data);
        hasher.finalize()
    }
}

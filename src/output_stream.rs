/*
 * SPDX-FileCopyrightText: 2026 The bytefst authors
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! Append-mostly write sink abstraction the [`crate::builder::Builder`]
//! writes nodes through.
//!
//! A stream needs exactly three operations: sequential `write`, a
//! `write_at` used once at `finish()` to back-patch the root offset into
//! the header, and `total_bytes_written` so the builder always knows the
//! offset the next write will land at.

use crate::error::Result;
use std::fs::File;
use std::io::{BufWriter, Seek, SeekFrom, Write};
use std::path::Path;

pub trait OutputStream {
    fn write(&mut self, bytes: &[u8]) -> Result<()>;
    fn write_at(&mut self, offset: u64, bytes: &[u8]) -> Result<()>;
    fn total_bytes_written(&self) -> u64;
}

/// File-backed output stream used by the CLI and by any library caller
/// building directly to disk.
pub struct FileOutputStream {
    file: BufWriter<File>,
    position: u64,
}

impl FileOutputStream {
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::create(path)?;
        Ok(Self {
            file: BufWriter::new(file),
            position: 0,
        })
    }
}

impl OutputStream for FileOutputStream {
    fn write(&mut self, bytes: &[u8]) -> Result<()> {
        self.file.write_all(bytes)?;
        self.position += bytes.len() as u64;
        Ok(())
    }

    fn write_at(&mut self, offset: u64, bytes: &[u8]) -> Result<()> {
        self.file.flush()?;
        let current = self.position;
        self.file.get_mut().seek(SeekFrom::Start(offset))?;
        self.file.get_mut().write_all(bytes)?;
        self.file.get_mut().seek(SeekFrom::Start(current))?;
        Ok(())
    }

    fn total_bytes_written(&self) -> u64 {
        self.position
    }
}

/// In-memory output stream, used by tests and by any caller that wants to
/// build an FST without touching disk before handing the bytes to
/// [`crate::reader::Reader::from_bytes`].
#[derive(Default)]
pub struct VecOutputStream {
    buf: Vec<u8>,
}

impl VecOutputStream {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.buf
    }

    pub fn into_vec(self) -> Vec<u8> {
        self.buf
    }
}

impl OutputStream for VecOutputStream {
    fn write(&mut self, bytes: &[u8]) -> Result<()> {
        self.buf.extend_from_slice(bytes);
        Ok(())
    }

    fn write_at(&mut self, offset: u64, bytes: &[u8]) -> Result<()> {
        let off = offset as usize;
        self.buf[off..off + bytes.len()].copy_from_slice(bytes);
        Ok(())
    }

    fn total_bytes_written(&self) -> u64 {
        self.buf.len() as u64
    }
}

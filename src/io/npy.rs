//! Minimal NPY (v1.0) writer for `u8` tensors.
//!
//! Layout: magic `\x93NUMPY`, version `1.0`, little-endian `u16` header
//! length, an ASCII dict padded with spaces and ending in `\n` so the data
//! starts on a 64-byte boundary, then the raw C-order samples.

use crate::assemble::FrankenTensor;
use crate::util::{FrankenError, FrankenResult};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

const MAGIC: &[u8] = b"\x93NUMPY";
const VERSION: [u8; 2] = [1, 0];
const ALIGN: usize = 64;

/// Builds the NPY header for a `(height, width, channels)` `u8` array.
pub fn npy_header(shape: (usize, usize, usize)) -> FrankenResult<Vec<u8>> {
    let (h, w, c) = shape;
    let dict = format!("{{'descr': '|u1', 'fortran_order': False, 'shape': ({h}, {w}, {c}), }}");
    let prefix = MAGIC.len() + VERSION.len() + 2;
    let unpadded = prefix + dict.len() + 1;
    let padding = (ALIGN - unpadded % ALIGN) % ALIGN;
    let header_len = u16::try_from(dict.len() + padding + 1)
        .map_err(|_| FrankenError::InvalidConfig("npy header too long"))?;

    let mut header = Vec::with_capacity(unpadded + padding);
    header.extend_from_slice(MAGIC);
    header.extend_from_slice(&VERSION);
    header.extend_from_slice(&header_len.to_le_bytes());
    header.extend_from_slice(dict.as_bytes());
    header.resize(header.len() + padding, b' ');
    header.push(b'\n');
    Ok(header)
}

/// Encodes a tensor as an in-memory NPY file.
pub fn encode_npy(tensor: &FrankenTensor) -> FrankenResult<Vec<u8>> {
    let mut bytes = npy_header(tensor.shape())?;
    bytes.extend_from_slice(tensor.as_slice());
    Ok(bytes)
}

/// Writes a tensor to `path` as an NPY file, replacing any existing file.
pub fn write_npy<P: AsRef<Path>>(path: P, tensor: &FrankenTensor) -> FrankenResult<()> {
    let header = npy_header(tensor.shape())?;
    let file = File::create(path.as_ref()).map_err(|err| FrankenError::Io {
        reason: format!("{}: {err}", path.as_ref().display()),
    })?;
    let mut writer = BufWriter::new(file);
    writer.write_all(&header)?;
    writer.write_all(tensor.as_slice())?;
    writer.flush()?;
    Ok(())
}

//! File collaborators: grid loading and array output.
//!
//! The `.npy` writer is always available; image decoding needs the
//! `image-io` feature.

pub mod npy;

#[cfg(feature = "image-io")]
pub mod loader;

use std::path::{Path, PathBuf};

/// Directory, under the output root, that receives the tensors.
pub const OUTPUT_SUBDIR: &str = "frankenpatches";

/// Returns `<output_dir>/frankenpatches/<stem>.npy` for a source file name.
pub fn output_path<P: AsRef<Path>>(output_dir: P, file_name: &str) -> PathBuf {
    let stem = Path::new(file_name)
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| file_name.to_string());
    output_dir
        .as_ref()
        .join(OUTPUT_SUBDIR)
        .join(format!("{stem}.npy"))
}

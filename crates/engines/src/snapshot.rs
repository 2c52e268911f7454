//! PNG output of rendered frames.
//!
//! This module is feature-gated behind `png` (default on) so that WASM builds
//! can depend on the `engines` crate without pulling in the `image` crate.
//! Frame rendering itself lives in [`crate::pixel`] (always available).

use crate::pixel::{render_frame, Frame, SnapshotOptions};
use ambient_fx_core::{FxError, SurfaceConfig, Theme};
use std::path::Path;
use tracing::debug;

/// Writes a frame as a PNG image with straight alpha.
///
/// Returns `FxError::Io` on a buffer size mismatch or write failure.
pub fn write_png(frame: &Frame, path: &Path) -> Result<(), FxError> {
    let img = image::RgbaImage::from_raw(frame.width, frame.height, frame.rgba.clone())
        .ok_or_else(|| FxError::Io("RGBA buffer size mismatch".into()))?;
    img.save(path).map_err(|e| FxError::Io(e.to_string()))?;
    debug!(path = %path.display(), width = frame.width, height = frame.height, "snapshot written");
    Ok(())
}

/// Renders the configured effect and writes it to `path`.
pub fn snapshot_png(
    config: &SurfaceConfig,
    theme: Theme,
    opts: &SnapshotOptions,
    path: &Path,
) -> Result<Frame, FxError> {
    let frame = render_frame(config, theme, opts)?;
    write_png(&frame, path)?;
    Ok(frame)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn write_png_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("atmos.png");
        let opts = SnapshotOptions {
            width: 48.0,
            height: 32.0,
            ..SnapshotOptions::default()
        };
        let frame = snapshot_png(&SurfaceConfig::new("atmos", "hero", 5), Theme::default(), &opts, &path).unwrap();

        let img = image::open(&path).unwrap().to_rgba8();
        assert_eq!(img.width(), 48);
        assert_eq!(img.height(), 32);
        assert_eq!(img.into_raw(), frame.rgba);
    }

    #[test]
    fn mismatched_buffer_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let frame = Frame {
            width: 4,
            height: 4,
            rgba: vec![0; 3],
        };
        assert!(matches!(
            write_png(&frame, &dir.path().join("bad.png")),
            Err(FxError::Io(_))
        ));
    }

    #[test]
    fn unwritable_path_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let frame = Frame {
            width: 1,
            height: 1,
            rgba: vec![0; 4],
        };
        let path = dir.path().join("missing").join("out.png");
        assert!(matches!(write_png(&frame, &path), Err(FxError::Io(_))));
    }
}

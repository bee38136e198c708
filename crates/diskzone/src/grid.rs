//! Immutable single-channel pixel grid and image decoding.

use std::path::{Path, PathBuf};

use image::GrayImage;

/// Errors raised while turning an image file or raw buffer into a [`PixelGrid`].
#[derive(Debug, Clone, PartialEq)]
pub enum DecodeError {
    /// The file could not be opened or its container could not be decoded.
    Open {
        /// Path that was requested.
        path: PathBuf,
        /// Underlying decoder message.
        message: String,
    },
    /// A raw sample buffer does not match the requested dimensions.
    InvalidBuffer {
        /// Requested width in pixels.
        width: u32,
        /// Requested height in pixels.
        height: u32,
        /// Number of samples actually provided.
        len: usize,
    },
}

impl std::fmt::Display for DecodeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Open { path, message } => {
                write!(f, "failed to load image {}: {}", path.display(), message)
            }
            Self::InvalidBuffer { width, height, len } => write!(
                f,
                "sample buffer of length {} does not match {}x{} grid",
                len, width, height
            ),
        }
    }
}

impl std::error::Error for DecodeError {}

/// 8-bit intensity grid (0 = black, 255 = white), row-major.
///
/// Never mutated after construction; the locator only reads from it.
#[derive(Debug, Clone)]
pub struct PixelGrid {
    gray: GrayImage,
}

impl PixelGrid {
    /// Wrap an already decoded luma image.
    pub fn from_gray(gray: GrayImage) -> Self {
        Self { gray }
    }

    /// Build a grid from raw row-major samples.
    pub fn from_raw(width: u32, height: u32, samples: Vec<u8>) -> Result<Self, DecodeError> {
        let len = samples.len();
        GrayImage::from_raw(width, height, samples)
            .filter(|_| len == width as usize * height as usize)
            .map(Self::from_gray)
            .ok_or(DecodeError::InvalidBuffer { width, height, len })
    }

    /// Grid filled with one intensity value.
    pub fn uniform(width: u32, height: u32, value: u8) -> Self {
        Self::from_gray(GrayImage::from_pixel(width, height, image::Luma([value])))
    }

    /// Decode an image file and convert it to 8-bit luma.
    pub fn open(path: &Path) -> Result<Self, DecodeError> {
        let img = image::ImageReader::open(path)
            .map_err(|e| DecodeError::Open {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?
            .with_guessed_format()
            .map_err(|e| DecodeError::Open {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?
            .decode()
            .map_err(|e| DecodeError::Open {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;
        Ok(Self::from_gray(img.into_luma8()))
    }

    pub fn width(&self) -> u32 {
        self.gray.width()
    }

    pub fn height(&self) -> u32 {
        self.gray.height()
    }

    /// `(width, height)` in pixels.
    pub fn dimensions(&self) -> (u32, u32) {
        self.gray.dimensions()
    }

    /// Intensity at `(x, y)`. Panics when out of bounds.
    #[inline]
    pub fn get(&self, x: u32, y: u32) -> u8 {
        self.gray.get_pixel(x, y)[0]
    }

    /// Borrow the underlying luma image.
    pub fn as_gray(&self) -> &GrayImage {
        &self.gray
    }
}

impl From<GrayImage> for PixelGrid {
    fn from(gray: GrayImage) -> Self {
        Self::from_gray(gray)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_raw_rejects_short_buffer() {
        let err = PixelGrid::from_raw(4, 4, vec![0; 15]).unwrap_err();
        assert_eq!(
            err,
            DecodeError::InvalidBuffer {
                width: 4,
                height: 4,
                len: 15
            }
        );
    }

    #[test]
    fn from_raw_is_row_major() {
        let grid = PixelGrid::from_raw(3, 2, vec![1, 2, 3, 4, 5, 6]).unwrap();
        assert_eq!(grid.dimensions(), (3, 2));
        assert_eq!(grid.get(0, 0), 1);
        assert_eq!(grid.get(2, 0), 3);
        assert_eq!(grid.get(1, 1), 5);
    }

    #[test]
    fn open_missing_file_reports_path() {
        let err = PixelGrid::open(Path::new("/definitely/not/here.png")).unwrap_err();
        match &err {
            DecodeError::Open { path, .. } => {
                assert_eq!(path, Path::new("/definitely/not/here.png"))
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(err.to_string().contains("here.png"));
    }

    #[test]
    fn open_decodes_png_to_luma() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("plate.png");
        let mut img = GrayImage::from_pixel(8, 6, image::Luma([180]));
        img.put_pixel(3, 2, image::Luma([7]));
        img.save(&path).unwrap();

        let grid = PixelGrid::open(&path).unwrap();
        assert_eq!(grid.dimensions(), (8, 6));
        assert_eq!(grid.get(3, 2), 7);
        assert_eq!(grid.get(0, 0), 180);
    }
}

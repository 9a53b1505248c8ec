//! Frame sources for the video worker.

use image::codecs::gif::GifDecoder;
use image::{AnimationDecoder, DynamicImage, Frames};
use std::collections::VecDeque;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use color_filters::PixelGrid;

use crate::services::codec::{self, DecodeError};

/// File extensions read by [`ImageSequenceSource`].
const SEQUENCE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "bmp", "gif", "webp"];

/// A blocking, pull-based stream of RGB frames.
///
/// Implementations need not be `Send`: the worker opens its source on its
/// own thread and drops it there.
pub trait FrameSource {
    /// Next frame, or `None` once the stream is exhausted.
    fn next_frame(&mut self) -> Result<Option<PixelGrid>, DecodeError>;

    /// Free the underlying device or file. Called exactly once by the
    /// worker, however the loop ends.
    fn release(&mut self) {}
}

/// Frames of an animated GIF, decoded one at a time.
pub struct GifFrameSource {
    path: PathBuf,
    frames: Option<Frames<'static>>,
}

impl GifFrameSource {
    pub fn open(path: impl AsRef<Path>) -> Result<Self, DecodeError> {
        let path = path.as_ref().to_path_buf();
        let reader = BufReader::new(File::open(&path)?);
        let decoder = GifDecoder::new(reader)?;
        Ok(Self {
            path,
            frames: Some(decoder.into_frames()),
        })
    }
}

impl FrameSource for GifFrameSource {
    fn next_frame(&mut self) -> Result<Option<PixelGrid>, DecodeError> {
        let Some(frames) = self.frames.as_mut() else {
            return Ok(None);
        };
        match frames.next() {
            Some(frame) => {
                let rgba = frame?.into_buffer();
                Ok(Some(DynamicImage::ImageRgba8(rgba).to_rgb8()))
            }
            None => Ok(None),
        }
    }

    fn release(&mut self) {
        if self.frames.take().is_some() {
            tracing::debug!(path = %self.path.display(), "Released GIF source");
        }
    }
}

/// Still images read in file-name order, one per frame.
pub struct ImageSequenceSource {
    pending: VecDeque<PathBuf>,
}

impl ImageSequenceSource {
    /// Every image file directly inside `dir`, sorted by name.
    pub fn from_dir(dir: impl AsRef<Path>) -> Result<Self, DecodeError> {
        let mut paths: Vec<PathBuf> = std::fs::read_dir(dir.as_ref())?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|path| path.is_file() && has_image_extension(path))
            .collect();
        paths.sort();

        tracing::debug!(
            dir = %dir.as_ref().display(),
            frames = paths.len(),
            "Opened image sequence"
        );
        Ok(Self {
            pending: paths.into(),
        })
    }

    pub fn from_paths(paths: impl IntoIterator<Item = PathBuf>) -> Self {
        Self {
            pending: paths.into_iter().collect(),
        }
    }

    pub fn remaining(&self) -> usize {
        self.pending.len()
    }
}

impl FrameSource for ImageSequenceSource {
    fn next_frame(&mut self) -> Result<Option<PixelGrid>, DecodeError> {
        let Some(path) = self.pending.pop_front() else {
            return Ok(None);
        };
        let bytes = std::fs::read(&path)?;
        codec::decode_image(&bytes).map(Some)
    }

    fn release(&mut self) {
        self.pending.clear();
    }
}

fn has_image_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| SEQUENCE_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
        .unwrap_or(false)
}

/// Open a directory as an image sequence, a `.gif` as an animation, and
/// anything else as a single still frame.
pub fn open_source(path: &Path) -> Result<Box<dyn FrameSource>, DecodeError> {
    if path.is_dir() {
        return Ok(Box::new(ImageSequenceSource::from_dir(path)?));
    }
    let is_gif = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("gif"));
    if is_gif {
        Ok(Box::new(GifFrameSource::open(path)?))
    } else {
        Ok(Box::new(ImageSequenceSource::from_paths([path.to_path_buf()])))
    }
}

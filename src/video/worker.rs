//! Background frame-processing loop.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::JoinHandle;

use color_filters::{FilterError, FilterSettings};
use thiserror::Error;
use tokio::sync::watch;

use super::sink::{FrameSink, ProcessedFrame};
use super::source::FrameSource;
use crate::services::codec::DecodeError;

#[derive(Debug, Error)]
pub enum VideoError {
    #[error("Failed to open frame source: {0}")]
    Open(#[source] DecodeError),

    #[error("Failed to decode frame {frame}: {source}")]
    Decode {
        frame: u64,
        #[source]
        source: DecodeError,
    },

    #[error("Failed to filter frame: {0}")]
    Filter(#[from] FilterError),

    #[error("Failed to start worker thread: {0}")]
    Spawn(#[source] std::io::Error),

    #[error("Video worker panicked")]
    Panicked,
}

/// Why the loop ended without an error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkerExit {
    /// The source ran out of frames
    EndOfSource,
    /// [`VideoWorker::stop`] was called
    Stopped,
    /// Nobody is receiving frames any more
    SinkClosed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkerReport {
    /// Frames filtered and delivered
    pub frames: u64,
    pub exit: WorkerExit,
}

/// Releases the source when dropped, including during unwinding.
struct ReleaseGuard(Box<dyn FrameSource>);

impl Drop for ReleaseGuard {
    fn drop(&mut self) {
        self.0.release();
    }
}

/// A single background thread that pulls frames, filters them with the
/// latest settings and hands them to a sink, strictly in order.
///
/// [`stop`](Self::stop) and dropping the worker only raise a flag. The
/// loop notices it at the next frame boundary, so a source blocked inside
/// [`FrameSource::next_frame`] is released once that call returns. Callers
/// that must see the release happen (closing a window, exiting the
/// process) stop the worker and then [`join`](Self::join) it.
pub struct VideoWorker {
    stop: Arc<AtomicBool>,
    handle: Option<JoinHandle<Result<WorkerReport, VideoError>>>,
}

impl VideoWorker {
    /// Start the worker.
    ///
    /// `open` runs on the worker thread, so sources that are not `Send`
    /// (GIF decoders, capture devices) can be used.
    pub fn spawn<F, K>(
        open: F,
        settings: watch::Receiver<FilterSettings>,
        sink: K,
    ) -> Result<Self, VideoError>
    where
        F: FnOnce() -> Result<Box<dyn FrameSource>, DecodeError> + Send + 'static,
        K: FrameSink + 'static,
    {
        let stop = Arc::new(AtomicBool::new(false));
        let flag = stop.clone();

        let handle = std::thread::Builder::new()
            .name("video-worker".to_string())
            .spawn(move || run(open, settings, sink, &flag))
            .map_err(VideoError::Spawn)?;

        Ok(Self {
            stop,
            handle: Some(handle),
        })
    }

    /// Ask the loop to end before its next frame.
    pub fn stop(&self) {
        self.stop.store(true, Ordering::Release);
    }

    pub fn is_finished(&self) -> bool {
        self.handle.as_ref().map_or(true, |h| h.is_finished())
    }

    /// Wait for the loop to end. Blocks the calling thread.
    pub fn join(mut self) -> Result<WorkerReport, VideoError> {
        match self.handle.take() {
            Some(handle) => handle.join().map_err(|_| VideoError::Panicked)?,
            None => Err(VideoError::Panicked),
        }
    }
}

impl Drop for VideoWorker {
    fn drop(&mut self) {
        // The thread keeps running until its next frame boundary, where it
        // sees the flag and releases the source
        self.stop();
    }
}

fn run<F, K>(
    open: F,
    settings: watch::Receiver<FilterSettings>,
    mut sink: K,
    stop: &AtomicBool,
) -> Result<WorkerReport, VideoError>
where
    F: FnOnce() -> Result<Box<dyn FrameSource>, DecodeError>,
    K: FrameSink,
{
    let mut source = ReleaseGuard(open().map_err(VideoError::Open)?);
    let mut frames = 0u64;

    tracing::debug!("Video worker started");

    let exit = loop {
        if stop.load(Ordering::Acquire) {
            break WorkerExit::Stopped;
        }

        let frame = match source.0.next_frame() {
            Ok(Some(frame)) => frame,
            Ok(None) => break WorkerExit::EndOfSource,
            Err(e) => {
                tracing::warn!(frame = frames, error = %e, "Frame decode failed, stopping");
                return Err(VideoError::Decode {
                    frame: frames,
                    source: e,
                });
            }
        };

        let snapshot = *settings.borrow();
        let grid = color_filters::apply(&frame, &snapshot)?;

        if sink
            .deliver(ProcessedFrame {
                index: frames,
                grid,
            })
            .is_err()
        {
            break WorkerExit::SinkClosed;
        }
        frames += 1;
    };

    tracing::info!(frames, exit = ?exit, "Video worker finished");
    Ok(WorkerReport { frames, exit })
}

//! Frame-by-frame filtering on a background thread.
//!
//! A [`VideoWorker`] owns one [`FrameSource`] and loops: check the stop
//! flag, pull a frame, copy the current settings from a
//! [`SettingsHandle`], filter, deliver to a [`FrameSink`]. Presentation
//! stays on whichever thread owns the display; [`ChannelSink`] carries the
//! frames there.
//!
//! The source is released exactly once whether the loop finishes, is
//! stopped, fails, or panics.

mod settings;
mod sink;
mod source;
mod worker;

pub use settings::SettingsHandle;
pub use sink::{ChannelSink, FrameSink, ProcessedFrame, SinkClosed};
pub use source::{open_source, FrameSource, GifFrameSource, ImageSequenceSource};
pub use worker::{VideoError, VideoWorker, WorkerExit, WorkerReport};

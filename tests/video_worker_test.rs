//! Integration tests for the background video worker.

mod common;

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{mpsc, Arc};
use std::time::Duration;

use color_filters::{FilterSettings, PixelGrid};
use coloraid::services::codec::DecodeError;
use coloraid::video::{
    ChannelSink, FrameSource, SettingsHandle, VideoError, VideoWorker, WorkerExit,
};
use common::fixtures::{solid, white};

const RECV_TIMEOUT: Duration = Duration::from_secs(5);

/// Source fed from a test-side channel; counts releases.
struct ScriptedSource {
    frames: mpsc::Receiver<Result<PixelGrid, DecodeError>>,
    releases: Arc<AtomicUsize>,
    panic_on_next: bool,
}

impl FrameSource for ScriptedSource {
    fn next_frame(&mut self) -> Result<Option<PixelGrid>, DecodeError> {
        if self.panic_on_next {
            panic!("capture device exploded");
        }
        match self.frames.recv() {
            Ok(frame) => frame.map(Some),
            // Sender dropped: end of stream
            Err(_) => Ok(None),
        }
    }

    fn release(&mut self) {
        self.releases.fetch_add(1, Ordering::SeqCst);
    }
}

struct Harness {
    frames_tx: mpsc::Sender<Result<PixelGrid, DecodeError>>,
    releases: Arc<AtomicUsize>,
    output: tokio::sync::mpsc::UnboundedReceiver<coloraid::video::ProcessedFrame>,
    settings: SettingsHandle,
    worker: VideoWorker,
}

fn start(initial: FilterSettings, panic_on_next: bool) -> Harness {
    let (frames_tx, frames_rx) = mpsc::channel();
    let releases = Arc::new(AtomicUsize::new(0));
    let settings = SettingsHandle::new(initial).unwrap();
    let (sink, output) = ChannelSink::channel();

    let source_releases = releases.clone();
    let worker = VideoWorker::spawn(
        move || {
            Ok(Box::new(ScriptedSource {
                frames: frames_rx,
                releases: source_releases,
                panic_on_next,
            }) as Box<dyn FrameSource>)
        },
        settings.subscribe(),
        sink,
    )
    .unwrap();

    Harness {
        frames_tx,
        releases,
        output,
        settings,
        worker,
    }
}

/// Blocking receive with a timeout so a broken worker fails the test
/// instead of hanging it.
fn recv(output: &mut tokio::sync::mpsc::UnboundedReceiver<coloraid::video::ProcessedFrame>) -> coloraid::video::ProcessedFrame {
    let deadline = std::time::Instant::now() + RECV_TIMEOUT;
    loop {
        match output.try_recv() {
            Ok(frame) => return frame,
            Err(tokio::sync::mpsc::error::TryRecvError::Empty) => {
                assert!(std::time::Instant::now() < deadline, "timed out waiting for a frame");
                std::thread::sleep(Duration::from_millis(5));
            }
            Err(e) => panic!("output channel closed: {e}"),
        }
    }
}

#[test]
fn test_processes_every_frame_in_order_until_end() {
    let mut h = start(FilterSettings::identity(), false);

    for level in [10u8, 20, 30] {
        h.frames_tx.send(Ok(solid(2, 2, [level; 3]))).unwrap();
    }
    drop(h.frames_tx);

    let mut seen = Vec::new();
    for _ in 0..3 {
        let frame = recv(&mut h.output);
        seen.push((frame.index, frame.grid.get_pixel(0, 0).0[0]));
    }
    assert_eq!(seen, vec![(0, 10), (1, 20), (2, 30)]);

    let report = h.worker.join().unwrap();
    assert_eq!(report.frames, 3);
    assert_eq!(report.exit, WorkerExit::EndOfSource);
    assert_eq!(h.releases.load(Ordering::SeqCst), 1);
}

#[test]
fn test_picks_up_settings_between_frames() {
    let mut h = start(FilterSettings::identity(), false);

    h.frames_tx.send(Ok(white())).unwrap();
    assert_eq!(recv(&mut h.output).grid, white());

    h.settings
        .update(FilterSettings::identity().invert(true))
        .unwrap();
    h.frames_tx.send(Ok(white())).unwrap();
    assert_eq!(recv(&mut h.output).grid, solid(2, 2, [0, 0, 0]));

    drop(h.frames_tx);
    assert_eq!(h.worker.join().unwrap().frames, 2);
}

#[test]
fn test_stop_ends_loop_and_releases() {
    let mut h = start(FilterSettings::identity(), false);

    h.frames_tx.send(Ok(white())).unwrap();
    recv(&mut h.output);

    h.worker.stop();
    // Unblock the pending read; the flag is checked before the next one
    h.frames_tx.send(Ok(white())).unwrap();

    let report = h.worker.join().unwrap();
    assert_eq!(report.exit, WorkerExit::Stopped);
    assert!(report.frames <= 2);
    assert_eq!(h.releases.load(Ordering::SeqCst), 1);
}

#[test]
fn test_decode_error_ends_loop_and_releases() {
    let mut h = start(FilterSettings::identity(), false);

    h.frames_tx.send(Ok(white())).unwrap();
    h.frames_tx.send(Err(DecodeError::Empty)).unwrap();
    h.frames_tx.send(Ok(white())).unwrap();

    assert_eq!(recv(&mut h.output).index, 0);

    match h.worker.join() {
        Err(VideoError::Decode { frame, .. }) => assert_eq!(frame, 1),
        other => panic!("expected decode error, got {other:?}"),
    }
    assert_eq!(h.releases.load(Ordering::SeqCst), 1);
    assert!(h.output.try_recv().is_err(), "no frame after the error");
}

#[test]
fn test_panic_still_releases() {
    let h = start(FilterSettings::identity(), true);

    assert!(matches!(h.worker.join(), Err(VideoError::Panicked)));
    assert_eq!(h.releases.load(Ordering::SeqCst), 1);
}

#[test]
fn test_closed_sink_stops_worker() {
    let h = start(FilterSettings::identity(), false);
    drop(h.output);

    h.frames_tx.send(Ok(white())).unwrap();

    let report = h.worker.join().unwrap();
    assert_eq!(report.exit, WorkerExit::SinkClosed);
    assert_eq!(report.frames, 0);
    assert_eq!(h.releases.load(Ordering::SeqCst), 1);
}

#[test]
fn test_open_failure() {
    let (sink, _output) = ChannelSink::channel();
    let settings = SettingsHandle::new(FilterSettings::default()).unwrap();

    let worker = VideoWorker::spawn(
        || Err(DecodeError::Empty),
        settings.subscribe(),
        sink,
    )
    .unwrap();

    assert!(matches!(worker.join(), Err(VideoError::Open(_))));
}

#[test]
fn test_gif_end_to_end() {
    use image::codecs::gif::GifEncoder;
    use image::{Delay, Frame, Rgba, RgbaImage};

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("clip.gif");
    {
        let file = std::fs::File::create(&path).unwrap();
        let mut encoder = GifEncoder::new(file);
        let frames = (0..3).map(|_| {
            Frame::from_parts(
                RgbaImage::from_pixel(3, 3, Rgba([255, 255, 255, 255])),
                0,
                0,
                Delay::from_numer_denom_ms(40, 1),
            )
        });
        encoder.encode_frames(frames).unwrap();
    }

    let settings = SettingsHandle::new(FilterSettings::identity().invert(true)).unwrap();
    let (sink, mut output) = ChannelSink::channel();
    let worker = VideoWorker::spawn(
        move || coloraid::video::open_source(&path),
        settings.subscribe(),
        sink,
    )
    .unwrap();

    let report = worker.join().unwrap();
    assert_eq!(report.frames, 3);
    assert_eq!(report.exit, WorkerExit::EndOfSource);

    for expected in 0..3 {
        let frame = output.try_recv().unwrap();
        assert_eq!(frame.index, expected);
        assert!(frame.grid.iter().all(|&s| s == 0));
    }
}

#[test]
fn test_receiver_dropped_mid_stream_releases_once() {
    let mut h = start(FilterSettings::identity(), false);

    h.frames_tx.send(Ok(white())).unwrap();
    h.frames_tx.send(Ok(white())).unwrap();
    assert_eq!(recv(&mut h.output).index, 0);
    assert_eq!(recv(&mut h.output).index, 1);

    drop(h.output);
    h.frames_tx.send(Ok(white())).unwrap();

    let report = h.worker.join().unwrap();
    assert_eq!(report.exit, WorkerExit::SinkClosed);
    assert_eq!(report.frames, 2);
    assert_eq!(h.releases.load(Ordering::SeqCst), 1);

    // Nothing releases a second time once the source goes quiet
    drop(h.frames_tx);
    assert_eq!(h.releases.load(Ordering::SeqCst), 1);
}

#[test]
fn test_dropped_worker_releases_at_next_frame_boundary() {
    let h = start(FilterSettings::identity(), false);

    // The worker is now blocked waiting for a frame
    std::thread::sleep(Duration::from_millis(50));
    drop(h.worker);
    assert_eq!(h.releases.load(Ordering::SeqCst), 0);

    // Unblocking the read lets the thread see the flag
    h.frames_tx.send(Ok(white())).unwrap();

    let deadline = std::time::Instant::now() + RECV_TIMEOUT;
    while h.releases.load(Ordering::SeqCst) == 0 {
        assert!(std::time::Instant::now() < deadline, "source never released");
        std::thread::sleep(Duration::from_millis(5));
    }
    std::thread::sleep(Duration::from_millis(20));
    assert_eq!(h.releases.load(Ordering::SeqCst), 1);
}

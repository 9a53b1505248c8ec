use color_filters::PixelGrid;
use tokio::sync::mpsc;

/// One filtered frame with its position in the stream (0-based).
#[derive(Debug, Clone)]
pub struct ProcessedFrame {
    pub index: u64,
    pub grid: PixelGrid,
}

/// The receiving side went away; the worker stops producing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SinkClosed;

/// Where the worker delivers processed frames.
pub trait FrameSink: Send {
    fn deliver(&mut self, frame: ProcessedFrame) -> Result<(), SinkClosed>;
}

/// Hands frames to the thread that owns the display surface.
///
/// The channel is unbounded: the worker never waits on the presenter and
/// never drops a frame.
pub struct ChannelSink {
    tx: mpsc::UnboundedSender<ProcessedFrame>,
}

impl ChannelSink {
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<ProcessedFrame>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl FrameSink for ChannelSink {
    fn deliver(&mut self, frame: ProcessedFrame) -> Result<(), SinkClosed> {
        self.tx.send(frame).map_err(|_| SinkClosed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channel_sink_delivers_in_order() {
        let (mut sink, mut rx) = ChannelSink::channel();
        for index in 0..3 {
            sink.deliver(ProcessedFrame {
                index,
                grid: PixelGrid::new(1, 1),
            })
            .unwrap();
        }
        let indices: Vec<u64> = std::iter::from_fn(|| rx.try_recv().ok())
            .map(|f| f.index)
            .collect();
        assert_eq!(indices, vec![0, 1, 2]);
    }

    #[test]
    fn test_channel_sink_closed() {
        let (mut sink, rx) = ChannelSink::channel();
        drop(rx);
        let result = sink.deliver(ProcessedFrame {
            index: 0,
            grid: PixelGrid::new(1, 1),
        });
        assert_eq!(result, Err(SinkClosed));
    }
}

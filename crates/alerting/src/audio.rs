//! Audio output channels

use crate::Sample;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Full mixer volume
pub const MAX_VOLUME: u8 = 128;

/// Mixer channels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    /// Spoken warnings from the arbitration queue
    Warning = 0,
    /// Distance pacing beeps
    Pacing = 1,
}

impl Channel {
    pub fn index(self) -> usize {
        self as usize
    }
}

/// Sample player with a small number of mixer channels
pub trait AudioSink: Send + Sync {
    /// Start `sample` on `channel`, replacing whatever it was playing
    fn play(&self, sample: Sample, channel: Channel);

    /// Whether `channel` is still playing
    fn is_busy(&self, channel: Channel) -> bool;

    fn set_volume(&self, channel: Channel, level: u8);
}

/// Exclusive handle on one mixer channel.
///
/// Not `Clone`: whoever holds the handle is the only writer to the channel.
pub struct AudioChannel {
    sink: Arc<dyn AudioSink>,
    channel: Channel,
}

impl AudioChannel {
    pub fn claim(sink: Arc<dyn AudioSink>, channel: Channel) -> Self {
        Self { sink, channel }
    }

    pub fn play(&self, sample: Sample) {
        self.sink.play(sample, self.channel);
    }

    pub fn is_busy(&self) -> bool {
        self.sink.is_busy(self.channel)
    }

    pub fn set_volume(&self, level: u8) {
        self.sink.set_volume(self.channel, level);
    }

    pub fn channel(&self) -> Channel {
        self.channel
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Sink that logs every cue and treats each sample as a fixed-length clip
pub struct LoggingAudioSink {
    clip_length: Duration,
    busy_until: Mutex<[Option<Instant>; 2]>,
}

impl LoggingAudioSink {
    pub fn new(clip_length: Duration) -> Self {
        Self {
            clip_length,
            busy_until: Mutex::new([None; 2]),
        }
    }
}

impl AudioSink for LoggingAudioSink {
    fn play(&self, sample: Sample, channel: Channel) {
        info!("[audio ch{}] {}", channel.index(), sample.file_name());
        lock(&self.busy_until)[channel.index()] = Some(Instant::now() + self.clip_length);
    }

    fn is_busy(&self, channel: Channel) -> bool {
        lock(&self.busy_until)[channel.index()].map_or(false, |until| Instant::now() < until)
    }

    fn set_volume(&self, channel: Channel, level: u8) {
        debug!("[audio ch{}] volume {}", channel.index(), level);
    }
}

/// Sink that records cues; busy flags are set by hand
#[derive(Default)]
pub struct RecordingAudioSink {
    played: Mutex<Vec<(Sample, Channel)>>,
    busy: [AtomicBool; 2],
    volume: Mutex<[u8; 2]>,
}

impl RecordingAudioSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_busy(&self, channel: Channel, busy: bool) {
        self.busy[channel.index()].store(busy, Ordering::SeqCst);
    }

    /// Every cue in play order
    pub fn played(&self) -> Vec<(Sample, Channel)> {
        lock(&self.played).clone()
    }

    /// Cues played on one channel
    pub fn played_on(&self, channel: Channel) -> Vec<Sample> {
        lock(&self.played)
            .iter()
            .filter(|(_, c)| *c == channel)
            .map(|(s, _)| *s)
            .collect()
    }

    pub fn volume(&self, channel: Channel) -> u8 {
        lock(&self.volume)[channel.index()]
    }
}

impl AudioSink for RecordingAudioSink {
    fn play(&self, sample: Sample, channel: Channel) {
        lock(&self.played).push((sample, channel));
    }

    fn is_busy(&self, channel: Channel) -> bool {
        self.busy[channel.index()].load(Ordering::SeqCst)
    }

    fn set_volume(&self, channel: Channel, level: u8) {
        lock(&self.volume)[channel.index()] = level;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channel_handle_routes_to_its_channel() {
        let sink = Arc::new(RecordingAudioSink::new());
        let pacing = AudioChannel::claim(sink.clone(), Channel::Pacing);
        pacing.set_volume(MAX_VOLUME);
        pacing.play(Sample::ShortBeep);

        assert_eq!(sink.played(), vec![(Sample::ShortBeep, Channel::Pacing)]);
        assert_eq!(sink.volume(Channel::Pacing), MAX_VOLUME);
        assert_eq!(sink.volume(Channel::Warning), 0);
    }

    #[test]
    fn test_logging_sink_busy_window() {
        let sink = LoggingAudioSink::new(Duration::from_secs(60));
        assert!(!sink.is_busy(Channel::Warning));
        sink.play(Sample::StartSignal, Channel::Warning);
        assert!(sink.is_busy(Channel::Warning));
        assert!(!sink.is_busy(Channel::Pacing));
    }
}

//! A media element that pretends to play.
//!
//! Sources are never fetched. An `http(s)` source "loads" instantly and plays
//! for a fixed clip length, reporting its position once per tick. Anything
//! else fails to load.

use globetune_core::{DurationExt, Event, LoadId, MediaBackend, MediaEvent, SessionHandle};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

const LOG_TARGET: &str = "globetune::media";

/// Default length of a simulated clip
pub const DEFAULT_CLIP_LENGTH: Duration = Duration::from_secs(30);

/// Default interval between position reports
pub const DEFAULT_TICK: Duration = Duration::from_secs(1);

#[derive(Debug, Clone, Copy)]
struct Loaded {
    load: LoadId,
    length: Duration,
}

pub struct SimulatedMedia {
    events: SessionHandle,
    clip_length: Duration,
    tick: Duration,
    cancel_token: CancellationToken,
    loaded: Option<Loaded>,
    position_ms: Arc<AtomicU64>,
    ticker: Option<CancellationToken>,
}

impl SimulatedMedia {
    /// Create a simulated element reporting to `events`.
    ///
    /// Ticker tasks are children of `cancel_token` and stop with it.
    #[must_use]
    pub fn new(events: SessionHandle, cancel_token: CancellationToken) -> Self {
        Self {
            events,
            clip_length: DEFAULT_CLIP_LENGTH,
            tick: DEFAULT_TICK,
            cancel_token,
            loaded: None,
            position_ms: Arc::new(AtomicU64::new(0)),
            ticker: None,
        }
    }

    #[must_use]
    pub fn with_clip_length(mut self, clip_length: Duration) -> Self {
        self.clip_length = clip_length;
        self
    }

    #[must_use]
    pub fn with_tick(mut self, tick: Duration) -> Self {
        self.tick = tick;
        self
    }

    fn report(&self, load: LoadId, event: MediaEvent) {
        if let Err(e) = self.events.send(Event::Media { load, event }) {
            debug!(target: LOG_TARGET, "Dropping media event: {}", e);
        }
    }

    fn stop_ticker(&mut self) {
        if let Some(ticker) = self.ticker.take() {
            ticker.cancel();
        }
    }

    fn set_position(&self, position: Duration) {
        self.position_ms
            .store(position.as_millis_u64(), Ordering::Relaxed);
    }
}

fn is_streamable(source: &str) -> bool {
    let lower = source.to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

impl MediaBackend for SimulatedMedia {
    fn load(&mut self, load: LoadId, source: &str) {
        self.stop_ticker();
        self.set_position(Duration::ZERO);

        if !is_streamable(source) {
            warn!(target: LOG_TARGET, "Cannot load {}: not an http(s) source", source);
            self.loaded = None;
            self.report(
                load,
                MediaEvent::Error {
                    reason: "unsupported source".to_string(),
                },
            );
            return;
        }

        debug!(target: LOG_TARGET, "Loaded {} as {}", source, load);
        let length = self.clip_length;
        self.loaded = Some(Loaded { load, length });
        self.report(load, MediaEvent::MetadataLoaded { duration: length });
    }

    fn play(&mut self) {
        let Some(Loaded { load, length }) = self.loaded else {
            return;
        };
        if self.ticker.is_some() {
            return;
        }

        let ticker = self.cancel_token.child_token();
        self.ticker = Some(ticker.clone());

        let events = self.events.clone();
        let position_ms = Arc::clone(&self.position_ms);
        let tick = self.tick;
        let length_ms = length.as_millis_u64();

        tokio::spawn(async move {
            let mut interval = tokio::time::interval_at(tokio::time::Instant::now() + tick, tick);
            loop {
                tokio::select! {
                    () = ticker.cancelled() => break,
                    _ = interval.tick() => {
                        let next = position_ms
                            .load(Ordering::Relaxed)
                            .saturating_add(tick.as_millis_u64())
                            .min(length_ms);
                        position_ms.store(next, Ordering::Relaxed);

                        let position = Duration::from_millis(next);
                        let sent = events.send(Event::Media {
                            load,
                            event: MediaEvent::PositionChanged { position },
                        });
                        if sent.is_err() {
                            break;
                        }
                        if next >= length_ms {
                            let _ = events.send(Event::Media {
                                load,
                                event: MediaEvent::Ended,
                            });
                            break;
                        }
                    }
                }
            }
        });
    }

    fn pause(&mut self) {
        self.stop_ticker();
    }

    fn seek(&mut self, position: Duration) {
        let length = self.loaded.map_or(Duration::ZERO, |loaded| loaded.length);
        self.set_position(position.min(length));
    }

    fn unload(&mut self) {
        self.stop_ticker();
        self.loaded = None;
        self.set_position(Duration::ZERO);
    }

    fn current_position(&self) -> Duration {
        Duration::from_millis(self.position_ms.load(Ordering::Relaxed))
    }
}

impl Drop for SimulatedMedia {
    fn drop(&mut self) {
        self.stop_ticker();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use globetune_core::{channel, SessionEvents};

    fn media() -> (SimulatedMedia, SessionEvents) {
        let (handle, events) = channel();
        let media = SimulatedMedia::new(handle, CancellationToken::new())
            .with_clip_length(Duration::from_secs(3))
            .with_tick(Duration::from_secs(1));
        (media, events)
    }

    fn media_event(received: Option<Event>) -> (LoadId, MediaEvent) {
        let Some(Event::Media { load, event }) = received else {
            unreachable!("expected a media event");
        };
        (load, event)
    }

    #[tokio::test(start_paused = true)]
    async fn test_load_reports_metadata() {
        let (mut media, mut events) = media();
        media.load(LoadId::new(1), "https://cdn.example/a.mp3");

        assert_eq!(
            media_event(events.recv().await),
            (
                LoadId::new(1),
                MediaEvent::MetadataLoaded {
                    duration: Duration::from_secs(3)
                }
            )
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_non_http_source_fails() {
        let (mut media, mut events) = media();
        media.load(LoadId::new(4), "file:///music/a.mp3");

        let (load, event) = media_event(events.recv().await);
        assert_eq!(load, LoadId::new(4));
        assert!(matches!(event, MediaEvent::Error { .. }));

        media.play();
        tokio::time::sleep(Duration::from_secs(5)).await;
        assert!(events.try_recv().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_play_ticks_until_ended() {
        let (mut media, mut events) = media();
        media.load(LoadId::new(1), "https://cdn.example/a.mp3");
        events.recv().await;

        media.play();
        let mut positions = Vec::new();
        loop {
            match media_event(events.recv().await) {
                (_, MediaEvent::PositionChanged { position }) => positions.push(position.as_secs()),
                (load, MediaEvent::Ended) => {
                    assert_eq!(load, LoadId::new(1));
                    break;
                }
                (_, other) => unreachable!("unexpected {other:?}"),
            }
        }
        assert_eq!(positions, vec![1, 2, 3]);
        assert_eq!(media.current_position(), Duration::from_secs(3));
    }

    #[tokio::test(start_paused = true)]
    async fn test_pause_stops_ticking() {
        let (mut media, mut events) = media();
        media.load(LoadId::new(1), "https://cdn.example/a.mp3");
        events.recv().await;

        media.play();
        media_event(events.recv().await);
        media.pause();

        tokio::time::sleep(Duration::from_secs(10)).await;
        assert!(events.try_recv().is_none());
        assert_eq!(media.current_position(), Duration::from_secs(1));
    }

    #[tokio::test(start_paused = true)]
    async fn test_seek_clamps_and_unload_resets() {
        let (mut media, mut events) = media();
        media.load(LoadId::new(1), "https://cdn.example/a.mp3");
        events.recv().await;

        media.seek(Duration::from_secs(60));
        assert_eq!(media.current_position(), Duration::from_secs(3));

        media.unload();
        assert_eq!(media.current_position(), Duration::ZERO);
    }
}

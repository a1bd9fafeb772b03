use globetune_core::{
    Notice, NoticeLevel, PlaybackStatus, Presenter, RegionHeader, TrackListView, TransportView,
};
use std::io::Write;
use tracing::debug;

const LOG_TARGET: &str = "globetune::console";

/// Presenter that prints to a terminal (or any writer)
pub struct ConsolePresenter<W> {
    out: W,
    /// Last transport line printed, minus the ticking elapsed time
    last_transport: Option<(PlaybackStatus, String, String)>,
}

impl<W: Write + Send> ConsolePresenter<W> {
    #[must_use]
    pub const fn new(out: W) -> Self {
        Self {
            out,
            last_transport: None,
        }
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out
    }

    fn line(&mut self, text: &str) {
        if let Err(e) = writeln!(self.out, "{text}").and_then(|()| self.out.flush()) {
            debug!(target: LOG_TARGET, "Failed to write to console: {}", e);
        }
    }
}

impl<W: Write + Send> Presenter for ConsolePresenter<W> {
    fn render_region_header(&mut self, header: &RegionHeader) {
        self.line(&format!("== {} ==", header.title()));
        if let Some(subtitle) = header.subtitle() {
            self.line(&format!("   {subtitle}"));
        }
    }

    fn render_track_list(&mut self, list: &TrackListView<'_>) {
        if let Some(message) = list.empty_message {
            self.line(&format!("   {message}"));
            return;
        }
        for visible in &list.tracks {
            let marker = if list.is_highlighted(visible) { '>' } else { ' ' };
            let track = visible.track;
            self.line(&format!(
                " {marker} [{}] {} - {} ({})",
                visible.index,
                track.title(),
                track.artist(),
                track.genre()
            ));
        }
    }

    fn render_transport_state(&mut self, transport: &TransportView) {
        // Position ticks alone are not worth a new line
        let key = (
            transport.status,
            transport.label(),
            transport.duration.clone(),
        );
        if self.last_transport.as_ref() == Some(&key) {
            return;
        }
        self.line(&format!(
            "[{}] {} {} / {}",
            transport.status,
            key.1,
            transport.elapsed,
            transport.duration
        ));
        self.last_transport = Some(key);
    }

    fn render_notice(&mut self, notice: &Notice) {
        let prefix = match notice.level {
            NoticeLevel::Warning => "warning",
            NoticeLevel::Error => "error",
        };
        self.line(&format!("{prefix}: {}", notice.message));
    }
}

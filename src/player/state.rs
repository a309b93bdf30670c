use std::sync::mpsc::Sender;

use crate::api::{ApiCmd, Track};
use crate::toast::Notice;

/// Fallback track length when the catalog has no duration.
pub const DEFAULT_DURATION_SECS: f64 = 180.0;

/// The coarse playback state, derived from the player's fields.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum PlaybackState {
    /// No track has been loaded yet.
    Empty,
    Playing,
    Paused,
}

/// The player model. All playback state lives here and is mutated only
/// through the methods below; the UI renders a projection of it and never
/// writes back.
pub struct Player {
    pub current: Option<Track>,
    pub playing: bool,
    /// Seconds into the current track. Never exceeds `duration_secs`.
    pub position_secs: f64,
    pub duration_secs: f64,
    /// Volume fraction in `[0, 1]`.
    pub volume: f32,
    pub playlist: Vec<Track>,
    /// Index into `playlist`, when a playlist entry is the current track.
    pub current_index: Option<usize>,
    /// Whether the player bar is shown at all.
    pub visible: bool,

    api_tx: Sender<ApiCmd>,
}

impl Player {
    pub fn new(api_tx: Sender<ApiCmd>, default_volume: f32) -> Self {
        Self {
            current: None,
            playing: false,
            position_secs: 0.0,
            duration_secs: 0.0,
            volume: default_volume.clamp(0.0, 1.0),
            playlist: Vec::new(),
            current_index: None,
            visible: false,
            api_tx,
        }
    }

    pub fn state(&self) -> PlaybackState {
        match (&self.current, self.playing) {
            (None, _) => PlaybackState::Empty,
            (Some(_), true) => PlaybackState::Playing,
            (Some(_), false) => PlaybackState::Paused,
        }
    }

    /// Load `track` and start playing it from the top.
    ///
    /// The local state change always happens first; the play-history record
    /// is fired afterwards and nobody waits for it.
    pub fn play(&mut self, track: Track) -> Notice {
        let id = track.id;
        let title = track.title.clone();

        self.duration_secs = track.duration.filter(|d| *d > 0.0).unwrap_or(DEFAULT_DURATION_SECS);
        self.position_secs = 0.0;
        self.playing = true;
        self.visible = true;
        self.current = Some(track);

        let _ = self.api_tx.send(ApiCmd::RecordPlay(id));

        Notice::info(format!("Now playing: {title}"))
    }

    /// Flip between playing and paused. Does nothing when no track is
    /// loaded.
    pub fn toggle(&mut self) -> Option<Notice> {
        self.current.as_ref()?;
        self.playing = !self.playing;
        Some(if self.playing {
            Notice::info("Resumed")
        } else {
            Notice::warning("Paused")
        })
    }

    /// Pause and rewind to the start of the current track.
    pub fn stop(&mut self) {
        self.playing = false;
        self.position_secs = 0.0;
    }

    /// Hide the player bar and stop playback. The current track stays
    /// loaded so reopening resumes from a sane place.
    pub fn close(&mut self) {
        self.visible = false;
        self.stop();
    }

    /// Play the next playlist entry, wrapping at the end. No-op on an
    /// empty playlist.
    pub fn next(&mut self) -> Option<Notice> {
        if self.playlist.is_empty() {
            return None;
        }
        let len = self.playlist.len();
        let idx = self.current_index.map(|i| (i + 1) % len).unwrap_or(0);
        self.play_from_playlist(idx)
    }

    /// Play the previous playlist entry, wrapping at the start. No-op on
    /// an empty playlist.
    pub fn previous(&mut self) -> Option<Notice> {
        if self.playlist.is_empty() {
            return None;
        }
        let len = self.playlist.len();
        let idx = self.current_index.map(|i| (i + len - 1) % len).unwrap_or(len - 1);
        self.play_from_playlist(idx)
    }

    fn play_from_playlist(&mut self, idx: usize) -> Option<Notice> {
        let track = self.playlist.get(idx)?.clone();
        let notice = self.play(track);
        self.current_index = Some(idx);
        Some(notice)
    }

    /// Jump to `percent` of the track. Synchronous; no network involved.
    pub fn seek(&mut self, percent: f64) {
        if self.current.is_none() {
            return;
        }
        let percent = percent.clamp(0.0, 100.0);
        self.position_secs = percent / 100.0 * self.duration_secs;
    }

    pub fn set_volume(&mut self, fraction: f32) {
        self.volume = fraction.clamp(0.0, 1.0);
    }

    pub fn add_to_playlist(&mut self, track: Track) -> Notice {
        let notice = Notice::success(format!("Added to playlist: {}", track.title));
        self.playlist.push(track);
        notice
    }

    pub fn clear_playlist(&mut self) -> Notice {
        self.playlist.clear();
        self.current_index = None;
        Notice::info("Playlist cleared")
    }

    /// One-second playback tick. Advances the position while playing; at
    /// the end of the track, moves on to the next playlist entry when
    /// there is one, otherwise pauses at the end.
    pub fn tick(&mut self) -> Option<Notice> {
        if !self.playing || self.current.is_none() {
            return None;
        }

        self.position_secs = (self.position_secs + 1.0).min(self.duration_secs);
        if self.position_secs < self.duration_secs {
            return None;
        }

        if self.playlist.is_empty() {
            self.playing = false;
            None
        } else {
            self.next()
        }
    }

    /// Position as a percentage of the duration, for the progress gauge.
    pub fn progress_percent(&self) -> f64 {
        if self.duration_secs <= 0.0 {
            return 0.0;
        }
        (self.position_secs / self.duration_secs * 100.0).clamp(0.0, 100.0)
    }
}

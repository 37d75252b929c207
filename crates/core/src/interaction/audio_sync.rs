//! Audio-synchronised reading (songs and narrated stories).

use super::{play_or_warn, Interaction, MediaPlayer, Score};
use crate::activity::content::{AudioSyncContent, SyncSegment};

#[derive(Debug, Clone)]
pub struct AudioSyncSession {
    content: AudioSyncContent,
    position_ms: u64,
    active_segment: Option<usize>,
    /// Number of segments reached so far.
    reached: usize,
    playing: bool,
    ended: bool,
    last_playback_error: Option<String>,
}

impl AudioSyncSession {
    pub fn new(mut content: AudioSyncContent) -> Self {
        content.segments.sort_by_key(|s| s.start_ms);
        Self {
            content,
            position_ms: 0,
            active_segment: None,
            reached: 0,
            playing: false,
            ended: false,
            last_playback_error: None,
        }
    }

    pub fn segments(&self) -> &[SyncSegment] {
        &self.content.segments
    }

    pub fn active_segment(&self) -> Option<&SyncSegment> {
        self.active_segment.and_then(|i| self.content.segments.get(i))
    }

    pub fn active_index(&self) -> Option<usize> {
        self.active_segment
    }

    pub fn position_ms(&self) -> u64 {
        self.position_ms
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn is_ended(&self) -> bool {
        self.ended
    }

    pub fn last_playback_error(&self) -> Option<&str> {
        self.last_playback_error.as_deref()
    }

    /// Start the track. On failure the session stays usable and not playing.
    pub fn play(&mut self, player: &mut dyn MediaPlayer) {
        let url = self.content.audio_url.clone();
        self.last_playback_error = play_or_warn(player, &url);
        self.playing = self.last_playback_error.is_none();
    }

    pub fn stop(&mut self, player: &mut dyn MediaPlayer) {
        player.stop();
        self.playing = false;
    }

    /// Update the playback position and the highlighted segment.
    ///
    /// Positions between segments highlight nothing.
    pub fn on_time_update(&mut self, position_ms: u64) {
        self.position_ms = position_ms;
        let segments = &self.content.segments;
        let started = segments.partition_point(|s| s.start_ms <= position_ms);
        self.active_segment = started
            .checked_sub(1)
            .filter(|&i| position_ms < segments[i].end_ms);
        if let Some(index) = self.active_segment {
            self.reached = self.reached.max(index + 1);
        }
    }

    pub fn on_ended(&mut self) {
        self.ended = true;
        self.playing = false;
        self.active_segment = None;
        self.reached = self.content.segments.len();
    }
}

impl Interaction for AudioSyncSession {
    type Content = AudioSyncContent;

    fn load(&mut self, content: AudioSyncContent) {
        *self = Self::new(content);
    }

    fn reset(&mut self) {
        self.position_ms = 0;
        self.active_segment = None;
        self.reached = 0;
        self.playing = false;
        self.ended = false;
        self.last_playback_error = None;
    }

    fn is_complete(&self) -> bool {
        self.ended
    }

    fn score(&self) -> Score {
        Score {
            correct: self.reached,
            attempted: self.reached,
            total: self.content.segments.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::activity::content::ItemId;
    use crate::interaction::testing::RecordingPlayer;

    fn segment(id: i64, start_ms: u64, end_ms: u64) -> SyncSegment {
        SyncSegment {
            id: ItemId::Number(id),
            start_ms,
            end_ms,
            text: "line".into(),
            image_url: None,
        }
    }

    fn session() -> AudioSyncSession {
        AudioSyncSession::new(AudioSyncContent {
            audio_url: "/media/song.mp3".into(),
            // Unsorted on purpose; gap between 2000 and 2500.
            segments: vec![
                segment(3, 2_500, 4_000),
                segment(1, 0, 1_000),
                segment(2, 1_000, 2_000),
            ],
            ..AudioSyncContent::default()
        })
    }

    #[test]
    fn test_time_update_selects_segment() {
        let mut s = session();
        s.on_time_update(0);
        assert_eq!(s.active_segment().map(|seg| &seg.id), Some(&ItemId::Number(1)));
        s.on_time_update(1_000);
        assert_eq!(s.active_segment().map(|seg| &seg.id), Some(&ItemId::Number(2)));
        s.on_time_update(3_999);
        assert_eq!(s.active_segment().map(|seg| &seg.id), Some(&ItemId::Number(3)));
    }

    #[test]
    fn test_gaps_and_tail_select_nothing() {
        let mut s = session();
        s.on_time_update(2_200);
        assert_eq!(s.active_index(), None);
        s.on_time_update(9_000);
        assert_eq!(s.active_index(), None);
    }

    #[test]
    fn test_complete_only_after_end() {
        let mut s = session();
        s.on_time_update(3_000);
        assert!(!s.is_complete());
        assert_eq!(s.score().correct, 3);
        s.on_ended();
        assert!(s.is_complete());
        assert!(!s.is_playing());
    }

    #[test]
    fn test_play_and_stop_drive_the_player() {
        let mut s = session();
        let mut player = RecordingPlayer::default();
        s.play(&mut player);
        assert!(s.is_playing());
        s.stop(&mut player);
        assert!(!s.is_playing());
        assert_eq!(player.played, vec!["/media/song.mp3"]);
        assert_eq!(player.stops, 1);
    }

    #[test]
    fn test_playback_failure_is_recorded_not_raised() {
        let mut s = session();
        let mut player = RecordingPlayer::failing();
        s.play(&mut player);
        assert!(!s.is_playing());
        assert!(s.last_playback_error().is_some());
        s.on_time_update(500);
        assert_eq!(s.active_index(), Some(0));
    }
}

//! Letter tracing session.
//!
//! Letters are traced stroke by stroke. A traced stroke is accepted when it
//! starts and ends near the expected stroke's endpoints and passes near every
//! expected point. Coordinates live on the normalized `0.0..=1.0` canvas.

use serde::Serialize;

use super::{play_or_warn, Interaction, MediaPlayer, Score};
use crate::activity::content::{LetterTracingContent, Point, TraceLetter};

/// Default maximum distance between a traced and an expected point.
pub const DEFAULT_TRACE_TOLERANCE: f64 = 0.15;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TraceResult {
    /// Stroke accepted; more strokes remain in this letter.
    StrokeAccepted,
    /// Last stroke of a letter accepted.
    LetterComplete,
    /// Stroke too far from the expected path.
    Rejected,
    /// Every letter is already traced.
    Finished,
}

#[derive(Debug, Clone)]
pub struct LetterTracingSession {
    content: LetterTracingContent,
    tolerance: f64,
    letter_index: usize,
    stroke_index: usize,
    attempts: usize,
    last_playback_error: Option<String>,
}

fn distance(a: Point, b: Point) -> f64 {
    (a.x - b.x).hypot(a.y - b.y)
}

impl LetterTracingSession {
    pub fn new(content: LetterTracingContent) -> Self {
        Self {
            content,
            tolerance: DEFAULT_TRACE_TOLERANCE,
            letter_index: 0,
            stroke_index: 0,
            attempts: 0,
            last_playback_error: None,
        }
    }

    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    pub fn current_letter(&self) -> Option<&TraceLetter> {
        self.content.letters.get(self.letter_index)
    }

    pub fn current_stroke(&self) -> Option<&[Point]> {
        self.current_letter()
            .and_then(|letter| letter.strokes.get(self.stroke_index))
            .map(Vec::as_slice)
    }

    pub fn letters_traced(&self) -> usize {
        self.letter_index
    }

    pub fn last_playback_error(&self) -> Option<&str> {
        self.last_playback_error.as_deref()
    }

    pub fn trace_stroke(&mut self, traced: &[Point]) -> TraceResult {
        let Some(expected) = self.current_stroke() else {
            return if self.current_letter().is_some() {
                // A letter without strokes has nothing to trace.
                self.advance_letter();
                TraceResult::LetterComplete
            } else {
                TraceResult::Finished
            };
        };
        let accepted = self.stroke_matches(expected, traced);
        self.attempts += 1;
        if !accepted {
            return TraceResult::Rejected;
        }

        self.stroke_index += 1;
        let strokes = self.current_letter().map_or(0, |letter| letter.strokes.len());
        if self.stroke_index >= strokes {
            self.advance_letter();
            TraceResult::LetterComplete
        } else {
            TraceResult::StrokeAccepted
        }
    }

    pub fn play_letter_audio(&mut self, player: &mut dyn MediaPlayer) {
        if let Some(url) = self.current_letter().and_then(|l| l.audio_url.clone()) {
            self.last_playback_error = play_or_warn(player, &url);
        }
    }

    fn advance_letter(&mut self) {
        self.letter_index += 1;
        self.stroke_index = 0;
    }

    fn stroke_matches(&self, expected: &[Point], traced: &[Point]) -> bool {
        let (Some(&exp_start), Some(&exp_end)) = (expected.first(), expected.last()) else {
            return false;
        };
        let (Some(&start), Some(&end)) = (traced.first(), traced.last()) else {
            return false;
        };
        if traced.len() < 2 {
            return false;
        }
        let near = |a: Point, b: Point| distance(a, b) <= self.tolerance;
        near(start, exp_start)
            && near(end, exp_end)
            && expected
                .iter()
                .all(|&p| traced.iter().any(|&t| near(p, t)))
    }
}

impl Interaction for LetterTracingSession {
    type Content = LetterTracingContent;

    fn load(&mut self, content: LetterTracingContent) {
        let tolerance = self.tolerance;
        *self = Self::new(content).with_tolerance(tolerance);
    }

    fn reset(&mut self) {
        self.letter_index = 0;
        self.stroke_index = 0;
        self.attempts = 0;
        self.last_playback_error = None;
    }

    fn is_complete(&self) -> bool {
        !self.content.letters.is_empty() && self.letter_index >= self.content.letters.len()
    }

    fn score(&self) -> Score {
        Score {
            correct: self.letter_index.min(self.content.letters.len()),
            attempted: self.attempts,
            total: self.content.letters.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::activity::content::ItemId;

    fn p(x: f64, y: f64) -> Point {
        Point { x, y }
    }

    /// An "L": one vertical stroke, one horizontal stroke.
    fn letter_l(id: i64) -> TraceLetter {
        TraceLetter {
            id: ItemId::Number(id),
            letter: "L".into(),
            strokes: vec![
                vec![p(0.2, 0.2), p(0.2, 0.5), p(0.2, 0.8)],
                vec![p(0.2, 0.8), p(0.8, 0.8)],
            ],
            audio_url: None,
        }
    }

    fn session(letters: i64) -> LetterTracingSession {
        LetterTracingSession::new(LetterTracingContent {
            letters: (1..=letters).map(letter_l).collect(),
            ..LetterTracingContent::default()
        })
    }

    #[test]
    fn test_close_strokes_are_accepted() {
        let mut s = session(1);
        let result = s.trace_stroke(&[p(0.21, 0.19), p(0.22, 0.52), p(0.18, 0.79)]);
        assert_eq!(result, TraceResult::StrokeAccepted);
        let result = s.trace_stroke(&[p(0.2, 0.8), p(0.5, 0.82), p(0.79, 0.8)]);
        assert_eq!(result, TraceResult::LetterComplete);
        assert!(s.is_complete());
        assert_eq!(s.trace_stroke(&[p(0.0, 0.0), p(1.0, 1.0)]), TraceResult::Finished);
    }

    #[test]
    fn test_reversed_stroke_is_rejected() {
        let mut s = session(1);
        let result = s.trace_stroke(&[p(0.2, 0.8), p(0.2, 0.5), p(0.2, 0.2)]);
        assert_eq!(result, TraceResult::Rejected);
        assert_eq!(s.current_stroke().map(<[Point]>::len), Some(3));
    }

    #[test]
    fn test_shortcut_missing_middle_is_rejected() {
        let mut s = LetterTracingSession::new(LetterTracingContent {
            letters: vec![TraceLetter {
                id: ItemId::Number(1),
                letter: "V".into(),
                strokes: vec![vec![p(0.1, 0.1), p(0.5, 0.9), p(0.9, 0.1)]],
                audio_url: None,
            }],
            ..LetterTracingContent::default()
        });
        assert_eq!(
            s.trace_stroke(&[p(0.1, 0.1), p(0.9, 0.1)]),
            TraceResult::Rejected
        );
    }

    #[test]
    fn test_single_point_is_rejected() {
        let mut s = session(1);
        assert_eq!(s.trace_stroke(&[p(0.2, 0.2)]), TraceResult::Rejected);
    }

    #[test]
    fn test_tolerance_is_configurable() {
        let mut strict = session(1).with_tolerance(0.01);
        assert_eq!(
            strict.trace_stroke(&[p(0.25, 0.2), p(0.2, 0.5), p(0.2, 0.8)]),
            TraceResult::Rejected
        );
    }

    #[test]
    fn test_progresses_through_letters() {
        let mut s = session(2);
        for _ in 0..2 {
            s.trace_stroke(&[p(0.2, 0.2), p(0.2, 0.5), p(0.2, 0.8)]);
            s.trace_stroke(&[p(0.2, 0.8), p(0.8, 0.8)]);
        }
        assert_eq!(s.letters_traced(), 2);
        assert!(s.is_complete());
        s.reset();
        assert_eq!(s.letters_traced(), 0);
        assert!(!s.is_complete());
    }
}

//! Timeline layout for a crossfading slideshow.
//!
//! A single track cannot hold two clips that overlap in time, so slides alternate between two
//! tracks: even indices on track 0, odd indices on track 1. Each slide is preceded on its own
//! track by a blank gap sized so that it starts one transition before its predecessor (on the
//! other track) ends. Every adjacent pair then gets a transition compositing track 1 over
//! track 0.

use std::path::{self, PathBuf};

use rand::Rng;
use tracing::debug;

use crate::error::{Result, SlideshowError};
use crate::slide::Slide;
use crate::timecode::seconds_to_frames;
use crate::transition::TransitionStyle;

pub const TRACK_COUNT: usize = 2;

/// Durations driving the layout.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Timing {
    pub display_seconds: f64,
    pub transition_seconds: f64,
    pub fps: u32,
}

impl Timing {
    pub fn new(display_seconds: f64, transition_seconds: f64, fps: u32) -> Result<Self> {
        if !display_seconds.is_finite() || display_seconds <= 0.0 {
            return Err(SlideshowError::InvalidDuration(display_seconds.to_string()));
        }
        if !transition_seconds.is_finite() || transition_seconds < 0.0 {
            return Err(SlideshowError::InvalidDuration(transition_seconds.to_string()));
        }
        // Frame counts must fit in a u64 without saturating
        if display_seconds * fps as f64 >= u64::MAX as f64 {
            return Err(SlideshowError::InvalidDuration(display_seconds.to_string()));
        }
        Ok(Self { display_seconds, transition_seconds, fps })
    }

    pub fn display_frames(&self) -> u64 {
        seconds_to_frames(self.display_seconds, self.fps)
    }

    pub fn transition_frames(&self) -> u64 {
        seconds_to_frames(self.transition_seconds, self.fps)
    }

    /// Blank gap placed before slide `index` on its track.
    pub fn blank_frames_before(&self, index: usize) -> u64 {
        match index {
            0 => 0,
            // First slide on track 1 starts as track 0 begins fading out
            1 => seconds_to_frames(self.display_seconds - self.transition_seconds, self.fps),
            // Room for both the incoming and the outgoing overlap
            _ => seconds_to_frames(self.display_seconds - 2.0 * self.transition_seconds, self.fps),
        }
    }

    fn check_fits(&self, images: usize) -> Result<()> {
        let needed = match images {
            0 | 1 => 0.0,
            2 => self.transition_seconds,
            _ => 2.0 * self.transition_seconds,
        };
        if self.display_seconds < needed {
            return Err(SlideshowError::TransitionTooLong {
                display: self.display_seconds,
                transition: self.transition_seconds,
                images,
            });
        }
        Ok(())
    }
}

/// (blank gap, slide) pair on one track.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrackSlot {
    pub blank_frames: u64,
    pub slide_index: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub index: usize,
    pub from_slide: usize,
    pub to_slide: usize,
    pub in_frame: u64,
    pub out_frame: u64,
    pub style: TransitionStyle,
}

impl Transition {
    pub fn id(&self) -> String {
        format!("transition{}", self.index)
    }
}

#[derive(Debug, Clone)]
pub struct Layout {
    pub timing: Timing,
    pub slides: Vec<Slide>,
    pub tracks: [Vec<TrackSlot>; TRACK_COUNT],
    pub transitions: Vec<Transition>,
    pub total_frames: u64,
}

impl Layout {
    /// Lays out `images` in order, drawing one transition style per adjacent pair from `rng`.
    pub fn compute<R: Rng>(images: Vec<PathBuf>, timing: Timing, rng: &mut R) -> Result<Layout> {
        if images.is_empty() {
            return Err(SlideshowError::NoImagesFound);
        }
        timing.check_fits(images.len())?;

        let display_frames = timing.display_frames();
        let transition_frames = timing.transition_frames();
        let overflow = || SlideshowError::InvalidDuration(timing.display_seconds.to_string());

        let mut slides = Vec::with_capacity(images.len());
        let mut tracks: [Vec<TrackSlot>; TRACK_COUNT] = Default::default();
        let mut track_cursor = [0u64; TRACK_COUNT];

        for (index, image) in images.into_iter().enumerate() {
            let track = index % TRACK_COUNT;
            let blank_frames = timing.blank_frames_before(index);

            let start_frame = track_cursor[track].checked_add(blank_frames).ok_or_else(overflow)?;
            let end_frame = start_frame.checked_add(display_frames).ok_or_else(overflow)?;
            track_cursor[track] = end_frame;

            tracks[track].push(TrackSlot { blank_frames, slide_index: index });
            slides.push(Slide {
                index,
                resource: path::absolute(&image)?,
                path: image,
                track,
                start_frame,
                end_frame,
            });
        }

        for slide in &slides {
            debug!(
                slide = slide.index,
                track = slide.track,
                start = slide.start_frame,
                end = slide.end_frame,
                "placed slide"
            );
        }

        let mut transitions = Vec::with_capacity(slides.len().saturating_sub(1));
        for index in 0..slides.len().saturating_sub(1) {
            // The window covers the last transition_frames before the (index+1)-th display slot ends
            let out_frame = display_frames.checked_mul(index as u64 + 1).ok_or_else(overflow)?;
            let in_frame = out_frame.saturating_sub(transition_frames);
            let transition = Transition {
                index,
                from_slide: index,
                to_slide: index + 1,
                in_frame,
                out_frame,
                style: TransitionStyle::random(rng),
            };
            debug!(
                from = transition.from_slide,
                to = transition.to_slide,
                style = transition.style.name(),
                "picked transition"
            );
            transitions.push(transition);
        }

        // Slides overlap by one transition each, so the timeline is shorter than the sum of
        // display windows. Equals the end frame of the last slide.
        let count = slides.len() as u64;
        let total_frames = count
            .checked_mul(display_frames)
            .ok_or_else(overflow)?
            - (count - 1) * transition_frames;

        debug!(
            slides = slides.len(),
            display_frames,
            transition_frames,
            total_frames,
            "computed timeline layout"
        );

        Ok(Layout { timing, slides, tracks, transitions, total_frames })
    }

    pub fn display_frames(&self) -> u64 {
        self.timing.display_frames()
    }

    pub fn track(&self, track: usize) -> &[TrackSlot] {
        &self.tracks[track]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn images(count: usize) -> Vec<PathBuf> {
        (0..count).map(|i| PathBuf::from(format!("img{:03}.jpg", i))).collect()
    }

    fn layout(count: usize, display: f64) -> Layout {
        let timing = Timing::new(display, 1.0, 25).unwrap();
        Layout::compute(images(count), timing, &mut StdRng::seed_from_u64(1)).unwrap()
    }

    #[test]
    fn test_total_duration_three_images() {
        let layout = layout(3, 5.0);
        assert_eq!(layout.total_frames, 325);
        assert_eq!(layout.slides.last().unwrap().end_frame, 325);
    }

    #[test]
    fn test_track_parity() {
        let layout = layout(4, 5.0);
        let track0: Vec<_> = layout.track(0).iter().map(|s| s.slide_index).collect();
        let track1: Vec<_> = layout.track(1).iter().map(|s| s.slide_index).collect();
        assert_eq!(track0, vec![0, 2]);
        assert_eq!(track1, vec![1, 3]);
        for slide in &layout.slides {
            assert_eq!(slide.track, slide.index % 2);
        }
    }

    #[test]
    fn test_blank_gaps() {
        let layout = layout(5, 5.0);
        let gaps0: Vec<_> = layout.track(0).iter().map(|s| s.blank_frames).collect();
        let gaps1: Vec<_> = layout.track(1).iter().map(|s| s.blank_frames).collect();
        assert_eq!(gaps0, vec![0, 75, 75]);
        assert_eq!(gaps1, vec![100, 75]);
    }

    #[test]
    fn test_adjacent_slides_overlap_by_one_transition() {
        let layout = layout(6, 5.0);
        for pair in layout.slides.windows(2) {
            assert_eq!(pair[0].end_frame - pair[1].start_frame, 25);
            assert_eq!(pair[1].length(), 125);
        }
        assert_eq!(layout.total_frames, 6 * 125 - 5 * 25);
        assert_eq!(layout.slides.last().unwrap().end_frame, layout.total_frames);
    }

    #[test]
    fn test_transition_windows() {
        let layout = layout(3, 5.0);
        assert_eq!(layout.transitions.len(), 2);

        let first = &layout.transitions[0];
        assert_eq!((first.from_slide, first.to_slide), (0, 1));
        assert_eq!((first.in_frame, first.out_frame), (100, 125));
        assert_eq!(first.id(), "transition0");

        let second = &layout.transitions[1];
        assert_eq!((second.from_slide, second.to_slide), (1, 2));
        assert_eq!((second.in_frame, second.out_frame), (225, 250));
    }

    #[test]
    fn test_single_image() {
        let layout = layout(1, 5.0);
        assert!(layout.transitions.is_empty());
        assert_eq!(layout.total_frames, 125);
        assert_eq!(layout.track(0).len(), 1);
        assert!(layout.track(1).is_empty());
        assert_eq!(layout.track(0)[0].blank_frames, 0);
    }

    #[test]
    fn test_fractional_display_truncates() {
        let layout = layout(3, 2.99);
        assert_eq!(layout.display_frames(), 74);
        // 1.99s and 0.99s both truncate
        assert_eq!(layout.track(1)[0].blank_frames, 49);
        assert_eq!(layout.track(0)[1].blank_frames, 24);
    }

    #[test]
    fn test_no_images() {
        let timing = Timing::new(5.0, 1.0, 25).unwrap();
        let err = Layout::compute(Vec::new(), timing, &mut StdRng::seed_from_u64(1)).unwrap_err();
        assert!(matches!(err, SlideshowError::NoImagesFound));
    }

    #[test]
    fn test_transition_too_long() {
        let timing = Timing::new(1.5, 1.0, 25).unwrap();
        let mut rng = StdRng::seed_from_u64(1);

        assert!(Layout::compute(images(2), timing, &mut rng).is_ok());
        let err = Layout::compute(images(3), timing, &mut rng).unwrap_err();
        assert!(matches!(err, SlideshowError::TransitionTooLong { images: 3, .. }));

        let short = Timing::new(0.5, 1.0, 25).unwrap();
        assert!(Layout::compute(images(1), short, &mut rng).is_ok());
        assert!(Layout::compute(images(2), short, &mut rng).is_err());
    }

    #[test]
    fn test_invalid_timing() {
        assert!(Timing::new(0.0, 1.0, 25).is_err());
        assert!(Timing::new(-2.0, 1.0, 25).is_err());
        assert!(Timing::new(f64::NAN, 1.0, 25).is_err());
        assert!(Timing::new(5.0, -1.0, 25).is_err());
    }

    #[test]
    fn test_huge_duration_is_rejected() {
        assert!(matches!(Timing::new(1e18, 1.0, 25), Err(SlideshowError::InvalidDuration(_))));

        // Fits in a frame count, but two slides in a row do not
        let timing = Timing::new(5e17, 1.0, 25).unwrap();
        let mut rng = StdRng::seed_from_u64(1);
        assert!(Layout::compute(images(1), timing, &mut rng).is_ok());
        let err = Layout::compute(images(2), timing, &mut rng).unwrap_err();
        assert!(matches!(err, SlideshowError::InvalidDuration(_)));
    }

    #[test]
    fn test_seeded_styles_are_deterministic() {
        let timing = Timing::new(5.0, 1.0, 25).unwrap();
        let a = Layout::compute(images(10), timing, &mut StdRng::seed_from_u64(99)).unwrap();
        let b = Layout::compute(images(10), timing, &mut StdRng::seed_from_u64(99)).unwrap();
        let styles_a: Vec<_> = a.transitions.iter().map(|t| t.style).collect();
        let styles_b: Vec<_> = b.transitions.iter().map(|t| t.style).collect();
        assert_eq!(styles_a, styles_b);
    }

    #[test]
    fn test_resources_are_absolute() {
        let layout = layout(2, 5.0);
        for slide in &layout.slides {
            assert!(slide.resource.is_absolute());
            assert!(slide.resource.ends_with(&slide.path));
        }
    }
}

use rand::Rng;

/// Blend used between two adjacent slides.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionStyle {
    Luma,      // classic crossfade
    Mix,       // plain dissolve
    Wipe,
    Slide,
    Composite, // overlay
}

impl TransitionStyle {
    pub const ALL: [TransitionStyle; 5] = [
        TransitionStyle::Luma,
        TransitionStyle::Mix,
        TransitionStyle::Wipe,
        TransitionStyle::Slide,
        TransitionStyle::Composite,
    ];

    /// Draws a style uniformly from [`TransitionStyle::ALL`].
    pub fn random<R: Rng>(rng: &mut R) -> Self {
        Self::ALL[rng.random_range(0..Self::ALL.len())]
    }

    pub fn name(self) -> &'static str {
        match self {
            TransitionStyle::Luma => "luma",
            TransitionStyle::Mix => "mix",
            TransitionStyle::Wipe => "wipe",
            TransitionStyle::Slide => "slide",
            TransitionStyle::Composite => "composite",
        }
    }

    /// MLT service rendering this style. Only `mix` goes through qtblend.
    pub fn mlt_service(self) -> &'static str {
        match self {
            TransitionStyle::Mix => "qtblend",
            _ => "composite",
        }
    }

    pub fn kdenlive_id(self) -> &'static str {
        match self {
            TransitionStyle::Mix => "qtblend",
            other => other.name(),
        }
    }
}

use serde::{Deserialize, Serialize};

use crate::errors::TimingError;
use crate::text::Granularity;
use crate::timing::config::{presets, DurationConfig};
use crate::timing::strategy::DurationStrategy;

// @module: Named animation styles and their timing bindings

/// Animation template selectable by name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum AnimationStyle {
    // @style: Per-character typewriter fade
    #[default]
    TypewriterFade,
    // @style: Bottom → centre → top, fade in/hold/fade out
    RailwayScroll,
    // @style: Credits roll
    SimpleRole,
    // @style: Centre-start roll
    RevolverUp,
    // @style: Word-by-word pop with a scale bounce
    TypewriterPop,
    // @style: Right-to-left news ticker
    HorizontalTicker,
}

impl AnimationStyle {
    /// Every style, in listing order.
    ///
    /// The first style for each strategy is the one a bare strategy name selects.
    pub const ALL: [AnimationStyle; 6] = [
        Self::TypewriterFade,
        Self::RailwayScroll,
        Self::SimpleRole,
        Self::RevolverUp,
        Self::TypewriterPop,
        Self::HorizontalTicker,
    ];

    // @returns: Selector name
    pub fn name(&self) -> &'static str {
        match self {
            Self::TypewriterFade => "typewriter_fade",
            Self::RailwayScroll => "railway_scroll",
            Self::SimpleRole => "simple_role",
            Self::RevolverUp => "revolver_up",
            Self::TypewriterPop => "typewriter_pop",
            Self::HorizontalTicker => "horizontal_ticker",
        }
    }

    // @returns: Name used for the ASS `Style:` line
    pub fn ass_style_name(&self) -> &'static str {
        match self {
            Self::TypewriterFade => "Typewriter_Fade",
            Self::RailwayScroll => "Railway_Scroll",
            Self::SimpleRole => "Simple_Role",
            Self::RevolverUp => "Revolver_Up",
            Self::TypewriterPop => "Typewriter_Pop",
            Self::HorizontalTicker => "Horizontal_Ticker",
        }
    }

    // @returns: Short description for listings
    pub fn description(&self) -> &'static str {
        match self {
            Self::TypewriterFade => "Characters appear one by one with a short fade",
            Self::RailwayScroll => "Each line rises through the centre, fading in and out",
            Self::SimpleRole => "Lines roll continuously from bottom to top",
            Self::RevolverUp => "Lines appear at the centre, hold, then roll upwards",
            Self::TypewriterPop => "Words pop in letter by letter with a bounce",
            Self::HorizontalTicker => "Lines scroll right to left along the bottom",
        }
    }

    /// Duration strategy the style is timed with
    pub fn strategy(&self) -> DurationStrategy {
        match self {
            Self::TypewriterFade | Self::TypewriterPop => DurationStrategy::CharacterReveal,
            Self::RailwayScroll => DurationStrategy::PhaseBased,
            Self::SimpleRole | Self::RevolverUp | Self::HorizontalTicker => DurationStrategy::ContinuousPassthrough,
        }
    }

    /// Element that becomes one timed unit
    pub fn granularity(&self) -> Granularity {
        match self {
            Self::TypewriterPop => Granularity::Word,
            _ => Granularity::Line,
        }
    }

    /// Built-in knobs for the style
    pub fn preset(&self) -> DurationConfig {
        match self {
            Self::TypewriterFade => presets::typewriter_fade(),
            Self::RailwayScroll => presets::railway_scroll(),
            Self::SimpleRole => presets::simple_role(),
            Self::RevolverUp => presets::revolver_up(),
            Self::TypewriterPop => presets::typewriter_pop(),
            Self::HorizontalTicker => presets::horizontal_ticker(),
        }
    }

    /// Preset with `overrides` merged on top
    pub fn resolve_config(&self, overrides: &DurationConfig) -> DurationConfig {
        self.preset().merged_with(overrides)
    }

    /// Resolve a selector naming either a style or a bare strategy.
    ///
    /// A strategy name selects the first style timed with that strategy.
    pub fn resolve(selector: &str) -> Result<Self, TimingError> {
        if let Ok(style) = selector.parse::<AnimationStyle>() {
            return Ok(style);
        }

        let strategy = selector
            .parse::<DurationStrategy>()
            .map_err(|_| TimingError::UnknownStyle(selector.to_string()))?;

        Self::ALL
            .into_iter()
            .find(|style| style.strategy() == strategy)
            .ok_or_else(|| TimingError::UnknownStyle(selector.to_string()))
    }

    /// Style whose commands animate a `strategy` timeline written under `style_name`.
    ///
    /// `style_name` may be a selector or an ASS style name. Unknown names, and
    /// styles timed with another strategy, fall back to the strategy's first style.
    pub fn for_timeline(style_name: &str, strategy: DurationStrategy) -> Self {
        match Self::resolve(style_name) {
            Ok(style) if style.strategy() == strategy => style,
            _ => Self::resolve(strategy.name()).unwrap_or_default(),
        }
    }
}

impl std::fmt::Display for AnimationStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl std::str::FromStr for AnimationStyle {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "typewriter_fade" | "typewriter" => Ok(Self::TypewriterFade),
            "railway_scroll" | "railway" => Ok(Self::RailwayScroll),
            "simple_role" | "simple_roll" => Ok(Self::SimpleRole),
            "revolver_up" => Ok(Self::RevolverUp),
            "typewriter_pop" => Ok(Self::TypewriterPop),
            "horizontal_ticker" | "ticker" => Ok(Self::HorizontalTicker),
            _ => Err(anyhow::anyhow!("Invalid animation style: {}", s)),
        }
    }
}

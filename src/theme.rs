//! Theme selection - derives presentation attributes from the current reading
//!
//! Everything here is a pure function of `Option<&WeatherReading>`. Applying the
//! icon to the terminal window is the shell's job (see [`crate::favicon`]).

use artbox::{ColorStop, LinearGradient};
pub use artbox::Rgb;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::state::WeatherReading;

/// Temperature used when a reading carries no usable value.
pub const FALLBACK_TEMPERATURE_C: f32 = 20.0;

/// Upper bound (exclusive) of the cold band, in Celsius.
pub const COLD_BELOW_C: f32 = 10.0;

/// Lower bound (inclusive) of the hot band, in Celsius.
pub const HOT_FROM_C: f32 = 25.0;

/// Lowercase `#rrggbb` form of a color.
pub fn hex(rgb: Rgb) -> String {
    format!("#{:02x}{:02x}{:02x}", rgb.r, rgb.g, rgb.b)
}

/// Heading color when there is no reading, and for the mild band.
pub const DEFAULT_HEADING: Rgb = Rgb::new(0x22, 0x22, 0x22);
const COLD_HEADING: Rgb = Rgb::new(0xff, 0xe0, 0x66);
const HOT_HEADING: Rgb = Rgb::new(0xff, 0xfb, 0xe6);

/// One of the three temperature ranges.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Band {
    Cold,
    Mild,
    Hot,
}

impl Band {
    /// Bucket a Celsius temperature. NaN counts as [`FALLBACK_TEMPERATURE_C`].
    pub fn for_temperature(celsius: f32) -> Self {
        let t = if celsius.is_nan() {
            FALLBACK_TEMPERATURE_C
        } else {
            celsius
        };
        if t < COLD_BELOW_C {
            Band::Cold
        } else if t < HOT_FROM_C {
            Band::Mild
        } else {
            Band::Hot
        }
    }
}

/// Background gradient, named after the stylesheet classes it stands for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Gradient {
    /// Animated multi-stop gradient shown without a (matching) reading.
    Fallback,
    Cold,
    Mild,
    Hot,
}

impl Gradient {
    pub fn class_name(self) -> &'static str {
        match self {
            Gradient::Fallback => "animate-gradient-multi",
            Gradient::Cold => "bg-cold-gradient",
            Gradient::Mild => "bg-mild-gradient",
            Gradient::Hot => "bg-hot-gradient",
        }
    }

    /// Start and end colors of the gradient.
    pub fn colors(self) -> (Rgb, Rgb) {
        match self {
            Gradient::Fallback => (Rgb::new(96, 165, 250), Rgb::new(79, 70, 229)),
            Gradient::Cold => (Rgb::new(6, 182, 212), Rgb::new(29, 78, 216)),
            Gradient::Mild => (Rgb::new(74, 222, 128), Rgb::new(59, 130, 246)),
            Gradient::Hot => (Rgb::new(251, 146, 60), Rgb::new(219, 39, 119)),
        }
    }

    /// Horizontal gradient that returns to its start color, so it can drift
    /// without a seam.
    pub fn stops(self) -> LinearGradient {
        let (start, end) = self.colors();
        LinearGradient::new(
            0.0,
            vec![
                ColorStop::new(0.0, start),
                ColorStop::new(0.5, end),
                ColorStop::new(1.0, start),
            ],
        )
    }

    pub fn mid(self) -> Rgb {
        let (start, end) = self.colors();
        start.interpolate(end, 0.5)
    }

    fn for_band(band: Band) -> Self {
        match band {
            Band::Cold => Gradient::Cold,
            Band::Mild => Gradient::Mild,
            Band::Hot => Gradient::Hot,
        }
    }
}

/// Window icon picked from the condition text.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Icon {
    Sun,
    Clouds,
    Rain,
    Snow,
    Thunder,
    Fallback,
}

/// Scan order for [`Icon::from_condition`]; the first hit wins.
const ICON_KEYWORDS: [(Icon, &[&str]); 5] = [
    (Icon::Sun, &["sun", "clear"]),
    (Icon::Clouds, &["cloud", "overcast"]),
    (Icon::Rain, &["rain", "drizzle", "shower"]),
    (Icon::Snow, &["snow", "sleet", "blizzard", "ice"]),
    (Icon::Thunder, &["thunder"]),
];

impl Icon {
    /// Case-insensitive keyword scan of a condition text.
    pub fn from_condition(text: &str) -> Self {
        let text = text.to_lowercase();
        ICON_KEYWORDS
            .iter()
            .find(|(_, keywords)| keywords.iter().any(|k| text.contains(k)))
            .map(|(icon, _)| *icon)
            .unwrap_or(Icon::Fallback)
    }

    pub fn name(self) -> &'static str {
        match self {
            Icon::Sun => "sun",
            Icon::Clouds => "clouds",
            Icon::Rain => "rain",
            Icon::Snow => "snow",
            Icon::Thunder => "thunder",
            Icon::Fallback => "fallback",
        }
    }

    /// Static asset path of the icon.
    pub fn path(self) -> String {
        format!("/icons/{}.png", self.name())
    }

    /// Glyph used where an image can't be shown.
    pub fn glyph(self) -> &'static str {
        match self {
            Icon::Sun => "\u{2600}\u{fe0f}",
            Icon::Clouds => "\u{2601}\u{fe0f}",
            Icon::Rain => "\u{1f327}\u{fe0f}",
            Icon::Snow => "\u{2744}\u{fe0f}",
            Icon::Thunder => "\u{26c8}\u{fe0f}",
            Icon::Fallback => "\u{1f321}\u{fe0f}",
        }
    }
}

/// How the gradient is chosen for a reading.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema, clap::ValueEnum,
)]
#[serde(rename_all = "snake_case")]
pub enum GradientPolicy {
    /// Gradient follows the temperature band alone.
    #[default]
    TemperatureOnly,
    /// Mild needs "cloud" and hot needs "sun" in the condition text.
    KeywordGated,
}

/// Derived presentation attributes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Theme {
    pub gradient: Gradient,
    pub heading_color: Rgb,
    pub animation_duration_secs: f32,
    pub icon: Icon,
}

impl Theme {
    pub const DEFAULT_ANIMATION_SECS: f32 = 15.0;

    pub fn favicon_path(&self) -> String {
        self.icon.path()
    }

    /// Gradient phase in `0.0..1.0` after `elapsed_ms` of drifting.
    pub fn phase_at(&self, elapsed_ms: u64) -> f32 {
        let period_ms = (self.animation_duration_secs * 1000.0).max(1.0) as u64;
        (elapsed_ms % period_ms) as f32 / period_ms as f32
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            gradient: Gradient::Fallback,
            heading_color: DEFAULT_HEADING,
            animation_duration_secs: Self::DEFAULT_ANIMATION_SECS,
            icon: Icon::Fallback,
        }
    }
}

/// Theme for the current reading under the temperature-only policy.
pub fn select_theme(reading: Option<&WeatherReading>) -> Theme {
    select_theme_with(reading, GradientPolicy::TemperatureOnly)
}

pub fn select_theme_with(reading: Option<&WeatherReading>, policy: GradientPolicy) -> Theme {
    let Some(reading) = reading else {
        return Theme::default();
    };

    let band = Band::for_temperature(reading.temperature_c);
    let (heading_color, animation_duration_secs) = match band {
        Band::Cold => (COLD_HEADING, 20.0),
        Band::Mild => (DEFAULT_HEADING, 12.0),
        Band::Hot => (HOT_HEADING, 8.0),
    };

    Theme {
        gradient: gradient_for(band, &reading.condition_text, policy),
        heading_color,
        animation_duration_secs,
        icon: Icon::from_condition(&reading.condition_text),
    }
}

fn gradient_for(band: Band, condition: &str, policy: GradientPolicy) -> Gradient {
    let gated_keyword = match (policy, band) {
        (GradientPolicy::TemperatureOnly, _) | (_, Band::Cold) => None,
        (GradientPolicy::KeywordGated, Band::Mild) => Some("cloud"),
        (GradientPolicy::KeywordGated, Band::Hot) => Some("sun"),
    };
    match gated_keyword {
        Some(keyword) if !condition.to_lowercase().contains(keyword) => Gradient::Fallback,
        _ => Gradient::for_band(band),
    }
}

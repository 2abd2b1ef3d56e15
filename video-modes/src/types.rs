use crate::{VideoModeError, VideoResult};
// Types shared between the video backend and the display settings screen
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DisplayFromStr};
use std::convert::TryFrom;
use std::fmt;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// A display mode offered by the platform
#[derive(Debug, Default, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Resolution {
    pub width: u32,
    pub height: u32,
}

impl Resolution {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn is_degenerate(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// True when both dimensions are at least as large as `minimum`'s
    pub fn is_at_least(&self, minimum: &Resolution) -> bool {
        self.width >= minimum.width && self.height >= minimum.height
    }

    pub fn aspect_ratio(&self) -> VideoResult<AspectRatio> {
        AspectRatio::try_from(*self)
    }
}

impl Display for Resolution {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

impl FromStr for Resolution {
    type Err = VideoModeError;

    fn from_str(s: &str) -> VideoResult<Self> {
        let invalid = || VideoModeError::InvalidResolution(s.to_string());
        let (width, height) = s.trim().split_once('x').ok_or_else(invalid)?;
        Ok(Resolution {
            width: width.trim().parse().map_err(|_| invalid())?,
            height: height.trim().parse().map_err(|_| invalid())?,
        })
    }
}

/// Reduced width:height proportion of a [`Resolution`].
///
/// Always in lowest terms, so `numerator` and `denominator` share no divisor other than 1.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct AspectRatio {
    pub numerator: u32,
    pub denominator: u32,
}

impl TryFrom<Resolution> for AspectRatio {
    type Error = VideoModeError;

    fn try_from(resolution: Resolution) -> VideoResult<Self> {
        if resolution.is_degenerate() {
            return Err(VideoModeError::DegenerateResolution(resolution));
        }
        let gcd = num::integer::gcd(resolution.width, resolution.height);
        Ok(AspectRatio {
            numerator: resolution.width / gcd,
            denominator: resolution.height / gcd,
        })
    }
}

impl Display for AspectRatio {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.numerator, self.denominator)
    }
}

/// How the renderer's output surface is configured
#[serde_as]
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct DisplayConfig {
    #[serde_as(as = "DisplayFromStr")]
    pub resolution: Resolution,
    #[serde(default)]
    pub fullscreen: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            resolution: Resolution::new(1280, 720),
            fullscreen: false,
        }
    }
}

/// Narrows the list returned by a mode enumeration
#[derive(Debug, Default, Copy, Clone, Eq, PartialEq)]
pub struct ModeFilter {
    /// Drop repeated modes, keeping the first occurrence
    pub unique: bool,
    /// Drop modes narrower or shorter than this
    pub minimum: Option<Resolution>,
}

impl ModeFilter {
    pub fn apply<I>(&self, modes: I) -> Vec<Resolution>
    where
        I: IntoIterator<Item = Resolution>,
    {
        let minimum = self.minimum;
        let kept = modes
            .into_iter()
            .filter(move |mode| minimum.map_or(true, |min| mode.is_at_least(&min)));
        match self.unique {
            true => kept.unique().collect(),
            false => kept.collect(),
        }
    }
}

pub static STANDARD_MODES: [Resolution; 26] = [
    Resolution::new(640, 480),
    Resolution::new(800, 600),
    Resolution::new(1024, 768),
    Resolution::new(1280, 720),
    Resolution::new(1280, 800),
    Resolution::new(1280, 960),
    Resolution::new(1280, 1024),
    Resolution::new(1366, 768),
    Resolution::new(1600, 900),
    Resolution::new(1600, 1000),
    Resolution::new(1600, 1024),
    Resolution::new(1600, 1200),
    Resolution::new(1920, 1080),
    Resolution::new(1920, 1200),
    Resolution::new(1920, 1280),
    Resolution::new(1920, 1440),
    Resolution::new(2560, 1080),
    Resolution::new(2560, 1440),
    Resolution::new(2560, 1600),
    Resolution::new(2560, 1920),
    Resolution::new(2560, 2048),
    Resolution::new(3440, 1440),
    Resolution::new(3840, 1600),
    Resolution::new(3840, 2160),
    Resolution::new(3840, 2400),
    Resolution::new(3840, 2880),
];

#[cfg(test)]
mod tests {
    use crate::types::{AspectRatio, DisplayConfig, ModeFilter, Resolution};
    use crate::VideoModeError;

    fn ratio(width: u32, height: u32) -> (u32, u32) {
        let r = Resolution::new(width, height).aspect_ratio().unwrap();
        (r.numerator, r.denominator)
    }

    #[test]
    fn common_aspect_ratios() {
        assert_eq!(ratio(1920, 1080), (16, 9));
        assert_eq!(ratio(1024, 768), (4, 3));
        assert_eq!(ratio(800, 600), (4, 3));
        assert_eq!(ratio(1280, 800), (8, 5));
        assert_eq!(ratio(1366, 768), (683, 384));
        assert_eq!(ratio(1080, 1920), (9, 16));
    }

    // every reduced ratio keeps the proportion and is in lowest terms
    #[test]
    fn reduction_preserves_ratio() {
        for width in (1..400).step_by(7) {
            for height in (1..300).step_by(5) {
                let (w, h) = ratio(width, height);
                assert_eq!(w as u64 * height as u64, h as u64 * width as u64);
                assert_eq!(num::integer::gcd(w, h), 1, "{}x{}", width, height);
            }
        }
    }

    #[test]
    fn zero_dimension_is_rejected() {
        let zero_height = Resolution::new(1920, 0);
        assert_eq!(
            zero_height.aspect_ratio(),
            Err(VideoModeError::DegenerateResolution(zero_height))
        );
        assert!(Resolution::new(0, 0).aspect_ratio().is_err());
    }

    #[test]
    fn aspect_ratio_display() {
        let r: AspectRatio = Resolution::new(2560, 1080).aspect_ratio().unwrap();
        assert_eq!(r.to_string(), "64:27");
    }

    #[test]
    fn resolution_parses() {
        assert_eq!("1920x1080".parse(), Ok(Resolution::new(1920, 1080)));
        assert_eq!(" 800 x 600 ".parse(), Ok(Resolution::new(800, 600)));
        assert!("1920".parse::<Resolution>().is_err());
        assert!("axb".parse::<Resolution>().is_err());
        assert!("-1x5".parse::<Resolution>().is_err());
    }

    #[test]
    fn display_config_serializes_resolution_as_string() {
        let config = DisplayConfig {
            resolution: Resolution::new(1600, 900),
            fullscreen: true,
        };
        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(json, r#"{"resolution":"1600x900","fullscreen":true}"#);
        let back: DisplayConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }

    #[test]
    fn display_config_fullscreen_defaults_to_windowed() {
        let config: DisplayConfig = serde_json::from_str(r#"{"resolution":"640x480"}"#).unwrap();
        assert_eq!(config.resolution, Resolution::new(640, 480));
        assert!(!config.fullscreen);
    }

    #[test]
    fn filter_unique_keeps_first_order() {
        let modes = vec![
            Resolution::new(1920, 1080),
            Resolution::new(800, 600),
            Resolution::new(1920, 1080),
            Resolution::new(1024, 768),
        ];
        let unique = ModeFilter {
            unique: true,
            minimum: None,
        };
        assert_eq!(
            unique.apply(modes.clone()),
            vec![
                Resolution::new(1920, 1080),
                Resolution::new(800, 600),
                Resolution::new(1024, 768)
            ]
        );
        assert_eq!(ModeFilter::default().apply(modes.clone()), modes);
    }

    #[test]
    fn filter_minimum_checks_both_dimensions() {
        let filter = ModeFilter {
            unique: false,
            minimum: Some(Resolution::new(1024, 768)),
        };
        let kept = filter.apply(vec![
            Resolution::new(1280, 720),
            Resolution::new(1024, 768),
            Resolution::new(800, 600),
        ]);
        assert_eq!(kept, vec![Resolution::new(1024, 768)]);
    }
}

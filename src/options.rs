use crate::constants::{DEFAULT_ANGLE, DEFAULT_MOCKUP_STYLE, MAX_ANGLE};
use crate::error::{RenderError, Result};
use std::fmt;
use std::str::FromStr;

// Each closed set lists its members once in `ALL`; the first entry is the default.
macro_rules! closed_set {
    ($name:ident { $($variant:ident => $label:literal),+ $(,)? }) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $label),+
                }
            }

            /// Exact label match, no trimming or case folding.
            pub fn from_label(label: &str) -> Option<Self> {
                Self::ALL.iter().copied().find(|item| item.as_str() == label)
            }

            pub fn labels() -> Vec<&'static str> {
                Self::ALL.iter().map(|item| item.as_str()).collect()
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::ALL[0]
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = RenderError;

            fn from_str(s: &str) -> Result<Self> {
                let wanted = s.trim();
                Self::from_label(wanted)
                    .or_else(|| {
                        Self::ALL
                            .iter()
                            .copied()
                            .find(|item| item.as_str().eq_ignore_ascii_case(wanted))
                    })
                    .ok_or_else(|| {
                        RenderError::Validation(format!(
                            "unknown {} \"{}\" (expected one of: {})",
                            stringify!($name).to_lowercase(),
                            wanted,
                            Self::labels().join(", ")
                        ))
                    })
            }
        }
    };
}

closed_set!(Category {
    Cosmetics => "Cosmetics",
    Electronics => "Electronics",
    FoodAndBeverage => "Food & Beverage",
    Apparel => "Apparel",
    LuxuryGoods => "Luxury Goods",
});

closed_set!(Lighting {
    StudioSoftbox => "Studio Softbox",
    NaturalSunlight => "Natural Sunlight",
    DramaticRim => "Dramatic Rim Lighting",
    Cinematic => "Cinematic",
    NeutralClean => "Neutral & Clean",
});

closed_set!(Resolution {
    Square1K => "1024x1024",
    Square2K => "2048x2048",
    Portrait => "1024x1792",
    Landscape => "1792x1024",
});

#[derive(Debug, Clone, PartialEq)]
pub struct RenderOptions {
    pub category: Category,
    pub angle: u16,
    pub mockup_style: String,
    pub lighting: Lighting,
    pub reflections: bool,
    pub resolution: Resolution,
    pub watermark_text: String,
}

impl Default for RenderOptions {
    fn default() -> Self {
        RenderOptions {
            category: Category::default(),
            angle: DEFAULT_ANGLE,
            mockup_style: DEFAULT_MOCKUP_STYLE.to_string(),
            lighting: Lighting::default(),
            reflections: true,
            resolution: Resolution::default(),
            watermark_text: String::new(),
        }
    }
}

impl RenderOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_category(mut self, category: Category) -> Self {
        self.category = category;
        self
    }

    pub fn with_angle(mut self, angle: u16) -> Self {
        self.angle = angle;
        self
    }

    pub fn with_mockup_style(mut self, style: impl Into<String>) -> Self {
        self.mockup_style = style.into();
        self
    }

    pub fn with_lighting(mut self, lighting: Lighting) -> Self {
        self.lighting = lighting;
        self
    }

    pub fn with_reflections(mut self, reflections: bool) -> Self {
        self.reflections = reflections;
        self
    }

    pub fn with_resolution(mut self, resolution: Resolution) -> Self {
        self.resolution = resolution;
        self
    }

    pub fn with_watermark(mut self, text: impl Into<String>) -> Self {
        self.watermark_text = text.into();
        self
    }

    pub fn has_watermark(&self) -> bool {
        !self.watermark_text.is_empty()
    }

    pub fn validate(&self) -> Result<()> {
        if self.angle > MAX_ANGLE {
            return Err(RenderError::Validation(format!(
                "angle must be between 0 and {} degrees, got {}",
                MAX_ANGLE, self.angle
            )));
        }
        Ok(())
    }

    /// Applies one `key=value` override as typed on the command line.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "category" => self.category = value.parse()?,
            "angle" => {
                self.angle = value.trim().parse().map_err(|_| {
                    RenderError::Validation(format!("angle must be a whole number, got \"{}\"", value))
                })?
            }
            "style" | "mockup" | "mockup_style" => self.mockup_style = value.to_string(),
            "lighting" => self.lighting = value.parse()?,
            "reflections" => self.reflections = parse_flag(key, value)?,
            "resolution" => self.resolution = value.parse()?,
            "watermark" | "watermark_text" => self.watermark_text = value.to_string(),
            other => {
                return Err(RenderError::Validation(format!(
                    "unknown option \"{}\"",
                    other
                )))
            }
        }
        Ok(())
    }
}

pub fn parse_flag(key: &str, value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Ok(true),
        "false" | "no" | "off" | "0" => Ok(false),
        _ => Err(RenderError::Validation(format!(
            "{} must be true or false, got \"{}\"",
            key, value
        ))),
    }
}

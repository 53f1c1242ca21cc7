//! Style advisor helpers: skin-tone buckets and their colour guidance, and
//! body measurement validation before classification.

use crate::catalog::models::Measurements;
use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// A named colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Swatch {
    pub name: &'static str,
    pub hex: &'static str,
}

/// A group of swatches that suit a skin tone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Palette {
    pub name: &'static str,
    pub swatches: &'static [Swatch],
}

const fn swatch(name: &'static str, hex: &'static str) -> Swatch {
    Swatch { name, hex }
}

/// Skin-tone categories shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SkinTone {
    Fair,
    Medium,
    Olive,
    Deep,
}

impl SkinTone {
    pub const ALL: [SkinTone; 4] =
        [SkinTone::Fair, SkinTone::Medium, SkinTone::Olive, SkinTone::Deep];

    /// Maps the classifier's bucket (`light`, `mid-light`, `mid-dark`, `dark`).
    pub fn from_bucket(bucket: &str) -> Option<Self> {
        match bucket.trim().to_lowercase().as_str() {
            "light" => Some(SkinTone::Fair),
            "mid-light" => Some(SkinTone::Medium),
            "mid-dark" => Some(SkinTone::Olive),
            "dark" => Some(SkinTone::Deep),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SkinTone::Fair => "Fair",
            SkinTone::Medium => "Medium",
            SkinTone::Olive => "Olive",
            SkinTone::Deep => "Deep",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            SkinTone::Fair => {
                "Fair skin tones often have light undertones (cool, warm, or neutral). Colors that \
                 enhance fair skin tones are typically soft or bold jewel tones that create contrast \
                 without overwhelming the complexion."
            }
            SkinTone::Medium => {
                "Medium skin tones often have a balanced undertone, leaning slightly warm or \
                 neutral. They can handle a broader range of colors, especially those with warmth \
                 or vibrancy."
            }
            SkinTone::Olive => {
                "Olive skin tones often have a greenish or yellowish undertone, which pairs well \
                 with earthy and rich colors. The natural warmth in olive tones allows for both \
                 bold and muted shades."
            }
            SkinTone::Deep => {
                "Deep skin tones have rich, dark undertones that look stunning with high-contrast \
                 colors, bold hues, and metallics. These tones can carry vibrant shades that might \
                 overwhelm lighter complexions."
            }
        }
    }

    pub fn colors_to_avoid(self) -> &'static str {
        match self {
            SkinTone::Fair => {
                "Very pale colors like white or beige, as they can wash out the complexion and \
                 create a bland appearance. These colors can make fair skin look washed out or \
                 highlight redness."
            }
            SkinTone::Medium => {
                "Colors that are too close to the skin tone, like certain beiges or tans, which can \
                 make the complexion look flat. These create a \"blending in\" effect that lacks \
                 dimension and contrast."
            }
            SkinTone::Olive => {
                "Colors with too much yellow or green (e.g., chartreuse or lime green), as they can \
                 clash with the natural undertone of olive skin. These shades can emphasize \
                 sallowness in the complexion."
            }
            SkinTone::Deep => {
                "Very muted or pastel colors, as they can appear dull against the richness of the \
                 skin tone. These lack the vibrancy needed to complement deep skin and can make \
                 the complexion appear ashy."
            }
        }
    }

    /// Clothing palettes that flatter this tone.
    pub fn palettes(self) -> &'static [Palette] {
        match self {
            SkinTone::Fair => FAIR_PALETTES,
            SkinTone::Medium => MEDIUM_PALETTES,
            SkinTone::Olive => OLIVE_PALETTES,
            SkinTone::Deep => DEEP_PALETTES,
        }
    }

    /// Hair colours that flatter this tone.
    pub fn hair_colors(self) -> &'static [Swatch] {
        match self {
            SkinTone::Fair => const { &[
                swatch("Platinum Blonde", "#F5F5DC"),
                swatch("Golden Blonde", "#F0E68C"),
                swatch("Strawberry Blonde", "#D27D46"),
                swatch("Light Auburn", "#8B4513"),
                swatch("Cool Brown", "#3B2F2F"),
            ] },
            SkinTone::Medium => const { &[
                swatch("Honey Blonde", "#D2B48C"),
                swatch("Caramel", "#CD7F32"),
                swatch("Chestnut Brown", "#8B4513"),
                swatch("Mahogany", "#4A0404"),
                swatch("Auburn", "#A52A2A"),
            ] },
            SkinTone::Olive => const { &[
                swatch("Golden Brown", "#826644"),
                swatch("Chocolate Brown", "#654321"),
                swatch("Dark Brown", "#3B2F2F"),
                swatch("Deep Burgundy", "#960018"),
                swatch("Black with Brown Highlights", "#000000"),
            ] },
            SkinTone::Deep => const { &[
                swatch("Deep Violet Black", "#301934"),
                swatch("Blue-Black", "#000000"),
                swatch("Rich Brown", "#654321"),
                swatch("Burgundy", "#800020"),
                swatch("Dark Caramel Highlights", "#6F4E37"),
            ] },
        }
    }
}

impl fmt::Display for SkinTone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl std::str::FromStr for SkinTone {
    type Err = String;

    /// Accepts either a label (`olive`) or a classifier bucket (`mid-dark`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some(tone) = Self::from_bucket(s) {
            return Ok(tone);
        }
        match s.trim().to_lowercase().as_str() {
            "fair" => Ok(SkinTone::Fair),
            "medium" => Ok(SkinTone::Medium),
            "olive" => Ok(SkinTone::Olive),
            "deep" => Ok(SkinTone::Deep),
            _ => Err(format!("Unknown skin tone: {}. Use: fair, medium, olive, deep", s)),
        }
    }
}

const FAIR_PALETTES: &[Palette] = &[
    Palette {
        name: "Soft Pastels",
        swatches: &[
            swatch("Light Pink", "#FFC1CC"),
            swatch("Baby Blue", "#A2CFFE"),
            swatch("Lavender", "#E6E6FA"),
            swatch("Mint Green", "#98FF98"),
            swatch("Peach", "#FFDFBA"),
            swatch("Periwinkle", "#CCCCFF"),
        ],
    },
    Palette {
        name: "Jewel Tones",
        swatches: &[
            swatch("Sapphire Blue", "#0F52BA"),
            swatch("Emerald Green", "#50C878"),
            swatch("Ruby Red", "#E0115F"),
            swatch("Indigo", "#4B0082"),
            swatch("Teal", "#008080"),
            swatch("Turquoise", "#40E0D0"),
        ],
    },
    Palette {
        name: "Neutrals",
        swatches: &[
            swatch("Ivory", "#FFFFF0"),
            swatch("Light Gray", "#D3D3D3"),
            swatch("Champagne", "#E8D2A6"),
            swatch("Camel", "#A67B5B"),
            swatch("Charcoal", "#36454F"),
            swatch("Navy Blue", "#000080"),
        ],
    },
];

const MEDIUM_PALETTES: &[Palette] = &[
    Palette {
        name: "Warm Tones",
        swatches: &[
            swatch("Coral", "#FF6F61"),
            swatch("Mustard Yellow", "#FFC107"),
            swatch("Burnt Orange", "#E65100"),
            swatch("Pumpkin", "#FF7518"),
            swatch("Marsala", "#BF4F51"),
            swatch("Ochre", "#CC7722"),
        ],
    },
    Palette {
        name: "Rich Neutrals",
        swatches: &[
            swatch("Camel", "#C19A6B"),
            swatch("Olive Green", "#556B2F"),
            swatch("Tan", "#D2B48C"),
            swatch("Plum", "#5D3954"),
            swatch("Burnt Sienna", "#8A3324"),
            swatch("Taupe Brown", "#483C32"),
        ],
    },
    Palette {
        name: "Bold Colors",
        swatches: &[
            swatch("Teal", "#008080"),
            swatch("Royal Blue", "#4169E1"),
            swatch("Magenta", "#FF00FF"),
            swatch("Jade Green", "#00A36C"),
            swatch("Burgundy", "#800020"),
            swatch("Cobalt Blue", "#0047AB"),
        ],
    },
];

const OLIVE_PALETTES: &[Palette] = &[
    Palette {
        name: "Earthy Tones",
        swatches: &[
            swatch("Olive Green", "#4A5D23"),
            swatch("Terracotta", "#E2725B"),
            swatch("Rust", "#B7410E"),
            swatch("Saddle Brown", "#8B4513"),
            swatch("Olive Drab", "#6B8E23"),
            swatch("Wood Brown", "#966F33"),
        ],
    },
    Palette {
        name: "Jewel Tones",
        swatches: &[
            swatch("Deep Purple", "#4B0082"),
            swatch("Emerald Green", "#2E8B57"),
            swatch("Sapphire Blue", "#0F52BA"),
            swatch("Amethyst", "#9F2B68"),
            swatch("Burgundy", "#800020"),
            swatch("Copper", "#B87333"),
        ],
    },
    Palette {
        name: "Warm Neutrals",
        swatches: &[
            swatch("Cream", "#FFFDD0"),
            swatch("Khaki", "#C3B091"),
            swatch("Sand", "#C2B280"),
            swatch("Umber", "#826644"),
            swatch("Mustard", "#CBA135"),
            swatch("Taupe Brown", "#483C32"),
        ],
    },
];

const DEEP_PALETTES: &[Palette] = &[
    Palette {
        name: "Bold Colors",
        swatches: &[
            swatch("Bright Red", "#FF0000"),
            swatch("Cobalt Blue", "#0047AB"),
            swatch("Fuchsia", "#FF00FF"),
            swatch("Orange", "#FFA500"),
            swatch("Cyan", "#00FFFF"),
            swatch("Hot Pink", "#FF69B4"),
        ],
    },
    Palette {
        name: "Metallics",
        swatches: &[
            swatch("Gold", "#FFD700"),
            swatch("Bronze", "#CD7F32"),
            swatch("Copper", "#B87333"),
            swatch("Silver", "#C0C0C0"),
            swatch("Old Gold", "#D4AF37"),
            swatch("Rose Gold", "#B76E79"),
        ],
    },
    Palette {
        name: "Deep Neutrals",
        swatches: &[
            swatch("Charcoal", "#36454F"),
            swatch("Navy", "#000080"),
            swatch("Chocolate Brown", "#4A3728"),
            swatch("Plum", "#5D3954"),
            swatch("Burgundy", "#800020"),
            swatch("Dark Slate Blue", "#483D8B"),
        ],
    },
];

/// Why a set of measurements was rejected before reaching the classifier.
#[derive(Debug, Error, PartialEq)]
pub enum MeasurementError {
    #[error("{field} measurement is required and must be a positive number (got {value})")]
    Invalid { field: &'static str, value: f64 },
}

/// Checks that every measurement is a positive, finite number.
pub fn validate_measurements(m: &Measurements) -> Result<(), MeasurementError> {
    let fields = [
        ("bust", m.bust),
        ("waist", m.waist),
        ("highHip", m.high_hip),
        ("hip", m.hip),
        ("shoulder", m.shoulder),
    ];

    for (field, value) in fields {
        if !value.is_finite() || value <= 0.0 {
            return Err(MeasurementError::Invalid { field, value });
        }
    }
    Ok(())
}

//! Brand tone presets.
//!
//! A campaign carries exactly one [`Tone`]. The tone controls both the
//! copywriting voice fed to text generation and the visual style recipe fed
//! to image generation.

use crate::error::CoreError;

/// The four fixed brand-voice presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Luxury,
    Trendy,
    Minimal,
    Bold,
}

/// All valid tone names, in canonical order.
pub const VALID_TONES: &[&str] = &["Luxury", "Trendy", "Minimal", "Bold"];

impl Tone {
    /// Canonical name as stored in the database and accepted on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            Tone::Luxury => "Luxury",
            Tone::Trendy => "Trendy",
            Tone::Minimal => "Minimal",
            Tone::Bold => "Bold",
        }
    }

    /// Parse a tone name. Case-sensitive, matching the stored form.
    pub fn parse(s: &str) -> Result<Tone, CoreError> {
        match s {
            "Luxury" => Ok(Tone::Luxury),
            "Trendy" => Ok(Tone::Trendy),
            "Minimal" => Ok(Tone::Minimal),
            "Bold" => Ok(Tone::Bold),
            other => Err(CoreError::Validation(format!(
                "Invalid tone '{other}'. Must be one of: {}",
                VALID_TONES.join(", ")
            ))),
        }
    }

    /// Copywriting voice descriptor embedded in text-generation prompts.
    pub fn voice(&self) -> &'static str {
        match self {
            Tone::Luxury => "sophisticated, elegant, aspirational, high-end brand voice",
            Tone::Trendy => "fun, youthful, energetic, Gen-Z lifestyle brand voice",
            Tone::Minimal => "clean, simple, understated, Scandinavian minimalist voice",
            Tone::Bold => "powerful, dramatic, statement-making, confident brand voice",
        }
    }

    /// Visual style recipe embedded in image-generation prompts.
    pub fn visual_style(&self) -> &'static str {
        match self {
            Tone::Luxury => {
                "soft editorial lighting, gold and ivory background, luxury velvet and marble \
                 surfaces, champagne and warm tones, sophisticated depth of field, Vogue \
                 magazine aesthetic"
            }
            Tone::Trendy => {
                "vibrant colorful gradient background, trendy lifestyle setting, bright and fun \
                 colors, social-media-viral aesthetic, Gen-Z color palette, energetic composition"
            }
            Tone::Minimal => {
                "pure white studio background, clean Scandinavian minimalism, negative space, \
                 monochromatic neutral tones, precise product placement, Apple product \
                 photography style"
            }
            Tone::Bold => {
                "dramatic chiaroscuro lighting, dark jewel-toned background, deep contrast, \
                 powerful composition, fashion-forward editorial, high-impact visual statement"
            }
        }
    }

    /// Whether image generation should use the renderer's vivid style.
    ///
    /// Only Trendy campaigns ask for vivid output; the other tones read
    /// better with natural rendering.
    pub fn prefers_vivid_rendering(&self) -> bool {
        matches!(self, Tone::Trendy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn parse_roundtrips_every_tone() {
        for name in VALID_TONES {
            let tone = Tone::parse(name).expect("valid tone must parse");
            assert_eq!(tone.as_str(), *name);
        }
    }

    #[test]
    fn parse_rejects_unknown_tone() {
        assert_matches!(Tone::parse("Edgy"), Err(CoreError::Validation(_)));
    }

    #[test]
    fn parse_is_case_sensitive() {
        assert_matches!(Tone::parse("luxury"), Err(CoreError::Validation(_)));
    }

    #[test]
    fn only_trendy_prefers_vivid() {
        assert!(Tone::Trendy.prefers_vivid_rendering());
        assert!(!Tone::Luxury.prefers_vivid_rendering());
        assert!(!Tone::Minimal.prefers_vivid_rendering());
        assert!(!Tone::Bold.prefers_vivid_rendering());
    }

    #[test]
    fn visual_styles_are_distinct() {
        let styles = [
            Tone::Luxury.visual_style(),
            Tone::Trendy.visual_style(),
            Tone::Minimal.visual_style(),
            Tone::Bold.visual_style(),
        ];
        for (i, a) in styles.iter().enumerate() {
            for b in &styles[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }
}

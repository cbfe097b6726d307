use bytes::Bytes;
use rand::Rng as _;

use crate::types::{ImagePayload, QualityProfile};

/// A themed placeholder: keyword set, background color, glyph, caption
struct Theme {
    keywords: &'static [&'static str],
    background: &'static str,
    glyph: &'static str,
    caption: &'static str,
}

/// Themed placeholders, scanned in priority order
const THEMES: &[Theme] = &[
    Theme {
        keywords: &["cat", "kitten", "dog", "puppy", "lion", "bird", "horse"],
        background: "#e67e22",
        glyph: "🐾",
        caption: "Friendly Animal Scene",
    },
    Theme {
        keywords: &["van gogh", "painting", "watercolor", "art style", "artwork", "abstract"],
        background: "#f39c12",
        glyph: "🎨",
        caption: "Van Gogh Style Artwork",
    },
    Theme {
        keywords: &["pope", "dalai", "monk", "meditation", "peaceful", "serene"],
        background: "#9b59b6",
        glyph: "🕊",
        caption: "Peaceful Mountain Scene",
    },
];

/// Generic fallbacks when no theme matches; picked uniformly at random
const GENERIC: &[(&str, &str)] = &[
    ("#667eea", "AI Demo Image"),
    ("#2c3e50", "AI Generated Preview"),
    ("#16a085", "AI Concept Render"),
];

/// Produce a locally rendered stand-in image for the prompt
///
/// Pure apart from the random pick among the generic variants. Always
/// succeeds and never touches the network: the output is a self-contained
/// SVG sized to the quality profile.
pub fn placeholder(prompt: &str, profile: QualityProfile) -> ImagePayload {
    let lowered = prompt.to_lowercase();

    let (background, glyph, caption) = THEMES
        .iter()
        .find(|theme| theme.keywords.iter().any(|keyword| lowered.contains(keyword)))
        .map_or_else(
            || {
                let (background, caption) = GENERIC[rand::rng().random_range(0..GENERIC.len())];
                (background, "✨", caption)
            },
            |theme| (theme.background, theme.glyph, theme.caption),
        );

    let svg = render_svg(profile, background, glyph, caption);

    ImagePayload {
        bytes: Bytes::from(svg.into_bytes()),
        mime: "image/svg+xml".to_string(),
    }
}

fn render_svg(profile: QualityProfile, background: &str, glyph: &str, caption: &str) -> String {
    let QualityProfile { width, height } = profile;
    let glyph_size = height / 4;
    let caption_size = height / 18;

    format!(
        concat!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
            r#"<rect width="100%" height="100%" fill="{background}"/>"#,
            r#"<text x="50%" y="45%" font-size="{glyph_size}" text-anchor="middle" dominant-baseline="middle">{glyph}</text>"#,
            r##"<text x="50%" y="62%" font-family="sans-serif" font-size="{caption_size}" fill="#ffffff" text-anchor="middle">{caption}</text>"##,
            "</svg>"
        ),
        w = width,
        h = height,
        background = background,
        glyph_size = glyph_size,
        glyph = glyph,
        caption_size = caption_size,
        caption = caption,
    )
}

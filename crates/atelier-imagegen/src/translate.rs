/// German → English replacements for common art and subject terms
///
/// Multi-word phrases come first so they win over their constituent words.
const TERMS: &[(&str, &str)] = &[
    ("im stil von", "in the style of"),
    ("tee trinken", "having tea"),
    // Art styles
    ("fotorealistisch", "photorealistic"),
    ("ölgemälde", "oil painting"),
    ("aquarell", "watercolor"),
    ("malerei", "painting"),
    ("künstlerisch", "artistic"),
    ("abstrakt", "abstract"),
    // Colors
    ("rot", "red"),
    ("blau", "blue"),
    ("grün", "green"),
    ("gelb", "yellow"),
    ("lila", "purple"),
    ("rosa", "pink"),
    ("schwarz", "black"),
    ("weiß", "white"),
    ("grau", "gray"),
    // Subjects
    ("katze", "cat"),
    ("hund", "dog"),
    ("berg", "mountain"),
    ("himmel", "sky"),
    ("sonne", "sun"),
    ("mond", "moon"),
    ("baum", "tree"),
    ("blume", "flower"),
    ("haus", "house"),
    ("stadt", "city"),
    ("kirche", "church"),
    ("schloss", "castle"),
    ("papst", "pope"),
    // Descriptions
    ("schön", "beautiful"),
    ("hell", "bright"),
    ("dunkel", "dark"),
    ("hochwertig", "high quality"),
    ("detailliert", "detailed"),
    ("meisterwerk", "masterpiece"),
];

/// Apply the prompt language policy before backend dispatch
///
/// German prompts are mapped term-by-term to English for better results
/// from English-trained models; any other (or absent) tag passes the
/// prompt through unchanged. The caller keeps the original text for
/// echoing back.
pub fn normalize(prompt: &str, language: Option<&str>) -> String {
    match language {
        Some("de") => translate_german(prompt),
        _ => prompt.to_string(),
    }
}

fn translate_german(prompt: &str) -> String {
    let mut text = prompt.to_lowercase();
    for (german, english) in TERMS {
        if text.contains(german) {
            text = text.replace(german, english);
        }
    }
    text
}

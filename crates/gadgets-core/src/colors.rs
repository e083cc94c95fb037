//! Swatch colors for the variant color picker.

const SWATCHES: &[(&str, &str)] = &[
    ("black", "#1F2020"),
    ("coral", "#EE7762"),
    ("gold", "#F9E5C9"),
    ("green", "#AEE1CD"),
    ("midnightgreen", "#004953"),
    ("purple", "#e5ddea"),
    ("red", "#BA0C2E"),
    ("rosegold", "#E6C7C2"),
    ("silver", "#e2e4e1"),
    ("spacegray", "#535150"),
    ("white", "#F8F7F2"),
    ("yellow", "#F3D060"),
];

/// Returns the CSS hex swatch for a catalog color name.
///
/// Lookup ignores case. Unknown colors return `None` and render without a
/// background.
#[must_use]
pub fn color_swatch(color: &str) -> Option<&'static str> {
    SWATCHES
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(color))
        .map(|(_, hex)| *hex)
}

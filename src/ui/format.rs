//! Cell formatting for the artwork table.

pub const UNKNOWN_ARTIST: &str = "Unknown artist";
pub const UNKNOWN_ORIGIN: &str = "Unknown";
pub const NO_INSCRIPTIONS: &str = "No inscriptions";
pub const NO_YEAR: &str = "-";

/// First clause of an artist descriptor, cut at `(`, `,` or a line break.
///
/// `"Georges Seurat\nFrench, 1859-1891"` becomes `"Georges Seurat"`.
pub fn artist_name(artist_display: Option<&str>) -> String {
    artist_display
        .and_then(|text| text.split(['(', ',', '\n']).next())
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .unwrap_or(UNKNOWN_ARTIST)
        .to_string()
}

pub fn origin_label(place_of_origin: Option<&str>) -> &str {
    place_of_origin
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .unwrap_or(UNKNOWN_ORIGIN)
}

/// Inscription text cut to `budget` characters, with `...` when cut.
pub fn inscription_excerpt(inscriptions: Option<&str>, budget: usize) -> String {
    let Some(text) = inscriptions.map(str::trim).filter(|text| !text.is_empty()) else {
        return NO_INSCRIPTIONS.to_string();
    };
    if text.chars().count() <= budget {
        return text.to_string();
    }
    let cut: String = text.chars().take(budget).collect();
    format!("{}...", cut.trim_end())
}

pub fn year_label(year: Option<i32>) -> String {
    year.map(|value| value.to_string())
        .unwrap_or_else(|| NO_YEAR.to_string())
}

/// IIIF image URL for an image token at the given width.
pub fn image_url(iiif_base: &str, image_id: Option<&str>, width: u32) -> Option<String> {
    let token = image_id.map(str::trim).filter(|token| !token.is_empty())?;
    Some(format!(
        "{}/{token}/full/{width},/0/default.jpg",
        iiif_base.trim_end_matches('/')
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn artist_name_takes_first_clause() {
        assert_eq!(
            artist_name(Some("Georges Seurat\nFrench, 1859-1891")),
            "Georges Seurat"
        );
        assert_eq!(
            artist_name(Some("Claude Monet (French, 1840-1926)")),
            "Claude Monet"
        );
        assert_eq!(artist_name(Some("Unknown Maker, Japan")), "Unknown Maker");
        assert_eq!(artist_name(Some("  (anonymous)")), UNKNOWN_ARTIST);
        assert_eq!(artist_name(None), UNKNOWN_ARTIST);
    }

    #[test]
    fn origin_falls_back_when_absent() {
        assert_eq!(origin_label(Some("France")), "France");
        assert_eq!(origin_label(Some("  ")), UNKNOWN_ORIGIN);
        assert_eq!(origin_label(None), UNKNOWN_ORIGIN);
    }

    #[test]
    fn inscriptions_are_truncated_on_characters() {
        assert_eq!(inscription_excerpt(None, 10), NO_INSCRIPTIONS);
        assert_eq!(inscription_excerpt(Some(""), 10), NO_INSCRIPTIONS);
        assert_eq!(inscription_excerpt(Some("signed"), 10), "signed");
        assert_eq!(
            inscription_excerpt(Some("signed lower right"), 10),
            "signed low..."
        );
        assert_eq!(
            inscription_excerpt(Some("日本語の銘文があります"), 4),
            "日本語の..."
        );
    }

    #[test]
    fn image_url_is_derived_from_token() {
        assert_eq!(
            image_url("https://www.artic.edu/iiif/2/", Some("abc"), 200).as_deref(),
            Some("https://www.artic.edu/iiif/2/abc/full/200,/0/default.jpg")
        );
        assert_eq!(image_url("https://x", Some(" "), 200), None);
        assert_eq!(image_url("https://x", None, 200), None);
        assert_eq!(year_label(Some(-500)), "-500");
        assert_eq!(year_label(None), NO_YEAR);
    }
}

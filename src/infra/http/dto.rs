//! Wire types for the museum's `/artworks` listing.

use serde::Deserialize;

use crate::domain::entities::artwork::Artwork;
use crate::domain::entities::page::Page;
use crate::usecase::ports::source::FetchError;

/// Fields requested from the API; everything else is left off the wire.
pub const ARTWORK_FIELDS: &str =
    "id,title,place_of_origin,artist_display,inscriptions,date_start,date_end,image_id";

#[derive(Debug, Deserialize)]
pub struct ArtworksResponse {
    pub pagination: PaginationDto,
    pub data: Vec<ArtworkDto>,
}

#[derive(Debug, Deserialize)]
pub struct PaginationDto {
    pub total: u64,
}

#[derive(Debug, Deserialize)]
pub struct ArtworkDto {
    pub id: u64,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub place_of_origin: Option<String>,
    #[serde(default)]
    pub artist_display: Option<String>,
    #[serde(default)]
    pub inscriptions: Option<String>,
    #[serde(default)]
    pub date_start: Option<i32>,
    #[serde(default)]
    pub date_end: Option<i32>,
    #[serde(default)]
    pub image_id: Option<String>,
}

impl From<ArtworkDto> for Artwork {
    fn from(dto: ArtworkDto) -> Self {
        Artwork {
            id: dto.id.into(),
            title: dto.title.unwrap_or_default(),
            place_of_origin: non_blank(dto.place_of_origin),
            artist_display: non_blank(dto.artist_display),
            inscriptions: non_blank(dto.inscriptions),
            date_start: dto.date_start,
            date_end: dto.date_end,
            image_id: non_blank(dto.image_id),
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|text| !text.trim().is_empty())
}

/// Decodes a listing body into a [`Page`].
pub fn parse_page(body: &str) -> Result<Page, FetchError> {
    let response: ArtworksResponse = serde_json::from_str(body)
        .map_err(|err| FetchError::Malformed(err.to_string()))?;
    Ok(Page::new(
        response.data.into_iter().map(Artwork::from).collect(),
        response.pagination.total,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "pagination": {"total": 129884, "limit": 2, "offset": 0, "total_pages": 64942, "current_page": 1},
        "data": [
            {
                "id": 27992,
                "title": "A Sunday on La Grande Jatte, 1884",
                "place_of_origin": "France",
                "artist_display": "Georges Seurat\nFrench, 1859-1891",
                "inscriptions": null,
                "date_start": 1884,
                "date_end": 1886,
                "image_id": "2d484387-2509-5e8e-2c43-22f9981972eb"
            },
            {
                "id": 4,
                "title": "Priest and Boy",
                "place_of_origin": "",
                "artist_display": null,
                "date_start": 1887,
                "date_end": 1887,
                "image_id": null
            }
        ],
        "config": {"iiif_url": "https://www.artic.edu/iiif/2"}
    }"#;

    #[test]
    fn parses_records_and_total() {
        let page = parse_page(SAMPLE).expect("sample body should parse");

        assert_eq!(page.total_count, 129884);
        assert_eq!(page.len(), 2);
        assert_eq!(page.records[0].id.0, 27992);
        assert_eq!(page.records[0].date_end, Some(1886));
        assert_eq!(page.records[1].place_of_origin, None, "blank origin is absent");
        assert_eq!(page.records[1].inscriptions, None, "missing field is absent");
        assert_eq!(page.records[1].image_id, None);
    }

    #[test]
    fn malformed_body_is_invalid_response() {
        let err = parse_page(r#"{"data": []}"#).expect_err("missing pagination should fail");
        assert!(matches!(err, FetchError::Malformed(_)), "got {err:?}");

        let err = parse_page("<html>").expect_err("html should fail");
        assert!(matches!(err, FetchError::Malformed(_)), "got {err:?}");
    }
}

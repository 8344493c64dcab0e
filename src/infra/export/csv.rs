use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};

use crate::domain::entities::artwork::Artwork;
use crate::ui::format::{artist_name, image_url};

const EXPORT_IMAGE_WIDTH: u32 = 843;

const HEADERS: [&str; 8] = [
    "id",
    "title",
    "artist",
    "origin",
    "inscriptions",
    "date_start",
    "date_end",
    "image_url",
];

/// Writes `records` as CSV and returns the number of data rows written.
pub fn write_artworks_csv<W: Write>(writer: W, records: &[Artwork], iiif_base: &str) -> Result<usize> {
    let mut writer = csv::Writer::from_writer(writer);
    writer
        .write_record(HEADERS)
        .context("failed to write csv header")?;

    for record in records {
        writer
            .write_record([
                record.id.to_string(),
                record.title.clone(),
                artist_name(record.artist_display.as_deref()),
                record.place_of_origin.clone().unwrap_or_default(),
                record.inscriptions.clone().unwrap_or_default(),
                record.date_start.map(|y| y.to_string()).unwrap_or_default(),
                record.date_end.map(|y| y.to_string()).unwrap_or_default(),
                image_url(iiif_base, record.image_token(), EXPORT_IMAGE_WIDTH).unwrap_or_default(),
            ])
            .with_context(|| format!("failed to write csv row for artwork #{}", record.id))?;
    }

    writer.flush().context("failed to flush csv output")?;
    Ok(records.len())
}

pub fn export_artworks_csv(path: &Path, records: &[Artwork], iiif_base: &str) -> Result<usize> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("failed to create csv: {}", path.display()))?;
    let count = write_artworks_csv(file, records, iiif_base)?;
    log::info!("exported {count} artworks to {}", path.display());
    Ok(count)
}

pub fn default_export_file_name() -> String {
    format!("artworks-{}.csv", chrono::Local::now().format("%m%d"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_header_and_formatted_rows() {
        let mut artwork = Artwork::new(27992, "La Grande Jatte, 1884");
        artwork.artist_display = Some("Georges Seurat\nFrench, 1859-1891".to_string());
        artwork.date_start = Some(1884);
        artwork.image_id = Some("abc".to_string());
        let mut output = Vec::new();

        let count = write_artworks_csv(&mut output, &[artwork], "https://iiif.test")
            .expect("csv export should succeed");
        let text = String::from_utf8(output).expect("csv should be utf-8");
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(count, 1);
        assert_eq!(
            lines[0],
            "id,title,artist,origin,inscriptions,date_start,date_end,image_url"
        );
        assert_eq!(
            lines[1],
            "27992,\"La Grande Jatte, 1884\",Georges Seurat,,,1884,,\"https://iiif.test/abc/full/843,/0/default.jpg\""
        );
    }

    #[test]
    fn default_name_is_dated_csv() {
        let name = default_export_file_name();
        assert!(name.starts_with("artworks-") && name.ends_with(".csv"), "{name}");
        assert_eq!(name.len(), "artworks-MMDD.csv".len());
    }
}

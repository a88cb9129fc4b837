use super::kmeans::Point;
use crate::error::AlgolabError;
use std::path::Path;

/// Reads RGB triples from a JSON array (`.json`) or from `r,g,b` lines.
/// Blank lines and lines starting with `#` are skipped.
pub fn load_pixels<P: AsRef<Path>>(path: P) -> Result<Vec<Point>, AlgolabError> {
    let path = path.as_ref();
    let contents = std::fs::read_to_string(path)?;

    let is_json = path
        .extension()
        .map_or(false, |ext| ext.eq_ignore_ascii_case("json"));
    if is_json {
        return Ok(serde_json::from_str(&contents)?);
    }
    parse_pixels(&contents)
}

pub fn parse_pixels(contents: &str) -> Result<Vec<Point>, AlgolabError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .comment(Some(b'#'))
        .trim(csv::Trim::All)
        .from_reader(contents.as_bytes());

    reader
        .deserialize::<(f64, f64, f64)>()
        .map(|row| {
            row.map(|(r, g, b)| [r, g, b]).map_err(|e| {
                let line = e.position().map_or(0, |p| p.line());
                AlgolabError::InvalidInput(format!("line {}: {}", line, e))
            })
        })
        .collect()
}

/// Writes one rounded `r,g,b` row per pixel
pub fn write_pixels<P: AsRef<Path>>(path: P, pixels: &[Point]) -> Result<(), AlgolabError> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)?;
    for p in pixels {
        let rounded = p.map(|c| c.round().clamp(0.0, 255.0) as u8);
        writer.serialize(rounded)?;
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_pixels_skips_comments_and_blanks() {
        let pixels = parse_pixels("# header\n255,0,0\n\n 0, 128 ,255\n").unwrap();
        assert_eq!(pixels, vec![[255.0, 0.0, 0.0], [0.0, 128.0, 255.0]]);
    }

    #[test]
    fn test_parse_pixels_reports_the_bad_line() {
        let err = parse_pixels("1,2,3\n4,5,6\n1,x,3\n").unwrap_err();
        match err {
            AlgolabError::InvalidInput(message) => assert!(message.starts_with("line 3"), "{}", message),
            other => panic!("unexpected error {other}"),
        }
        assert!(parse_pixels("1,2\n").is_err());
    }

    #[test]
    fn test_written_pixels_read_back() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("out.csv");
        write_pixels(&path, &[[254.6, 0.2, 17.0], [1.0, 2.0, 3.0]]).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text, "255,0,17\n1,2,3\n");
        assert_eq!(parse_pixels(&text).unwrap()[0], [255.0, 0.0, 17.0]);
    }
}

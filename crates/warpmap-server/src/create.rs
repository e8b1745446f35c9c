//! Offline map rendering for the `create` command.

use anyhow::{bail, Context};
use std::fs;
use std::path::Path;
use tracing::info;
use warpmap_core::MapRequest;

/// Read a map description from a `.json` or `.csv` file.
pub fn load_request(path: &Path) -> anyhow::Result<MapRequest> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;

    match path.extension().and_then(|e| e.to_str()) {
        Some("json") => MapRequest::from_json(&text)
            .with_context(|| format!("invalid map description in {}", path.display())),
        Some("csv") => MapRequest::from_csv(&text, false)
            .with_context(|| format!("invalid map description in {}", path.display())),
        _ => bail!("{}: expected a .json or .csv file", path.display()),
    }
}

/// Render a map into `map.svg` and `map.html` under `out_dir`.
///
/// Without an input file the standard map is rendered.
pub fn create_map(input: Option<&Path>, out_dir: &Path, mono: bool) -> anyhow::Result<()> {
    let mut request = match input {
        Some(path) => load_request(path)?,
        None => MapRequest::standard(),
    };
    if mono {
        request.mono = true;
    }

    let svg = request.render_svg()?;
    let html = request.render_html()?;

    fs::create_dir_all(out_dir)
        .with_context(|| format!("failed to create {}", out_dir.display()))?;
    let svg_path = out_dir.join("map.svg");
    let html_path = out_dir.join("map.html");
    fs::write(&svg_path, svg).with_context(|| format!("failed to write {}", svg_path.display()))?;
    fs::write(&html_path, html)
        .with_context(|| format!("failed to write {}", html_path.display()))?;

    info!(
        stars = request.nodes.len(),
        "Wrote {} and {}",
        svg_path.display(),
        html_path.display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use uuid::Uuid;

    fn scratch_dir() -> PathBuf {
        std::env::temp_dir().join(format!("warpmap-{}", Uuid::new_v4()))
    }

    #[test]
    fn test_create_standard_map() {
        let dir = scratch_dir();
        create_map(None, &dir, true).unwrap();

        let svg = fs::read_to_string(dir.join("map.svg")).unwrap();
        let html = fs::read_to_string(dir.join("map.html")).unwrap();
        assert!(svg.contains(">Nineveh</text>"));
        assert!(html.contains(&svg));

        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn test_create_from_csv() {
        let dir = scratch_dir();
        fs::create_dir_all(&dir).unwrap();
        let input = dir.join("stars.csv");
        fs::write(&input, "Ur,1,1,2,Uruk\nUruk,3,2,0,Ur\n").unwrap();

        create_map(Some(&input), &dir.join("out"), false).unwrap();
        let svg = fs::read_to_string(dir.join("out").join("map.svg")).unwrap();
        assert_eq!(svg.matches("<line").count(), 1);
        assert!(svg.contains(">Uruk</text>"));

        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn test_unknown_extension_is_rejected() {
        let dir = scratch_dir();
        fs::create_dir_all(&dir).unwrap();
        let input = dir.join("stars.txt");
        fs::write(&input, "Ur,1,1,2\n").unwrap();

        let err = load_request(&input).unwrap_err();
        assert!(err.to_string().contains("expected a .json or .csv file"));

        fs::remove_dir_all(dir).unwrap();
    }
}

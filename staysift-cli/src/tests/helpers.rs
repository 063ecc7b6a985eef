//! Test helpers for writing listing collections to disk.

use camino::{Utf8Path, Utf8PathBuf};
use tempfile::TempDir;

/// Four listings: two happy resorts, a sad inn and a neutral boutique.
pub(super) const SAMPLE_LISTINGS: &str = r#"[
  {"hotel_name": "Blue Bay Resort", "price": 1200, "rating": 4.6, "review_count": 120,
   "aspects": {"cleanliness": 0.8, "service": 0.6}, "subaspects": {"staff": 0.7, "sea": 0.9},
   "face_status": "happy", "type": "Resort"},
  {"hotel_name": "City Inn", "price": 800, "rating": null,
   "aspects": {"cleanliness": 0.3}, "subaspects": {"staff": 0.6},
   "face_status": "sad", "type": "Otel"},
  {"hotel_name": "Harbour Boutique", "price": 650, "rating": 3.9,
   "aspects": {"cleanliness": 0.5, "service": 0.45}, "subaspects": {"sea": 0.4},
   "face_status": "neutral", "type": "Butik"},
  {"hotel_name": "Olive Grove Resort", "price": 2400,
   "aspects": {"cleanliness": 0.9, "location": 0.7}, "subaspects": {"breakfast": 0.8, "staff": 0.5},
   "face_status": "happy", "type": "Resort"}
]"#;

pub(super) fn write_utf8(path: &Utf8Path, contents: &[u8]) {
    std::fs::write(path.as_std_path(), contents).expect("write test file");
}

/// A temporary workspace holding `listings.json`.
pub(super) struct Workspace {
    _dir: TempDir,
    pub(super) root: Utf8PathBuf,
    pub(super) listings: Utf8PathBuf,
}

impl Workspace {
    pub(super) fn with_listings(contents: &str) -> Self {
        let dir = TempDir::new().expect("tempdir");
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("utf-8 workspace");
        let listings = root.join("listings.json");
        write_utf8(&listings, contents.as_bytes());
        Self {
            _dir: dir,
            root,
            listings,
        }
    }

    pub(super) fn sample() -> Self {
        Self::with_listings(SAMPLE_LISTINGS)
    }
}

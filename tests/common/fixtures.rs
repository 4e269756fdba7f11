//! Static catalog and keyword documents used across harnesses.
//!
//! `IMAGES_DOC` / `KEYWORDS_DOC` mirror the shape of the shipped `data/`
//! files; the malformed variants exercise the document-level error paths.

use miru_core::{Catalog, KeywordMap};

/// A well-formed catalog document: two models, Japanese tags, one record
/// sharing a `created_at` with another (for stability checks).
pub const IMAGES_DOC: &str = r#"{
  "images": [
    {
      "id": "1", "filename": "sunset.png", "title": "Sunset",
      "prompt": "a cat on beach at sunset", "negative_prompt": "blurry",
      "model_name": "ModelA", "architecture": "SDXL",
      "tags": ["猫", "夕日"], "created_at": "2024-01-01",
      "parameters": {"steps": 28, "cfg_scale": 7.0, "seed": 1, "sampler": "Euler a"}
    },
    {
      "id": "2", "filename": "forest.png", "title": "Forest",
      "prompt": "a dog in woods", "negative_prompt": "",
      "model_name": "ModelB", "specialty": "photoreal",
      "tags": ["犬", "森"], "created_at": "2024-02-01",
      "parameters": {"steps": 30, "cfg_scale": 6.5, "seed": 2, "sampler": "DPM++ 2M"}
    },
    {
      "id": "3", "filename": "night.png", "title": "Night City",
      "prompt": "city skyline at night",
      "model_name": "ModelA", "base_resolution": "1024x1024",
      "tags": ["都市", "夜"], "created_at": "2024-02-01",
      "parameters": {"steps": 35, "cfg_scale": 5.5, "seed": 3, "sampler": "DDIM"}
    }
  ]
}"#;

/// A well-formed keywords document matching `IMAGES_DOC` vocabulary.
pub const KEYWORDS_DOC: &str = r#"{
  "keywords": {
    "猫": ["cat", "kitten"],
    "犬": ["dog"],
    "夜": ["night"],
    "都市": ["city", "skyline"]
  }
}"#;

/// Root is an array, not an object — must fail document parsing.
pub const MALFORMED_ROOT_DOC: &str = r#"[{"id": "1"}]"#;

/// Object root without the expected top-level key — empty, not an error.
pub const MISSING_KEY_DOC: &str = r#"{"metadata": {"version": 2}}"#;

/// One broken record (no `parameters`, bad date) between two good ones.
pub const PARTIALLY_BROKEN_DOC: &str = r#"{
  "images": [
    {
      "id": "good-1", "filename": "a.png", "title": "A",
      "prompt": "p", "model_name": "M", "created_at": "2024-01-01",
      "parameters": {"steps": 20, "cfg_scale": 7.0, "seed": 1, "sampler": "s"}
    },
    {
      "id": "broken", "filename": "b.png", "title": "B",
      "prompt": "p", "model_name": "M", "created_at": "yesterday"
    },
    {
      "id": "good-2", "filename": "c.png", "title": "C",
      "prompt": "p", "model_name": "M", "created_at": "2024-01-03",
      "parameters": {"steps": 20, "cfg_scale": 7.0, "seed": 2, "sampler": "s"}
    }
  ]
}"#;

/// Parse [`IMAGES_DOC`]; panics if the fixture itself is broken.
pub fn sample_catalog() -> Catalog {
    Catalog::parse(IMAGES_DOC).expect("IMAGES_DOC fixture must parse")
}

/// Parse [`KEYWORDS_DOC`]; panics if the fixture itself is broken.
pub fn sample_map() -> KeywordMap {
    KeywordMap::parse(KEYWORDS_DOC).expect("KEYWORDS_DOC fixture must parse")
}

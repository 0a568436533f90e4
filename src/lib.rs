//! # face-style
//!
//! Facial proportion analysis and tag-based style recommendation from 68-point
//! facial landmarks.
//!
//! This crate provides:
//! - **Feature Metrics**: dimensionless face, court, eye, nose, and lip ratios
//! - **Archetypes**: face-shape and eye-type classification
//! - **Scoring**: a bounded proportion score against per-shape ideals
//! - **Recommendations**: deterministic tag-based ranking over preset catalogs
//!
//! Landmark detection itself is out of scope; landmarks come from any
//! detector that emits the standard 68-point layout.
//!
//! ## Pipeline Overview
//!
//! 1. Parse landmarks (flat 68-point array, named groups, or a detection)
//! 2. Compute [`FaceMetrics`], or synthesize them when no landmarks exist
//! 3. Classify [`FaceShape`] and [`EyeType`] and compute the score
//! 4. Derive a [`StyleProfile`] and the query tag set
//! 5. Rank every catalog by tag overlap with the query
//! 6. Compose the narrative readings ([`Insight`]) and display text
//!
//! ## Quick Start
//!
//! ```rust
//! use face_style::{Analyzer, Gender, LandmarkSource};
//! use rand::{rngs::StdRng, SeedableRng};
//!
//! let analyzer = Analyzer::builtin().unwrap();
//! let source = LandmarkSource::from_json("null").unwrap();
//!
//! let mut rng = StdRng::seed_from_u64(42);
//! let report = analyzer.analyze(&source, Gender::Female, &mut rng);
//!
//! assert!(report.synthetic);
//! assert!((70..=96).contains(&report.score));
//! ```
//!
//! ## Ranking
//!
//! Anything implementing [`Tagged`] can be ranked:
//!
//! ```rust
//! use face_style::{select_top_by_tags, Tagged, TagSet};
//!
//! struct Look { id: &'static str, tags: TagSet }
//!
//! impl Tagged for Look {
//!     fn tags(&self) -> &TagSet { &self.tags }
//!     fn identity(&self) -> &str { self.id }
//! }
//!
//! let looks = vec![
//!     Look { id: "cool", tags: ["round", "清冷"].iter().map(|t| t.to_string()).collect() },
//!     Look { id: "sweet", tags: ["round", "甜美"].iter().map(|t| t.to_string()).collect() },
//! ];
//! let query: TagSet = ["round", "甜美"].iter().map(|t| t.to_string()).collect();
//!
//! let top = select_top_by_tags(&looks, &query, 1);
//! assert_eq!(top[0].id, "sweet");
//! ```

pub mod archetype;
pub mod catalog;
pub mod config;
mod error;
pub mod flavor;
pub mod geometry;
pub mod insight;
pub mod landmarks;
pub mod metrics;
pub mod recommend;
mod report;
pub mod score;
pub mod style;
pub mod tags;
mod types;

pub use archetype::{classify_eye_type, classify_face_shape, EyeType, FaceShape};
pub use catalog::{Catalog, GenderScope, PresetItem};
pub use config::AnalyzerConfig;
pub use error::{Error, Result};
pub use flavor::FlavorText;
pub use insight::Insight;
pub use landmarks::{Detection, LandmarkGroups, LandmarkSet, LandmarkSource};
pub use metrics::{extract, synthetic_metrics, Extraction, FaceMetrics};
pub use recommend::{
    rank_by_tags, select_top_by_tags, tag_score, MakeupCategory, Recommendations, Recommender,
    Tagged,
};
pub use report::{Analyzer, Report, ReportTags};
pub use score::{score, MAX_SCORE, MIN_SCORE};
pub use style::{derive_style, StyleProfile};
pub use tags::{build_metric_tags, build_style_tags, query_tags, Gender, Tag, TagSet};
pub use types::{Point, Shape};

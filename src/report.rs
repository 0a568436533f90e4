//! End-to-end analysis: landmarks in, report out.

use rand::Rng;
use serde::Serialize;
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::debug;

use crate::archetype::{classify_eye_type, classify_face_shape, EyeType, FaceShape};
use crate::catalog::Catalog;
use crate::config::AnalyzerConfig;
use crate::error::Result;
use crate::flavor::FlavorText;
use crate::insight::Insight;
use crate::landmarks::LandmarkSource;
use crate::metrics::{extract, FaceMetrics};
use crate::recommend::{Recommendations, Recommender};
use crate::score::{score, Deviations};
use crate::style::{derive_style, StyleProfile};
use crate::tags::{build_metric_tags, build_style_tags, query_tags, Gender, TagSet, RULES_VERSION};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportTags {
    /// Version of the rule tables that produced these tags.
    pub rules_version: u32,
    pub style: TagSet,
    pub metric: TagSet,
    pub query: TagSet,
}

/// Everything derived from one face.
///
/// Only `flavor` (and `metrics` on the synthetic path) depends on the random
/// source. `insight` reuses the display names from `flavor`; everything else
/// is a pure function of the landmarks and gender.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Report<'a> {
    pub gender: Gender,
    pub synthetic: bool,
    pub metrics: FaceMetrics,
    pub face_shape: FaceShape,
    pub eye_type: EyeType,
    pub score: u8,
    pub deviations: Deviations,
    pub style: StyleProfile,
    pub tags: ReportTags,
    pub recommendations: Recommendations<'a>,
    pub insight: Insight,
    pub flavor: FlavorText,
}

/// Owns the read-only catalog and limits; reusable across requests.
#[derive(Debug, Clone)]
pub struct Analyzer {
    catalog: Catalog,
    config: AnalyzerConfig,
}

impl Analyzer {
    pub fn new(catalog: Catalog, config: AnalyzerConfig) -> Self {
        Self { catalog, config }
    }

    /// Analyzer over the compiled-in catalog with default limits.
    pub fn builtin() -> Result<Self> {
        Ok(Self::new(Catalog::builtin()?, AnalyzerConfig::default()))
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    /// Analyze using the current UTC hour for the greeting.
    pub fn analyze<R: Rng + ?Sized>(
        &self,
        source: &LandmarkSource,
        gender: Gender,
        rng: &mut R,
    ) -> Report<'_> {
        self.analyze_at(source, gender, current_hour(), rng)
    }

    pub fn analyze_at<R: Rng + ?Sized>(
        &self,
        source: &LandmarkSource,
        gender: Gender,
        hour: u32,
        rng: &mut R,
    ) -> Report<'_> {
        let extraction = extract(source, rng);
        let metrics = extraction.metrics;

        let face_shape = classify_face_shape(&metrics);
        let eye_type = classify_eye_type(&metrics);
        let score = score(&metrics, face_shape);
        let deviations = Deviations::compute(&metrics, face_shape);
        debug!(%face_shape, %eye_type, score, synthetic = extraction.synthetic, "face classified");

        let style = derive_style(face_shape, eye_type, metrics.eyes.roundness, gender);
        let style_tags = build_style_tags(&style.label(), face_shape, eye_type, gender);
        let metric_tags = build_metric_tags(&metrics, face_shape, eye_type);
        let query = query_tags(&style_tags, &metric_tags);
        debug!(tags = ?query, "query tags built");

        let recommendations = Recommender::new(&self.catalog, &self.config).recommend(&query, gender);
        let flavor = FlavorText::generate(&metrics, face_shape, eye_type, &style, gender, hour, rng);
        let insight = Insight::compose(&metrics, face_shape, eye_type, &style, score, gender, &flavor);

        Report {
            gender,
            synthetic: extraction.synthetic,
            metrics,
            face_shape,
            eye_type,
            score,
            deviations,
            style,
            tags: ReportTags {
                rules_version: RULES_VERSION,
                style: style_tags,
                metric: metric_tags,
                query,
            },
            recommendations,
            insight,
            flavor,
        }
    }
}

fn current_hour() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| (elapsed.as_secs() / 3600 % 24) as u32)
        .unwrap_or(12)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::score::{MAX_SCORE, MIN_SCORE};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn synthetic_report_is_complete() {
        let analyzer = Analyzer::builtin().unwrap();
        let mut rng = StdRng::seed_from_u64(3);
        let report = analyzer.analyze_at(&LandmarkSource::Unavailable, Gender::Female, 10, &mut rng);

        assert!(report.synthetic);
        assert!(report.metrics.is_finite());
        assert!((MIN_SCORE..=MAX_SCORE).contains(&report.score));
        assert!(report.tags.query.contains("女生"));
        assert!(report.tags.query.is_superset(&report.tags.metric));
        assert_eq!(report.recommendations.occasions.len(), 3);
        assert!(report.recommendations.palette.is_some());
    }

    #[test]
    fn report_serializes_to_json() {
        let analyzer = Analyzer::builtin().unwrap();
        let mut rng = StdRng::seed_from_u64(11);
        let report = analyzer.analyze_at(&LandmarkSource::Unavailable, Gender::Male, 20, &mut rng);
        let json = serde_json::to_value(&report).unwrap();

        assert_eq!(json["gender"], "male");
        assert_eq!(json["synthetic"], true);
        assert!(json["metrics"]["dimensions"]["widthToHeight"].is_number());
        assert!(json["recommendations"]["makeupGuide"].is_object());
        assert!(json["flavor"]["greeting"].as_str().unwrap().starts_with("晚上好"));
        assert_eq!(json["tags"]["rulesVersion"], RULES_VERSION);
        assert_eq!(json["insight"]["physiognomy"].as_array().unwrap().len(), 4);
        assert!(json["insight"]["science"]["analysis"].is_string());
    }

    #[test]
    fn insight_matches_classified_face() {
        let analyzer = Analyzer::builtin().unwrap();
        let mut rng = StdRng::seed_from_u64(8);
        let report = analyzer.analyze_at(&LandmarkSource::Unavailable, Gender::Female, 9, &mut rng);
        let insight = &report.insight;

        assert_eq!(insight.features.eyes.kind, report.flavor.eye_type_name);
        assert_eq!(insight.bone.shape, report.flavor.face_shape_name);
        assert_eq!(
            insight.outlook.directions[0],
            format!("尝试{}风格穿搭", report.style.sub)
        );
        // synthetic lips are always drawn full
        assert_eq!(insight.features.lips.kind, "丰满唇");
        assert_eq!(report.tags.rules_version, RULES_VERSION);
    }
}

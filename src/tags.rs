//! Query tag derivation.
//!
//! Tags are the matching key between a face profile and the preset catalogs.
//! Style tags come from a keyword table scanned over the style label; metric
//! tags come from an ordered list of threshold rules. Both tables are static,
//! versioned data.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

use crate::archetype::{EyeType, FaceShape};
use crate::metrics::FaceMetrics;

pub type Tag = String;

/// Unordered, deduplicated tags. Ordered storage keeps output reproducible.
pub type TagSet = BTreeSet<Tag>;

/// Bumped whenever either rule table changes.
pub const RULES_VERSION: u32 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Male => "男生",
            Self::Female => "女生",
        }
    }

    pub fn is_male(&self) -> bool {
        matches!(self, Self::Male)
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Male => "male",
            Self::Female => "female",
        })
    }
}

impl std::str::FromStr for Gender {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "male" | "m" => Ok(Self::Male),
            "female" | "f" => Ok(Self::Female),
            other => Err(format!("unknown gender `{other}` (expected male or female)")),
        }
    }
}

/// A style-label keyword group and the tag it contributes.
#[derive(Debug, Clone, Copy)]
pub struct KeywordRule {
    pub keywords: &'static [&'static str],
    pub tag: &'static str,
}

pub const KEYWORD_RULES: &[KeywordRule] = &[
    KeywordRule { keywords: &["甜美", "可爱", "元气"], tag: "甜美" },
    KeywordRule { keywords: &["初恋", "少女", "清纯"], tag: "初恋" },
    KeywordRule { keywords: &["明艳", "美艳", "御姐"], tag: "明艳" },
    KeywordRule { keywords: &["气场", "超模", "大气", "高级"], tag: "气场" },
    KeywordRule { keywords: &["清冷", "冷艳", "高冷"], tag: "清冷" },
    KeywordRule { keywords: &["温婉", "古典", "闺秀", "如兰"], tag: "温婉" },
    KeywordRule { keywords: &["纯欲", "氛围"], tag: "氛围感" },
    KeywordRule { keywords: &["阳光", "暖男", "温暖", "亲和"], tag: "阳光" },
    KeywordRule { keywords: &["少年"], tag: "少年感" },
    KeywordRule { keywords: &["硬汉", "型男", "荷尔蒙"], tag: "硬朗" },
    KeywordRule { keywords: &["成熟", "稳重"], tag: "成熟" },
    KeywordRule { keywords: &["清爽", "校草", "干净"], tag: "清爽" },
    KeywordRule { keywords: &["斯文", "儒雅"], tag: "斯文" },
    KeywordRule { keywords: &["文艺", "日系", "雅痞"], tag: "文艺" },
];

/// A threshold rule over metrics.
#[derive(Debug, Clone, Copy)]
pub struct MetricRule {
    pub tag: &'static str,
    pub applies: fn(&FaceMetrics) -> bool,
}

pub const METRIC_RULES: &[MetricRule] = &[
    MetricRule { tag: "中庭偏长", applies: middle_court_long },
    MetricRule { tag: "中庭偏短", applies: middle_court_short },
    MetricRule { tag: "下庭偏长", applies: lower_court_long },
    MetricRule { tag: "三庭均衡", applies: courts_balanced },
    MetricRule { tag: "眼距偏宽", applies: eyes_wide_set },
    MetricRule { tag: "眼距偏窄", applies: eyes_close_set },
    MetricRule { tag: "骨感", applies: jaw_strong },
    MetricRule { tag: "下颌收窄", applies: jaw_narrow },
    MetricRule { tag: "丰唇", applies: lips_full },
    MetricRule { tag: "薄唇", applies: lips_thin },
    MetricRule { tag: "鼻翼偏宽", applies: nose_wide },
    MetricRule { tag: "幼态", applies: face_short },
    MetricRule { tag: "修长", applies: face_long },
];

fn middle_court_long(m: &FaceMetrics) -> bool {
    m.courts.middle > 0.36
}

fn middle_court_short(m: &FaceMetrics) -> bool {
    m.courts.middle < 0.3
}

fn lower_court_long(m: &FaceMetrics) -> bool {
    m.courts.lower > 0.36
}

fn courts_balanced(m: &FaceMetrics) -> bool {
    let c = &m.courts;
    (c.upper - c.middle).abs() < 0.05 && (c.middle - c.lower).abs() < 0.05
}

fn eyes_wide_set(m: &FaceMetrics) -> bool {
    m.eyes.spacing_ratio > 1.1
}

fn eyes_close_set(m: &FaceMetrics) -> bool {
    m.eyes.spacing_ratio < 0.9
}

fn jaw_strong(m: &FaceMetrics) -> bool {
    m.dimensions.jaw_to_cheek > 0.85
}

fn jaw_narrow(m: &FaceMetrics) -> bool {
    m.dimensions.jaw_to_cheek < 0.75
}

fn lips_full(m: &FaceMetrics) -> bool {
    m.lips.fullness > 0.3
}

fn lips_thin(m: &FaceMetrics) -> bool {
    m.lips.fullness < 0.2
}

fn nose_wide(m: &FaceMetrics) -> bool {
    m.nose.width_ratio > 0.22
}

fn face_short(m: &FaceMetrics) -> bool {
    m.dimensions.width_to_height > 0.8
}

fn face_long(m: &FaceMetrics) -> bool {
    m.dimensions.width_to_height < 0.72
}

/// Tags from archetypes, gender, and keywords found in the style label.
pub fn build_style_tags(
    style_label: &str,
    face_shape: FaceShape,
    eye_type: EyeType,
    gender: Gender,
) -> TagSet {
    let mut tags: TagSet = [face_shape.as_str(), eye_type.as_str(), gender.tag()]
        .into_iter()
        .map(Tag::from)
        .collect();

    for rule in KEYWORD_RULES {
        if rule.keywords.iter().any(|k| style_label.contains(k)) {
            tags.insert(rule.tag.to_owned());
        }
    }

    tags
}

/// Tags from archetypes plus every metric rule that fires.
pub fn build_metric_tags(metrics: &FaceMetrics, face_shape: FaceShape, eye_type: EyeType) -> TagSet {
    let mut tags: TagSet = [face_shape.as_str(), eye_type.as_str()]
        .into_iter()
        .map(Tag::from)
        .collect();

    tags.extend(
        METRIC_RULES
            .iter()
            .filter(|rule| (rule.applies)(metrics))
            .map(|rule| rule.tag.to_owned()),
    );

    tags
}

/// Union of style and metric tags.
pub fn query_tags(style: &TagSet, metric: &TagSet) -> TagSet {
    style.union(metric).cloned().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(tags: &[&str]) -> TagSet {
        tags.iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn style_tags_seed_and_keywords() {
        let tags = build_style_tags("甜美可爱初恋脸", FaceShape::Round, EyeType::Round, Gender::Female);
        assert_eq!(tags, set(&["round", "女生", "甜美", "初恋"]));
    }

    #[test]
    fn multiple_keyword_groups_match_once_each() {
        let tags = build_style_tags(
            "明艳御姐冷艳美人气场全开，美艳动人",
            FaceShape::Diamond,
            EyeType::Up,
            Gender::Female,
        );
        assert!(tags.contains("明艳"));
        assert!(tags.contains("清冷"));
        assert!(tags.contains("气场"));
        assert_eq!(tags.iter().filter(|t| t.as_str() == "明艳").count(), 1);
    }

    #[test]
    fn unrelated_label_adds_only_seeds() {
        let tags = build_style_tags("xyz", FaceShape::Oval, EyeType::Standard, Gender::Male);
        assert_eq!(tags, set(&["oval", "standard", "男生"]));
    }

    #[test]
    fn metric_rules_fire_independently() {
        let mut m = FaceMetrics::default();
        m.courts.upper = 0.31;
        m.courts.middle = 0.38;
        m.courts.lower = 0.31;
        m.eyes.spacing_ratio = 1.2;
        m.dimensions.jaw_to_cheek = 0.9;
        m.dimensions.width_to_height = 0.78;
        m.lips.fullness = 0.25;
        m.nose.width_ratio = 0.25;

        let tags = build_metric_tags(&m, FaceShape::Square, EyeType::Long);
        assert_eq!(
            tags,
            set(&["square", "long", "中庭偏长", "眼距偏宽", "骨感", "鼻翼偏宽"])
        );
    }

    #[test]
    fn no_metric_rule_fires_for_balanced_face() {
        let mut m = FaceMetrics::default();
        m.courts.upper = 0.32;
        m.courts.middle = 0.33;
        m.courts.lower = 0.35;
        m.eyes.spacing_ratio = 1.0;
        m.dimensions.jaw_to_cheek = 0.8;
        m.dimensions.width_to_height = 0.76;
        m.lips.fullness = 0.25;
        m.nose.width_ratio = 0.2;

        let tags = build_metric_tags(&m, FaceShape::Oval, EyeType::Standard);
        assert_eq!(tags, set(&["oval", "standard", "三庭均衡"]));
    }

    #[test]
    fn query_is_deduplicated_union() {
        let a = set(&["round", "女生", "甜美"]);
        let b = set(&["round", "round", "幼态"]);
        assert_eq!(query_tags(&a, &b), set(&["round", "女生", "甜美", "幼态"]));
    }

    #[test]
    fn gender_parses() {
        assert_eq!("Male".parse::<Gender>().unwrap(), Gender::Male);
        assert_eq!("f".parse::<Gender>().unwrap(), Gender::Female);
        assert!("other".parse::<Gender>().is_err());
        assert!(Gender::Male.is_male());
        assert!(!Gender::Female.is_male());
    }
}

//! Narrative readings derived from metrics and archetypes.
//!
//! Per-feature analysis, bone structure, the style outlook, physiognomy and
//! the science note. Every branch is a fixed threshold over [`FaceMetrics`];
//! the only inputs besides metrics are the archetypes, the score, and the
//! display names already picked by [`FlavorText`].

use serde::Serialize;

use crate::archetype::{EyeType, FaceShape};
use crate::flavor::FlavorText;
use crate::geometry::ratio;
use crate::metrics::FaceMetrics;
use crate::style::StyleProfile;
use crate::tags::Gender;

/// Brow arch relative to face width above which the brow reads as raised.
const RAISED_BROW: f32 = 0.05;
const FLAT_BROW: f32 = 0.02;
/// Chin width relative to jaw width above which the chin reads as broad.
const BROAD_CHIN: f32 = 0.4;
/// Scores above this are called near-perfect in the outlook.
const HIGH_SCORE: u8 = 85;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeatureReading {
    pub title: &'static str,
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub desc: &'static str,
    pub pros: Vec<&'static str>,
    pub advice: Vec<&'static str>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeatureReadings {
    pub eyes: FeatureReading,
    pub nose: FeatureReading,
    pub lips: FeatureReading,
    pub eyebrows: FeatureReading,
    pub cheeks: FeatureReading,
    pub chin: FeatureReading,
}

impl FeatureReadings {
    pub fn read(m: &FaceMetrics, eye_name: &'static str) -> Self {
        Self {
            eyes: eyes(m, eye_name),
            nose: nose(m),
            lips: lips(m),
            eyebrows: eyebrows(m),
            cheeks: cheeks(m),
            chin: chin(m),
        }
    }
}

fn eyes(m: &FaceMetrics, eye_name: &'static str) -> FeatureReading {
    let spacing = m.eyes.spacing_ratio;
    FeatureReading {
        title: "眼部",
        kind: eye_name,
        desc: if spacing > 1.1 {
            "眼距较宽，显得天真无邪"
        } else if spacing < 0.9 {
            "眼距较近，眼神聚焦"
        } else {
            "眼距适中，比例完美"
        },
        pros: vec![
            if m.eyes.roundness > 0.4 { "眼型圆润有神" } else { "眼型修长迷人" },
            if m.eyes.tilt < 0.0 { "眼尾上扬，妩媚动人" } else { "眼角微垂，楚楚可怜" },
        ],
        advice: vec![
            if spacing > 1.1 { "眉头适当拉近，平衡眼距" } else { "眼线可适当拉长" },
            "注意眼周保养，预防细纹",
        ],
    }
}

fn nose(m: &FaceMetrics) -> FeatureReading {
    let wide = m.nose.width_ratio > 0.22;
    FeatureReading {
        title: "鼻部",
        kind: if wide { "肉肉鼻" } else { "精致鼻" },
        desc: if m.nose.length_ratio > 0.35 {
            "中庭偏长，显得成熟"
        } else {
            "鼻型小巧精致"
        },
        pros: vec!["鼻梁线条流畅", "鼻翼形态自然"],
        advice: vec![
            if wide { "利用鼻影修饰鼻翼" } else { "保持鼻头光泽" },
            "高光提亮山根",
        ],
    }
}

fn lips(m: &FaceMetrics) -> FeatureReading {
    let full = m.lips.fullness > 0.3;
    FeatureReading {
        title: "唇部",
        kind: if full { "丰满唇" } else { "薄唇" },
        desc: if full { "唇部饱满，性感迷人" } else { "唇形精致，气质清冷" },
        pros: vec!["唇峰明显", "嘴角弧度优美"],
        advice: vec![
            if m.lips.fullness < 0.2 {
                "使用唇蜜增加丰盈感"
            } else {
                "尝试哑光质地口红"
            },
            "定期去角质，保持唇部嫩滑",
        ],
    }
}

fn eyebrows(m: &FaceMetrics) -> FeatureReading {
    let arch = ratio(m.brows.arch, m.dimensions.width);
    FeatureReading {
        title: "眉毛",
        kind: if arch > RAISED_BROW {
            "挑眉"
        } else if arch < FLAT_BROW {
            "平眉"
        } else {
            "标准眉"
        },
        desc: if arch > RAISED_BROW {
            "眉峰高挑，气场强大"
        } else {
            "眉形平缓，温婉动人"
        },
        pros: vec!["眉骨立体", "毛流感强"],
        advice: vec!["定期修剪杂毛", "根据脸型调整眉峰位置"],
    }
}

fn cheeks(m: &FaceMetrics) -> FeatureReading {
    let bony = m.dimensions.jaw_to_cheek > 0.85;
    FeatureReading {
        title: "脸颊",
        kind: if bony { "骨感" } else { "饱满" },
        desc: if bony {
            "面部线条利落，骨骼感强"
        } else {
            "苹果肌饱满，胶原蛋白充足"
        },
        pros: vec!["线条流畅", "饱满年轻"],
        advice: vec!["保持微笑锻炼苹果肌", "修容增强立体感"],
    }
}

fn chin(m: &FaceMetrics) -> FeatureReading {
    let broad = ratio(m.dimensions.chin_width, m.dimensions.jaw_width) > BROAD_CHIN;
    FeatureReading {
        title: "下巴",
        kind: if broad { "方圆下巴" } else { "尖下巴" },
        desc: if broad {
            "下巴线条平缓，稳重有力"
        } else {
            "下巴小巧精致，线条流畅"
        },
        pros: vec!["比例适中", "线条清晰"],
        advice: vec!["保持颈部挺拔", "侧颜线条优美"],
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BoneReading {
    pub shape: &'static str,
    pub features: Vec<&'static str>,
    pub advice: Vec<&'static str>,
}

impl BoneReading {
    pub fn read(m: &FaceMetrics, face_shape: FaceShape, face_name: &'static str) -> Self {
        Self {
            shape: face_name,
            features: vec![
                if m.dimensions.jaw_to_cheek > 0.8 { "下颌有力" } else { "下颌收敛" },
                if m.dimensions.width_to_height > 0.8 {
                    "面部短宽，显幼态"
                } else {
                    "面部修长，显成熟"
                },
            ],
            advice: vec![
                if face_shape == FaceShape::Square {
                    "适合微卷发修饰脸型"
                } else {
                    "适合露出额头展示轮廓"
                },
                "保持体态，提升气质",
            ],
        }
    }
}

/// Where the style fits and what to lean into.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StyleOutlook {
    pub scenes: &'static [&'static str],
    pub advantages: Vec<String>,
    pub directions: Vec<String>,
}

impl StyleOutlook {
    pub fn read(style: &StyleProfile, score: u8, gender: Gender, flavor: &FlavorText) -> Self {
        let scenes: &'static [&'static str] = if gender.is_male() {
            &["商务谈判", "运动健身", "约会"]
        } else {
            &["网红打卡", "浪漫约会", "职场通勤"]
        };
        let proportion = if score > HIGH_SCORE { "堪称完美" } else { "协调舒适" };
        let temperament: String = style.desc.chars().take(4).collect();

        Self {
            scenes,
            advantages: vec![
                format!("五官比例{proportion}"),
                format!("{}极具辨识度", flavor.face_shape_name),
                format!("气质{temperament}"),
            ],
            directions: vec![
                format!("尝试{}风格穿搭", style.sub),
                format!("妆容重点突出{}", flavor.eye_type_name),
            ],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Reading {
    pub title: &'static str,
    pub desc: &'static str,
}

/// What a physiognomy rule looks at.
struct Subject<'a> {
    metrics: &'a FaceMetrics,
    face_shape: FaceShape,
    eye_type: EyeType,
}

/// First matching rule in each table wins; each table ends in a catch-all.
struct ReadingRule {
    reading: Reading,
    applies: fn(&Subject<'_>) -> bool,
}

const fn rule(title: &'static str, desc: &'static str, applies: fn(&Subject<'_>) -> bool) -> ReadingRule {
    ReadingRule {
        reading: Reading { title, desc },
        applies,
    }
}

const COURT_READINGS: &[ReadingRule] = &[
    rule("三停平等", "一生运势平稳，衣食无忧，晚年幸福。", courts_even),
    rule("天庭饱满", "早年运势极佳，思维敏捷，不仅聪慧且有贵人相助。", upper_court_full),
    rule("中停主事", "中年事业运强，意志坚定，做事有魄力。", middle_court_long),
    rule("下停丰隆", "晚景优渥，性格沉稳，家庭观念强。", always),
];

const EYE_READINGS: &[ReadingRule] = &[
    rule("凤眼/长眼", "主贵，具有领导才能，心思缜密。", long_eyes),
    rule("圆眼", "主情，性格开朗天真，人缘极佳。", round_eyes),
    rule("多情眼", "桃花运旺盛，情感丰富，艺术天分高。", always),
];

const NOSE_READINGS: &[ReadingRule] = &[
    rule("财帛宫丰隆", "鼻头有肉，财运亨通，善于理财。", fleshy_nose),
    rule("伏犀鼻", "大贵之相，才华横溢，易在专业领域取得成就。", long_nose),
    rule("秀气鼻", "做事细心，温文尔雅。", always),
];

const JAW_READINGS: &[ReadingRule] = &[
    rule("地阁方圆", "意志力强，能吃苦耐劳，统御力强。", jaw_broad),
    rule("圆润福相", "性格温和，乐善好施，福气深厚。", round_face),
    rule("尖下巴", "灵动聪慧，富有艺术气息，但需注意晚年积蓄。", always),
];

fn courts_even(s: &Subject<'_>) -> bool {
    let c = &s.metrics.courts;
    (c.upper - c.middle).abs() < 0.05 && (c.middle - c.lower).abs() < 0.05
}

fn upper_court_full(s: &Subject<'_>) -> bool {
    s.metrics.courts.upper > 0.36
}

fn middle_court_long(s: &Subject<'_>) -> bool {
    s.metrics.courts.middle > 0.36
}

fn long_eyes(s: &Subject<'_>) -> bool {
    s.eye_type == EyeType::Long
}

fn round_eyes(s: &Subject<'_>) -> bool {
    s.eye_type == EyeType::Round
}

fn fleshy_nose(s: &Subject<'_>) -> bool {
    s.metrics.nose.width_ratio > 0.22
}

fn long_nose(s: &Subject<'_>) -> bool {
    s.metrics.nose.length_ratio > 0.35
}

fn round_face(s: &Subject<'_>) -> bool {
    s.face_shape == FaceShape::Round
}

fn jaw_broad(s: &Subject<'_>) -> bool {
    let d = &s.metrics.dimensions;
    matches!(s.face_shape, FaceShape::Square | FaceShape::Oblong) || d.jaw_width > d.width * 0.8
}

fn always(_: &Subject<'_>) -> bool {
    true
}

fn first_match(table: &[ReadingRule], subject: &Subject<'_>) -> Option<Reading> {
    table
        .iter()
        .find(|rule| (rule.applies)(subject))
        .map(|rule| rule.reading)
}

/// One reading each for the courts, eyes, nose and jaw.
pub fn physiognomy(metrics: &FaceMetrics, face_shape: FaceShape, eye_type: EyeType) -> Vec<Reading> {
    let subject = Subject {
        metrics,
        face_shape,
        eye_type,
    };
    [COURT_READINGS, EYE_READINGS, NOSE_READINGS, JAW_READINGS]
        .iter()
        .filter_map(|table| first_match(table, &subject))
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScienceNote {
    pub intro: &'static str,
    pub analysis: String,
    pub conclusion: &'static str,
}

impl ScienceNote {
    pub fn read(m: &FaceMetrics, face_shape: FaceShape) -> Self {
        let courts = if (m.courts.middle - m.courts.lower).abs() < 0.05 {
            "AI 测算显示您的三庭比例趋于均等（黄金比例 1:1:1），这在面相学中对应“三停平等，一生衣食无忧”的福相。".to_owned()
        } else if m.courts.middle > 0.35 {
            format!(
                "数字化扫描发现您的中庭占比（{:.1}%）略高于平均值，面相学认为这代表中年运势强劲，意志力坚定。",
                m.courts.middle * 100.0
            )
        } else {
            "数据表明您的下庭骨骼发育良好，在传统相学中象征着晚年运势稳健，性格沉稳。".to_owned()
        };

        let outline = match face_shape {
            FaceShape::Square | FaceShape::Oblong => {
                "下颌角的 12 个关键点坐标构建出清晰的轮廓线，这种“地阁方圆”的骨相数据，往往对应着极强的统御力与行动力。"
            }
            FaceShape::Round | FaceShape::Oval => {
                "面部轮廓的 20 余个边缘点构成了柔和的曲线，这种流畅的“圆润”数据模型，在相学中被解读为亲和力强、贵人运旺盛。"
            }
            _ => "面部中轴线上的关键点分布匀称，这种精致的几何结构，正是“清秀”之相的数字化表达，预示着聪慧与艺术天赋。",
        };

        Self {
            intro: "AI 算法已精准定位您面部的 68 个关键特征点，将传统面相学中的“十二宫”进行了数字化映射。",
            analysis: format!("{courts} {outline}"),
            conclusion: "这份“数字化面相”显示，您的面部几何特征不仅符合现代美学标准，更蕴含着独特的性格密码与运势潜力。",
        }
    }
}

/// Every narrative section of a report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Insight {
    pub features: FeatureReadings,
    pub bone: BoneReading,
    pub outlook: StyleOutlook,
    pub physiognomy: Vec<Reading>,
    pub science: ScienceNote,
}

impl Insight {
    pub fn compose(
        metrics: &FaceMetrics,
        face_shape: FaceShape,
        eye_type: EyeType,
        style: &StyleProfile,
        score: u8,
        gender: Gender,
        flavor: &FlavorText,
    ) -> Self {
        Self {
            features: FeatureReadings::read(metrics, flavor.eye_type_name),
            bone: BoneReading::read(metrics, face_shape, flavor.face_shape_name),
            outlook: StyleOutlook::read(style, score, gender, flavor),
            physiognomy: physiognomy(metrics, face_shape, eye_type),
            science: ScienceNote::read(metrics, face_shape),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::derive_style;

    fn titles(readings: &[Reading]) -> Vec<&'static str> {
        readings.iter().map(|r| r.title).collect()
    }

    fn flavor() -> FlavorText {
        FlavorText {
            face_shape_name: "鹅蛋脸",
            eye_type_name: "柳叶眼",
            greeting: String::new(),
            summary: String::new(),
            daily_tip: "",
        }
    }

    fn courts(m: &mut FaceMetrics, upper: f32, middle: f32, lower: f32) {
        m.courts.upper = upper;
        m.courts.middle = middle;
        m.courts.lower = lower;
    }

    #[test]
    fn eye_spacing_branches() {
        let mut m = FaceMetrics::default();
        m.eyes.spacing_ratio = 1.2;
        let r = eyes(&m, "杏眼");
        assert_eq!(r.kind, "杏眼");
        assert_eq!(r.desc, "眼距较宽，显得天真无邪");
        assert_eq!(r.advice[0], "眉头适当拉近，平衡眼距");

        m.eyes.spacing_ratio = 0.8;
        assert_eq!(eyes(&m, "杏眼").desc, "眼距较近，眼神聚焦");
        m.eyes.spacing_ratio = 1.0;
        let r = eyes(&m, "杏眼");
        assert_eq!(r.desc, "眼距适中，比例完美");
        assert_eq!(r.advice[0], "眼线可适当拉长");
    }

    #[test]
    fn eye_pros_follow_roundness_and_tilt() {
        let mut m = FaceMetrics::default();
        m.eyes.roundness = 0.5;
        m.eyes.tilt = -2.0;
        assert_eq!(eyes(&m, "").pros, ["眼型圆润有神", "眼尾上扬，妩媚动人"]);

        m.eyes.roundness = 0.3;
        m.eyes.tilt = 1.0;
        assert_eq!(eyes(&m, "").pros, ["眼型修长迷人", "眼角微垂，楚楚可怜"]);
    }

    #[test]
    fn nose_branches() {
        let mut m = FaceMetrics::default();
        m.nose.width_ratio = 0.25;
        m.nose.length_ratio = 0.4;
        let r = nose(&m);
        assert_eq!((r.kind, r.desc), ("肉肉鼻", "中庭偏长，显得成熟"));
        assert_eq!(r.advice[0], "利用鼻影修饰鼻翼");

        m.nose.width_ratio = 0.2;
        m.nose.length_ratio = 0.3;
        let r = nose(&m);
        assert_eq!((r.kind, r.desc), ("精致鼻", "鼻型小巧精致"));
        assert_eq!(r.advice[0], "保持鼻头光泽");
    }

    #[test]
    fn lip_branches() {
        let mut m = FaceMetrics::default();
        m.lips.fullness = 0.7;
        let r = lips(&m);
        assert_eq!((r.kind, r.advice[0]), ("丰满唇", "尝试哑光质地口红"));

        m.lips.fullness = 0.25;
        let r = lips(&m);
        assert_eq!((r.kind, r.advice[0]), ("薄唇", "尝试哑光质地口红"));

        m.lips.fullness = 0.1;
        let r = lips(&m);
        assert_eq!((r.kind, r.advice[0]), ("薄唇", "使用唇蜜增加丰盈感"));
    }

    #[test]
    fn brow_arch_is_relative_to_face_width() {
        let mut m = FaceMetrics::default();
        m.dimensions.width = 200.0;
        m.brows.arch = 12.0;
        assert_eq!(eyebrows(&m).kind, "挑眉");
        assert_eq!(eyebrows(&m).desc, "眉峰高挑，气场强大");
        m.brows.arch = 6.0;
        assert_eq!(eyebrows(&m).kind, "标准眉");
        assert_eq!(eyebrows(&m).desc, "眉形平缓，温婉动人");
        m.brows.arch = 2.0;
        assert_eq!(eyebrows(&m).kind, "平眉");

        // zero width reads as flat rather than dividing by zero
        m.dimensions.width = 0.0;
        assert_eq!(eyebrows(&m).kind, "平眉");
    }

    #[test]
    fn cheek_and_chin_branches() {
        let mut m = FaceMetrics::default();
        m.dimensions.jaw_to_cheek = 0.9;
        m.dimensions.jaw_width = 120.0;
        m.dimensions.chin_width = 60.0;
        assert_eq!(cheeks(&m).kind, "骨感");
        assert_eq!(chin(&m).kind, "方圆下巴");

        m.dimensions.jaw_to_cheek = 0.7;
        m.dimensions.chin_width = 40.0;
        assert_eq!(cheeks(&m).kind, "饱满");
        assert_eq!(chin(&m).kind, "尖下巴");
    }

    #[test]
    fn bone_reading() {
        let mut m = FaceMetrics::default();
        m.dimensions.jaw_to_cheek = 0.85;
        m.dimensions.width_to_height = 0.9;
        let b = BoneReading::read(&m, FaceShape::Square, "国字脸");
        assert_eq!(b.shape, "国字脸");
        assert_eq!(b.features, ["下颌有力", "面部短宽，显幼态"]);
        assert_eq!(b.advice[0], "适合微卷发修饰脸型");

        m.dimensions.jaw_to_cheek = 0.7;
        m.dimensions.width_to_height = 0.7;
        let b = BoneReading::read(&m, FaceShape::Long, "长脸");
        assert_eq!(b.features, ["下颌收敛", "面部修长，显成熟"]);
        assert_eq!(b.advice[0], "适合露出额头展示轮廓");
    }

    #[test]
    fn outlook_uses_style_and_names() {
        let style = derive_style(FaceShape::Oval, EyeType::Long, 0.3, Gender::Female);
        let o = StyleOutlook::read(&style, 90, Gender::Female, &flavor());
        assert_eq!(o.scenes, ["网红打卡", "浪漫约会", "职场通勤"]);
        assert_eq!(o.advantages, ["五官比例堪称完美", "鹅蛋脸极具辨识度", "气质耐看型美"]);
        assert_eq!(o.directions, ["尝试大家闺秀风格穿搭", "妆容重点突出柳叶眼"]);

        let style = derive_style(FaceShape::Square, EyeType::Long, 0.3, Gender::Male);
        let o = StyleOutlook::read(&style, 80, Gender::Male, &flavor());
        assert_eq!(o.scenes, ["商务谈判", "运动健身", "约会"]);
        assert_eq!(o.advantages[0], "五官比例协调舒适");
        assert_eq!(o.advantages[2], "气质荷尔蒙爆");
    }

    #[test]
    fn court_readings_take_first_match() {
        let mut m = FaceMetrics::default();
        courts(&mut m, 0.33, 0.34, 0.33);
        assert_eq!(physiognomy(&m, FaceShape::Oval, EyeType::Standard)[0].title, "三停平等");
        courts(&mut m, 0.40, 0.30, 0.30);
        assert_eq!(physiognomy(&m, FaceShape::Oval, EyeType::Standard)[0].title, "天庭饱满");
        courts(&mut m, 0.30, 0.40, 0.30);
        assert_eq!(physiognomy(&m, FaceShape::Oval, EyeType::Standard)[0].title, "中停主事");
        courts(&mut m, 0.30, 0.30, 0.40);
        assert_eq!(physiognomy(&m, FaceShape::Oval, EyeType::Standard)[0].title, "下停丰隆");
    }

    #[test]
    fn eye_nose_and_jaw_readings() {
        let mut m = FaceMetrics::default();
        m.dimensions.width = 200.0;
        m.dimensions.jaw_width = 120.0;
        m.nose.width_ratio = 0.25;
        assert_eq!(
            titles(&physiognomy(&m, FaceShape::Square, EyeType::Long)),
            ["三停平等", "凤眼/长眼", "财帛宫丰隆", "地阁方圆"]
        );

        m.nose.width_ratio = 0.2;
        m.nose.length_ratio = 0.4;
        assert_eq!(
            titles(&physiognomy(&m, FaceShape::Round, EyeType::Round))[1..],
            ["圆眼", "伏犀鼻", "圆润福相"]
        );

        m.nose.length_ratio = 0.3;
        assert_eq!(
            titles(&physiognomy(&m, FaceShape::Heart, EyeType::Up))[1..],
            ["多情眼", "秀气鼻", "尖下巴"]
        );

        // a jaw wider than 80% of the face reads broad whatever the shape
        m.dimensions.jaw_width = 170.0;
        assert_eq!(physiognomy(&m, FaceShape::Heart, EyeType::Up)[3].title, "地阁方圆");
    }

    #[test]
    fn science_note_branches() {
        let mut m = FaceMetrics::default();
        courts(&mut m, 0.33, 0.33, 0.34);
        let note = ScienceNote::read(&m, FaceShape::Square);
        assert!(note.analysis.contains("1:1:1"));
        assert!(note.analysis.contains("地阁方圆"));

        courts(&mut m, 0.25, 0.40, 0.25);
        let note = ScienceNote::read(&m, FaceShape::Oval);
        assert!(note.analysis.contains("40.0%"), "{}", note.analysis);
        assert!(note.analysis.contains("圆润"));

        courts(&mut m, 0.34, 0.26, 0.40);
        let note = ScienceNote::read(&m, FaceShape::Heart);
        assert!(note.analysis.starts_with("数据表明"));
        assert!(note.analysis.contains("清秀"));
    }

    #[test]
    fn compose_fills_every_section() {
        let mut m = FaceMetrics::default();
        courts(&mut m, 0.33, 0.33, 0.34);
        let style = derive_style(FaceShape::Oval, EyeType::Long, 0.3, Gender::Female);
        let insight = Insight::compose(&m, FaceShape::Oval, EyeType::Long, &style, 88, Gender::Female, &flavor());

        assert_eq!(insight.features.eyes.kind, "柳叶眼");
        assert_eq!(insight.bone.shape, "鹅蛋脸");
        assert_eq!(insight.physiognomy.len(), 4);
        assert!(!insight.science.analysis.is_empty());

        let json = serde_json::to_value(&insight).unwrap();
        assert_eq!(json["features"]["nose"]["type"], "精致鼻");
    }
}

//! Randomized display text.
//!
//! Nothing here feeds back into metrics, classification, scoring, or ranking.
//! All randomness comes from the caller's [`Rng`], so a seeded generator
//! reproduces the same text.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::Serialize;

use crate::archetype::{EyeType, FaceShape};
use crate::metrics::FaceMetrics;
use crate::style::StyleProfile;
use crate::tags::Gender;

fn face_synonyms(shape: FaceShape) -> &'static [&'static str] {
    match shape {
        FaceShape::Oval => &["鹅蛋脸", "椭圆脸", "标准脸"],
        FaceShape::Round => &["圆脸", "娃娃脸", "苹果脸"],
        FaceShape::Square => &["方脸", "国字脸", "轮廓分明"],
        FaceShape::Long => &["长脸", "瘦长脸", "马脸"],
        FaceShape::Heart => &["心形脸", "倒三角", "瓜子脸"],
        FaceShape::Diamond => &["菱形脸", "钻石脸", "高级脸"],
        FaceShape::Oblong => &["长方脸", "矩形脸", "坚毅脸"],
    }
}

fn eye_synonyms(eye: EyeType) -> &'static [&'static str] {
    match eye {
        EyeType::Standard => &["标准眼"],
        EyeType::Round => &["杏眼", "圆眼", "小鹿眼"],
        EyeType::Long => &["柳叶眼", "长眼", "细长眼"],
        EyeType::Up => &["丹凤眼", "狐狸眼", "猫眼"],
        EyeType::Down => &["下垂眼", "狗狗眼", "无辜眼"],
    }
}

const GREETING_ADJECTIVES: &[&str] = &["独一无二的", "气质非凡的", "充满魅力的", "令人印象深刻的"];

const MALE_TIPS: &[&str] = &[
    "自信的眼神是你最好的名片。",
    "保持整洁的仪容，运气自然会来。",
    "挺直腰背，气场瞬间提升 20%。",
    "今天的你，比昨天更帅气。",
    "微笑是拉近距离的最强武器。",
];

const FEMALE_TIPS: &[&str] = &[
    "你本来就很美，无需刻意迎合。",
    "自信的女人最美丽，今天也要闪闪发光。",
    "你的笑容价值千金，请多展示它。",
    "接纳自己的不完美，那是你独特的标志。",
    "美没有标准答案，你就是答案。",
];

pub fn face_shape_name<R: Rng + ?Sized>(shape: FaceShape, rng: &mut R) -> &'static str {
    face_synonyms(shape)
        .choose(rng)
        .copied()
        .unwrap_or_else(|| shape.as_str())
}

pub fn eye_type_name<R: Rng + ?Sized>(eye: EyeType, rng: &mut R) -> &'static str {
    eye_synonyms(eye).choose(rng).copied().unwrap_or_else(|| eye.as_str())
}

/// Salutation for an hour of day in `0..24`.
pub fn salutation(hour: u32) -> &'static str {
    match hour {
        0..=10 => "早安",
        11..=12 => "午安",
        13..=17 => "下午好",
        _ => "晚上好",
    }
}

pub fn greeting<R: Rng + ?Sized>(hour: u32, style: &StyleProfile, rng: &mut R) -> String {
    let adjective = GREETING_ADJECTIVES.choose(rng).copied().unwrap_or_default();
    format!(
        "{}，{}{}！已为您完成深度面部解析。",
        salutation(hour),
        adjective,
        style.main
    )
}

/// One of three summary sentences, filled from metrics and the display names.
pub fn summary<R: Rng + ?Sized>(
    metrics: &FaceMetrics,
    face_name: &str,
    eye_name: &str,
    gender: Gender,
    rng: &mut R,
) -> String {
    let male = gender.is_male();
    match rng.gen_range(0..3) {
        0 => format!(
            "您的面部轮廓{}，搭配{}，{}。",
            if metrics.dimensions.jaw_to_cheek > 0.85 { "清晰硬朗" } else { "柔和流畅" },
            eye_name,
            if male { "尽显阳刚之气" } else { "散发独特魅力" },
        ),
        1 => format!(
            "五官比例{}，{}为您增添了几分{}。",
            if (metrics.courts.middle - metrics.courts.lower).abs() < 0.05 {
                "非常协调"
            } else {
                "极具个人特色"
            },
            face_name,
            if male { "成熟稳重" } else { "温婉气质" },
        ),
        _ => format!(
            "整体气质{}，{}是您的最大特色，让人过目难忘。",
            if metrics.eyes.roundness > 0.4 { "灵动活泼" } else { "高冷优雅" },
            face_name,
        ),
    }
}

pub fn daily_tip<R: Rng + ?Sized>(gender: Gender, rng: &mut R) -> &'static str {
    let tips = match gender {
        Gender::Male => MALE_TIPS,
        Gender::Female => FEMALE_TIPS,
    };
    tips.choose(rng).copied().unwrap_or_default()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FlavorText {
    pub face_shape_name: &'static str,
    pub eye_type_name: &'static str,
    pub greeting: String,
    pub summary: String,
    pub daily_tip: &'static str,
}

impl FlavorText {
    pub fn generate<R: Rng + ?Sized>(
        metrics: &FaceMetrics,
        face_shape: FaceShape,
        eye_type: EyeType,
        style: &StyleProfile,
        gender: Gender,
        hour: u32,
        rng: &mut R,
    ) -> Self {
        let face_shape_name = face_shape_name(face_shape, rng);
        let eye_type_name = eye_type_name(eye_type, rng);
        Self {
            face_shape_name,
            eye_type_name,
            greeting: greeting(hour, style, rng),
            summary: summary(metrics, face_shape_name, eye_type_name, gender, rng),
            daily_tip: daily_tip(gender, rng),
        }
    }
}

//! Style positioning: a short label describing the overall look.

use serde::Serialize;

use crate::archetype::{EyeType, FaceShape};
use crate::tags::Gender;

/// Eyes rounder than this read as youthful on male faces.
const BOYISH_ROUNDNESS: f32 = 0.45;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StyleProfile {
    pub main: &'static str,
    pub sub: &'static str,
    pub desc: &'static str,
}

impl StyleProfile {
    const fn new(main: &'static str, sub: &'static str, desc: &'static str) -> Self {
        Self { main, sub, desc }
    }

    /// Free text scanned by the style keyword rules.
    pub fn label(&self) -> String {
        format!("{}{}{}", self.main, self.sub, self.desc)
    }
}

pub fn derive_style(
    face_shape: FaceShape,
    eye_type: EyeType,
    eye_roundness: f32,
    gender: Gender,
) -> StyleProfile {
    use FaceShape::*;

    match gender {
        Gender::Male => match face_shape {
            Round => StyleProfile::new("阳光暖男", "少年感", "亲和力强，笑容温暖"),
            _ if eye_roundness > BOYISH_ROUNDNESS => {
                StyleProfile::new("阳光暖男", "少年感", "亲和力强，笑容温暖")
            }
            Square | Long | Oblong => StyleProfile::new("型男硬汉", "成熟稳重", "荷尔蒙爆棚，气场强大"),
            Oval | Heart => StyleProfile::new("清爽校草", "斯文败类", "干净利落，气质出众"),
            Diamond => StyleProfile::new("日系雅痞", "文艺青年", "个性鲜明，独特审美"),
        },
        Gender::Female => match face_shape {
            Round => StyleProfile::new("甜美可爱", "初恋脸", "元气满满，毫无攻击性"),
            Square | Oblong => StyleProfile::new("高级超模", "大气端庄", "骨相优越，可塑性强"),
            _ if eye_type == EyeType::Up || face_shape == Diamond => {
                StyleProfile::new("明艳御姐", "冷艳美人", "气场全开，明艳动人")
            }
            Oval => StyleProfile::new("古典温婉", "大家闺秀", "耐看型美女，气质如兰"),
            _ => StyleProfile::new("纯欲风格", "氛围感", "又纯又欲，撩人心弦"),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn male_styles() {
        let s = derive_style(FaceShape::Oval, EyeType::Standard, 0.5, Gender::Male);
        assert_eq!(s.main, "阳光暖男");
        let s = derive_style(FaceShape::Square, EyeType::Standard, 0.3, Gender::Male);
        assert_eq!(s.main, "型男硬汉");
        let s = derive_style(FaceShape::Heart, EyeType::Up, 0.3, Gender::Male);
        assert_eq!(s.main, "清爽校草");
        let s = derive_style(FaceShape::Diamond, EyeType::Up, 0.3, Gender::Male);
        assert_eq!(s.main, "日系雅痞");
    }

    #[test]
    fn female_styles() {
        let s = derive_style(FaceShape::Round, EyeType::Up, 0.3, Gender::Female);
        assert_eq!(s.main, "甜美可爱");
        let s = derive_style(FaceShape::Oblong, EyeType::Up, 0.3, Gender::Female);
        assert_eq!(s.main, "高级超模");
        let s = derive_style(FaceShape::Oval, EyeType::Up, 0.3, Gender::Female);
        assert_eq!(s.main, "明艳御姐");
        let s = derive_style(FaceShape::Oval, EyeType::Down, 0.3, Gender::Female);
        assert_eq!(s.main, "古典温婉");
        let s = derive_style(FaceShape::Heart, EyeType::Round, 0.3, Gender::Female);
        assert_eq!(s.main, "纯欲风格");
    }

    #[test]
    fn label_concatenates_parts() {
        let s = derive_style(FaceShape::Round, EyeType::Round, 0.5, Gender::Female);
        assert_eq!(s.label(), "甜美可爱初恋脸元气满满，毫无攻击性");
    }
}

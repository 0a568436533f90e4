//! Preset content catalogs.
//!
//! Catalogs are static, read-only tables of authored items, each annotated
//! with tags and a gender scope. They are loaded once (from JSON, or the
//! built-in copy) and then only borrowed.

use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

use crate::error::{Error, Result};
use crate::tags::{Gender, TagSet};

const BUILTIN_CATALOG: &str = include_str!("../data/catalog.json");

/// Which requesters an item is meant for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GenderScope {
    Male,
    Female,
    #[default]
    All,
}

impl GenderScope {
    pub fn admits(&self, gender: Gender) -> bool {
        match self {
            Self::All => true,
            Self::Male => gender == Gender::Male,
            Self::Female => gender == Gender::Female,
        }
    }
}

/// One catalog entry. `P` is the catalog-specific payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PresetItem<P> {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub gender: GenderScope,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub category: String,
    #[serde(default)]
    pub tags: TagSet,
    pub payload: P,
}

impl<P> PresetItem<P> {
    /// Stable identity used for tie-breaking: the id, else the name.
    pub fn identity(&self) -> &str {
        self.id
            .as_deref()
            .or(self.name.as_deref())
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Outfit {
    pub title: String,
    pub desc: String,
    #[serde(default)]
    pub items: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Celebrity {
    pub desc: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Palette {
    pub suitable: Vec<String>,
    #[serde(default)]
    pub avoid: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Aesthetic {
    pub region: String,
    pub desc: String,
    #[serde(default)]
    pub pros: Vec<String>,
}

/// Always-included advice lines, per gender.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GenderedList {
    pub male: Vec<String>,
    pub female: Vec<String>,
}

impl GenderedList {
    pub fn for_gender(&self, gender: Gender) -> &[String] {
        match gender {
            Gender::Male => &self.male,
            Gender::Female => &self.female,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Baselines {
    pub skincare: GenderedList,
    pub makeup: GenderedList,
    pub styling: GenderedList,
}

/// All content catalogs.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Catalog {
    pub version: u32,
    /// Makeup steps; `category` is one of base/brows/eyes/lips/contour/highlight
    pub makeup: Vec<PresetItem<String>>,
    /// Outfit advice; `category` is the scene
    pub outfits: Vec<PresetItem<Outfit>>,
    pub celebrities: Vec<PresetItem<Celebrity>>,
    pub hairstyles: Vec<PresetItem<String>>,
    pub palettes: Vec<PresetItem<Palette>>,
    pub skincare_tips: Vec<PresetItem<String>>,
    pub makeup_tips: Vec<PresetItem<String>>,
    pub styling_tips: Vec<PresetItem<String>>,
    pub international: Vec<PresetItem<Aesthetic>>,
    pub baselines: Baselines,
}

impl Catalog {
    /// The catalog compiled into the crate.
    pub fn builtin() -> Result<Self> {
        Self::from_json(BUILTIN_CATALOG)
    }

    pub fn from_json(text: &str) -> Result<Self> {
        let catalog: Self = serde_json::from_str(text)?;
        catalog.validate()?;
        debug!(
            version = catalog.version,
            items = catalog.len(),
            "catalog loaded"
        );
        Ok(catalog)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    /// Total item count across all catalogs.
    pub fn len(&self) -> usize {
        self.makeup.len()
            + self.outfits.len()
            + self.celebrities.len()
            + self.hairstyles.len()
            + self.palettes.len()
            + self.skincare_tips.len()
            + self.makeup_tips.len()
            + self.styling_tips.len()
            + self.international.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Every item needs an identity for deterministic tie-breaking.
    fn validate(&self) -> Result<()> {
        check_identities("makeup", &self.makeup)?;
        check_identities("outfits", &self.outfits)?;
        check_identities("celebrities", &self.celebrities)?;
        check_identities("hairstyles", &self.hairstyles)?;
        check_identities("palettes", &self.palettes)?;
        check_identities("skincareTips", &self.skincare_tips)?;
        check_identities("makeupTips", &self.makeup_tips)?;
        check_identities("stylingTips", &self.styling_tips)?;
        check_identities("international", &self.international)?;
        Ok(())
    }
}

fn check_identities<P>(catalog: &str, items: &[PresetItem<P>]) -> Result<()> {
    match items.iter().position(|item| item.identity().is_empty()) {
        Some(index) => Err(Error::InvalidCatalog(format!(
            "{catalog}[{index}] has neither id nor name"
        ))),
        None => Ok(()),
    }
}

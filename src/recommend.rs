//! Tag-based ranking over the preset catalogs.
//!
//! [`select_top_by_tags`] is the single ranking primitive: items are ordered
//! by how many query tags they carry, ties broken by ascending identity. The
//! [`Recommender`] wrappers apply it per catalog, partitioning by gender scope
//! and category first. No wrapper fails; an empty partition is either omitted
//! or replaced by an unranked slice of the gender-filtered catalog.

use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use tracing::debug;

use crate::catalog::{Aesthetic, Catalog, Celebrity, Outfit, Palette, PresetItem};
use crate::config::AnalyzerConfig;
use crate::tags::{Gender, TagSet};

/// Anything rankable by tags.
pub trait Tagged {
    fn tags(&self) -> &TagSet;
    /// Tie-break key; must be stable across runs.
    fn identity(&self) -> &str;
}

impl<P> Tagged for PresetItem<P> {
    fn tags(&self) -> &TagSet {
        &self.tags
    }

    fn identity(&self) -> &str {
        PresetItem::identity(self)
    }
}

/// Number of query tags the preset carries.
pub fn tag_score(preset: &TagSet, query: &TagSet) -> usize {
    preset.intersection(query).count()
}

/// An item with its tag score.
#[derive(Debug)]
pub struct Ranked<'a, T> {
    pub item: &'a T,
    pub score: usize,
}

/// All items, best first. Equal scores are ordered by ascending identity.
pub fn rank_by_tags<'a, T, I>(items: I, query: &TagSet) -> Vec<Ranked<'a, T>>
where
    T: Tagged + 'a,
    I: IntoIterator<Item = &'a T>,
{
    let mut ranked: Vec<Ranked<'a, T>> = items
        .into_iter()
        .map(|item| Ranked {
            item,
            score: tag_score(item.tags(), query),
        })
        .collect();

    ranked.sort_by(|a, b| {
        b.score
            .cmp(&a.score)
            .then_with(|| a.item.identity().cmp(b.item.identity()))
    });
    ranked
}

/// The first `limit` items of [`rank_by_tags`].
pub fn select_top_by_tags<'a, T, I>(items: I, query: &TagSet, limit: usize) -> Vec<&'a T>
where
    T: Tagged + 'a,
    I: IntoIterator<Item = &'a T>,
{
    rank_by_tags(items, query)
        .into_iter()
        .take(limit)
        .map(|ranked| ranked.item)
        .collect()
}

fn for_gender<'c, P: 'c>(
    items: &'c [PresetItem<P>],
    gender: Gender,
) -> impl Iterator<Item = &'c PresetItem<P>> + 'c {
    items.iter().filter(move |item| item.gender.admits(gender))
}

/// Makeup guide sections, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MakeupCategory {
    Base,
    Brows,
    Eyes,
    Lips,
    Contour,
    Highlight,
}

impl MakeupCategory {
    pub const ALL: [MakeupCategory; 6] = [
        MakeupCategory::Base,
        MakeupCategory::Brows,
        MakeupCategory::Eyes,
        MakeupCategory::Lips,
        MakeupCategory::Contour,
        MakeupCategory::Highlight,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Base => "base",
            Self::Brows => "brows",
            Self::Eyes => "eyes",
            Self::Lips => "lips",
            Self::Contour => "contour",
            Self::Highlight => "highlight",
        }
    }
}

impl fmt::Display for MakeupCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outfit scenes walked in order, per gender.
pub fn scenes_for(gender: Gender) -> &'static [&'static str] {
    match gender {
        Gender::Male => &["work", "social", "casual"],
        Gender::Female => &["work", "party", "date"],
    }
}

/// Tags that may be shown to the user as a look-alike rationale.
pub const PRESENTABLE_TAGS: &[&str] = &[
    "甜美", "初恋", "明艳", "气场", "清冷", "温婉", "氛围感", "阳光", "少年感", "硬朗", "成熟",
    "清爽", "斯文", "文艺", "骨感", "幼态", "修长", "丰唇", "薄唇", "下颌收窄", "三庭均衡",
];

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CelebrityMatch<'a> {
    pub name: &'a str,
    pub desc: &'a str,
    pub score: usize,
    pub matched_tags: Vec<&'a str>,
    pub reason: String,
}

/// Every selection for one request.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendations<'a> {
    pub makeup_guide: BTreeMap<MakeupCategory, &'a PresetItem<String>>,
    pub occasions: Vec<&'a PresetItem<Outfit>>,
    pub skincare: Vec<&'a str>,
    pub makeup_tips: Vec<&'a str>,
    pub styling: Vec<&'a str>,
    pub celebrities: Vec<CelebrityMatch<'a>>,
    pub hairstyles: Vec<&'a PresetItem<String>>,
    pub palette: Option<&'a PresetItem<Palette>>,
    pub international: Vec<&'a PresetItem<Aesthetic>>,
}

/// Catalog-aware wrappers around [`select_top_by_tags`].
#[derive(Debug, Clone, Copy)]
pub struct Recommender<'a> {
    catalog: &'a Catalog,
    config: &'a AnalyzerConfig,
}

impl<'a> Recommender<'a> {
    pub fn new(catalog: &'a Catalog, config: &'a AnalyzerConfig) -> Self {
        Self { catalog, config }
    }

    pub fn recommend(&self, query: &TagSet, gender: Gender) -> Recommendations<'a> {
        Recommendations {
            makeup_guide: self.makeup_guide(query, gender),
            occasions: self.occasion_advice(query, gender),
            skincare: self.skincare_advice(query, gender),
            makeup_tips: self.makeup_tips(query, gender),
            styling: self.styling_advice(query, gender),
            celebrities: self.celebrity_matches(query, gender),
            hairstyles: self.hairstyles(query, gender),
            palette: self.palette(query, gender),
            international: self.international(query, gender),
        }
    }

    /// Best step per makeup category. Categories with no eligible item are absent.
    pub fn makeup_guide(
        &self,
        query: &TagSet,
        gender: Gender,
    ) -> BTreeMap<MakeupCategory, &'a PresetItem<String>> {
        let mut guide = BTreeMap::new();
        for category in MakeupCategory::ALL {
            let partition = for_gender(&self.catalog.makeup, gender)
                .filter(|item| item.category == category.as_str());
            match select_top_by_tags(partition, query, 1).first() {
                Some(best) => {
                    debug!(%category, pick = best.identity(), "makeup step selected");
                    guide.insert(category, *best);
                }
                None => debug!(%category, "no makeup step for category"),
            }
        }
        guide
    }

    /// One outfit per scene, padded from the whole gender-filtered catalog.
    pub fn occasion_advice(&self, query: &TagSet, gender: Gender) -> Vec<&'a PresetItem<Outfit>> {
        let outfits: &'a [PresetItem<Outfit>] = &self.catalog.outfits;
        let wanted = self.config.occasion_count;

        let mut picks: Vec<&'a PresetItem<Outfit>> = Vec::with_capacity(wanted);
        for scene in scenes_for(gender) {
            let partition = for_gender(outfits, gender).filter(|item| item.category == *scene);
            if let Some(best) = select_top_by_tags(partition, query, 1).first() {
                debug!(scene, pick = best.identity(), "outfit selected");
                picks.push(*best);
            }
        }

        if picks.len() < wanted {
            let remaining = for_gender(outfits, gender)
                .filter(|item| !picks.iter().any(|picked| std::ptr::eq(*picked, *item)));
            let padding = select_top_by_tags(remaining, query, wanted - picks.len());
            debug!(padded = padding.len(), "outfits padded from global ranking");
            picks.extend(padding);
        }

        picks.truncate(wanted);
        picks
    }

    pub fn skincare_advice(&self, query: &TagSet, gender: Gender) -> Vec<&'a str> {
        self.advice_list(
            self.catalog.baselines.skincare.for_gender(gender),
            &self.catalog.skincare_tips,
            query,
            gender,
        )
    }

    pub fn makeup_tips(&self, query: &TagSet, gender: Gender) -> Vec<&'a str> {
        self.advice_list(
            self.catalog.baselines.makeup.for_gender(gender),
            &self.catalog.makeup_tips,
            query,
            gender,
        )
    }

    pub fn styling_advice(&self, query: &TagSet, gender: Gender) -> Vec<&'a str> {
        self.advice_list(
            self.catalog.baselines.styling.for_gender(gender),
            &self.catalog.styling_tips,
            query,
            gender,
        )
    }

    /// Baseline lines first, then ranked preset lines, deduplicated.
    fn advice_list(
        &self,
        baseline: &'a [String],
        presets: &'a [PresetItem<String>],
        query: &TagSet,
        gender: Gender,
    ) -> Vec<&'a str> {
        let limit = self.config.advice_limit;
        let ranked = select_top_by_tags(for_gender(presets, gender), query, limit + 2);

        let mut lines: Vec<&'a str> = Vec::with_capacity(limit + 2);
        let candidates = baseline
            .iter()
            .map(String::as_str)
            .chain(ranked.into_iter().map(|item| item.payload.as_str()));
        for line in candidates {
            if !lines.contains(&line) {
                lines.push(line);
            }
        }
        lines.truncate(limit);
        lines
    }

    /// Top look-alikes with the presentable tags they share with the query.
    pub fn celebrity_matches(&self, query: &TagSet, gender: Gender) -> Vec<CelebrityMatch<'a>> {
        let tag_limit = self.config.presentable_tag_limit;

        rank_by_tags(for_gender(&self.catalog.celebrities, gender), query)
            .into_iter()
            .take(self.config.celebrity_limit)
            .map(|ranked| {
                let item: &'a PresetItem<Celebrity> = ranked.item;
                let matched_tags: Vec<&'a str> = item
                    .tags
                    .iter()
                    .filter(|tag| PRESENTABLE_TAGS.contains(&tag.as_str()) && query.contains(*tag))
                    .take(tag_limit)
                    .map(String::as_str)
                    .collect();
                CelebrityMatch {
                    name: item.identity(),
                    desc: &item.payload.desc,
                    score: ranked.score,
                    reason: match_reason(&matched_tags),
                    matched_tags,
                }
            })
            .collect()
    }

    /// Ranked hairstyles; if nothing matches, the first entries of the catalog.
    pub fn hairstyles(&self, query: &TagSet, gender: Gender) -> Vec<&'a PresetItem<String>> {
        let limit = self.config.hairstyle_limit;
        let ranked = rank_by_tags(for_gender(&self.catalog.hairstyles, gender), query);

        if ranked.first().map_or(true, |top| top.score == 0) {
            debug!("no hairstyle matched, using catalog order");
            return for_gender(&self.catalog.hairstyles, gender).take(limit).collect();
        }
        ranked.into_iter().take(limit).map(|r| r.item).collect()
    }

    /// Single best palette; the first eligible palette when none matches.
    pub fn palette(&self, query: &TagSet, gender: Gender) -> Option<&'a PresetItem<Palette>> {
        let ranked = rank_by_tags(for_gender(&self.catalog.palettes, gender), query);
        match ranked.first() {
            Some(top) if top.score > 0 => Some(top.item),
            _ => for_gender(&self.catalog.palettes, gender).next(),
        }
    }

    pub fn international(&self, query: &TagSet, gender: Gender) -> Vec<&'a PresetItem<Aesthetic>> {
        select_top_by_tags(
            for_gender(&self.catalog.international, gender),
            query,
            self.config.international_limit,
        )
    }
}

fn match_reason(matched: &[&str]) -> String {
    if matched.is_empty() {
        "气质相似".to_owned()
    } else {
        format!("相似点：{}", matched.join("、"))
    }
}

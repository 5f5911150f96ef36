//! Engagement, profile, and histogram types shared by every pipeline stage.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::UnknownObjectType;

/// VK user identifier of someone who liked the analysed object.
pub type ActorId = u64;

/// Kind of object the likes were left on, sent as the `type` parameter of
/// `likes.getList`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ObjectType {
    #[default]
    Post,
    Comment,
    Photo,
    Video,
    Note,
    Market,
}

impl ObjectType {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ObjectType::Post => "post",
            ObjectType::Comment => "comment",
            ObjectType::Photo => "photo",
            ObjectType::Video => "video",
            ObjectType::Note => "note",
            ObjectType::Market => "market",
        }
    }
}

impl fmt::Display for ObjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ObjectType {
    type Err = UnknownObjectType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "post" => Ok(ObjectType::Post),
            "comment" => Ok(ObjectType::Comment),
            "photo" => Ok(ObjectType::Photo),
            "video" => Ok(ObjectType::Video),
            "note" => Ok(ObjectType::Note),
            "market" => Ok(ObjectType::Market),
            _ => Err(UnknownObjectType(s.to_owned())),
        }
    }
}

/// The object whose likes are analysed.
///
/// `owner_id` is negative for objects owned by a community (group wall
/// posts), positive for objects owned by a user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngagementEvent {
    pub owner_id: i64,
    pub item_id: u64,
    #[serde(default)]
    pub object_type: ObjectType,
}

impl EngagementEvent {
    /// Creates an event for a wall post.
    #[must_use]
    pub fn post(owner_id: i64, item_id: u64) -> Self {
        Self {
            owner_id,
            item_id,
            object_type: ObjectType::Post,
        }
    }
}

impl fmt::Display for EngagementEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}_{}", self.object_type, self.owner_id, self.item_id)
    }
}

/// Demographic attributes resolved for one actor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileRecord {
    /// Identifier echoed back by the remote source; diagnostics only.
    pub id: Option<ActorId>,
    /// Raw sex code: `1` female, `2` male, anything else unspecified.
    pub sex: Option<i64>,
    /// Birth date as `D.M.YYYY`, `D.M`, or absent when hidden.
    pub bdate: Option<String>,
}

/// Age histogram bucket. Upper bounds are inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum AgeBand {
    #[serde(rename = "0-18")]
    UpTo18,
    #[serde(rename = "19-35")]
    From19To35,
    #[serde(rename = "36-50")]
    From36To50,
    #[serde(rename = ">50")]
    Over50,
    #[serde(rename = "unknown")]
    Unknown,
}

impl AgeBand {
    pub const ALL: [AgeBand; 5] = [
        AgeBand::UpTo18,
        AgeBand::From19To35,
        AgeBand::From36To50,
        AgeBand::Over50,
        AgeBand::Unknown,
    ];

    /// Buckets an estimated age; `None` lands in [`AgeBand::Unknown`].
    #[must_use]
    pub fn from_age(age: Option<u32>) -> Self {
        match age {
            None => AgeBand::Unknown,
            Some(0..=18) => AgeBand::UpTo18,
            Some(19..=35) => AgeBand::From19To35,
            Some(36..=50) => AgeBand::From36To50,
            Some(_) => AgeBand::Over50,
        }
    }
}

/// Sex histogram bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SexBucket {
    Male,
    Female,
    Unknown,
}

impl SexBucket {
    pub const ALL: [SexBucket; 3] = [SexBucket::Male, SexBucket::Female, SexBucket::Unknown];

    /// Maps a raw VK sex code to its bucket.
    #[must_use]
    pub fn from_code(code: Option<i64>) -> Self {
        match code {
            Some(1) => SexBucket::Female,
            Some(2) => SexBucket::Male,
            _ => SexBucket::Unknown,
        }
    }
}

/// Age and sex histograms for one analysed post.
///
/// Every bucket is always present. Only [`crate::aggregate`] can fill the
/// counts, so both histograms always sum to the number of records folded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DemographicStats {
    post_id: u64,
    age: BTreeMap<AgeBand, u64>,
    sex: BTreeMap<SexBucket, u64>,
}

impl DemographicStats {
    pub(crate) fn empty(post_id: u64) -> Self {
        Self {
            post_id,
            age: AgeBand::ALL.into_iter().map(|b| (b, 0)).collect(),
            sex: SexBucket::ALL.into_iter().map(|b| (b, 0)).collect(),
        }
    }

    pub(crate) fn record(&mut self, age: AgeBand, sex: SexBucket) {
        *self.age.entry(age).or_insert(0) += 1;
        *self.sex.entry(sex).or_insert(0) += 1;
    }

    #[must_use]
    pub fn post_id(&self) -> u64 {
        self.post_id
    }

    #[must_use]
    pub fn age(&self) -> &BTreeMap<AgeBand, u64> {
        &self.age
    }

    #[must_use]
    pub fn sex(&self) -> &BTreeMap<SexBucket, u64> {
        &self.sex
    }

    #[must_use]
    pub fn age_count(&self, band: AgeBand) -> u64 {
        self.age.get(&band).copied().unwrap_or(0)
    }

    #[must_use]
    pub fn sex_count(&self, bucket: SexBucket) -> u64 {
        self.sex.get(&bucket).copied().unwrap_or(0)
    }

    /// Number of profile records folded into the histograms.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.sex.values().sum()
    }
}

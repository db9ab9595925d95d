//! Advertisement entity and the payload/response shapes built from it.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// A persisted advertisement row.
#[derive(Clone, Debug, PartialEq, Eq, sqlx::FromRow)]
pub struct Advertisement {
    pub id: i64,
    pub headline: String,
    pub description: String,
    pub owner: String,
    #[sqlx(rename = "time_create")]
    pub created_at: DateTime<Utc>,
}

/// Validated body of a create request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewAdvertisement {
    pub headline: String,
    pub description: String,
    pub owner: String,
}

/// Validated body of a partial update. `None` keeps the stored value.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AdvertisementPatch {
    pub headline: Option<String>,
    pub description: Option<String>,
    pub owner: Option<String>,
}

impl AdvertisementPatch {
    pub fn is_empty(&self) -> bool {
        self.headline.is_none() && self.description.is_none() && self.owner.is_none()
    }

    /// Overwrite the fields present in the patch.
    pub fn apply_to(&self, ad: &mut Advertisement) {
        if let Some(headline) = &self.headline {
            ad.headline = headline.clone();
        }
        if let Some(description) = &self.description {
            ad.description = description.clone();
        }
        if let Some(owner) = &self.owner {
            ad.owner = owner.clone();
        }
    }
}

/// Response of GET: timestamp as an RFC 3339 string.
#[derive(Debug, Serialize)]
pub struct AdvertisementView {
    pub id: i64,
    pub headline: String,
    pub description: String,
    pub time_create: DateTime<Utc>,
    pub owner: String,
}

impl From<Advertisement> for AdvertisementView {
    fn from(ad: Advertisement) -> Self {
        AdvertisementView {
            id: ad.id,
            headline: ad.headline,
            description: ad.description,
            time_create: ad.created_at,
            owner: ad.owner,
        }
    }
}

/// Response of PATCH: timestamp as fractional seconds since the Unix epoch.
#[derive(Debug, Serialize)]
pub struct UpdatedAdvertisementView {
    pub id: i64,
    pub headline: String,
    pub description: String,
    pub time_create: f64,
    pub owner: String,
}

impl From<Advertisement> for UpdatedAdvertisementView {
    fn from(ad: Advertisement) -> Self {
        UpdatedAdvertisementView {
            id: ad.id,
            headline: ad.headline,
            description: ad.description,
            time_create: epoch_seconds(&ad.created_at),
            owner: ad.owner,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct Created {
    pub advertisement_id: i64,
}

#[derive(Debug, Serialize)]
pub struct Deleted {
    pub deleted: bool,
}

fn epoch_seconds(ts: &DateTime<Utc>) -> f64 {
    ts.timestamp_micros() as f64 / 1_000_000.0
}

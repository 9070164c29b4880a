//! Promotion types and the activation evaluator.
//!
//! A promotion's `is_active` flag is derived data: it is recomputed from the
//! start and end dates by [`Promotion::refresh`] and is never accepted from
//! callers. Between refreshes the stored flag may be stale.

use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ─── Kind ────────────────────────────────────────────────────────────────────

/// The kind of a promotion. Parsing is case-insensitive; kinds the engine does
/// not act on are kept verbatim in [`PromotionKind::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PromotionKind {
  /// Discount applied at checkout once a line meets the volume threshold.
  Volume,
  /// Standing price reduction for every product in the category.
  Seasonal,
  Other(String),
}

impl PromotionKind {
  pub fn parse(s: &str) -> Self {
    let trimmed = s.trim();
    if trimmed.eq_ignore_ascii_case("volume") {
      Self::Volume
    } else if trimmed.eq_ignore_ascii_case("seasonal") {
      Self::Seasonal
    } else {
      Self::Other(trimmed.to_owned())
    }
  }

  pub fn as_str(&self) -> &str {
    match self {
      Self::Volume => "VOLUME",
      Self::Seasonal => "SEASONAL",
      Self::Other(s) => s,
    }
  }
}

impl From<String> for PromotionKind {
  fn from(s: String) -> Self { Self::parse(&s) }
}

impl From<PromotionKind> for String {
  fn from(k: PromotionKind) -> Self { k.as_str().to_owned() }
}

impl fmt::Display for PromotionKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

// ─── Status ──────────────────────────────────────────────────────────────────

/// Where a promotion sits on its time-driven lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PromotionStatus {
  /// `today < start_date`
  Pending,
  /// `start_date <= today <= end_date`
  Active,
  /// `today > end_date`
  Expired,
}

// ─── Promotion ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Promotion {
  pub promotion_id:     Uuid,
  pub category_id:      Uuid,
  /// Fraction taken off the price, e.g. `0.20` for 20 %.
  pub discount:         Decimal,
  pub kind:             PromotionKind,
  /// Minimum line quantity for a [`PromotionKind::Volume`] promotion.
  pub volume_threshold: u32,
  /// First day the promotion applies (inclusive).
  pub start_date:       NaiveDate,
  /// Last day the promotion applies (inclusive).
  pub end_date:         NaiveDate,
  /// Result of the last [`Promotion::refresh`].
  pub is_active:        bool,
  /// Server-assigned; the newest active promotion wins a category.
  pub created_at:       DateTime<Utc>,
}

impl Promotion {
  /// Whether `today` falls inside the promotion's date range, both ends
  /// inclusive.
  pub fn is_active_on(&self, today: NaiveDate) -> bool {
    within(self.start_date, self.end_date, today)
  }

  pub fn status_on(&self, today: NaiveDate) -> PromotionStatus {
    if today < self.start_date {
      PromotionStatus::Pending
    } else if today > self.end_date {
      PromotionStatus::Expired
    } else {
      PromotionStatus::Active
    }
  }

  /// Recompute the stored `is_active` flag for `today` and return it.
  pub fn refresh(&mut self, today: NaiveDate) -> bool {
    self.is_active = self.is_active_on(today);
    self.is_active
  }

  /// Overwrite every caller-editable field with the values from `input`.
  /// The active flag is left for the caller to refresh.
  pub fn apply(&mut self, input: NewPromotion) {
    self.category_id = input.category_id;
    self.discount = input.discount;
    self.kind = input.kind;
    self.volume_threshold = input.volume_threshold;
    self.start_date = input.start_date;
    self.end_date = input.end_date;
  }
}

/// Input to [`crate::store::CatalogStore::add_promotion`], and the full
/// replacement body for promotion updates.
#[derive(Debug, Clone, Deserialize)]
pub struct NewPromotion {
  pub category_id:      Uuid,
  pub discount:         Decimal,
  pub kind:             PromotionKind,
  #[serde(default)]
  pub volume_threshold: u32,
  pub start_date:       NaiveDate,
  pub end_date:         NaiveDate,
}

impl NewPromotion {
  /// The flag a promotion created from this input would have on `today`.
  pub fn is_active_on(&self, today: NaiveDate) -> bool {
    within(self.start_date, self.end_date, today)
  }
}

fn within(start: NaiveDate, end: NaiveDate, today: NaiveDate) -> bool {
  start <= today && today <= end
}

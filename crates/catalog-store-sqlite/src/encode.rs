//! Encoding and decoding helpers between catalog types and the plain-text
//! representations stored in SQLite columns.
//!
//! Decimal amounts keep their exact string form. Dates are `YYYY-MM-DD`.
//! `created_at` is a fixed-width RFC 3339 string so that lexical order matches
//! chronological order. UUIDs are hyphenated lowercase strings.

use std::str::FromStr;

use catalog_core::{
  category::Category,
  product::Product,
  promotion::{Promotion, PromotionKind},
};
use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::{Error, Result};

// ─── Uuid ────────────────────────────────────────────────────────────────────

pub fn encode_uuid(id: Uuid) -> String { id.hyphenated().to_string() }

pub fn decode_uuid(s: &str) -> Result<Uuid> { Ok(Uuid::parse_str(s)?) }

// ─── Timestamps and dates ────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String {
  dt.to_rfc3339_opts(SecondsFormat::Nanos, true)
}

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

const DATE_FORMAT: &str = "%Y-%m-%d";

pub fn encode_date(d: NaiveDate) -> String { d.format(DATE_FORMAT).to_string() }

pub fn decode_date(s: &str) -> Result<NaiveDate> {
  NaiveDate::parse_from_str(s, DATE_FORMAT).map_err(|e| Error::DateParse(e.to_string()))
}

// ─── Numbers ─────────────────────────────────────────────────────────────────

pub fn encode_decimal(d: Decimal) -> String { d.to_string() }

pub fn decode_decimal(s: &str) -> Result<Decimal> { Ok(Decimal::from_str(s)?) }

fn decode_count(column: &'static str, value: i64) -> Result<u32> {
  u32::try_from(value).map_err(|_| Error::OutOfRange { column, value })
}

// ─── Row types ───────────────────────────────────────────────────────────────

/// Raw values read directly from a `categories` row.
pub struct RawCategory {
  pub category_id: String,
  pub name:        String,
}

impl RawCategory {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self { category_id: row.get(0)?, name: row.get(1)? })
  }

  pub fn into_category(self) -> Result<Category> {
    Ok(Category { category_id: decode_uuid(&self.category_id)?, name: self.name })
  }
}

/// Column list matching [`RawProduct::from_row`].
pub const PRODUCT_COLUMNS: &str = "product_id, name, description, price, category_id, \
                                   weight, current_stock, min_stock";

/// Raw values read directly from a `products` row.
pub struct RawProduct {
  pub product_id:    String,
  pub name:          String,
  pub description:   Option<String>,
  pub price:         String,
  pub category_id:   String,
  pub weight:        String,
  pub current_stock: i64,
  pub min_stock:     i64,
}

impl RawProduct {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      product_id:    row.get(0)?,
      name:          row.get(1)?,
      description:   row.get(2)?,
      price:         row.get(3)?,
      category_id:   row.get(4)?,
      weight:        row.get(5)?,
      current_stock: row.get(6)?,
      min_stock:     row.get(7)?,
    })
  }

  pub fn into_product(self) -> Result<Product> {
    Ok(Product {
      product_id:    decode_uuid(&self.product_id)?,
      name:          self.name,
      description:   self.description,
      price:         decode_decimal(&self.price)?,
      category_id:   decode_uuid(&self.category_id)?,
      weight:        decode_decimal(&self.weight)?,
      current_stock: decode_count("current_stock", self.current_stock)?,
      min_stock:     decode_count("min_stock", self.min_stock)?,
    })
  }
}

/// Column list matching [`RawPromotion::from_row`].
pub const PROMOTION_COLUMNS: &str = "promotion_id, category_id, discount, kind, \
                                     volume_threshold, start_date, end_date, \
                                     is_active, created_at";

/// Raw values read directly from a `promotions` row.
pub struct RawPromotion {
  pub promotion_id:     String,
  pub category_id:      String,
  pub discount:         String,
  pub kind:             String,
  pub volume_threshold: i64,
  pub start_date:       String,
  pub end_date:         String,
  pub is_active:        bool,
  pub created_at:       String,
}

impl RawPromotion {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      promotion_id:     row.get(0)?,
      category_id:      row.get(1)?,
      discount:         row.get(2)?,
      kind:             row.get(3)?,
      volume_threshold: row.get(4)?,
      start_date:       row.get(5)?,
      end_date:         row.get(6)?,
      is_active:        row.get(7)?,
      created_at:       row.get(8)?,
    })
  }

  pub fn into_promotion(self) -> Result<Promotion> {
    Ok(Promotion {
      promotion_id:     decode_uuid(&self.promotion_id)?,
      category_id:      decode_uuid(&self.category_id)?,
      discount:         decode_decimal(&self.discount)?,
      kind:             PromotionKind::parse(&self.kind),
      volume_threshold: decode_count("volume_threshold", self.volume_threshold)?,
      start_date:       decode_date(&self.start_date)?,
      end_date:         decode_date(&self.end_date)?,
      is_active:        self.is_active,
      created_at:       decode_dt(&self.created_at)?,
    })
  }
}

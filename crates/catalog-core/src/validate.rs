//! Field validation for catalog writes.

use rust_decimal::Decimal;

use crate::{
  Error, Result,
  category::NewCategory,
  product::NewProduct,
  promotion::{NewPromotion, PromotionKind},
};

fn invalid(msg: impl Into<String>) -> Error { Error::InvalidArgument(msg.into()) }

pub fn validate_category(input: &NewCategory) -> Result<()> {
  if input.name.trim().is_empty() {
    return Err(invalid("category name must not be empty"));
  }
  Ok(())
}

pub fn validate_product(input: &NewProduct) -> Result<()> {
  if input.name.trim().is_empty() {
    return Err(invalid("product name must not be empty"));
  }
  validate_price(input.price)?;
  if input.weight < Decimal::ZERO {
    return Err(invalid("weight cannot be negative"));
  }
  Ok(())
}

pub fn validate_price(price: Decimal) -> Result<()> {
  if price < Decimal::ZERO {
    return Err(invalid("price cannot be negative"));
  }
  Ok(())
}

pub fn validate_promotion(input: &NewPromotion) -> Result<()> {
  if input.discount < Decimal::ZERO || input.discount > Decimal::ONE {
    return Err(invalid("discount must be between 0 and 1"));
  }
  if let PromotionKind::Other(kind) = &input.kind
    && kind.is_empty()
  {
    return Err(invalid("promotion kind must not be empty"));
  }
  if input.start_date > input.end_date {
    return Err(invalid("start date must not be after end date"));
  }
  Ok(())
}

/// Normalise a product-name search term to the catalog's capitalisation:
/// first letter upper-case, the rest lower-case (`"dRiLl"` -> `"Drill"`).
pub fn normalize_name_prefix(name: &str) -> Result<String> {
  let lower = name.trim().to_lowercase();
  let mut chars = lower.chars();
  match chars.next() {
    Some(first) => Ok(first.to_uppercase().chain(chars).collect()),
    None => Err(invalid("name must not be empty")),
  }
}

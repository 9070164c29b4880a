//! Discount arithmetic shared by the seasonal sweep and checkout.

use rust_decimal::Decimal;

use crate::promotion::{Promotion, PromotionKind};

/// `price * (1 - discount)`. No clamping: a discount above one yields a
/// negative price.
pub fn apply_discount(price: Decimal, discount: Decimal) -> Decimal {
  price * (Decimal::ONE - discount)
}

/// The unit price to charge for `quantity` units at `price`, given the
/// category's active promotion (if any).
///
/// Only an active [`PromotionKind::Volume`] promotion changes the price, and
/// only once `quantity` reaches its threshold. Every other case returns
/// `price` unchanged.
pub fn discounted_unit_price(
  price: Decimal,
  promotion: Option<&Promotion>,
  quantity: u32,
) -> Decimal {
  match promotion {
    Some(p) if p.is_active && p.kind == PromotionKind::Volume => {
      if quantity >= p.volume_threshold {
        apply_discount(price, p.discount)
      } else {
        price
      }
    }
    _ => price,
  }
}

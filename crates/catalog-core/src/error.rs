//! Error types for `catalog-core`.

use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum Error {
  #[error("product not found: {0}")]
  ProductNotFound(Uuid),

  /// A bulk lookup where at least one id had no matching product.
  #[error("products not found: {0:?}")]
  ProductsNotFound(Vec<Uuid>),

  #[error("category not found: {0}")]
  CategoryNotFound(Uuid),

  #[error("no products in category {category_id} matching {prefix:?}")]
  NoMatchingProducts {
    category_id: Uuid,
    prefix:      Option<String>,
  },

  #[error("promotion not found: {0}")]
  PromotionNotFound(Uuid),

  #[error("invalid argument: {0}")]
  InvalidArgument(String),

  #[error("conflict: {0}")]
  Conflict(String),

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl Error {
  /// Wrap a backend error. Used as `.map_err(Error::store)` on store calls.
  pub fn store<E>(e: E) -> Self
  where
    E: std::error::Error + Send + Sync + 'static,
  {
    Self::Store(Box::new(e))
  }

  pub fn is_not_found(&self) -> bool {
    matches!(
      self,
      Self::ProductNotFound(_)
        | Self::ProductsNotFound(_)
        | Self::CategoryNotFound(_)
        | Self::NoMatchingProducts { .. }
        | Self::PromotionNotFound(_)
    )
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

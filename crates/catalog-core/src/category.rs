//! Category: the grouping key shared by products and promotions.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
  pub category_id: Uuid,
  pub name:        String,
}

/// Input to [`crate::store::CatalogStore::add_category`].
#[derive(Debug, Clone, Deserialize)]
pub struct NewCategory {
  pub name: String,
}

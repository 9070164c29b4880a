//! Integration tests for `SqliteStore` against an in-memory database.

use catalog_core::{
  category::NewCategory,
  checkout::{CartLine, price_cart, price_line},
  product::NewProduct,
  promotion::{NewPromotion, PromotionKind},
  store::CatalogStore,
  sweep::sweep,
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::{Error, SqliteStore};

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

fn d(s: &str) -> Decimal { s.parse().unwrap() }

fn date(y: i32, m: u32, day: u32) -> NaiveDate {
  NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

async fn category(s: &SqliteStore, name: &str) -> Uuid {
  s.add_category(NewCategory { name: name.into() })
    .await
    .unwrap()
    .category_id
}

fn new_product(category_id: Uuid, name: &str, price: &str) -> NewProduct {
  NewProduct {
    name: name.into(),
    description: None,
    price: d(price),
    category_id,
    weight: d("2.25"),
    current_stock: 7,
    min_stock: 1,
  }
}

fn new_promotion(category_id: Uuid, kind: PromotionKind, discount: &str) -> NewPromotion {
  NewPromotion {
    category_id,
    discount: d(discount),
    kind,
    volume_threshold: 5,
    start_date: date(2024, 6, 1),
    end_date: date(2024, 6, 30),
  }
}

// ─── Categories ──────────────────────────────────────────────────────────────

#[tokio::test]
async fn add_get_and_delete_category() {
  let s = store().await;
  let id = category(&s, "Garden").await;

  let fetched = s.get_category(id).await.unwrap().unwrap();
  assert_eq!(fetched.name, "Garden");
  assert_eq!(s.list_categories().await.unwrap().len(), 1);

  assert!(s.delete_category(id).await.unwrap());
  assert!(!s.delete_category(id).await.unwrap());
  assert!(s.get_category(id).await.unwrap().is_none());
}

// ─── Products ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn product_round_trips_every_field() {
  let s = store().await;
  let cat = category(&s, "Garden").await;
  let mut input = new_product(cat, "Shovel", "19.90");
  input.description = Some("Steel blade".into());

  let added = s.add_product(input).await.unwrap();
  let fetched = s.get_product(added.product_id).await.unwrap().unwrap();

  assert_eq!(fetched, added);
  assert_eq!(fetched.price.to_string(), "19.90");
  assert_eq!(fetched.weight, d("2.25"));
}

#[tokio::test]
async fn get_product_missing_returns_none() {
  let s = store().await;
  assert!(s.get_product(Uuid::new_v4()).await.unwrap().is_none());
}

#[tokio::test]
async fn save_product_overwrites_and_requires_existing_row() {
  let s = store().await;
  let cat = category(&s, "Garden").await;
  let mut product = s.add_product(new_product(cat, "Rake", "10")).await.unwrap();

  product.price = d("8.50");
  product.current_stock = 0;
  s.save_product(product.clone()).await.unwrap();
  assert_eq!(s.get_product(product.product_id).await.unwrap().unwrap(), product);

  let mut ghost = product.clone();
  ghost.product_id = Uuid::new_v4();
  let err = s.save_product(ghost).await.unwrap_err();
  assert!(matches!(err, Error::ProductNotFound(_)));
}

#[tokio::test]
async fn products_by_ids_skips_unknown_ids() {
  let s = store().await;
  let cat = category(&s, "Garden").await;
  let a = s.add_product(new_product(cat, "Rake", "10")).await.unwrap();
  let b = s.add_product(new_product(cat, "Hoe", "12")).await.unwrap();
  s.add_product(new_product(cat, "Trowel", "4")).await.unwrap();

  let found = s
    .products_by_ids(&[a.product_id, Uuid::new_v4(), b.product_id])
    .await
    .unwrap();
  assert_eq!(found.len(), 2);
  assert!(s.products_by_ids(&[]).await.unwrap().is_empty());
}

#[tokio::test]
async fn prefix_search_is_case_sensitive_and_scoped_to_category() {
  let s = store().await;
  let garden = category(&s, "Garden").await;
  let kitchen = category(&s, "Kitchen").await;
  s.add_product(new_product(garden, "Shovel", "10")).await.unwrap();
  s.add_product(new_product(garden, "shears", "10")).await.unwrap();
  s.add_product(new_product(garden, "Rake", "10")).await.unwrap();
  s.add_product(new_product(kitchen, "Sieve", "3")).await.unwrap();

  let hits = s.products_in_category_with_prefix(garden, "Sh").await.unwrap();
  assert_eq!(hits.len(), 1);
  assert_eq!(hits[0].name, "Shovel");

  // LIKE wildcards have no special meaning.
  let none = s.products_in_category_with_prefix(garden, "S%").await.unwrap();
  assert!(none.is_empty());

  assert_eq!(s.products_in_category(garden).await.unwrap().len(), 3);
}

#[tokio::test]
async fn delete_product_reports_whether_it_existed() {
  let s = store().await;
  let cat = category(&s, "Garden").await;
  let p = s.add_product(new_product(cat, "Rake", "10")).await.unwrap();

  assert!(s.delete_product(p.product_id).await.unwrap());
  assert!(!s.delete_product(p.product_id).await.unwrap());
  assert!(s.list_products().await.unwrap().is_empty());
}

// ─── Promotions ──────────────────────────────────────────────────────────────

#[tokio::test]
async fn promotion_round_trips_every_field() {
  let s = store().await;
  let cat = category(&s, "Garden").await;

  let added = s
    .add_promotion(new_promotion(cat, PromotionKind::parse("clearance"), "0.35"), true)
    .await
    .unwrap();
  let fetched = s.get_promotion(added.promotion_id).await.unwrap().unwrap();

  assert_eq!(fetched.promotion_id, added.promotion_id);
  assert_eq!(fetched.kind, added.kind);
  assert_eq!(fetched.discount, d("0.35"));
  assert_eq!(fetched.volume_threshold, 5);
  assert_eq!(fetched.start_date, date(2024, 6, 1));
  assert_eq!(fetched.end_date, date(2024, 6, 30));
  assert!(fetched.is_active);
  assert_eq!(fetched.created_at, added.created_at);
}

#[tokio::test]
async fn newest_active_promotion_is_the_category_promotion() {
  let s = store().await;
  let cat = category(&s, "Garden").await;
  let other = category(&s, "Kitchen").await;

  s.add_promotion(new_promotion(cat, PromotionKind::Volume, "0.10"), true)
    .await
    .unwrap();
  let newest = s
    .add_promotion(new_promotion(cat, PromotionKind::Volume, "0.30"), true)
    .await
    .unwrap();
  s.add_promotion(new_promotion(cat, PromotionKind::Volume, "0.90"), false)
    .await
    .unwrap();

  let active = s.active_promotion_for_category(cat).await.unwrap().unwrap();
  assert_eq!(active.promotion_id, newest.promotion_id);
  assert!(s.active_promotion_for_category(other).await.unwrap().is_none());
  assert_eq!(s.promotions_in_category(cat).await.unwrap().len(), 3);
}

#[tokio::test]
async fn save_promotion_keeps_created_at() {
  let s = store().await;
  let cat = category(&s, "Garden").await;
  let mut promo = s
    .add_promotion(new_promotion(cat, PromotionKind::Seasonal, "0.2"), false)
    .await
    .unwrap();
  let created_at = promo.created_at;

  promo.is_active = true;
  promo.end_date = date(2024, 7, 31);
  promo.created_at = chrono::Utc::now() + chrono::Duration::days(10);
  s.save_promotion(promo.clone()).await.unwrap();

  let fetched = s.get_promotion(promo.promotion_id).await.unwrap().unwrap();
  assert!(fetched.is_active);
  assert_eq!(fetched.end_date, date(2024, 7, 31));
  assert_eq!(fetched.created_at, created_at);

  promo.promotion_id = Uuid::new_v4();
  let err = s.save_promotion(promo).await.unwrap_err();
  assert!(matches!(err, Error::PromotionNotFound(_)));
}

// ─── Engine against SQLite ───────────────────────────────────────────────────

#[tokio::test]
async fn seasonal_sweep_rewrites_and_compounds_persisted_prices() {
  let s = store().await;
  let cat = category(&s, "Garden").await;
  let p = s.add_product(new_product(cat, "Shovel", "100.0")).await.unwrap();
  let promo = s
    .add_promotion(new_promotion(cat, PromotionKind::Seasonal, "0.20"), false)
    .await
    .unwrap();

  let active = sweep(&s, date(2024, 6, 15)).await.unwrap();
  assert_eq!(active.len(), 1);
  assert!(s.get_promotion(promo.promotion_id).await.unwrap().unwrap().is_active);
  assert_eq!(s.get_product(p.product_id).await.unwrap().unwrap().price, d("80.0"));

  sweep(&s, date(2024, 6, 15)).await.unwrap();
  assert_eq!(s.get_product(p.product_id).await.unwrap().unwrap().price, d("64.0"));

  // After the window closes the flag drops and prices stay put.
  let active = sweep(&s, date(2024, 7, 1)).await.unwrap();
  assert!(active.is_empty());
  assert_eq!(s.get_product(p.product_id).await.unwrap().unwrap().price, d("64.0"));
}

#[tokio::test]
async fn volume_discount_prices_lines_and_carts() {
  let s = store().await;
  let books = category(&s, "Books").await;
  let tools = category(&s, "Tools").await;
  let atlas = s.add_product(new_product(books, "Atlas", "65.0")).await.unwrap();
  let drill = s.add_product(new_product(tools, "Drill", "100.0")).await.unwrap();
  s.add_promotion(new_promotion(tools, PromotionKind::Volume, "0.20"), true)
    .await
    .unwrap();

  assert_eq!(price_line(&s, drill.product_id, 4).await.unwrap(), d("100.0"));
  assert_eq!(price_line(&s, drill.product_id, 5).await.unwrap(), d("80.0"));

  let priced = price_cart(
    &s,
    &[CartLine::new(atlas.product_id, 1), CartLine::new(drill.product_id, 5)],
  )
  .await
  .unwrap();
  assert_eq!(priced[0].total_price, d("65.0"));
  assert_eq!(priced[1].total_price, d("400.0"));
  assert_eq!(priced[1].total_weight, d("11.25"));
}

//! SQL schema for the catalog SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS categories (
    category_id TEXT PRIMARY KEY,
    name        TEXT NOT NULL
);

-- Decimal amounts are stored as their canonical string form so that no
-- precision is lost to REAL.
CREATE TABLE IF NOT EXISTS products (
    product_id    TEXT PRIMARY KEY,
    name          TEXT NOT NULL,
    description   TEXT,
    price         TEXT NOT NULL,
    category_id   TEXT NOT NULL REFERENCES categories(category_id),
    weight        TEXT NOT NULL,
    current_stock INTEGER NOT NULL CHECK (current_stock >= 0),
    min_stock     INTEGER NOT NULL CHECK (min_stock >= 0)
);

CREATE TABLE IF NOT EXISTS promotions (
    promotion_id     TEXT PRIMARY KEY,
    category_id      TEXT NOT NULL REFERENCES categories(category_id),
    discount         TEXT NOT NULL,
    kind             TEXT NOT NULL,    -- 'VOLUME' | 'SEASONAL' | free text
    volume_threshold INTEGER NOT NULL DEFAULT 0,
    start_date       TEXT NOT NULL,    -- YYYY-MM-DD, inclusive
    end_date         TEXT NOT NULL,    -- YYYY-MM-DD, inclusive
    is_active        INTEGER NOT NULL DEFAULT 0,
    created_at       TEXT NOT NULL     -- RFC 3339 UTC, fixed width
);

CREATE INDEX IF NOT EXISTS products_category_idx   ON products(category_id);
CREATE INDEX IF NOT EXISTS promotions_category_idx ON promotions(category_id);

PRAGMA user_version = 1;
";

//! # Catalog Engine
//!
//! Variant-matrix inventory over an account's product list.
//!
//! ## Bulk Stock-In
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │  "Polo Shirt", code PS-01, colors {Red, Blue}, sizes {M, L, XL}     │
//! │       │                                                             │
//! │       ▼ generate_variants (cartesian product)                       │
//! │                                                                     │
//! │  Red/M   Red/L   Red/XL                                             │
//! │  Blue/M  Blue/L  Blue/XL      ← 2 × 3 = 6 ProductVariant rows,      │
//! │                                 each with its own id and stock      │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Search is case-insensitive substring over name OR code (typeahead);
//! resolution is exact match on (name, color, size) — the two-step
//! "pick name, then pick color, then pick size" interaction.
//!
//! `decrement_stock` clamps at zero instead of rejecting. The over-sell
//! check belongs to the sale composer, which validates every line before
//! any write; the clamp here is a fallback only and a pinned test keeps it
//! that way.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::actor::Actor;
use crate::error::{CoreError, CoreResult, ValidationError};
use crate::money::Money;
use crate::types::ProductVariant;
use crate::validation;

// =============================================================================
// Variant Generation
// =============================================================================

/// Shared base fields of a stock-in batch.
#[derive(Debug, Clone)]
pub struct VariantSeed {
    pub name: String,
    pub code: String,
    pub category: String,
}

/// Expands a product definition into one variant per (color, size) pair.
///
/// ## Contract
/// - Emits one variant per distinct (color, size) pair, each with a fresh
///   UUID and the shared base fields. The selections are treated as sets:
///   a repeated color or size collapses to one entry.
/// - Fails with a validation error if either selection is empty; no partial
///   batch is ever produced.
pub fn generate_variants(
    seed: &VariantSeed,
    colors: &[String],
    sizes: &[String],
    qty_per_variant: i64,
    buy_price: Money,
    sell_price: Money,
    added_at: DateTime<Utc>,
) -> CoreResult<Vec<ProductVariant>> {
    validation::validate_product_name(&seed.name)?;
    validation::validate_product_code(&seed.code)?;
    validation::validate_category(&seed.category)?;
    validation::validate_quantity(qty_per_variant)?;
    validation::validate_price("buy price", buy_price)?;
    validation::validate_price("sell price", sell_price)?;

    if colors.is_empty() {
        return Err(ValidationError::EmptySelection { field: "color" }.into());
    }
    if sizes.is_empty() {
        return Err(ValidationError::EmptySelection { field: "size" }.into());
    }

    let colors = dedup_selection(colors);
    let sizes = dedup_selection(sizes);

    let mut variants = Vec::with_capacity(colors.len() * sizes.len());
    for color in &colors {
        for size in &sizes {
            variants.push(ProductVariant {
                id: Uuid::new_v4().to_string(),
                name: seed.name.trim().to_string(),
                code: seed.code.trim().to_string(),
                category: seed.category.trim().to_string(),
                color: color.to_string(),
                size: size.to_string(),
                stock_quantity: qty_per_variant,
                buy_price,
                sell_price,
                added_at,
            });
        }
    }

    Ok(variants)
}

/// Collapses repeated selections, keeping first-occurrence order.
fn dedup_selection(values: &[String]) -> Vec<&str> {
    let mut unique: Vec<&str> = Vec::with_capacity(values.len());
    for value in values {
        if !unique.contains(&value.as_str()) {
            unique.push(value.as_str());
        }
    }
    unique
}

/// Generates a stock-in batch and appends it to the catalog in one step.
///
/// Existing variants are untouched; a failed generation appends nothing.
#[allow(clippy::too_many_arguments)]
pub fn stock_in(
    products: &mut Vec<ProductVariant>,
    seed: &VariantSeed,
    colors: &[String],
    sizes: &[String],
    qty_per_variant: i64,
    buy_price: Money,
    sell_price: Money,
    added_at: DateTime<Utc>,
) -> CoreResult<usize> {
    let batch = generate_variants(
        seed,
        colors,
        sizes,
        qty_per_variant,
        buy_price,
        sell_price,
        added_at,
    )?;
    let count = batch.len();
    products.extend(batch);
    Ok(count)
}

// =============================================================================
// Lookup
// =============================================================================

/// Searches variants case-insensitively by name or code substring.
///
/// Returns a lazy iterator in catalog insertion order, capped at `limit`.
/// The typeahead UI passes a small limit (5); list views pass a large one.
pub fn search_variants<'a>(
    products: &'a [ProductVariant],
    query: &str,
    limit: usize,
) -> impl Iterator<Item = &'a ProductVariant> + 'a {
    let needle = query.trim().to_lowercase();
    products
        .iter()
        .filter(move |p| {
            p.name.to_lowercase().contains(&needle) || p.code.to_lowercase().contains(&needle)
        })
        .take(limit)
}

/// Resolves a variant by exact (name, color, size).
///
/// Case-sensitive on the identifiers as stored: by the time resolution
/// runs, the operator has already picked all three from search results.
pub fn resolve_variant<'a>(
    products: &'a [ProductVariant],
    name: &str,
    color: &str,
    size: &str,
) -> CoreResult<&'a ProductVariant> {
    products
        .iter()
        .find(|p| p.name == name && p.color == color && p.size == size)
        .ok_or_else(|| CoreError::VariantNotFound {
            name: name.to_string(),
            color: color.to_string(),
            size: size.to_string(),
        })
}

/// Finds a variant by id.
pub fn variant_by_id<'a>(
    products: &'a [ProductVariant],
    variant_id: &str,
) -> CoreResult<&'a ProductVariant> {
    products
        .iter()
        .find(|p| p.id == variant_id)
        .ok_or_else(|| CoreError::NotFound {
            entity: "Variant".to_string(),
            id: variant_id.to_string(),
        })
}

// =============================================================================
// Mutation
// =============================================================================

/// Decrements a variant's stock by `qty`, clamping at zero.
///
/// The clamp keeps a lagging inventory count from failing a sale whose
/// ledger rows were already committed. The sale composer pre-validates
/// stock, so on the happy path this never actually clamps.
pub fn decrement_stock<'a>(
    products: &'a mut [ProductVariant],
    variant_id: &str,
    qty: i64,
) -> CoreResult<&'a ProductVariant> {
    let variant = products
        .iter_mut()
        .find(|p| p.id == variant_id)
        .ok_or_else(|| CoreError::NotFound {
            entity: "Variant".to_string(),
            id: variant_id.to_string(),
        })?;

    variant.stock_quantity = (variant.stock_quantity - qty).max(0);
    Ok(variant)
}

/// Removes a variant from the catalog. Admin only.
pub fn remove_variant(
    products: &mut Vec<ProductVariant>,
    variant_id: &str,
    actor: &Actor,
) -> CoreResult<ProductVariant> {
    actor.require_admin("delete products")?;

    let idx = products
        .iter()
        .position(|p| p.id == variant_id)
        .ok_or_else(|| CoreError::NotFound {
            entity: "Variant".to_string(),
            id: variant_id.to_string(),
        })?;

    Ok(products.remove(idx))
}

// =============================================================================
// Unit Tests
// =============================================================================

//! Reduction of basket line items into an offer summary.
//!
//! Each line maps to an [`OfferMonoid`] tracking only the offer's SKUs, and
//! the lines are folded with [`OfferMonoid::combine`]. The result is mounted
//! into a rule context under `partners.<partner>`.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use std::collections::BTreeMap;

use crate::domain::number_value;

/// One basket line: `[quantity, sku, unit_price, line_total]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BasketItem(pub u64, pub String, pub Decimal, pub Decimal);

impl BasketItem {
    pub fn quantity(&self) -> u64 {
        self.0
    }

    pub fn sku(&self) -> &str {
        &self.1
    }

    pub fn unit_price(&self) -> Decimal {
        self.2
    }

    pub fn line_total(&self) -> Decimal {
        self.3
    }
}

/// Basket file: the SKUs its offer tracks and the lines. `partner`, when
/// present, overrides the partner given on the command line.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Basket {
    #[serde(default)]
    pub partner: Option<String>,

    #[serde(default)]
    pub offer_skus: Vec<String>,

    #[serde(default)]
    pub items: Vec<BasketItem>,
}

impl Basket {
    /// Reduce the lines against this basket's offer SKUs.
    pub fn offer(&self) -> OfferMonoid {
        OfferMonoid::reduce(&OfferMonoid::zero(&self.offer_skus), &self.items)
    }
}

/// Per-offer totals: quantity per tracked SKU and spend on those SKUs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OfferMonoid {
    pub products: BTreeMap<String, u64>,
    pub spend: Decimal,
}

impl OfferMonoid {
    /// Identity element tracking `skus`, all at zero.
    pub fn zero<S: AsRef<str>>(skus: &[S]) -> Self {
        OfferMonoid {
            products: skus.iter().map(|s| (s.as_ref().to_string(), 0)).collect(),
            spend: Decimal::ZERO,
        }
    }

    /// Map one line onto `zero`'s shape. Untracked SKUs yield `zero` itself.
    pub fn from_item(zero: &OfferMonoid, item: &BasketItem) -> Self {
        let mut offer = zero.clone();

        if let Some(qty) = offer.products.get_mut(item.sku()) {
            *qty = item.quantity();
            offer.spend = item.line_total();
        }

        offer
    }

    /// Key-wise sum over `self`'s SKUs; SKUs only in `other` are ignored.
    pub fn combine(&self, other: &OfferMonoid) -> Self {
        let products = self
            .products
            .iter()
            .map(|(sku, qty)| {
                let extra = other.products.get(sku).copied().unwrap_or(0);
                (sku.clone(), qty.saturating_add(extra))
            })
            .collect();

        OfferMonoid {
            products,
            spend: self.spend + other.spend,
        }
    }

    /// Map every line and fold from `zero`.
    pub fn reduce(zero: &OfferMonoid, items: &[BasketItem]) -> Self {
        items
            .iter()
            .map(|item| OfferMonoid::from_item(zero, item))
            .fold(zero.clone(), |acc, offer| acc.combine(&offer))
    }

    /// Total quantity across tracked SKUs.
    pub fn total_quantity(&self) -> u64 {
        self.products
            .values()
            .fold(0u64, |total, qty| total.saturating_add(*qty))
    }

    /// `{ "spend": n, "products": { sku: qty, ... } }`
    pub fn to_value(&self) -> Value {
        let products: Map<String, Value> = self
            .products
            .iter()
            .map(|(sku, qty)| (sku.clone(), Value::from(*qty)))
            .collect();

        let spend = self
            .spend
            .to_f64()
            .and_then(number_value)
            .unwrap_or(Value::Null);

        json!({ "spend": spend, "products": products })
    }

    /// A fresh context holding only this offer under `partners.<partner>`.
    pub fn into_context(&self, partner: &str) -> Value {
        let mut context = json!({});
        self.merge_into(&mut context, partner);
        context
    }

    /// Insert this offer at `partners.<partner>`, replacing whatever was
    /// there. Non-mapping nodes on the way are replaced by mappings.
    pub fn merge_into(&self, context: &mut Value, partner: &str) {
        if !context.is_object() {
            *context = json!({});
        }
        if !context["partners"].is_object() {
            context["partners"] = json!({});
        }

        context["partners"][partner] = self.to_value();
    }
}

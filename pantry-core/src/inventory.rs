//! Session-only kitchen inventory.

use chrono::{Days, NaiveDate};
use uuid::Uuid;

use crate::expiry::{classify, ExpiryClassification};
use crate::types::{InventoryItem, NewInventoryItem};

/// Items shown on first launch, as (name, quantity, days until expiry).
const SEED_ITEMS: &[(&str, &str, Option<u64>)] = &[
    ("Milk", "1 carton", Some(2)),
    ("Eggs", "12", Some(5)),
    ("Bread", "1 loaf", Some(1)),
    ("Chicken", "500g", Some(4)),
    ("Tomatoes", "6", Some(7)),
    ("Rice", "2kg", None),
];

#[derive(Debug, Clone, Default)]
pub struct Inventory {
    items: Vec<InventoryItem>,
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inventory pre-filled with demo items dated relative to `today`.
    pub fn seeded(today: NaiveDate) -> Self {
        let items = SEED_ITEMS
            .iter()
            .enumerate()
            .map(|(i, &(name, quantity, days))| InventoryItem {
                id: (i + 1).to_string(),
                name: name.to_string(),
                quantity: quantity.to_string(),
                expires: days.and_then(|d| today.checked_add_days(Days::new(d))),
            })
            .collect();
        Self { items }
    }

    /// Add an item under a freshly generated id.
    pub fn add(&mut self, item: NewInventoryItem) -> &InventoryItem {
        let id = Uuid::new_v4().to_string();
        let index = self.items.len();
        self.items.push(item.with_id(id));
        &self.items[index]
    }

    /// Remove an item by id. The remaining items keep their order.
    pub fn remove(&mut self, id: &str) -> Option<InventoryItem> {
        let (removed, kept): (Vec<_>, Vec<_>) =
            std::mem::take(&mut self.items).into_iter().partition(|item| item.id == id);
        self.items = kept;
        removed.into_iter().next()
    }

    pub fn get(&self, id: &str) -> Option<&InventoryItem> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn items(&self) -> &[InventoryItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn names(&self) -> Vec<&str> {
        self.items.iter().map(|item| item.name.as_str()).collect()
    }

    /// Every item paired with its classification against `today`.
    pub fn classified(&self, today: NaiveDate) -> Vec<(&InventoryItem, ExpiryClassification)> {
        self.items
            .iter()
            .map(|item| (item, classify(item.expires, today)))
            .collect()
    }

    /// Items that are expired or expire within the urgent window.
    pub fn expiring_soon(&self, today: NaiveDate) -> Vec<&InventoryItem> {
        self.classified(today)
            .into_iter()
            .filter(|(_, c)| c.needs_attention())
            .map(|(item, _)| item)
            .collect()
    }

    /// Items with no expiry date or one beyond the urgent window.
    pub fn still_fresh(&self, today: NaiveDate) -> Vec<&InventoryItem> {
        self.classified(today)
            .into_iter()
            .filter(|(_, c)| !c.needs_attention())
            .map(|(item, _)| item)
            .collect()
    }

    pub fn expiring_count(&self, today: NaiveDate) -> usize {
        self.expiring_soon(today).len()
    }

    /// Soonest expiry first; undated items last; ties broken by name.
    pub fn sorted_by_expiry(&self, today: NaiveDate) -> Vec<(&InventoryItem, ExpiryClassification)> {
        let mut classified = self.classified(today);
        classified.sort_by(|(a, ca), (b, cb)| {
            let key_a = ca.days_until.unwrap_or(i64::MAX);
            let key_b = cb.days_until.unwrap_or(i64::MAX);
            key_a.cmp(&key_b).then_with(|| a.name.cmp(&b.name))
        });
        classified
    }
}

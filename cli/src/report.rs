//! Plain-text listings for the terminal.

use chrono::NaiveDate;
use pantry_core::{ExpiryClassification, Inventory, InventoryItem, RecipeBook};

fn item_line(item: &InventoryItem, classification: &ExpiryClassification) -> String {
    let mut line = format!("{:<4} {:<12} {:<10}", item.id, item.name, item.quantity);
    if let Some(date) = item.expires {
        line.push_str(&format!(" exp {}", date));
    }
    let label = classification.label();
    if !label.is_empty() {
        line.push_str(&format!("  ({})", label));
    }
    line
}

pub fn print_inventory(inventory: &Inventory, today: NaiveDate) {
    if inventory.is_empty() {
        println!("Your kitchen is empty");
        return;
    }

    for (item, classification) in inventory.sorted_by_expiry(today) {
        println!("{}", item_line(item, &classification));
    }
}

pub fn print_expiring(inventory: &Inventory, today: NaiveDate) {
    let sorted = inventory.sorted_by_expiry(today);
    let (urgent, fresh): (Vec<_>, Vec<_>) =
        sorted.into_iter().partition(|(_, c)| c.needs_attention());

    if !urgent.is_empty() {
        println!("About to go bad:");
        for (item, classification) in &urgent {
            println!("  {}", item_line(item, classification));
        }
    }

    println!("Still fresh:");
    for (item, classification) in &fresh {
        println!("  {}", item_line(item, classification));
    }
}

pub fn print_recipes(book: &RecipeBook) {
    for recipe in book.recipes() {
        println!("{:<38} {}", recipe.name, recipe.tags.join(", "));
    }

    if book.available().is_empty() {
        println!("\nNo more recipes available");
    } else {
        println!("\nCatalog:");
        for recipe in book.available() {
            println!("  [{}] {}", recipe.id, recipe.name);
        }
    }
}

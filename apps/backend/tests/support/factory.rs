//! Fixture drinks written straight through the repository.

use coffee_backend::domain::drink::{Drink, Ingredient, NewDrink, Recipe};
use coffee_backend::repos::drinks;
use sea_orm::DatabaseConnection;
use serde_json::{json, Value};

pub fn ingredient(name: &str, color: &str, parts: u32) -> Ingredient {
    Ingredient {
        name: name.to_string(),
        color: color.to_string(),
        parts,
    }
}

pub async fn create_drink(db: &DatabaseConnection, title: &str, recipe: Vec<Ingredient>) -> Drink {
    drinks::create(
        db,
        &NewDrink {
            title: title.to_string(),
            recipe: Recipe(recipe),
        },
    )
    .await
    .expect("insert fixture drink")
}

pub async fn create_water(db: &DatabaseConnection) -> Drink {
    create_drink(db, "water", vec![ingredient("water", "blue", 1)]).await
}

pub async fn create_latte(db: &DatabaseConnection) -> Drink {
    create_drink(
        db,
        "latte",
        vec![ingredient("espresso", "brown", 1), ingredient("milk", "white", 3)],
    )
    .await
}

/// POST body for a two-ingredient drink.
pub fn flat_white_body() -> Value {
    json!({
        "title": "flat white",
        "recipe": [
            {"name": "espresso", "color": "brown", "parts": 2},
            {"name": "steamed milk", "color": "white", "parts": 2}
        ]
    })
}

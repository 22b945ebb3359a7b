//! Drinks, their recipes and the two client-facing projections.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::AppError;

/// One recipe line: `parts` units of a named, coloured ingredient.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ingredient {
    pub name: String,
    pub color: String,
    pub parts: u32,
}

/// Ingredient as shown to anonymous clients: colour only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShortIngredient {
    pub color: String,
}

/// Ordered list of ingredients. Serialised as a JSON array, both on the wire
/// and in the `recipe` column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Recipe(pub Vec<Ingredient>);

impl Recipe {
    /// Interpret a request's `recipe` value.
    ///
    /// Accepts an array of ingredients (possibly empty), or a single
    /// ingredient object standing for a one-element recipe.
    pub fn from_value(value: &Value) -> Result<Self, AppError> {
        let ingredients = match value {
            Value::Array(items) => items
                .iter()
                .map(parse_ingredient)
                .collect::<Result<Vec<_>, _>>()?,
            Value::Object(_) => vec![parse_ingredient(value)?],
            _ => {
                return Err(AppError::unprocessable(
                    "recipe must be a list of ingredients",
                ))
            }
        };

        Ok(Recipe(ingredients))
    }

    /// Text stored in the `recipe` column.
    pub fn to_storage(&self) -> Result<String, AppError> {
        serde_json::to_string(&self.0)
            .map_err(|e| AppError::internal(format!("failed to serialise recipe: {e}")))
    }

    /// Parse the `recipe` column. Stored rows are written by this service, so
    /// a row that fails to parse is corrupt and reported as internal.
    pub fn from_storage(raw: &str, drink_id: i32) -> Result<Self, AppError> {
        serde_json::from_str(raw).map_err(|e| {
            AppError::internal(format!("recipe stored for drink {drink_id} is not valid: {e}"))
        })
    }

    pub fn short(&self) -> Vec<ShortIngredient> {
        self.0
            .iter()
            .map(|i| ShortIngredient {
                color: i.color.clone(),
            })
            .collect()
    }
}

fn parse_ingredient(value: &Value) -> Result<Ingredient, AppError> {
    Ingredient::deserialize(value).map_err(|e| {
        AppError::unprocessable(format!(
            "ingredient must have string name/color and integer parts: {e}"
        ))
    })
}

/// A stored drink.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Drink {
    pub id: i32,
    pub title: String,
    pub recipe: Recipe,
}

/// Public projection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrinkShort {
    pub id: i32,
    pub title: String,
    pub recipe: Vec<ShortIngredient>,
}

/// Full projection, shown to holders of a drinks permission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrinkLong {
    pub id: i32,
    pub title: String,
    pub recipe: Recipe,
}

impl Drink {
    pub fn short(&self) -> DrinkShort {
        DrinkShort {
            id: self.id,
            title: self.title.clone(),
            recipe: self.recipe.short(),
        }
    }

    pub fn long(&self) -> DrinkLong {
        DrinkLong {
            id: self.id,
            title: self.title.clone(),
            recipe: self.recipe.clone(),
        }
    }
}

/// Validated input for creating a drink.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewDrink {
    pub title: String,
    pub recipe: Recipe,
}

impl NewDrink {
    /// Validate a create request body. Every problem is unprocessable (422).
    pub fn from_body(body: &Value) -> Result<Self, AppError> {
        let fields = body
            .as_object()
            .ok_or_else(|| AppError::unprocessable("body must be a JSON object"))?;

        let title = title_field(fields).map_err(AppError::unprocessable)?;
        let recipe = fields
            .get("recipe")
            .ok_or_else(|| AppError::unprocessable("recipe is required"))
            .and_then(Recipe::from_value)?;

        Ok(NewDrink { title, recipe })
    }
}

/// Validate the `title` of an update request body. Problems are 400.
pub fn title_from_update(body: &Value) -> Result<String, AppError> {
    let fields = body
        .as_object()
        .ok_or_else(|| AppError::bad_request("body must be a JSON object"))?;
    title_field(fields).map_err(AppError::bad_request)
}

/// Titles are non-empty strings.
fn title_field(fields: &Map<String, Value>) -> Result<String, &'static str> {
    match fields.get("title") {
        Some(Value::String(title)) if !title.is_empty() => Ok(title.clone()),
        Some(Value::String(_)) => Err("title must not be empty"),
        Some(_) => Err("title must be a string"),
        None => Err("title is required"),
    }
}

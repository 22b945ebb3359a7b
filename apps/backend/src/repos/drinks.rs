//! Repository for drinks: storage rows in, domain drinks out.

use sea_orm::ConnectionTrait;

use crate::adapters::drinks_sea as adapter;
use crate::domain::drink::{Drink, NewDrink, Recipe};
use crate::entities::drinks;
use crate::error::AppError;

impl TryFrom<drinks::Model> for Drink {
    type Error = AppError;

    fn try_from(model: drinks::Model) -> Result<Self, Self::Error> {
        let recipe = Recipe::from_storage(&model.recipe, model.id)?;
        Ok(Drink {
            id: model.id,
            title: model.title,
            recipe,
        })
    }
}

/// Every drink, ordered by id.
pub async fn list_all<C: ConnectionTrait + Send + Sync>(conn: &C) -> Result<Vec<Drink>, AppError> {
    adapter::find_all(conn)
        .await?
        .into_iter()
        .map(Drink::try_from)
        .collect()
}

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: i32,
) -> Result<Option<Drink>, AppError> {
    adapter::find_by_id(conn, id)
        .await?
        .map(Drink::try_from)
        .transpose()
}

pub async fn create<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    new_drink: &NewDrink,
) -> Result<Drink, AppError> {
    let recipe = new_drink.recipe.to_storage()?;
    let model = adapter::insert(conn, &new_drink.title, &recipe).await?;
    Drink::try_from(model)
}

/// Retitle an already-loaded drink; `Ok(None)` when its row is gone.
pub async fn update_title<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    drink: Drink,
    title: &str,
) -> Result<Option<Drink>, AppError> {
    let result = adapter::set_title(conn, drink.id, title).await?;
    if result.rows_affected == 0 {
        return Ok(None);
    }
    Ok(Some(Drink {
        title: title.to_string(),
        ..drink
    }))
}

/// Remove a drink; returns whether a row was deleted.
pub async fn delete<C: ConnectionTrait + Send + Sync>(conn: &C, id: i32) -> Result<bool, AppError> {
    let result = adapter::delete_by_id(conn, id).await?;
    Ok(result.rows_affected > 0)
}

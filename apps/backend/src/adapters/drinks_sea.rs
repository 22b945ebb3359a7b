//! SeaORM adapter for the drinks table.

use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DeleteResult, EntityTrait, NotSet,
    QueryFilter, QueryOrder, Set, UpdateResult,
};

use crate::entities::drinks;

pub async fn find_all<C: ConnectionTrait + Send + Sync>(
    conn: &C,
) -> Result<Vec<drinks::Model>, sea_orm::DbErr> {
    drinks::Entity::find()
        .order_by_asc(drinks::Column::Id)
        .all(conn)
        .await
}

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: i32,
) -> Result<Option<drinks::Model>, sea_orm::DbErr> {
    drinks::Entity::find_by_id(id).one(conn).await
}

pub async fn insert<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    title: &str,
    recipe: &str,
) -> Result<drinks::Model, sea_orm::DbErr> {
    let active = drinks::ActiveModel {
        id: NotSet,
        title: Set(title.to_string()),
        recipe: Set(recipe.to_string()),
    };
    active.insert(conn).await
}

pub async fn set_title<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: i32,
    title: &str,
) -> Result<UpdateResult, sea_orm::DbErr> {
    drinks::Entity::update_many()
        .col_expr(drinks::Column::Title, Expr::value(title))
        .filter(drinks::Column::Id.eq(id))
        .exec(conn)
        .await
}

pub async fn delete_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: i32,
) -> Result<DeleteResult, sea_orm::DbErr> {
    drinks::Entity::delete_by_id(id).exec(conn).await
}

use sea_orm::{ActiveModelTrait, ActiveValue::NotSet, DatabaseConnection, EntityTrait, QueryOrder, Set};
use validator::Validate;

use crate::{
    dto::cars::CreateCarRequest,
    entity::cars::{ActiveModel, Column, Entity as Cars},
    error::{AppError, AppResult},
    models::Car,
};

pub async fn list_cars(orm: &DatabaseConnection) -> AppResult<Vec<Car>> {
    let cars = Cars::find()
        .order_by_asc(Column::Id)
        .all(orm)
        .await?
        .into_iter()
        .map(Car::from)
        .collect();
    Ok(cars)
}

pub async fn get_car(orm: &DatabaseConnection, id: i32) -> AppResult<Car> {
    Cars::find_by_id(id)
        .one(orm)
        .await?
        .map(Car::from)
        .ok_or(AppError::NotFound)
}

pub async fn add_car(orm: &DatabaseConnection, payload: CreateCarRequest) -> AppResult<Car> {
    payload.validate()?;
    let car = ActiveModel {
        id: NotSet,
        name: Set(payload.name),
        description: Set(payload.description),
    }
    .insert(orm)
    .await?;

    tracing::info!(car_id = car.id, "car added");
    Ok(car.into())
}

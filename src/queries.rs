//! Query descriptors: plain filter and pagination parameters, each knowing how to run
//! itself against any SeaORM connection (pool or transaction).

use sea_orm::{
    ColumnTrait, Condition, ConnectionTrait, DbErr, EntityTrait, ModelTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect,
};

use crate::{
    entity::{
        basket_items::{self, Entity as BasketItems},
        baskets::{self, Entity as Baskets},
        catalog_items::{self, Entity as CatalogItems},
    },
    models::{Basket, CatalogItem},
};

/// Brand/type filter over catalog items. `None` means "any".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CatalogFilter {
    pub brand_id: Option<i32>,
    pub type_id: Option<i32>,
}

impl CatalogFilter {
    pub fn new(brand_id: Option<i32>, type_id: Option<i32>) -> Self {
        Self { brand_id, type_id }
    }

    pub fn matches(&self, item: &CatalogItem) -> bool {
        self.brand_id.is_none_or(|brand| item.catalog_brand_id == brand)
            && self.type_id.is_none_or(|kind| item.catalog_type_id == kind)
    }

    pub fn condition(&self) -> Condition {
        let mut condition = Condition::all();
        if let Some(brand_id) = self.brand_id {
            condition = condition.add(catalog_items::Column::CatalogBrandId.eq(brand_id));
        }
        if let Some(type_id) = self.type_id {
            condition = condition.add(catalog_items::Column::CatalogTypeId.eq(type_id));
        }
        condition
    }

    pub async fn count<C: ConnectionTrait>(&self, db: &C) -> Result<u64, DbErr> {
        CatalogItems::find()
            .filter(self.condition())
            .count(db)
            .await
    }
}

/// A filtered window of catalog items, ordered by id so page boundaries are stable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogFilterPaginated {
    pub filter: CatalogFilter,
    pub skip: u64,
    pub take: u64,
}

impl CatalogFilterPaginated {
    pub fn new(skip: u64, take: u64, filter: CatalogFilter) -> Self {
        Self { filter, skip, take }
    }

    pub async fn list<C: ConnectionTrait>(
        &self,
        db: &C,
    ) -> Result<Vec<catalog_items::Model>, DbErr> {
        CatalogItems::find()
            .filter(self.filter.condition())
            .order_by_asc(catalog_items::Column::Id)
            .offset(self.skip)
            .limit(self.take)
            .all(db)
            .await
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogItemsByIds {
    pub ids: Vec<i32>,
}

impl CatalogItemsByIds {
    pub fn new(ids: impl IntoIterator<Item = i32>) -> Self {
        let mut ids: Vec<i32> = ids.into_iter().collect();
        ids.sort_unstable();
        ids.dedup();
        Self { ids }
    }

    pub async fn list<C: ConnectionTrait>(
        &self,
        db: &C,
    ) -> Result<Vec<catalog_items::Model>, DbErr> {
        if self.ids.is_empty() {
            return Ok(Vec::new());
        }
        CatalogItems::find()
            .filter(catalog_items::Column::Id.is_in(self.ids.clone()))
            .all(db)
            .await
    }
}

/// Loads one basket together with its lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BasketWithItems {
    ById(i32),
    ByBuyer(String),
}

impl BasketWithItems {
    pub fn by_id(basket_id: i32) -> Self {
        Self::ById(basket_id)
    }

    pub fn by_buyer(buyer_id: impl Into<String>) -> Self {
        Self::ByBuyer(buyer_id.into())
    }

    pub async fn load<C: ConnectionTrait>(&self, db: &C) -> Result<Option<Basket>, DbErr> {
        let finder = match self {
            Self::ById(id) => Baskets::find_by_id(*id),
            Self::ByBuyer(buyer_id) => Baskets::find()
                .filter(baskets::Column::BuyerId.eq(buyer_id.as_str()))
                .order_by_asc(baskets::Column::Id),
        };
        let Some(basket) = finder.one(db).await? else {
            return Ok(None);
        };
        let items = basket
            .find_related(BasketItems)
            .order_by_asc(basket_items::Column::Id)
            .all(db)
            .await?;
        Ok(Some(Basket::from_entities(basket, items)))
    }
}

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "catalog_items")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub description: String,
    pub price: i64,
    pub picture_uri: String,
    pub catalog_brand_id: i32,
    pub catalog_type_id: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::catalog_brands::Entity",
        from = "Column::CatalogBrandId",
        to = "super::catalog_brands::Column::Id"
    )]
    CatalogBrands,
    #[sea_orm(
        belongs_to = "super::catalog_types::Entity",
        from = "Column::CatalogTypeId",
        to = "super::catalog_types::Column::Id"
    )]
    CatalogTypes,
}

impl Related<super::catalog_brands::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CatalogBrands.def()
    }
}

impl Related<super::catalog_types::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CatalogTypes.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

pub mod basket_items;
pub mod baskets;
pub mod cars;
pub mod catalog_brands;
pub mod catalog_items;
pub mod catalog_types;

pub use basket_items::Entity as BasketItems;
pub use baskets::Entity as Baskets;
pub use cars::Entity as Cars;
pub use catalog_brands::Entity as CatalogBrands;
pub use catalog_items::Entity as CatalogItems;
pub use catalog_types::Entity as CatalogTypes;

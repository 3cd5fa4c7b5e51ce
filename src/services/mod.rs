pub mod basket_service;
pub mod basket_view_service;
pub mod cached_catalog_service;
pub mod car_service;
pub mod catalog_item_service;
pub mod catalog_service;

//! Room catalog service: admin CRUD over rooms.

mod service;

pub use service::RoomCatalogService;

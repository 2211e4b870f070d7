pub mod admin_routes;
pub mod person_routes;

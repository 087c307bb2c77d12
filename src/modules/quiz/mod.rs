pub mod controller;
pub mod crud;
pub mod generator;
pub mod model;
pub mod routes;
pub mod schema;

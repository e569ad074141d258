pub mod form;
pub mod routes;

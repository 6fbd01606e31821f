//! REST API endpoint tests

mod health_tests;
mod recipe_tests;
mod user_tests;

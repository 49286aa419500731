pub mod fda_check;
pub mod health;
pub mod ingredients;

//! Request/response pairs for the cart routes.

pub mod add;
pub mod count;
pub mod mini;
pub mod quantity;

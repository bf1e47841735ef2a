pub mod add;
pub mod count;
pub mod line;
pub mod preview;

pub use add::Add;
pub use count::Count;
pub use line::{Decrease, Increase};
pub use preview::Preview;

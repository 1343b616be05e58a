pub mod geo;
pub mod line_item;
pub mod order;
pub mod product;

pub use geo::*;
pub use line_item::*;
pub use order::*;
pub use product::*;

pub mod banner;
pub mod cart;
pub mod discount;
pub mod order;
pub mod product;
pub mod shipping;
pub mod user;

pub use banner::*;
pub use cart::*;
pub use discount::*;
pub use order::*;
pub use product::*;
pub use shipping::*;
pub use user::*;

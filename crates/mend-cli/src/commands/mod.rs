pub mod audit;
pub mod dispatch;
pub mod fix;

mod shared;

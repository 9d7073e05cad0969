pub mod builder;
pub mod params;

pub use builder::{insert, select_all, QueryBuf};
pub use params::PgBindValue;

mod migrations;
mod postgres;
mod seed;

pub use migrations::*;
pub use postgres::*;
pub use seed::*;

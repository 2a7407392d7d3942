mod common;
mod question;
mod response;
mod section;
mod survey;

pub use common::*;
pub use question::*;
pub use response::*;
pub use section::*;
pub use survey::*;

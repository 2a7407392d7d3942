mod option_repository;
mod response_repository;
mod section_repository;
mod survey_repository;

pub use option_repository::*;
pub use response_repository::*;
pub use section_repository::*;
pub use survey_repository::*;

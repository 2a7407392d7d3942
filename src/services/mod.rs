mod option_service;
mod response_service;
mod section_service;
mod survey_service;

pub use option_service::*;
pub use response_service::*;
pub use section_service::*;
pub use survey_service::*;

#[cfg(test)]
mod tests;

pub mod health_checks;
pub mod json_error;
pub mod patch;
pub mod unique_constraint;
pub mod validated_json;

pub use validated_json::ValidatedJson;

/// Direction predictors replayed over synthetic branch traces.
pub mod predictors;

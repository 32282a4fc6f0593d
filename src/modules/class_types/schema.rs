use serde::{Deserialize, Serialize};
use validator::Validate;

use super::model::ClassType;

#[derive(Debug, Deserialize, Validate)]
pub struct CreateClassTypeRequest {
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: String,
    pub description: Option<String>,
    pub difficulty_level: Option<String>,
    #[validate(range(min = 0.0, message = "Base price cannot be negative"))]
    #[serde(default)]
    pub base_price: f64,
}

#[derive(Debug, Serialize)]
pub struct ClassTypeResponse {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub difficulty_level: Option<String>,
    pub base_price: f64,
}

impl From<ClassType> for ClassTypeResponse {
    fn from(ct: ClassType) -> Self {
        Self {
            id: ct.id,
            name: ct.name,
            description: ct.description,
            difficulty_level: ct.difficulty_level,
            base_price: ct.base_price,
        }
    }
}

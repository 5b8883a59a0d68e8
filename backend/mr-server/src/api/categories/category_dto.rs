use mr_core::Category;

use serde::Serialize;
use uuid::Uuid;

#[derive(Debug, Serialize)]
pub struct CategoryDto {
    pub id: Uuid,
    pub name: String,
    pub icon: Option<String>,
    pub description: Option<String>,
}

impl From<Category> for CategoryDto {
    fn from(category: Category) -> Self {
        Self {
            id: category.id,
            name: category.name,
            icon: category.icon,
            description: category.description,
        }
    }
}

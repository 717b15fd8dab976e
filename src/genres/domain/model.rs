use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::core::domain::Identifiable;

// Genre names are unique by convention only; the create flow checks for an
// existing name, storage does not enforce it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenreEntity {
    pub id: String,
    pub name: String,
}

impl GenreEntity {
    pub fn new(name: &str) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
        }
    }

    pub fn url(&self) -> String {
        format!("/catalog/genre/{}", self.id)
    }
}

impl Identifiable for GenreEntity {
    fn id(&self) -> String {
        self.id.to_string()
    }

    fn natural_key(&self) -> String {
        self.name.to_string()
    }
}

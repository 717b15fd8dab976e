use std::fmt;
use std::fmt::{Display, Formatter};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::core::domain::Identifiable;

#[derive(Debug, PartialEq, Clone, Copy, Serialize, Deserialize)]
pub enum CopyStatus {
    Available,
    Maintenance,
    Loaned,
    Reserved,
}

impl From<String> for CopyStatus {
    fn from(s: String) -> Self {
        match s.as_str() {
            "Available" => CopyStatus::Available,
            "Maintenance" => CopyStatus::Maintenance,
            "Loaned" => CopyStatus::Loaned,
            "Reserved" => CopyStatus::Reserved,
            // model default for anything a form sneaks past the enum
            _ => CopyStatus::Maintenance,
        }
    }
}

impl Display for CopyStatus {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            CopyStatus::Available => write!(f, "Available"),
            CopyStatus::Maintenance => write!(f, "Maintenance"),
            CopyStatus::Loaned => write!(f, "Loaned"),
            CopyStatus::Reserved => write!(f, "Reserved"),
        }
    }
}

// BookInstanceEntity is one physical copy of a book. The book reference is a
// stored id; deleting the book leaves the copy behind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookInstanceEntity {
    pub id: String,
    pub book: String,
    pub imprint: String,
    pub status: CopyStatus,
    pub due_back: Option<NaiveDate>,
}

impl BookInstanceEntity {
    pub fn new(book: &str, imprint: &str, status: CopyStatus, due_back: Option<NaiveDate>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            book: book.to_string(),
            imprint: imprint.to_string(),
            status,
            due_back,
        }
    }

    pub fn url(&self) -> String {
        format!("/catalog/bookinstance/{}", self.id)
    }
}

impl Identifiable for BookInstanceEntity {
    fn id(&self) -> String {
        self.id.to_string()
    }

    fn natural_key(&self) -> String {
        self.imprint.to_string()
    }
}

#[cfg(test)]
mod tests {
    use crate::instances::domain::model::{BookInstanceEntity, CopyStatus};

    #[tokio::test]
    async fn test_should_parse_copy_status() {
        assert_eq!(CopyStatus::Available, CopyStatus::from("Available".to_string()));
        assert_eq!(CopyStatus::Loaned, CopyStatus::from("Loaned".to_string()));
        assert_eq!(CopyStatus::Maintenance, CopyStatus::from("bogus".to_string()));
        assert_eq!("Reserved", CopyStatus::Reserved.to_string());
    }

    #[tokio::test]
    async fn test_should_build_book_instance() {
        let copy = BookInstanceEntity::new("book-1", "First edition", CopyStatus::Available, None);
        assert_eq!("book-1", copy.book.as_str());
        assert_eq!(format!("/catalog/bookinstance/{}", copy.id), copy.url());
    }
}

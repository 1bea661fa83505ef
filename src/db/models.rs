use crate::schema::{categories, questions};
use diesel::{Identifiable, Insertable, Queryable, Selectable};
use serde::{Deserialize, Serialize};

/// A trivia question as stored and as returned by the API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Queryable, Selectable, Identifiable)]
#[diesel(table_name = questions)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct Question {
    /// Generated primary key
    pub id: i32,
    /// Question text
    pub question: String,
    /// Expected answer
    pub answer: String,
    /// Id of the owning category
    pub category: i32,
    /// Difficulty rating
    pub difficulty: i32,
}

/// Values for a question that has not been inserted yet
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = questions)]
pub struct NewQuestion {
    pub question: String,
    pub answer: String,
    pub category: i32,
    pub difficulty: i32,
}

/// A question category such as "Geography"
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Queryable, Selectable, Identifiable)]
#[diesel(table_name = categories)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct Category {
    pub id: i32,
    /// Display name
    #[serde(rename = "type")]
    pub type_: String,
}

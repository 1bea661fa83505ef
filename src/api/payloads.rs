//! Request and response bodies of the HTTP API

use crate::db::{Category, Question};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;

/// `?page=N` query, 1-based
#[derive(Debug, Deserialize)]
pub struct PageParams {
    #[serde(default = "first_page")]
    pub page: u32,
}

fn first_page() -> u32 {
    1
}

/// Body of `POST /questions`
#[derive(Debug, Deserialize)]
pub struct CreateQuestionRequest {
    pub question: String,
    pub answer: String,
    #[serde(deserialize_with = "int_or_numeric_string")]
    pub category: i32,
    #[serde(deserialize_with = "int_or_numeric_string")]
    pub difficulty: i32,
}

/// Body of `POST /quizzes`
#[derive(Debug, Deserialize)]
pub struct QuizRequest {
    /// Ids already served during this quiz; `null` is treated as empty
    #[serde(default)]
    pub previous_questions: Option<Vec<i32>>,
    pub quiz_category: QuizCategory,
}

/// Category chosen on the quiz screen, id 0 meaning all categories
#[derive(Debug, Deserialize)]
pub struct QuizCategory {
    #[serde(deserialize_with = "int_or_numeric_string")]
    pub id: i32,
}

#[derive(Debug, Serialize)]
pub struct CategoriesResponse {
    pub success: bool,
    pub categories: Vec<Category>,
}

#[derive(Debug, Serialize)]
pub struct QuestionPageResponse {
    pub success: bool,
    pub questions: Vec<Question>,
    #[serde(rename = "totalQuestions")]
    pub total_questions: usize,
    /// Category id to display name
    pub categories: BTreeMap<i32, String>,
    pub current_category: Option<i32>,
}

#[derive(Debug, Serialize)]
pub struct DeleteQuestionResponse {
    pub success: bool,
    pub questions: Vec<Question>,
    #[serde(rename = "totalQuestions")]
    pub total_questions: usize,
    pub deleted: i32,
}

#[derive(Debug, Serialize)]
pub struct CreateQuestionResponse {
    pub success: bool,
    pub question: Question,
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub success: bool,
    pub questions: Vec<Question>,
    #[serde(rename = "totalQuestions")]
    pub total_questions: usize,
    #[serde(rename = "currentCategory")]
    pub current_category: String,
}

#[derive(Debug, Serialize)]
pub struct CategoryQuestionsResponse {
    pub success: bool,
    pub questions: Vec<Question>,
    #[serde(rename = "totalQuestions")]
    pub total_questions: usize,
    #[serde(rename = "currentCategory")]
    pub current_category: i32,
}

#[derive(Debug, Serialize)]
pub struct QuizResponse {
    pub success: bool,
    /// Serialized as `false` once the quiz is exhausted
    #[serde(serialize_with = "question_or_false")]
    pub question: Option<Question>,
}

fn question_or_false<S: Serializer>(
    question: &Option<Question>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match question {
        Some(q) => q.serialize(serializer),
        None => serializer.serialize_bool(false),
    }
}

/// Accepts `3` as well as `"3"`; the web client posts form values as strings.
fn int_or_numeric_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i32, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum IntOrString {
        Int(i32),
        Str(String),
    }

    match IntOrString::deserialize(deserializer)? {
        IntOrString::Int(n) => Ok(n),
        IntOrString::Str(s) => s.trim().parse().map_err(|_| {
            serde::de::Error::custom(format!("expected an integer, found \"{}\"", s))
        }),
    }
}

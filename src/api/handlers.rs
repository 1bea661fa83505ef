use crate::api::errors::ApiError;
use crate::api::extractors::{ApiJson, ApiPath, ApiQuery};
use crate::api::payloads::*;
use crate::config::ServerConfig;
use crate::core::{choose_next_question, paginate, CategorySelector};
use crate::db::{CategoryRepository, Database, NewQuestion, QuestionRepository};
use axum::{extract::Extension, Json};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, info};

/// Inclusive range accepted for a question's difficulty rating
pub const DIFFICULTY_RANGE: std::ops::RangeInclusive<i32> = 1..=5;

/// Lists every category
#[axum::debug_handler]
pub async fn list_categories(
    Extension(database): Extension<Database>,
) -> Result<Json<CategoriesResponse>, ApiError> {
    let mut conn = database.get_conn()?;
    let categories = CategoryRepository::new(&mut conn).list_categories()?;

    Ok(Json(CategoriesResponse {
        success: true,
        categories,
    }))
}

/// Lists one page of questions together with the category names.
///
/// An empty page is a 404, whether the page is past the end or there are no
/// questions at all.
#[axum::debug_handler]
pub async fn list_questions(
    Extension(database): Extension<Database>,
    Extension(config): Extension<Arc<ServerConfig>>,
    ApiQuery(params): ApiQuery<PageParams>,
) -> Result<Json<QuestionPageResponse>, ApiError> {
    let mut conn = database.get_conn()?;
    let questions = QuestionRepository::new(&mut conn).list_questions()?;
    let categories = CategoryRepository::new(&mut conn).list_categories()?;

    let page = paginate(&questions, params.page, config.page_size);
    if page.is_empty() {
        return Err(ApiError::NotFound(format!("page {} of questions", params.page)));
    }
    debug!("Serving page {} of {} questions", params.page, questions.len());

    Ok(Json(QuestionPageResponse {
        success: true,
        questions: page.to_vec(),
        total_questions: questions.len(),
        categories: categories.into_iter().map(|c| (c.id, c.type_)).collect::<BTreeMap<_, _>>(),
        current_category: None,
    }))
}

/// Deletes a question and returns the requested page of what remains
#[axum::debug_handler]
pub async fn delete_question(
    ApiPath(requested_id): ApiPath<i64>,
    Extension(database): Extension<Database>,
    Extension(config): Extension<Arc<ServerConfig>>,
    ApiQuery(params): ApiQuery<PageParams>,
) -> Result<Json<DeleteQuestionResponse>, ApiError> {
    // ids outside the column's range cannot exist
    let question_id = i32::try_from(requested_id)
        .map_err(|_| ApiError::NotFound(format!("question {}", requested_id)))?;

    let mut conn = database.get_conn()?;
    let mut repo = QuestionRepository::new(&mut conn);

    if !repo.delete_question(question_id)? {
        return Err(ApiError::NotFound(format!("question {}", question_id)));
    }
    info!("Deleted question {}", question_id);

    let remaining = repo.list_questions()?;
    let page = paginate(&remaining, params.page, config.page_size);

    Ok(Json(DeleteQuestionResponse {
        success: true,
        questions: page.to_vec(),
        total_questions: remaining.len(),
        deleted: question_id,
    }))
}

/// Creates a question after checking its text, category and difficulty
#[axum::debug_handler]
pub async fn create_question(
    Extension(database): Extension<Database>,
    ApiJson(payload): ApiJson<CreateQuestionRequest>,
) -> Result<Json<CreateQuestionResponse>, ApiError> {
    if payload.question.trim().is_empty() || payload.answer.trim().is_empty() {
        return Err(ApiError::BadRequest(
            "question and answer must not be empty".to_string(),
        ));
    }
    if !DIFFICULTY_RANGE.contains(&payload.difficulty) {
        return Err(ApiError::BadRequest(format!(
            "difficulty must be between {} and {}",
            DIFFICULTY_RANGE.start(),
            DIFFICULTY_RANGE.end()
        )));
    }

    let mut conn = database.get_conn()?;
    if CategoryRepository::new(&mut conn)
        .get_category(payload.category)?
        .is_none()
    {
        return Err(ApiError::BadRequest(format!(
            "category {} does not exist",
            payload.category
        )));
    }

    let question = QuestionRepository::new(&mut conn).insert_question(&NewQuestion {
        question: payload.question,
        answer: payload.answer,
        category: payload.category,
        difficulty: payload.difficulty,
    })?;
    info!("Created question {} in category {}", question.id, question.category);

    Ok(Json(CreateQuestionResponse {
        success: true,
        question,
    }))
}

/// Case-insensitive search over question text
#[axum::debug_handler]
pub async fn search_questions(
    ApiPath(search_term): ApiPath<String>,
    Extension(database): Extension<Database>,
    Extension(config): Extension<Arc<ServerConfig>>,
    ApiQuery(params): ApiQuery<PageParams>,
) -> Result<Json<SearchResponse>, ApiError> {
    let mut conn = database.get_conn()?;
    let matches = QuestionRepository::new(&mut conn).search_questions(&search_term)?;
    debug!("Search for {:?} matched {} questions", search_term, matches.len());

    let page = paginate(&matches, params.page, config.page_size);
    if page.is_empty() {
        return Err(ApiError::NotFound(format!(
            "questions matching \"{}\"",
            search_term
        )));
    }

    Ok(Json(SearchResponse {
        success: true,
        questions: page.to_vec(),
        total_questions: matches.len(),
        current_category: String::new(),
    }))
}

/// Lists the questions of an existing category
#[axum::debug_handler]
pub async fn list_category_questions(
    ApiPath(category_id): ApiPath<i32>,
    Extension(database): Extension<Database>,
    Extension(config): Extension<Arc<ServerConfig>>,
    ApiQuery(params): ApiQuery<PageParams>,
) -> Result<Json<CategoryQuestionsResponse>, ApiError> {
    let mut conn = database.get_conn()?;
    let category = CategoryRepository::new(&mut conn)
        .get_category(category_id)?
        .ok_or_else(|| ApiError::NotFound(format!("category {}", category_id)))?;

    let questions = QuestionRepository::new(&mut conn).questions_in_category(category.id)?;
    let page = paginate(&questions, params.page, config.page_size);

    Ok(Json(CategoryQuestionsResponse {
        success: true,
        questions: page.to_vec(),
        total_questions: questions.len(),
        current_category: category.id,
    }))
}

/// Serves a random question that the quiz has not shown yet.
///
/// `question` is `false` once every eligible question has been served.
#[axum::debug_handler]
pub async fn next_quiz_question(
    Extension(database): Extension<Database>,
    ApiJson(payload): ApiJson<QuizRequest>,
) -> Result<Json<QuizResponse>, ApiError> {
    let selector = CategorySelector::from_id(payload.quiz_category.id);
    let previous = payload.previous_questions.unwrap_or_default();

    let mut conn = database.get_conn()?;
    if let CategorySelector::Category(category_id) = selector {
        if CategoryRepository::new(&mut conn)
            .get_category(category_id)?
            .is_none()
        {
            return Err(ApiError::NotFound(format!("category {}", category_id)));
        }
    }

    let candidates = QuestionRepository::new(&mut conn).quiz_candidates(selector, &previous)?;
    let question =
        choose_next_question(&candidates, selector, &previous, &mut rand::thread_rng()).cloned();
    if question.is_none() {
        debug!("Quiz exhausted after {} questions", previous.len());
    }

    Ok(Json(QuizResponse {
        success: true,
        question,
    }))
}

/// Fallback for unknown routes
pub async fn route_not_found() -> ApiError {
    ApiError::NotFound("no such route".to_string())
}

/// Fallback for known routes called with an unsupported method
pub async fn method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed
}

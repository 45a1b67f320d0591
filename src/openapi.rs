use axum::response::Json;
use utoipa::OpenApi;

use crate::error::ErrorBody;
use crate::types::{
    CategoriesResponse, Category, CategoryQuestionsResponse, CreateQuestionRequest,
    CreatedResponse, DeleteResponse, Question, QuestionsResponse, QuizRequest, SearchRequest,
    SearchResponse,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::list_categories,
        crate::handlers::list_questions,
        crate::handlers::delete_question,
        crate::handlers::create_question,
        crate::handlers::search_questions,
        crate::handlers::category_questions,
        crate::handlers::play_quiz
    ),
    components(schemas(
        Question,
        Category,
        CreateQuestionRequest,
        SearchRequest,
        QuizRequest,
        CategoriesResponse,
        QuestionsResponse,
        DeleteResponse,
        CreatedResponse,
        SearchResponse,
        CategoryQuestionsResponse,
        ErrorBody
    )),
    tags(
        (name = "Categories", description = "Category listing"),
        (name = "Questions", description = "Question bank"),
        (name = "Quizzes", description = "Quiz question picker")
    ),
    info(
        title = "Trivia API",
        description = "Trivia question bank and quiz picker",
        version = "1.0.0"
    )
)]
pub struct ApiDoc;

pub async fn openapi_handler() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

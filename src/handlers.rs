use crate::error::{ApiError, ApiResult, ErrorBody};
use crate::extract::JsonBody;
use crate::pagination::{paginate, PageQuery};
use crate::quiz::next_question;
use crate::state::AppState;
use crate::types::{
    category_map, CategoriesResponse, CategoryQuestionsResponse, CreateQuestionRequest,
    CreatedResponse, DeleteResponse, Question, QuestionsResponse, QuizRequest, QuizResponse,
    SearchRequest, SearchResponse,
};
use axum::{
    extract::{Path, Query, State},
    http::Uri,
    response::Json,
};
use tracing::{debug, error, info};

#[utoipa::path(
    get,
    path = "/api/v1/categories",
    responses(
        (status = 200, description = "Every category keyed by id", body = CategoriesResponse),
        (status = 404, description = "No categories exist", body = ErrorBody)
    ),
    tag = "Categories"
)]
pub async fn list_categories(State(state): State<AppState>) -> ApiResult<Json<CategoriesResponse>> {
    let categories = state.repo().categories().await?;
    if categories.is_empty() {
        return Err(ApiError::not_found("no categories"));
    }

    Ok(Json(CategoriesResponse {
        success: true,
        total_categories: categories.len(),
        categories: category_map(&categories),
    }))
}

#[utoipa::path(
    get,
    path = "/api/v1/questions",
    params(PageQuery),
    responses(
        (status = 200, description = "One page of questions", body = QuestionsResponse),
        (status = 404, description = "Page is empty", body = ErrorBody)
    ),
    tag = "Questions"
)]
pub async fn list_questions(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> ApiResult<Json<QuestionsResponse>> {
    let questions = state.repo().questions().await?;
    let total_questions = questions.len();
    let page = paginate(questions, query.page());
    if page.is_empty() {
        return Err(ApiError::not_found(format!("questions page {}", query.page())));
    }

    let categories = state.repo().categories().await?;

    Ok(Json(QuestionsResponse {
        success: true,
        questions: page,
        total_questions,
        categories: category_map(&categories),
    }))
}

#[utoipa::path(
    delete,
    path = "/api/v1/questions/{id}",
    params(("id" = i64, Path, description = "Question id")),
    responses(
        (status = 200, description = "Question deleted", body = DeleteResponse),
        (status = 404, description = "No such question", body = ErrorBody),
        (status = 422, description = "Store rejected the delete", body = ErrorBody)
    ),
    tag = "Questions"
)]
pub async fn delete_question(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> ApiResult<Json<DeleteResponse>> {
    let id: i64 = raw_id
        .parse()
        .map_err(|_| ApiError::not_found(format!("question {}", raw_id)))?;

    let deleted = state
        .repo()
        .delete_question(id)
        .await
        .map_err(ApiError::Unprocessable)?;
    if !deleted {
        return Err(ApiError::not_found(format!("question {}", id)));
    }

    info!("Deleted question id={}", id);
    Ok(Json(DeleteResponse {
        success: true,
        delete: raw_id,
    }))
}

#[utoipa::path(
    post,
    path = "/api/v1/questions",
    params(PageQuery),
    request_body = CreateQuestionRequest,
    responses(
        (status = 200, description = "Question created", body = CreatedResponse),
        (status = 400, description = "Missing field or difficulty outside 1..=5", body = ErrorBody),
        (status = 422, description = "Store rejected the insert", body = ErrorBody)
    ),
    tag = "Questions"
)]
pub async fn create_question(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
    body: JsonBody<CreateQuestionRequest>,
) -> ApiResult<Json<CreatedResponse>> {
    let new = body.required()?.validate()?;

    let created = state
        .repo()
        .insert_question(&new)
        .await
        .map_err(ApiError::Unprocessable)?;
    info!(
        "Created question id={} category={} difficulty={}",
        created.id, created.category, created.difficulty
    );

    // The insert is committed at this point; a failed re-read is a server fault.
    let questions = state.repo().questions().await.map_err(|e| {
        error!("Question id={} was stored but the re-read failed", created.id);
        ApiError::Internal(e)
    })?;
    let total_questions = questions.len();

    Ok(Json(CreatedResponse {
        success: true,
        id: created.id,
        question: created.question,
        questions: paginate(questions, query.page()),
        total_questions,
    }))
}

#[utoipa::path(
    post,
    path = "/api/v1/questions/search",
    params(PageQuery),
    request_body = SearchRequest,
    responses(
        (status = 200, description = "Matching questions", body = SearchResponse),
        (status = 400, description = "Missing or empty searchTerm", body = ErrorBody),
        (status = 404, description = "Nothing matched on this page", body = ErrorBody)
    ),
    tag = "Questions"
)]
pub async fn search_questions(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
    body: JsonBody<SearchRequest>,
) -> ApiResult<Json<SearchResponse>> {
    let request = body.required()?;
    let term = request.term()?;

    let matches = state.repo().search_questions(term).await?;
    let total_questions = matches.len();
    debug!("Search term={:?} matched {}", term, total_questions);

    let page = paginate(matches, query.page());
    if page.is_empty() {
        return Err(ApiError::not_found(format!("questions matching {:?}", term)));
    }

    Ok(Json(SearchResponse {
        success: true,
        questions: page,
        total_questions,
    }))
}

#[utoipa::path(
    get,
    path = "/api/v1/categories/{id}/questions",
    params(("id" = i64, Path, description = "Category id"), PageQuery),
    responses(
        (status = 200, description = "One page of the category's questions", body = CategoryQuestionsResponse),
        (status = 404, description = "Unknown category or empty page", body = ErrorBody)
    ),
    tag = "Categories"
)]
pub async fn category_questions(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    Query(query): Query<PageQuery>,
) -> ApiResult<Json<CategoryQuestionsResponse>> {
    let not_found = || ApiError::not_found(format!("category {}", raw_id));

    let id: i64 = raw_id.parse().map_err(|_| not_found())?;
    let category = state.repo().category(id).await?.ok_or_else(not_found)?;

    let questions = state.repo().questions_in_category(category.id).await?;
    let total_questions = questions.len();
    let page = paginate(questions, query.page());
    if page.is_empty() {
        return Err(ApiError::not_found(format!(
            "category {} questions page {}",
            category.id,
            query.page()
        )));
    }

    Ok(Json(CategoryQuestionsResponse {
        success: true,
        questions: page,
        total_questions,
        current_category: category.label,
    }))
}

#[utoipa::path(
    post,
    path = "/api/v1/quizzes",
    request_body = QuizRequest,
    responses(
        (status = 200, description = "Next question; the `question` field is omitted once every candidate was asked", body = Question),
        (status = 400, description = "Missing previous_questions or quiz_category", body = ErrorBody),
        (status = 404, description = "The category has no questions", body = ErrorBody)
    ),
    tag = "Quizzes"
)]
pub async fn play_quiz(
    State(state): State<AppState>,
    body: JsonBody<QuizRequest>,
) -> ApiResult<Json<QuizResponse>> {
    let round = body.required()?.validate()?;

    let candidates = state.repo().quiz_candidates(round.category).await?;
    if candidates.is_empty() {
        return Err(ApiError::not_found(format!(
            "quiz questions for category {:?}",
            round.category
        )));
    }

    let outcome = next_question(candidates, &round.previous, &mut rand::thread_rng());
    debug!("Quiz draw after {} previous: {:?}", round.previous.len(), outcome);

    Ok(Json(QuizResponse {
        success: true,
        outcome,
    }))
}

/// JSON 404 for unmatched paths under the API prefix.
pub async fn api_not_found(uri: Uri) -> ApiError {
    ApiError::not_found(format!("route {}", uri.path()))
}

/// JSON 405 for known API paths hit with an unsupported method.
pub async fn api_method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed
}

use serde::Deserialize;
use utoipa::IntoParams;

pub const QUESTIONS_PER_PAGE: usize = 10;

/// `?page=N` query. Anything that is not an integer falls back to page 1.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PageQuery {
    /// 1-based page number
    #[param(value_type = Option<i64>)]
    pub page: Option<String>,
}

impl PageQuery {
    pub fn page(&self) -> i64 {
        self.page
            .as_deref()
            .and_then(|p| p.trim().parse().ok())
            .unwrap_or(1)
    }
}

/// Returns the items of the 1-based `page`.
///
/// Pages below 1 or past the end are empty; callers decide what that means.
pub fn paginate<T>(items: Vec<T>, page: i64) -> Vec<T> {
    if page < 1 {
        return Vec::new();
    }
    let start = usize::try_from(page - 1)
        .ok()
        .and_then(|p| p.checked_mul(QUESTIONS_PER_PAGE));
    match start {
        Some(start) => items.into_iter().skip(start).take(QUESTIONS_PER_PAGE).collect(),
        None => Vec::new(),
    }
}

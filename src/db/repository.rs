//! Typed access to the question bank.
//!
//! Handlers only see [`TriviaRepository`]; [`SqliteRepository`] is the
//! sqlx-backed implementation used by the server and the tests.

use async_trait::async_trait;
use sqlx::SqlitePool;
use thiserror::Error;

use crate::types::{Category, NewQuestion, Question};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

#[async_trait]
pub trait TriviaRepository: Send + Sync {
    /// All categories ordered by id.
    async fn categories(&self) -> StoreResult<Vec<Category>>;

    async fn category(&self, id: i64) -> StoreResult<Option<Category>>;

    /// All questions ordered by id.
    async fn questions(&self) -> StoreResult<Vec<Question>>;

    /// Questions of one category ordered by id.
    async fn questions_in_category(&self, category: i64) -> StoreResult<Vec<Question>>;

    /// Questions whose text contains `term`, ignoring case, ordered by id.
    async fn search_questions(&self, term: &str) -> StoreResult<Vec<Question>>;

    /// Insert in its own transaction and return the stored row.
    async fn insert_question(&self, new: &NewQuestion) -> StoreResult<Question>;

    /// Delete by id in its own transaction. `Ok(false)` when nothing matched.
    async fn delete_question(&self, id: i64) -> StoreResult<bool>;

    /// Cheap round trip used by the health probe.
    async fn ping(&self) -> StoreResult<()>;

    /// Quiz candidates: every question, or one category's.
    async fn quiz_candidates(&self, category: Option<i64>) -> StoreResult<Vec<Question>> {
        match category {
            Some(id) => self.questions_in_category(id).await,
            None => self.questions().await,
        }
    }
}

#[derive(Debug, Clone)]
pub struct SqliteRepository {
    pool: SqlitePool,
}

impl SqliteRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

/// Unicode-aware, case-insensitive substring test. `needle_lower` is already lowercased.
fn contains_ignoring_case(text: &str, needle_lower: &str) -> bool {
    text.to_lowercase().contains(needle_lower)
}

#[async_trait]
impl TriviaRepository for SqliteRepository {
    async fn categories(&self) -> StoreResult<Vec<Category>> {
        let categories = sqlx::query_as::<_, Category>("SELECT id, type FROM categories ORDER BY id")
            .fetch_all(&self.pool)
            .await?;
        Ok(categories)
    }

    async fn category(&self, id: i64) -> StoreResult<Option<Category>> {
        let category = sqlx::query_as::<_, Category>("SELECT id, type FROM categories WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(category)
    }

    async fn questions(&self) -> StoreResult<Vec<Question>> {
        let questions = sqlx::query_as::<_, Question>(
            "SELECT id, question, answer, category, difficulty FROM questions ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(questions)
    }

    async fn questions_in_category(&self, category: i64) -> StoreResult<Vec<Question>> {
        let questions = sqlx::query_as::<_, Question>(
            r#"
            SELECT id, question, answer, category, difficulty
            FROM questions
            WHERE category = ?
            ORDER BY id
            "#,
        )
        .bind(category)
        .fetch_all(&self.pool)
        .await?;
        Ok(questions)
    }

    async fn search_questions(&self, term: &str) -> StoreResult<Vec<Question>> {
        // SQLite's LIKE and lower() only fold ASCII, so the match runs here.
        let needle = term.to_lowercase();
        let questions = self
            .questions()
            .await?
            .into_iter()
            .filter(|q| contains_ignoring_case(&q.question, &needle))
            .collect();
        Ok(questions)
    }

    async fn insert_question(&self, new: &NewQuestion) -> StoreResult<Question> {
        // An early return drops `tx`, which rolls it back.
        let mut tx = self.pool.begin().await?;

        let question = sqlx::query_as::<_, Question>(
            r#"
            INSERT INTO questions (question, answer, category, difficulty)
            VALUES (?, ?, ?, ?)
            RETURNING id, question, answer, category, difficulty
            "#,
        )
        .bind(&new.question)
        .bind(&new.answer)
        .bind(new.category)
        .bind(new.difficulty)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(question)
    }

    async fn delete_question(&self, id: i64) -> StoreResult<bool> {
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query("DELETE FROM questions WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        if result.rows_affected() == 0 {
            tx.rollback().await?;
            return Ok(false);
        }

        tx.commit().await?;
        Ok(true)
    }

    async fn ping(&self) -> StoreResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::pool::memory_pool;
    use crate::db::seed::seed;

    async fn seeded() -> SqliteRepository {
        let pool = memory_pool().await;
        seed(&pool).await.unwrap();
        SqliteRepository::new(pool)
    }

    fn new_question(category: i64) -> NewQuestion {
        NewQuestion {
            question: "What is the boiling point of water in Celsius?".into(),
            answer: "100".into(),
            category,
            difficulty: 1,
        }
    }

    #[test]
    fn test_contains_ignoring_case_folds_unicode() {
        assert!(contains_ignoring_case("Où est l'ÉCOLE?", "école"));
        assert!(contains_ignoring_case("STRASSE", "strasse"));
        assert!(!contains_ignoring_case("Où est l'ÉCOLE?", "ecole"));
    }

    #[tokio::test]
    async fn test_lists_are_ordered_by_id() {
        let repo = seeded().await;

        let categories = repo.categories().await.unwrap();
        assert!(categories.windows(2).all(|w| w[0].id < w[1].id));

        let questions = repo.questions().await.unwrap();
        assert!(!questions.is_empty());
        assert!(questions.windows(2).all(|w| w[0].id < w[1].id));
    }

    #[tokio::test]
    async fn test_search_ignores_case() {
        let repo = seeded().await;

        let lower = repo.search_questions("title").await.unwrap();
        let upper = repo.search_questions("TITLE").await.unwrap();
        assert!(!lower.is_empty());
        assert_eq!(lower, upper);
        assert!(lower
            .iter()
            .all(|q| q.question.to_lowercase().contains("title")));
    }

    #[tokio::test]
    async fn test_search_matches_accented_capitals() {
        let repo = seeded().await;
        let stored = repo
            .insert_question(&NewQuestion {
                question: "Où est l'ÉCOLE?".into(),
                answer: "Ici".into(),
                category: 3,
                difficulty: 1,
            })
            .await
            .unwrap();

        let found = repo.search_questions("école").await.unwrap();
        assert_eq!(found, vec![stored]);
    }

    #[tokio::test]
    async fn test_search_treats_wildcards_literally() {
        let repo = seeded().await;
        assert!(repo.search_questions("%").await.unwrap().is_empty());
        assert!(repo.search_questions("_").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_insert_then_delete() {
        let repo = seeded().await;
        let before = repo.questions().await.unwrap().len();

        let stored = repo.insert_question(&new_question(1)).await.unwrap();
        assert_eq!(stored.category, 1);
        assert_eq!(repo.questions().await.unwrap().len(), before + 1);

        assert!(repo.delete_question(stored.id).await.unwrap());
        assert!(!repo.delete_question(stored.id).await.unwrap());
        assert_eq!(repo.questions().await.unwrap().len(), before);
    }

    #[tokio::test]
    async fn test_insert_unknown_category_rolls_back() {
        let repo = seeded().await;
        let before = repo.questions().await.unwrap().len();

        assert!(repo.insert_question(&new_question(999)).await.is_err());
        assert_eq!(repo.questions().await.unwrap().len(), before);
    }

    #[tokio::test]
    async fn test_quiz_candidates_respect_category() {
        let repo = seeded().await;

        let all = repo.quiz_candidates(None).await.unwrap();
        assert_eq!(all.len(), repo.questions().await.unwrap().len());

        let art = repo.quiz_candidates(Some(2)).await.unwrap();
        assert!(!art.is_empty());
        assert!(art.iter().all(|q| q.category == 2));
    }
}

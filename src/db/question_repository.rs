use crate::core::CategorySelector;
use crate::db::models::{NewQuestion, Question};
use crate::errors::Error;
use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;

/// Repository for managing question records in the SQLite database
pub struct QuestionRepository<'a> {
    /// Database connection
    pub conn: &'a mut SqliteConnection,
}

impl<'a> QuestionRepository<'a> {
    /// Creates a new QuestionRepository instance
    ///
    /// # Arguments
    ///
    /// * `conn` - Mutable reference to SQLite database connection
    pub fn new(conn: &'a mut SqliteConnection) -> Self {
        QuestionRepository { conn }
    }

    /// Retrieves every question ordered by id
    ///
    /// # Errors
    ///
    /// Returns an Error if database operations fail
    pub fn list_questions(&mut self) -> Result<Vec<Question>, Error> {
        use crate::schema::questions::dsl::*;

        let found = questions
            .order_by(id.asc())
            .select(Question::as_select())
            .load(self.conn)?;
        Ok(found)
    }

    /// Inserts a new question and reads it back with its generated id
    ///
    /// # Arguments
    ///
    /// * `new_question` - Field values of the question to store
    ///
    /// # Errors
    ///
    /// Returns an Error if database operations fail, including a foreign key
    /// violation when the category does not exist
    pub fn insert_question(&mut self, new_question: &NewQuestion) -> Result<Question, Error> {
        use crate::schema::questions;

        let inserted = self.conn.transaction(|conn| {
            diesel::insert_into(questions::table)
                .values(new_question)
                .execute(conn)?;
            questions::table
                .order_by(questions::id.desc())
                .select(Question::as_select())
                .first(conn)
        })?;
        Ok(inserted)
    }

    /// Deletes a question by primary key
    ///
    /// # Returns
    ///
    /// `true` if a row was removed, `false` if the id was unknown
    pub fn delete_question(&mut self, question_id: i32) -> Result<bool, Error> {
        use crate::schema::questions::dsl::*;

        let removed = diesel::delete(questions.find(question_id)).execute(self.conn)?;
        Ok(removed > 0)
    }

    /// Case-insensitive substring search over question text.
    ///
    /// Case folding is Unicode aware, so it runs here rather than in SQLite,
    /// whose `LIKE` only folds ASCII. `%`, `_` and `\` in `term` match literally.
    pub fn search_questions(&mut self, term: &str) -> Result<Vec<Question>, Error> {
        let needle = term.to_lowercase();
        let found = self
            .list_questions()?
            .into_iter()
            .filter(|q| q.question.to_lowercase().contains(&needle))
            .collect();
        Ok(found)
    }

    /// Retrieves all questions belonging to a category, ordered by id
    pub fn questions_in_category(&mut self, category_id: i32) -> Result<Vec<Question>, Error> {
        use crate::schema::questions::dsl::*;

        let found = questions
            .filter(category.eq(category_id))
            .order_by(id.asc())
            .select(Question::as_select())
            .load(self.conn)?;
        Ok(found)
    }

    /// Retrieves the questions a quiz may still serve
    ///
    /// # Arguments
    ///
    /// * `selector` - Category restriction, or any category
    /// * `previous` - Ids already served during the quiz; never returned
    pub fn quiz_candidates(
        &mut self,
        selector: CategorySelector,
        previous: &[i32],
    ) -> Result<Vec<Question>, Error> {
        use crate::schema::questions::dsl::*;

        let mut query = questions.into_boxed();
        if let CategorySelector::Category(category_id) = selector {
            query = query.filter(category.eq(category_id));
        }
        if !previous.is_empty() {
            query = query.filter(id.ne_all(previous.to_vec()));
        }

        let found = query
            .order_by(id.asc())
            .select(Question::as_select())
            .load(self.conn)?;
        Ok(found)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{CategoryRepository, Database};

    fn new_question(text: &str, category: i32) -> NewQuestion {
        NewQuestion {
            question: text.to_string(),
            answer: "answer".to_string(),
            category,
            difficulty: 2,
        }
    }

    fn setup() -> (Database, i32, i32) {
        let database = Database::open_in_memory().unwrap();
        let mut conn = database.get_conn().unwrap();
        let mut categories = CategoryRepository::new(&mut conn);
        let science = categories.insert_category("Science").unwrap().id;
        let history = categories.insert_category("History").unwrap().id;
        drop(conn);
        (database, science, history)
    }

    #[test]
    fn insert_assigns_increasing_ids() {
        let (database, science, _) = setup();
        let mut conn = database.get_conn().unwrap();
        let mut repo = QuestionRepository::new(&mut conn);

        let first = repo.insert_question(&new_question("What is H2O?", science)).unwrap();
        let second = repo.insert_question(&new_question("What is NaCl?", science)).unwrap();

        assert!(first.id > 0);
        assert!(second.id > first.id);
        assert_eq!(second.question, "What is NaCl?");
        assert_eq!(repo.list_questions().unwrap(), vec![first, second]);
    }

    #[test]
    fn insert_rejects_unknown_category() {
        let (database, _, history) = setup();
        let mut conn = database.get_conn().unwrap();
        let mut repo = QuestionRepository::new(&mut conn);

        assert!(repo
            .insert_question(&new_question("Orphan?", history + 50))
            .is_err());
    }

    #[test]
    fn delete_reports_whether_a_row_was_removed() {
        let (database, science, _) = setup();
        let mut conn = database.get_conn().unwrap();
        let mut repo = QuestionRepository::new(&mut conn);

        let stored = repo.insert_question(&new_question("Gone soon?", science)).unwrap();
        assert!(repo.delete_question(stored.id).unwrap());
        assert!(!repo.delete_question(stored.id).unwrap());
        assert!(repo.list_questions().unwrap().is_empty());
    }

    #[test]
    fn search_ignores_case_and_treats_wildcards_literally() {
        let (database, science, history) = setup();
        let mut conn = database.get_conn().unwrap();
        let mut repo = QuestionRepository::new(&mut conn);

        repo.insert_question(&new_question("Which MAN walked on the moon first?", science))
            .unwrap();
        repo.insert_question(&new_question("Who was the first Roman emperor?", history))
            .unwrap();
        repo.insert_question(&new_question("What is 100% of 7?", science))
            .unwrap();

        assert_eq!(repo.search_questions("man").unwrap().len(), 2);
        assert_eq!(repo.search_questions("MOON").unwrap().len(), 1);
        assert_eq!(repo.search_questions("%").unwrap().len(), 1);
        assert!(repo.search_questions("_").unwrap().is_empty());
    }

    #[test]
    fn search_folds_non_ascii_case() {
        let (database, _, history) = setup();
        let mut conn = database.get_conn().unwrap();
        let mut repo = QuestionRepository::new(&mut conn);

        let school = repo
            .insert_question(&new_question("Où est l'ÉCOLE?", history))
            .unwrap();
        repo.insert_question(&new_question("Where is the school?", history))
            .unwrap();

        assert_eq!(repo.search_questions("école").unwrap(), vec![school.clone()]);
        assert_eq!(repo.search_questions("OÙ EST").unwrap(), vec![school]);
        assert!(repo.search_questions("ecole").unwrap().is_empty());
    }

    #[test]
    fn quiz_candidates_respect_category_and_previous_ids() {
        let (database, science, history) = setup();
        let mut conn = database.get_conn().unwrap();
        let mut repo = QuestionRepository::new(&mut conn);

        let a = repo.insert_question(&new_question("a", science)).unwrap();
        let b = repo.insert_question(&new_question("b", science)).unwrap();
        let c = repo.insert_question(&new_question("c", history)).unwrap();

        let ids = |found: Vec<Question>| found.into_iter().map(|q| q.id).collect::<Vec<_>>();

        assert_eq!(
            ids(repo.quiz_candidates(CategorySelector::Any, &[]).unwrap()),
            vec![a.id, b.id, c.id]
        );
        assert_eq!(
            ids(repo
                .quiz_candidates(CategorySelector::Category(science), &[a.id])
                .unwrap()),
            vec![b.id]
        );
        assert_eq!(
            ids(repo.quiz_candidates(CategorySelector::Any, &[a.id, c.id]).unwrap()),
            vec![b.id]
        );
        assert!(repo
            .quiz_candidates(CategorySelector::Category(history), &[c.id])
            .unwrap()
            .is_empty());
        assert_eq!(
            ids(repo.questions_in_category(history).unwrap()),
            vec![c.id]
        );
    }
}

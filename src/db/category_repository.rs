use crate::db::models::Category;
use crate::errors::Error;
use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;

/// Categories inserted by `--seed-categories` on an empty database
pub const DEFAULT_CATEGORIES: [&str; 6] = [
    "Science",
    "Art",
    "Geography",
    "History",
    "Entertainment",
    "Sports",
];

/// Repository for the read-mostly `categories` table
pub struct CategoryRepository<'a> {
    /// Database connection
    pub conn: &'a mut SqliteConnection,
}

impl<'a> CategoryRepository<'a> {
    pub fn new(conn: &'a mut SqliteConnection) -> Self {
        CategoryRepository { conn }
    }

    /// Retrieves every category ordered by id
    pub fn list_categories(&mut self) -> Result<Vec<Category>, Error> {
        use crate::schema::categories::dsl::*;

        let found = categories
            .order_by(id.asc())
            .select(Category::as_select())
            .load(self.conn)?;
        Ok(found)
    }

    /// Retrieves a single category, `None` when the id is unknown
    pub fn get_category(&mut self, category_id: i32) -> Result<Option<Category>, Error> {
        use crate::schema::categories::dsl::*;

        let found = categories
            .find(category_id)
            .select(Category::as_select())
            .first(self.conn)
            .optional()?;
        Ok(found)
    }

    /// Inserts a category and returns the stored row
    pub fn insert_category(&mut self, name: &str) -> Result<Category, Error> {
        use crate::schema::categories;

        let inserted = self.conn.transaction(|conn| {
            diesel::insert_into(categories::table)
                .values(categories::type_.eq(name))
                .execute(conn)?;
            categories::table
                .order_by(categories::id.desc())
                .select(Category::as_select())
                .first(conn)
        })?;
        Ok(inserted)
    }

    /// Inserts [`DEFAULT_CATEGORIES`] when the table is empty.
    ///
    /// Returns the number of rows inserted.
    pub fn seed_default_categories(&mut self) -> Result<usize, Error> {
        use crate::schema::categories::dsl::*;

        let existing: i64 = categories.count().get_result(self.conn)?;
        if existing > 0 {
            return Ok(0);
        }

        self.conn.transaction::<_, Error, _>(|conn| {
            let mut repo = CategoryRepository::new(conn);
            for name in DEFAULT_CATEGORIES {
                repo.insert_category(name)?;
            }
            Ok(())
        })?;
        Ok(DEFAULT_CATEGORIES.len())
    }
}

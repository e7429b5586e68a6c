/// Hero model and database operations
///
/// This module provides the Hero model and CRUD operations for the heroes
/// table. Ids are assigned by the database and immutable once assigned.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE heroes (
///     id INTEGER PRIMARY KEY AUTOINCREMENT,
///     name TEXT NOT NULL,
///     age INTEGER,
///     secret_name TEXT NOT NULL
/// );
/// ```
///
/// # Example
///
/// ```no_run
/// use herodex_shared::models::hero::{CreateHero, Hero, HeroUpdate};
/// use herodex_shared::db::pool::{create_pool, DatabaseConfig};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let pool = create_pool(DatabaseConfig::default()).await?;
///
/// // Create a new hero
/// let hero = Hero::create(&pool, CreateHero {
///     name: "Deadpond".to_string(),
///     age: None,
///     secret_name: "Dive Wilson".to_string(),
/// })
/// .await?;
///
/// // Apply a partial update; omitted fields keep their stored values
/// let updated = Hero::update(&pool, hero.id, HeroUpdate {
///     age: Some(Some(32)),
///     ..Default::default()
/// })
/// .await?;
/// # Ok(())
/// # }
/// ```

use serde::{Deserialize, Deserializer, Serialize};
use sqlx::SqlitePool;
use validator::Validate;

/// Hero model representing a persisted hero record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Hero {
    /// Unique hero ID, assigned by the database on insert
    pub id: i64,

    /// Hero name (indexed)
    pub name: String,

    /// Optional age (indexed)
    pub age: Option<i64>,

    /// The hero's secret identity
    pub secret_name: String,
}

/// Input for creating a new hero
///
/// Has no `id` field: the id is server-assigned, and any id supplied by the
/// client is ignored during deserialization.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateHero {
    /// Hero name
    #[validate(length(min = 1, max = 255, message = "Name must be 1-255 characters"))]
    pub name: String,

    /// Optional age
    pub age: Option<i64>,

    /// The hero's secret identity
    #[validate(length(min = 1, max = 255, message = "Secret name must be 1-255 characters"))]
    pub secret_name: String,
}

/// Partial update for an existing hero
///
/// All fields are optional; only fields present in the payload are applied.
/// `age` is nullable in storage, so it distinguishes three cases: omitted
/// (keep the stored value), explicit `null` (clear it), and a number (set it).
/// `name` and `secret_name` are non-nullable; omitted or `null` both leave
/// them untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct HeroUpdate {
    /// New hero name
    #[validate(length(min = 1, max = 255, message = "Name must be 1-255 characters"))]
    pub name: Option<String>,

    /// New age (use `null` to clear)
    #[serde(
        default,
        deserialize_with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub age: Option<Option<i64>>,

    /// New secret identity
    #[validate(length(min = 1, max = 255, message = "Secret name must be 1-255 characters"))]
    pub secret_name: Option<String>,
}

/// Deserializes a present-but-possibly-null field into `Some(Option<_>)`
///
/// Combined with `#[serde(default)]`, an omitted field stays `None` while an
/// explicit `null` becomes `Some(None)`.
fn double_option<'de, D>(deserializer: D) -> Result<Option<Option<i64>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<i64>::deserialize(deserializer).map(Some)
}

impl HeroUpdate {
    /// Returns true if the payload carries no fields to apply
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.age.is_none() && self.secret_name.is_none()
    }

    /// Applies the present fields to a hero, leaving absent fields untouched
    pub fn apply(&self, hero: &mut Hero) {
        if let Some(name) = &self.name {
            hero.name = name.clone();
        }
        if let Some(age) = self.age {
            hero.age = age;
        }
        if let Some(secret_name) = &self.secret_name {
            hero.secret_name = secret_name.clone();
        }
    }
}

impl Hero {
    /// Creates a new hero in the database
    ///
    /// # Arguments
    ///
    /// * `pool` - Database connection pool
    /// * `data` - Hero creation data
    ///
    /// # Returns
    ///
    /// The newly created hero with its server-assigned id
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails or the database connection is lost
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use herodex_shared::models::hero::{CreateHero, Hero};
    /// # use sqlx::SqlitePool;
    /// # async fn example(pool: SqlitePool) -> Result<(), sqlx::Error> {
    /// let hero = Hero::create(&pool, CreateHero {
    ///     name: "Rusty-Man".to_string(),
    ///     age: Some(48),
    ///     secret_name: "Tommy Sharp".to_string(),
    /// })
    /// .await?;
    /// println!("Created hero: {}", hero.id);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn create(pool: &SqlitePool, data: CreateHero) -> Result<Self, sqlx::Error> {
        let hero = sqlx::query_as::<_, Hero>(
            r#"
            INSERT INTO heroes (name, age, secret_name)
            VALUES (?1, ?2, ?3)
            RETURNING id, name, age, secret_name
            "#,
        )
        .bind(data.name)
        .bind(data.age)
        .bind(data.secret_name)
        .fetch_one(pool)
        .await?;

        Ok(hero)
    }

    /// Finds a hero by ID
    ///
    /// # Returns
    ///
    /// The hero if found, None otherwise
    pub async fn find_by_id(pool: &SqlitePool, id: i64) -> Result<Option<Self>, sqlx::Error> {
        let hero = sqlx::query_as::<_, Hero>(
            r#"
            SELECT id, name, age, secret_name
            FROM heroes
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(hero)
    }

    /// Applies a partial update to a hero
    ///
    /// Only fields present in `data` are applied; absent fields keep their
    /// stored values. There is no upsert: a missing id returns `None`.
    ///
    /// # Returns
    ///
    /// The post-mutation hero re-read from the database, or None if no hero
    /// with the given id exists
    ///
    /// # Errors
    ///
    /// Returns an error if the read or write fails
    pub async fn update(
        pool: &SqlitePool,
        id: i64,
        data: HeroUpdate,
    ) -> Result<Option<Self>, sqlx::Error> {
        let Some(mut hero) = Self::find_by_id(pool, id).await? else {
            return Ok(None);
        };

        data.apply(&mut hero);

        let updated = sqlx::query_as::<_, Hero>(
            r#"
            UPDATE heroes
            SET name = ?1, age = ?2, secret_name = ?3
            WHERE id = ?4
            RETURNING id, name, age, secret_name
            "#,
        )
        .bind(hero.name)
        .bind(hero.age)
        .bind(hero.secret_name)
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(updated)
    }

    /// Deletes a hero by ID
    ///
    /// # Returns
    ///
    /// `true` if a row was deleted, `false` if no hero with the id exists
    pub async fn delete(pool: &SqlitePool, id: i64) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM heroes WHERE id = ?1")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Lists heroes in insertion order
    ///
    /// # Arguments
    ///
    /// * `offset` - Number of records to skip
    /// * `limit` - Maximum number of records to return
    ///
    /// Range validation of `offset` and `limit` is the caller's concern; this
    /// method executes whatever page it is given.
    pub async fn list(
        pool: &SqlitePool,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<Self>, sqlx::Error> {
        let heroes = sqlx::query_as::<_, Hero>(
            r#"
            SELECT id, name, age, secret_name
            FROM heroes
            ORDER BY id ASC
            LIMIT ?1 OFFSET ?2
            "#,
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(pool)
        .await?;

        Ok(heroes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_hero() -> Hero {
        Hero {
            id: 1,
            name: "Deadpond".to_string(),
            age: None,
            secret_name: "Dive Wilson".to_string(),
        }
    }

    #[test]
    fn test_update_omitted_fields_are_untouched() {
        let mut hero = sample_hero();
        let update = HeroUpdate {
            age: Some(Some(32)),
            ..Default::default()
        };

        update.apply(&mut hero);

        assert_eq!(hero.name, "Deadpond");
        assert_eq!(hero.age, Some(32));
        assert_eq!(hero.secret_name, "Dive Wilson");
    }

    #[test]
    fn test_update_explicit_null_clears_age() {
        let mut hero = sample_hero();
        hero.age = Some(48);

        let update: HeroUpdate = serde_json::from_str(r#"{"age": null}"#).unwrap();
        assert_eq!(update.age, Some(None));

        update.apply(&mut hero);
        assert_eq!(hero.age, None);
    }

    #[test]
    fn test_update_omitted_age_is_kept() {
        let mut hero = sample_hero();
        hero.age = Some(48);

        let update: HeroUpdate = serde_json::from_str(r#"{"name": "Spider-Boy"}"#).unwrap();
        assert_eq!(update.age, None);

        update.apply(&mut hero);
        assert_eq!(hero.name, "Spider-Boy");
        assert_eq!(hero.age, Some(48));
    }

    #[test]
    fn test_update_is_empty() {
        let update = HeroUpdate::default();
        assert!(update.is_empty());

        let update: HeroUpdate = serde_json::from_str(r#"{"age": null}"#).unwrap();
        assert!(!update.is_empty());
    }

    #[test]
    fn test_create_hero_ignores_client_id() {
        let create: CreateHero =
            serde_json::from_str(r#"{"id": 99, "name": "Deadpond", "secret_name": "Dive Wilson"}"#)
                .unwrap();
        assert_eq!(create.name, "Deadpond");
        assert_eq!(create.age, None);
    }

    #[test]
    fn test_create_hero_validation_rejects_empty_name() {
        let create = CreateHero {
            name: String::new(),
            age: None,
            secret_name: "Dive Wilson".to_string(),
        };
        assert!(create.validate().is_err());
    }

    #[test]
    fn test_update_validation_rejects_empty_name() {
        let update = HeroUpdate {
            name: Some(String::new()),
            ..Default::default()
        };
        assert!(update.validate().is_err());

        let update = HeroUpdate {
            name: Some("Spider-Boy".to_string()),
            ..Default::default()
        };
        assert!(update.validate().is_ok());
    }
}

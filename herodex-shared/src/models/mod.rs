/// Database models for Herodex
///
/// This module contains all database models and their CRUD operations.
///
/// # Models
///
/// - `hero`: Hero records and partial-update payloads
///
/// # Example
///
/// ```no_run
/// use herodex_shared::models::hero::{CreateHero, Hero};
/// use herodex_shared::db::pool::{create_pool, DatabaseConfig};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let pool = create_pool(DatabaseConfig::default()).await?;
///
/// let new_hero = CreateHero {
///     name: "Deadpond".to_string(),
///     age: None,
///     secret_name: "Dive Wilson".to_string(),
/// };
///
/// let hero = Hero::create(&pool, new_hero).await?;
/// println!("Created hero {}", hero.id);
/// # Ok(())
/// # }
/// ```

pub mod hero;

pub mod entities;
pub mod migrator;
pub mod repositories;

use sea_orm::{Database, DatabaseConnection};
use sea_orm_migration::MigratorTrait;
use tracing::info;

use migrator::Migrator;

pub use repositories::SeaOrmRepositoryProvider;

/// Database configuration
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// Database URL (e.g., "sqlite://./fleet.db?mode=rwc")
    pub url: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite://./fleet.db?mode=rwc".to_string(),
        }
    }
}

impl DatabaseConfig {
    /// Create config for SQLite
    pub fn sqlite(path: &str) -> Self {
        Self {
            url: format!("sqlite://{}?mode=rwc", path),
        }
    }
}

/// Connect and bring the schema up to date.
pub async fn init_database(config: &DatabaseConfig) -> Result<DatabaseConnection, sea_orm::DbErr> {
    info!("Connecting to database: {}", config.url);
    let db = Database::connect(&config.url).await?;
    Migrator::up(&db, None).await?;
    info!("Database connected and migrated");
    Ok(db)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sqlite_helper_builds_rwc_url() {
        assert_eq!(DatabaseConfig::sqlite("/tmp/fleet.db").url, "sqlite:///tmp/fleet.db?mode=rwc");
    }

    #[tokio::test]
    async fn init_applies_migrations() {
        let db = init_database(&DatabaseConfig {
            url: "sqlite::memory:".into(),
        })
        .await
        .unwrap();
        let applied = Migrator::get_applied_migrations(&db).await.unwrap();
        assert_eq!(applied.len(), 3);
    }
}

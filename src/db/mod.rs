use anyhow::{Context, Result};
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, EntityName, EntityTrait, Schema};
use tracing::info;

pub mod player;
pub mod team;

/// Handle to the team database.
///
/// Cloning is cheap; every clone shares the driver's pool. A statement checks a
/// connection out for its own duration and hands it back when it finishes,
/// whether it succeeded or not, so handlers never hold one across requests.
/// Two statements issued by the same handler may run on different
/// connections.
#[derive(Clone, Debug)]
pub struct Db {
    conn: DatabaseConnection,
}

impl Db {
    pub async fn connect(url: &str) -> Result<Db> {
        let conn = Database::connect(url)
            .await
            .context("failed to connect to database")?;
        Ok(Db { conn })
    }

    pub fn conn(&self) -> &DatabaseConnection {
        &self.conn
    }

    /// Creates the `teams` and `players` tables when they are missing.
    pub async fn init_schema(&self) -> Result<()> {
        self.create_table(team::Entity).await?;
        self.create_table(player::Entity).await?;
        info!("schema ready");
        Ok(())
    }

    async fn create_table<E: EntityTrait>(&self, entity: E) -> Result<()> {
        let table = entity.table_name().to_owned();
        let backend = self.conn.get_database_backend();
        let mut stmt = Schema::new(backend).create_table_from_entity(entity);
        stmt.if_not_exists();

        self.conn
            .execute(backend.build(&stmt))
            .await
            .with_context(|| format!("failed to create table {table}"))?;
        Ok(())
    }
}

//! Employee persistence service.
//!
//! Sole owner of database connectivity. Constructed explicitly by the
//! bootstrap and injected into the router state; `shutdown` closes the pool.

use chrono::Utc;
use migration::{Migrator, MigratorTrait};
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ColumnTrait, ConnectOptions, Database,
    DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder, Set, SqlErr,
};
use thiserror::Error;
use tracing::info;

use entity::employees;

use crate::{
    config::DatabaseSettings,
    schemas::{EmployeeCreate, EmployeeUpdate},
};

/// Store failures, classified from driver errors rather than message text.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("email already exists")]
    Conflict,
    #[error(transparent)]
    Db(DbErr),
}

impl From<DbErr> for StoreError {
    fn from(err: DbErr) -> Self {
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => StoreError::Conflict,
            _ => StoreError::Db(err),
        }
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Clone)]
pub struct EmployeeStore {
    db: DatabaseConnection,
}

impl EmployeeStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Build the bounded connection pool described by `settings`.
    pub async fn connect(settings: &DatabaseSettings) -> Result<Self, DbErr> {
        let mut options = ConnectOptions::new(settings.url());
        options.max_connections(settings.pool_size);
        let db = Database::connect(options).await?;
        info!(pool_size = settings.pool_size, "database pool initialized");
        Ok(Self::new(db))
    }

    /// Apply pending migrations. Safe to call repeatedly.
    pub async fn migrate(&self) -> Result<(), DbErr> {
        Migrator::up(&self.db, None).await
    }

    /// Roll back the most recent migration.
    pub async fn rollback(&self) -> Result<(), DbErr> {
        Migrator::down(&self.db, Some(1)).await
    }

    pub async fn ping(&self) -> bool {
        self.db.ping().await.is_ok()
    }

    pub async fn shutdown(self) -> Result<(), DbErr> {
        self.db.close().await
    }

    pub async fn create(&self, input: EmployeeCreate) -> StoreResult<employees::Model> {
        let now = Utc::now();
        let row = employees::ActiveModel {
            id: NotSet,
            name: Set(input.name.trim().to_string()),
            email: Set(input.email),
            phone: Set(input.phone),
            department: Set(input.department),
            position: Set(input.position),
            salary: Set(input.salary),
            hire_date: Set(input.hire_date),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
        };
        let created = row.insert(&self.db).await?;
        Ok(created)
    }

    /// An absent row is an empty result, not an error.
    pub async fn get(&self, id: i32) -> StoreResult<Option<employees::Model>> {
        Ok(employees::Entity::find_by_id(id).one(&self.db).await?)
    }

    /// Every record, most recently created first.
    pub async fn list(&self) -> StoreResult<Vec<employees::Model>> {
        Ok(employees::Entity::find()
            .order_by_desc(employees::Column::Id)
            .all(&self.db)
            .await?)
    }

    /// Apply only the fields present in `changes`; absent fields stay
    /// `NotSet` and are never written. With nothing to apply, returns the
    /// current row. `Ok(None)` means the update matched no row.
    pub async fn update(
        &self,
        id: i32,
        changes: EmployeeUpdate,
    ) -> StoreResult<Option<employees::Model>> {
        let mut diff = <employees::ActiveModel as ActiveModelTrait>::default();
        let mut touched = false;
        if let Some(name) = changes.name {
            diff.name = Set(name.trim().to_string());
            touched = true;
        }
        if let Some(email) = changes.email {
            diff.email = Set(email);
            touched = true;
        }
        if let Some(phone) = changes.phone {
            diff.phone = Set(Some(phone));
            touched = true;
        }
        if let Some(department) = changes.department {
            diff.department = Set(Some(department));
            touched = true;
        }
        if let Some(position) = changes.position {
            diff.position = Set(Some(position));
            touched = true;
        }
        if let Some(salary) = changes.salary {
            diff.salary = Set(Some(salary));
            touched = true;
        }
        if let Some(hire_date) = changes.hire_date {
            diff.hire_date = Set(Some(hire_date));
            touched = true;
        }

        if !touched {
            return self.get(id).await;
        }
        diff.updated_at = Set(Utc::now().into());

        let result = employees::Entity::update_many()
            .set(diff)
            .filter(employees::Column::Id.eq(id))
            .exec(&self.db)
            .await?;
        if result.rows_affected == 0 {
            return Ok(None);
        }
        self.get(id).await
    }

    /// Reports whether a row was actually removed.
    pub async fn delete(&self, id: i32) -> StoreResult<bool> {
        let result = employees::Entity::delete_by_id(id).exec(&self.db).await?;
        Ok(result.rows_affected > 0)
    }
}

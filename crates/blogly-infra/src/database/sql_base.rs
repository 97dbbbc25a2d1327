use std::marker::PhantomData;
use std::sync::Arc;

use async_trait::async_trait;
use sea_orm::{DbConn, DbErr, EntityTrait, PrimaryKeyTrait, Select, SqlErr};

use blogly_core::domain::Id;
use blogly_core::error::RepoError;
use blogly_core::ports::BaseRepository;

/// An entity the generic repository knows how to name and list.
pub trait RepoEntity: EntityTrait {
    /// Singular name used in not-found errors.
    const LABEL: &'static str;

    /// Order applied by `find_all`.
    fn ordered(select: Select<Self>) -> Select<Self>;
}

/// Generic SQL repository implementation shared by every table.
pub struct SqlBaseRepository<E>
where
    E: EntityTrait,
{
    db: Arc<DbConn>,
    _entity: PhantomData<E>,
}

impl<E> SqlBaseRepository<E>
where
    E: EntityTrait,
{
    pub fn new(db: Arc<DbConn>) -> Self {
        Self {
            db,
            _entity: PhantomData,
        }
    }

    pub(crate) fn conn(&self) -> &DbConn {
        &self.db
    }
}

/// Classify a SeaORM error into the repository error kinds.
pub(crate) fn map_db_err(err: DbErr) -> RepoError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(msg)) => return RepoError::Duplicate(msg),
        Some(SqlErr::ForeignKeyConstraintViolation(msg)) => return RepoError::ForeignKey(msg),
        _ => {}
    }

    match err {
        DbErr::Conn(_) | DbErr::ConnectionAcquire(_) => RepoError::Connection(err.to_string()),
        _ => RepoError::Query(err.to_string()),
    }
}

#[async_trait]
impl<E, T> BaseRepository<T> for SqlBaseRepository<E>
where
    E: RepoEntity,
    E::Model: Sync + Send,
    E::PrimaryKey: PrimaryKeyTrait<ValueType = Id>,
    T: From<E::Model> + Send + Sync + 'static,
{
    async fn find_by_id(&self, id: Id) -> Result<Option<T>, RepoError> {
        tracing::debug!(entity = E::LABEL, id, "Finding by id");

        let result = E::find_by_id(id).one(self.conn()).await.map_err(map_db_err)?;

        Ok(result.map(Into::into))
    }

    async fn find_all(&self) -> Result<Vec<T>, RepoError> {
        let result = E::ordered(E::find())
            .all(self.conn())
            .await
            .map_err(map_db_err)?;

        Ok(result.into_iter().map(Into::into).collect())
    }

    async fn delete(&self, id: Id) -> Result<(), RepoError> {
        let result = E::delete_by_id(id)
            .exec(self.conn())
            .await
            .map_err(map_db_err)?;

        if result.rows_affected == 0 {
            return Err(RepoError::NotFound {
                entity_type: E::LABEL,
                id,
            });
        }

        Ok(())
    }
}

//! Generic entity manager: builds a statement for the entity's table and runs it.

use crate::entity::{EntityDescriptor, Persistable};
use crate::error::{AppError, Operation};
use crate::service::executor::{map_row, map_rows, StatementExecutor};
use crate::sql::{build, QueryBuf, QuerySpec, SortDirection, ValueMap, ID_COLUMN};
use serde_json::Value;
use std::marker::PhantomData;

pub struct EntityManager<E, X> {
    executor: X,
    descriptor: EntityDescriptor,
    _entity: PhantomData<fn() -> E>,
}

impl<E: Persistable, X: StatementExecutor> EntityManager<E, X> {
    pub fn new(executor: X) -> Self {
        EntityManager {
            executor,
            descriptor: E::descriptor(),
            _entity: PhantomData,
        }
    }

    pub fn descriptor(&self) -> &EntityDescriptor {
        &self.descriptor
    }

    fn prepare(&self, spec: &QuerySpec) -> Result<QueryBuf, AppError> {
        let q = build(&self.descriptor, spec)?;
        tracing::trace!(table = %self.descriptor.table_name, operation = %spec.operation, sql = %q.sql, "built");
        Ok(q)
    }

    fn failed(&self, operation: Operation) -> impl FnOnce(sqlx::Error) -> AppError + '_ {
        move |source| AppError::StatementExecution {
            operation,
            table: self.descriptor.table_name.clone(),
            source,
        }
    }

    /// First row matching all filters. Zero filters fail before anything runs;
    /// zero rows is `EntityNotFound`.
    pub async fn read_one(&self, filters: ValueMap) -> Result<E, AppError> {
        let q = self.prepare(&QuerySpec::read_one(filters))?;
        let row = self
            .executor
            .fetch_optional(&q)
            .await
            .map_err(self.failed(Operation::ReadOne))?;
        match row {
            Some(row) => map_row(row),
            None => Err(AppError::EntityNotFound {
                table: self.descriptor.table_name.clone(),
            }),
        }
    }

    /// Matching rows in statement order; possibly empty.
    pub async fn read_many(&self, spec: &QuerySpec) -> Result<Vec<E>, AppError> {
        if spec.operation != Operation::ReadMany {
            return Err(AppError::BadRequest(format!(
                "read_many called with a {} query",
                spec.operation
            )));
        }
        let q = self.prepare(spec)?;
        let rows = self
            .executor
            .fetch_all(&q)
            .await
            .map_err(self.failed(Operation::ReadMany))?;
        map_rows(rows)
    }

    /// Returns rows affected.
    pub async fn create(&self, fields: ValueMap) -> Result<u64, AppError> {
        let q = self.prepare(&QuerySpec::create(fields))?;
        self.executor.execute(&q).await.map_err(self.failed(Operation::Create))
    }

    /// Returns rows affected; 0 when no row has that id.
    pub async fn update(&self, fields: ValueMap, id: impl Into<Value>) -> Result<u64, AppError> {
        let q = self.prepare(&QuerySpec::update(fields, id))?;
        self.executor.execute(&q).await.map_err(self.failed(Operation::Update))
    }

    /// Returns rows affected; 0 when no row has that id.
    pub async fn remove(&self, id: impl Into<Value>) -> Result<u64, AppError> {
        let q = self.prepare(&QuerySpec::delete(id))?;
        self.executor.execute(&q).await.map_err(self.failed(Operation::Delete))
    }

    pub async fn find(&self, id: impl Into<Value>) -> Result<E, AppError> {
        self.read_one(ValueMap::new().with(ID_COLUMN, id)).await
    }

    pub async fn find_one_by(&self, filters: ValueMap) -> Result<E, AppError> {
        self.read_one(filters).await
    }

    pub async fn find_all(&self) -> Result<Vec<E>, AppError> {
        self.read_many(&QuerySpec::read_many()).await
    }

    pub async fn find_by(
        &self,
        filters: ValueMap,
        order: &[(&str, SortDirection)],
        limit: Option<u64>,
        offset: Option<u64>,
    ) -> Result<Vec<E>, AppError> {
        let spec = order
            .iter()
            .fold(QuerySpec::read_many().filters(filters), |spec, (col, dir)| {
                spec.order_by(*col, *dir)
            })
            .limit(limit)
            .offset(offset);
        self.read_many(&spec).await
    }

    pub async fn add(&self, entity: &E) -> Result<u64, AppError> {
        self.create(entity.fields()?).await
    }

    pub async fn edit(&self, entity: &E) -> Result<u64, AppError> {
        let id = self.require_id(entity, Operation::Update)?;
        self.update(entity.fields()?, id).await
    }

    pub async fn delete(&self, entity: &E) -> Result<u64, AppError> {
        let id = self.require_id(entity, Operation::Delete)?;
        self.remove(id).await
    }

    fn require_id(&self, entity: &E, operation: Operation) -> Result<Value, AppError> {
        entity.id()?.ok_or_else(|| {
            AppError::BadRequest(format!(
                "{} on '{}' needs a persisted entity",
                operation, self.descriptor.table_name
            ))
        })
    }
}

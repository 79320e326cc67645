//! Generic repository with staged writes.
//!
//! Reads go straight to the database and return detached snapshots. Writes are
//! staged in the change set shared with the owning [`UnitOfWork`] and reach the
//! database only when it completes.
//!
//! [`UnitOfWork`]: crate::UnitOfWork

use std::marker::PhantomData;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use hotelres_shared::types::{PageRequest, PageResponse};
use sea_orm::sea_query::IntoCondition;
use sea_orm::{
    ActiveModelTrait, Condition, DatabaseConnection, DatabaseTransaction, DbErr, EntityName,
    EntityTrait, IntoActiveModel, Iterable, PaginatorTrait, PrimaryKeyToColumn, PrimaryKeyTrait,
    QueryFilter, QueryOrder, QuerySelect, Related, Select,
};
use tracing::debug;

/// What a staged change does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    /// Insert new rows.
    Insert,
    /// Overwrite existing rows by primary key.
    Update,
    /// Delete rows by primary key.
    Delete,
}

impl ChangeKind {
    const fn as_str(self) -> &'static str {
        match self {
            Self::Insert => "insert",
            Self::Update => "update",
            Self::Delete => "delete",
        }
    }
}

/// A write waiting for its unit of work to complete.
#[async_trait]
pub(crate) trait PendingChange: Send + Sync {
    /// Short description for logs, e.g. `insert 5 rooms`.
    fn describe(&self) -> String;

    /// Applies the change inside `txn` and returns the affected row count.
    async fn apply(self: Box<Self>, txn: &DatabaseTransaction) -> Result<u64, DbErr>;
}

/// Staged changes shared by every repository of one unit of work.
pub(crate) type ChangeSet = Arc<Mutex<Vec<Box<dyn PendingChange>>>>;

pub(crate) fn lock(changes: &ChangeSet) -> MutexGuard<'_, Vec<Box<dyn PendingChange>>> {
    changes.lock().unwrap_or_else(PoisonError::into_inner)
}

struct Staged<A> {
    kind: ChangeKind,
    rows: Vec<A>,
}

#[async_trait]
impl<A> PendingChange for Staged<A>
where
    A: ActiveModelTrait + Send + Sync + 'static,
    <A::Entity as EntityTrait>::Model: IntoActiveModel<A>,
{
    fn describe(&self) -> String {
        format!(
            "{} {} {}",
            self.kind.as_str(),
            self.rows.len(),
            A::Entity::default().table_name()
        )
    }

    async fn apply(self: Box<Self>, txn: &DatabaseTransaction) -> Result<u64, DbErr> {
        let Staged { kind, rows } = *self;
        let mut affected = 0;
        for row in rows {
            affected += match kind {
                ChangeKind::Insert => A::Entity::insert(row).exec_without_returning(txn).await?,
                ChangeKind::Update => {
                    A::Entity::update(row).exec(txn).await?;
                    1
                }
                ChangeKind::Delete => A::Entity::delete(row).exec(txn).await?.rows_affected,
            };
        }
        Ok(affected)
    }
}

/// Data access for one entity type.
///
/// Obtained from a [`UnitOfWork`](crate::UnitOfWork); every repository of the
/// same unit shares its change set.
pub struct Repository<E: EntityTrait> {
    db: DatabaseConnection,
    changes: ChangeSet,
    _entity: PhantomData<fn() -> E>,
}

impl<E: EntityTrait> Clone for Repository<E> {
    fn clone(&self) -> Self {
        Self {
            db: self.db.clone(),
            changes: Arc::clone(&self.changes),
            _entity: PhantomData,
        }
    }
}

impl<E: EntityTrait> std::fmt::Debug for Repository<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Repository")
            .field("table", &E::default().table_name())
            .finish_non_exhaustive()
    }
}

impl<E> Repository<E>
where
    E: EntityTrait,
    E::Model: IntoActiveModel<E::ActiveModel> + Send + Sync,
    E::ActiveModel: ActiveModelTrait<Entity = E> + Send + Sync + 'static,
{
    pub(crate) fn new(db: DatabaseConnection, changes: ChangeSet) -> Self {
        Self {
            db,
            changes,
            _entity: PhantomData,
        }
    }

    /// Returns the connection reads run on.
    #[must_use]
    pub fn connection(&self) -> &DatabaseConnection {
        &self.db
    }

    /// Builds a query ordered by primary key.
    fn select(filter: Option<Condition>) -> Select<E> {
        let mut query = E::find();
        if let Some(filter) = filter {
            query = query.filter(filter);
        }
        for key in E::PrimaryKey::iter() {
            query = query.order_by_asc(key.into_column());
        }
        query
    }

    /// Fetches every row matching `filter`, or every row when `None`.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn get(&self, filter: Option<Condition>) -> Result<Vec<E::Model>, DbErr> {
        Self::select(filter).all(&self.db).await
    }

    /// Fetches the first row matching `filter`, in primary key order.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn get_one(&self, filter: impl IntoCondition) -> Result<Option<E::Model>, DbErr> {
        Self::select(Some(filter.into_condition()))
            .one(&self.db)
            .await
    }

    /// Fetches the only row matching `filter`.
    ///
    /// # Errors
    ///
    /// Returns `DbErr::Custom` if more than one row matches, or an error if
    /// the database query fails.
    pub async fn get_single(&self, filter: impl IntoCondition) -> Result<Option<E::Model>, DbErr> {
        let mut rows = Self::select(Some(filter.into_condition()))
            .limit(2)
            .all(&self.db)
            .await?;

        if rows.len() > 1 {
            return Err(DbErr::Custom(format!(
                "expected at most one row in {}, found several",
                E::default().table_name()
            )));
        }
        Ok(rows.pop())
    }

    /// Fetches a row by primary key.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_id<K>(&self, id: K) -> Result<Option<E::Model>, DbErr>
    where
        K: Into<<E::PrimaryKey as PrimaryKeyTrait>::ValueType>,
    {
        E::find_by_id(id).one(&self.db).await
    }

    /// Fetches matching rows together with one related row each.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn get_including<R>(
        &self,
        filter: Option<Condition>,
    ) -> Result<Vec<(E::Model, Option<R::Model>)>, DbErr>
    where
        R: EntityTrait,
        E: Related<R>,
    {
        Self::select(filter)
            .find_also_related(R::default())
            .all(&self.db)
            .await
    }

    /// Fetches matching rows together with all their related rows.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn get_with_many<R>(
        &self,
        filter: Option<Condition>,
    ) -> Result<Vec<(E::Model, Vec<R::Model>)>, DbErr>
    where
        R: EntityTrait,
        E: Related<R>,
    {
        Self::select(filter)
            .find_with_related(R::default())
            .all(&self.db)
            .await
    }

    /// Counts rows matching `filter`.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn count(&self, filter: Option<Condition>) -> Result<u64, DbErr> {
        let mut query = E::find();
        if let Some(filter) = filter {
            query = query.filter(filter);
        }
        query.count(&self.db).await
    }

    /// Fetches one page of rows matching `filter`.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn get_page(
        &self,
        filter: Option<Condition>,
        page: PageRequest,
    ) -> Result<PageResponse<E::Model>, DbErr> {
        let paginator = Self::select(filter).paginate(&self.db, page.limit());
        let total = paginator.num_items().await?;
        let rows = paginator.fetch_page(page.index()).await?;
        Ok(PageResponse::new(rows, page, total))
    }

    /// Stages an insert.
    pub fn create(&self, item: impl IntoActiveModel<E::ActiveModel>) {
        self.stage(ChangeKind::Insert, vec![item.into_active_model()]);
    }

    /// Stages several inserts.
    pub fn add_range<I>(&self, items: I)
    where
        I: IntoIterator,
        I::Item: IntoActiveModel<E::ActiveModel>,
    {
        self.stage(ChangeKind::Insert, collect(items));
    }

    /// Stages an update of the row with the item's primary key.
    pub fn update(&self, item: impl IntoActiveModel<E::ActiveModel>) {
        self.stage(ChangeKind::Update, vec![item.into_active_model()]);
    }

    /// Stages several updates.
    pub fn update_range<I>(&self, items: I)
    where
        I: IntoIterator,
        I::Item: IntoActiveModel<E::ActiveModel>,
    {
        self.stage(ChangeKind::Update, collect(items));
    }

    /// Stages a delete of the row with the item's primary key.
    pub fn delete(&self, item: impl IntoActiveModel<E::ActiveModel>) {
        self.stage(ChangeKind::Delete, vec![item.into_active_model()]);
    }

    /// Stages several deletes.
    pub fn delete_range<I>(&self, items: I)
    where
        I: IntoIterator,
        I::Item: IntoActiveModel<E::ActiveModel>,
    {
        self.stage(ChangeKind::Delete, collect(items));
    }

    fn stage(&self, kind: ChangeKind, rows: Vec<E::ActiveModel>) {
        if rows.is_empty() {
            return;
        }

        // Models arrive with every field unchanged; mark them set so the
        // whole row is written.
        let rows: Vec<E::ActiveModel> = match kind {
            ChangeKind::Insert | ChangeKind::Update => {
                rows.into_iter().map(ActiveModelTrait::reset_all).collect()
            }
            ChangeKind::Delete => rows,
        };

        debug!(
            table = E::default().table_name(),
            kind = kind.as_str(),
            rows = rows.len(),
            "Staged change"
        );
        lock(&self.changes).push(Box::new(Staged { kind, rows }));
    }
}

fn collect<A, I>(items: I) -> Vec<A>
where
    I: IntoIterator,
    I::Item: IntoActiveModel<A>,
    A: ActiveModelTrait,
{
    items
        .into_iter()
        .map(IntoActiveModel::into_active_model)
        .collect()
}

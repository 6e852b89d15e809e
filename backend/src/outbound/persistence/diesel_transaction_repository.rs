//! PostgreSQL-backed [`TransactionRepository`].

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::Transaction;
use crate::domain::ports::{RepositoryError, TransactionRepository};

use super::diesel_helpers::{map_diesel_error, map_pool_error};
use super::models::TransactionRow;
use super::pool::DbPool;
use super::schema::transactions;

/// Diesel implementation of the append-only ledger.
#[derive(Clone)]
pub struct DieselTransactionRepository {
    pool: DbPool,
}

impl DieselTransactionRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TransactionRepository for DieselTransactionRepository {
    async fn insert(&self, transaction: &Transaction) -> Result<(), RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::insert_into(transactions::table)
            .values(TransactionRow::from(transaction))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(())
    }

    async fn list(&self, limit: Option<usize>) -> Result<Vec<Transaction>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let mut query = transactions::table
            .order(transactions::occurred_at.desc())
            .select(TransactionRow::as_select())
            .into_boxed();
        if let Some(limit) = limit {
            query = query.limit(i64::try_from(limit).unwrap_or(i64::MAX));
        }
        let rows: Vec<TransactionRow> = query.load(&mut conn).await.map_err(map_diesel_error)?;
        rows.into_iter().map(Transaction::try_from).collect()
    }
}

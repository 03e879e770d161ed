use sqlx::PgConnection;

/// A handle to a live database connection, either pooled or part of an open transaction
pub trait ConnectionHandle {
    fn borrow_connection(&mut self) -> &mut PgConnection;
}

/// Abstraction over the set of external systems the application talks to. Driven adapters
/// receive one of these so they can be handed either a plain pooled connection or a connection
/// participating in a transaction without knowing the difference.
pub trait ExternalConnectivity {
    type DbHandle<'cxn_borrow>: ConnectionHandle
    where
        Self: 'cxn_borrow;

    async fn database_cxn(&mut self) -> Result<Self::DbHandle<'_>, anyhow::Error>;
}

/// An [ExternalConnectivity] with an open database transaction. Dropping the handle without
/// calling [TransactionHandle::commit] rolls the transaction back.
pub trait TransactionHandle: ExternalConnectivity {
    async fn commit(self) -> Result<(), anyhow::Error>;
}

/// Something that can open a database transaction
pub trait Transactable {
    type Handle: TransactionHandle;

    async fn start_transaction(&self) -> Result<Self::Handle, anyhow::Error>;
}

/// Convenience trait for connectivity that can be used directly or wrapped in a transaction
pub trait TransactableExternalConnectivity: ExternalConnectivity + Transactable {}

impl<T> TransactableExternalConnectivity for T where T: ExternalConnectivity + Transactable {}

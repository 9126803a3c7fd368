//! Shared dependencies handed to every controller.
//!
//! # Responsibility
//! - Own the JSON store, the clock, configuration and the quiz catalog.
//! - Open the default SQLite-backed context from `CoreConfig`.
//!
//! # Invariants
//! - Everything here is read-only to controllers; only the store's backend
//!   mutates, and each collection key has a single controller writing it.

use crate::config::CoreConfig;
use crate::dates::{Calendar, Clock, SystemClock};
use crate::db::DbResult;
use crate::quiz::QuizCatalog;
use crate::store::{JsonStore, KvBackend, SqliteKvBackend};
use log::info;

pub struct CoreContext<B: KvBackend> {
    store: JsonStore<B>,
    clock: Box<dyn Clock>,
    config: CoreConfig,
    catalog: QuizCatalog,
}

impl<B: KvBackend> CoreContext<B> {
    /// Builds a context over `backend` with the system clock and the
    /// built-in quiz catalog.
    pub fn new(backend: B, config: CoreConfig) -> Self {
        Self {
            store: JsonStore::new(backend),
            clock: Box::new(SystemClock),
            config,
            catalog: QuizCatalog::builtin(),
        }
    }

    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    pub fn store(&self) -> &JsonStore<B> {
        &self.store
    }

    pub fn calendar(&self) -> Calendar<'_> {
        Calendar::new(self.clock.as_ref())
    }

    pub fn config(&self) -> &CoreConfig {
        &self.config
    }

    pub fn catalog(&self) -> &QuizCatalog {
        &self.catalog
    }

    /// Whether persistence has failed at least once in this context.
    pub fn degraded(&self) -> bool {
        self.store.degraded()
    }
}

impl CoreContext<SqliteKvBackend> {
    /// Opens the SQLite database at `config.db_path`.
    pub fn open(config: CoreConfig) -> DbResult<Self> {
        let backend = SqliteKvBackend::open(&config.db_path)?;
        info!(
            "event=context_open module=context status=ok db_path={}",
            config.db_path.display()
        );
        Ok(Self::new(backend, config))
    }
}

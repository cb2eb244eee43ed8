//! Repository layer for database operations

pub mod assignments;
pub mod equipment;
pub mod history;
pub mod inspectors;
pub mod users;

use sqlx::{Pool, Postgres};

/// Main repository struct holding database connection pool
#[derive(Clone)]
pub struct Repository {
    pub pool: Pool<Postgres>,
    pub equipment: equipment::EquipmentRepository,
    pub assignments: assignments::AssignmentsRepository,
    pub history: history::HistoryRepository,
    pub inspectors: inspectors::InspectorsRepository,
    pub users: users::UsersRepository,
}

impl Repository {
    /// Create a new repository with the given database pool
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self {
            equipment: equipment::EquipmentRepository::new(pool.clone()),
            assignments: assignments::AssignmentsRepository::new(pool.clone()),
            history: history::HistoryRepository::new(pool.clone()),
            inspectors: inspectors::InspectorsRepository::new(pool.clone()),
            users: users::UsersRepository::new(pool.clone()),
            pool,
        }
    }
}

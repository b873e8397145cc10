use anyhow::Result;
use diesel::{
    Connection, PgConnection,
    connection::CacheSize,
    r2d2::{ConnectionManager, CustomizeConnection, Error as R2d2Error, Pool},
};

// Poolers in transaction mode (pgbouncer, supavisor) reject named prepared statements.
#[derive(Debug, Default)]
struct DisablePreparedStatements;

impl CustomizeConnection<PgConnection, R2d2Error> for DisablePreparedStatements {
    fn on_acquire(&self, conn: &mut PgConnection) -> std::result::Result<(), R2d2Error> {
        conn.set_prepared_statement_cache_size(CacheSize::Disabled);
        Ok(())
    }
}

pub type PgPoolSquad = Pool<ConnectionManager<PgConnection>>;

pub fn establish_connection(database_url: &str) -> Result<PgPoolSquad> {
    let manager = ConnectionManager::<PgConnection>::new(database_url);
    let pool = Pool::builder()
        .connection_customizer(Box::new(DisablePreparedStatements))
        .build(manager)?;
    Ok(pool)
}

/// Builds a pool without opening any connection up front.
///
/// Connections are only attempted on first checkout, which lets routers be
/// assembled (and exercised on paths that never reach storage) without a
/// running database.
pub fn lazy_connection(database_url: &str) -> PgPoolSquad {
    let manager = ConnectionManager::<PgConnection>::new(database_url);
    Pool::builder()
        .connection_customizer(Box::new(DisablePreparedStatements))
        .build_unchecked(manager)
}

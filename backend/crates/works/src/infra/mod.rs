//! Infrastructure Layer

pub mod memory;
pub mod postgres;

pub use memory::MemoryWorkRepository;
pub use postgres::PgWorkRepository;

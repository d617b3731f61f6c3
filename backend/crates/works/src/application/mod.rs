//! Application Layer

pub mod browse;
pub mod create_work;
pub mod delete_work;

pub use browse::BrowseWorksUseCase;
pub use create_work::CreateWorkUseCase;
pub use delete_work::DeleteWorkUseCase;

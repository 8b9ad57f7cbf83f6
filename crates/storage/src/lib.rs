#![forbid(unsafe_code)]

pub mod files;
pub mod repository;

pub use files::FileRepository;
pub use repository::{
    InMemoryRepository, QuestionRepository, ResultRepository, Storage, StorageError,
};

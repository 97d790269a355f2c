//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&PgPool` as the first argument. All SQL lives here; filter
//! predicates follow the `($n::TYPE IS NULL OR col = $n)` convention so an
//! absent filter value always means "no constraint".

pub mod author_repo;
pub mod day_of_repo;
pub mod popularity_repo;
pub mod quote_repo;
pub mod search_repo;
pub mod topic_repo;

pub use author_repo::AuthorRepo;
pub use day_of_repo::DayOfRepo;
pub use popularity_repo::PopularityRepo;
pub use quote_repo::QuoteRepo;
pub use search_repo::SearchRepo;
pub use topic_repo::TopicRepo;

//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod activity_repo;
pub mod exercise_repo;
pub mod lesson_repo;
pub mod level_repo;
pub mod main_activity_repo;
pub mod media_asset_repo;
pub mod role_repo;
pub mod session_repo;
pub mod user_repo;

pub use activity_repo::ActivityRepo;
pub use exercise_repo::ExerciseRepo;
pub use lesson_repo::LessonRepo;
pub use level_repo::LevelRepo;
pub use main_activity_repo::MainActivityRepo;
pub use media_asset_repo::MediaAssetRepo;
pub use role_repo::RoleRepo;
pub use session_repo::SessionRepo;
pub use user_repo::UserRepo;

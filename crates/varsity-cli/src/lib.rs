//! # Varsity CLI
//!
//! Database maintenance for Varsity development and operations.
//!
//! ## Usage
//!
//! ```ignore
//! use varsity_cli::seeder::{AcademicSeed, seed_academics};
//!
//! let seeded = seed_academics(&pool, &AcademicSeed::default()).await?;
//! println!("semester: {}", seeded.semester.id);
//! ```

pub mod seeder;

use anyhow::Context;
use clap::{Parser, Subcommand};
use dotenvy::dotenv;
use varsity_cli::seeder::{AcademicSeed, seed_academics};
use varsity_config::DatabaseConfig;
use varsity_db::{init_db_pool, run_migrations};
use varsity_models::{Month, SemesterName};

#[derive(Parser)]
#[command(name = "varsity-cli")]
#[command(about = "Varsity CLI - Administrative tools for Varsity", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Apply pending database migrations
    Migrate,
    /// Insert a faculty, a department and a semester, printing their ids
    SeedAcademics {
        /// Faculty name
        #[arg(long, default_value = "Faculty of Engineering")]
        faculty: String,

        /// Department name (belongs to the faculty)
        #[arg(long, default_value = "Department of Computer Science and Engineering")]
        department: String,

        /// Semester name: Autumn, Summer or Fall
        #[arg(long, default_value = "Autumn")]
        semester: SemesterName,

        /// Four digit year
        #[arg(long, default_value = "2030")]
        year: String,

        /// First month of the semester
        #[arg(long, default_value = "January")]
        start_month: Month,

        /// Last month of the semester
        #[arg(long, default_value = "April")]
        end_month: Month,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    let cli = Cli::parse();

    let pool = init_db_pool(&DatabaseConfig::from_env())
        .await
        .context("Failed to connect to database")?;

    match cli.command {
        Commands::Migrate => {
            run_migrations(&pool).await?;
            println!("✅ Migrations applied");
        }
        Commands::SeedAcademics {
            faculty,
            department,
            semester,
            year,
            start_month,
            end_month,
        } => {
            let seed = AcademicSeed {
                faculty,
                department,
                semester,
                year,
                start_month,
                end_month,
            };
            let seeded = seed_academics(&pool, &seed).await?;

            println!("✅ Academic data seeded");
            println!(
                "   Faculty:    {} ({})",
                seeded.faculty.name, seeded.faculty.id
            );
            println!(
                "   Department: {} ({})",
                seeded.department.name, seeded.department.id
            );
            println!(
                "   Semester:   {} {} ({})",
                seeded.semester.name, seeded.semester.year, seeded.semester.id
            );
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_academics_defaults() {
        let cli = Cli::try_parse_from(["varsity-cli", "seed-academics"]).unwrap();
        match cli.command {
            Commands::SeedAcademics {
                semester,
                start_month,
                ..
            } => {
                assert_eq!(semester, SemesterName::Autumn);
                assert_eq!(start_month, Month::January);
            }
            Commands::Migrate => panic!("expected seed-academics"),
        }
    }

    #[test]
    fn test_seed_academics_rejects_unknown_semester() {
        assert!(
            Cli::try_parse_from(["varsity-cli", "seed-academics", "--semester", "Winter"]).is_err()
        );
    }
}

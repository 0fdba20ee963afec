pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
use crate::config::toml_config::CatalogConfig;
#[cfg(feature = "cli")]
use crate::utils::error::Result;
#[cfg(feature = "cli")]
use crate::utils::validation::{self, Validate};
#[cfg(feature = "cli")]
use clap::Parser;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "course-topics")]
#[command(about = "Render course topic cards into static LMS course pages")]
pub struct CliConfig {
    /// Catalog file (TOML, or JSON by extension). Defaults to the built-in catalog
    #[arg(short, long)]
    pub catalog: Option<String>,

    /// Only publish the course with this slug
    #[arg(long)]
    pub course: Option<String>,

    #[arg(long, default_value = "./site")]
    pub output_path: String,

    /// List the courses in the catalog and exit
    #[arg(long)]
    pub list: bool,

    /// Show what would be published without writing files
    #[arg(long)]
    pub dry_run: bool,

    /// Emit logs as JSON
    #[arg(long)]
    pub json_logs: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

#[cfg(feature = "cli")]
impl CliConfig {
    /// 載入目錄：指定檔案，否則使用內建目錄
    pub fn load_catalog(&self) -> Result<CatalogConfig> {
        match &self.catalog {
            Some(path) => CatalogConfig::from_file(path),
            None => CatalogConfig::builtin(),
        }
    }
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_path("output_path", &self.output_path)?;

        if let Some(path) = &self.catalog {
            validation::validate_path("catalog", path)?;
        }
        if let Some(slug) = &self.course {
            validation::validate_slug("course", slug)?;
        }

        Ok(())
    }
}

#[cfg(all(test, feature = "cli"))]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults() {
        let config = CliConfig::parse_from(["course-topics"]);
        assert_eq!(config.output_path, "./site");
        assert!(config.catalog.is_none());
        assert!(config.validate().is_ok());
        assert_eq!(config.load_catalog().unwrap().courses.len(), 3);
    }

    #[test]
    fn test_cli_flags() {
        let config = CliConfig::parse_from([
            "course-topics",
            "--course",
            "cpp",
            "--dry-run",
            "--output-path",
            "public",
        ]);
        assert!(config.dry_run);
        assert_eq!(config.course.as_deref(), Some("cpp"));
        assert_eq!(config.output_path, "public");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_cli_rejects_bad_slug() {
        let config = CliConfig::parse_from(["course-topics", "--course", "C++"]);
        assert!(config.validate().is_err());
    }
}

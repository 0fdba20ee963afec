use clap::Parser;
use course_topics::domain::ports::ContentSource;
use course_topics::utils::error::{ErrorSeverity, TopicsError};
use course_topics::utils::{logger, validation::Validate};
use course_topics::{CatalogConfig, CliConfig, LocalStorage, SiteEngine};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    // 初始化日誌
    if config.json_logs {
        logger::init_json_logger(config.verbose);
    } else {
        logger::init_cli_logger(config.verbose);
    }

    tracing::info!("Starting course-topics");
    tracing::debug!("CLI config: {:?}", config);

    // 驗證參數
    if let Err(e) = config.validate() {
        fail(&e);
    }

    let catalog = match config.load_catalog() {
        Ok(catalog) => catalog,
        Err(e) => {
            eprintln!(
                "❌ Failed to load catalog '{}'",
                config.catalog.as_deref().unwrap_or("<built-in>")
            );
            fail(&e);
        }
    };

    if config.list {
        display_catalog(&catalog);
        return Ok(());
    }

    let storage = LocalStorage::new(config.output_path.clone());
    let engine = SiteEngine::new(storage, catalog)
        .with_only(config.course.clone())
        .with_dry_run(config.dry_run);

    match engine.run().await {
        Ok(report) => {
            tracing::info!(
                "✅ Published {} page(s), {} topics",
                report.pages.len(),
                report.total_topics()
            );
            for page in &report.pages {
                let marker = if page.updated { "📄" } else { "⏭️" };
                println!("{} {:<8} {}", marker, page.slug, page.output_file);
            }
            if report.dry_run {
                println!("🔍 Dry run: nothing was written");
            } else {
                println!("📁 Output saved to: {}", config.output_path);
            }
        }
        Err(e) => fail(&e),
    }

    Ok(())
}

fn display_catalog(catalog: &CatalogConfig) {
    println!(
        "📋 Catalog: {} v{}",
        catalog.catalog.name, catalog.catalog.version
    );
    for course in catalog.courses() {
        println!(
            "  {:<8} {:<24} {} ({} modules, {} topics)",
            course.slug,
            course.name,
            course.route,
            course.modules.len(),
            course.topic_count()
        );
    }
}

fn fail(e: &TopicsError) -> ! {
    tracing::error!(
        "❌ {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 Suggestion: {}", e.recovery_suggestion());

    let exit_code = match e.severity() {
        ErrorSeverity::Low => 0,
        ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    };
    std::process::exit(exit_code);
}

use anyhow::Result;
use course_topics::core::site::MANIFEST_FILE;
use course_topics::utils::validation::Validate;
use course_topics::{
    render_course_html, CatalogConfig, CoursePage, LocalStorage, SiteEngine, TopicsError,
};
use tempfile::TempDir;

#[tokio::test]
async fn test_publish_builtin_catalog() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let catalog = CatalogConfig::builtin()?;

    let engine = SiteEngine::new(LocalStorage::new(temp_dir.path()), catalog);
    let report = engine.run().await?;

    assert_eq!(report.pages.len(), 3);
    assert_eq!(report.total_topics(), 60);

    for slug in ["java", "python", "cpp"] {
        let path = temp_dir.path().join("courses").join(slug).join("index.html");
        assert!(path.exists(), "missing page for {}", slug);
    }

    let java = std::fs::read_to_string(temp_dir.path().join("courses/java/index.html"))?;
    assert_eq!(java.matches("<div class=\"topic-card\">").count(), 4);
    assert!(java.contains("<h3>Module 1: Core Java and OOP</h3>"));
    assert!(java.contains("<li>Introduction to **Spring Boot** and Microservices</li>"));
    assert!(java.contains("<a class=\"btn-primary\" href=\"#topics\">EXPLORE COURSE</a>"));

    let manifest: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(temp_dir.path().join(MANIFEST_FILE))?)?;
    assert_eq!(manifest["catalog"], "lms-courses");
    assert_eq!(manifest["pages"].as_array().map(|p| p.len()), Some(3));
    assert_eq!(manifest["pages"][2]["output_file"], "courses/cpp/index.html");
    assert_eq!(manifest["pages"][2]["updated"], true);

    let rerun = engine.run().await?;
    assert!(rerun.pages.iter().all(|page| !page.updated));

    Ok(())
}

#[tokio::test]
async fn test_publish_single_course_from_json_catalog() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let catalog_path = temp_dir.path().join("catalog.json");
    let catalog = serde_json::json!({
        "catalog": { "name": "bootcamp", "version": "2.0" },
        "courses": [
            {
                "slug": "rust",
                "name": "Rust Systems Programming",
                "route": "courses/rust/",
                "layout": { "action_href": "#syllabus", "card_class": "module-card" },
                "modules": [
                    { "title": "Ownership", "items": ["Moves", "Borrowing", "Lifetimes"] },
                    { "title": "Concurrency", "items": ["Threads", "async/await"] }
                ]
            },
            {
                "slug": "go",
                "name": "Go",
                "route": "courses/go/",
                "modules": [{ "title": "Basics", "items": ["Goroutines"] }]
            }
        ]
    });
    tokio::fs::write(&catalog_path, catalog.to_string()).await?;

    let catalog = CatalogConfig::from_file(&catalog_path)?;
    let output_dir = temp_dir.path().join("site");
    let engine = SiteEngine::new(LocalStorage::new(&output_dir), catalog)
        .with_only(Some("rust".to_string()));

    let report = engine.run().await?;
    assert_eq!(report.pages.len(), 1);
    assert!(!output_dir.join("courses/go/index.html").exists());

    let html = std::fs::read_to_string(output_dir.join("courses/rust/index.html"))?;
    assert!(html.contains("<section id=\"syllabus\">"));
    assert_eq!(html.matches("<div class=\"module-card\">").count(), 2);
    assert!(html.contains("<ul><li>Moves</li><li>Borrowing</li><li>Lifetimes</li></ul>"));

    Ok(())
}

#[tokio::test]
async fn test_invalid_catalog_is_rejected_before_writing() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let catalog = CatalogConfig::from_toml_str(
        r#"
[catalog]
name = "broken"
version = "1.0"

[[courses]]
slug = "java"
name = "Java"
route = "courses/java/"
layout = { action_href = "/purchase/" }

[[courses.modules]]
title = "Module 1"
items = ["JVM"]
"#,
    )?;

    let engine = SiteEngine::new(LocalStorage::new(temp_dir.path()), catalog);
    let err = engine.run().await.unwrap_err();

    assert!(matches!(err, TopicsError::InvalidConfigValueError { .. }));
    assert!(!temp_dir.path().join(MANIFEST_FILE).exists());
    Ok(())
}

#[test]
fn test_render_course_html_is_deterministic() -> Result<()> {
    let catalog = CatalogConfig::builtin()?;
    let course = catalog.get_course("python")?;

    let first = render_course_html(course)?;
    let second = render_course_html(course)?;
    assert_eq!(first, second);
    assert!(first.contains("<title>Python Programming</title>"));
    assert!(first.contains("<li>Building APIs with **Flask** (Lightweight Framework)</li>"));
    Ok(())
}

#[test]
fn test_valid_action_hrefs_always_scroll_to_section() -> Result<()> {
    for href in ["#week.1", "#café", "#1:intro", "#topics"] {
        let mut catalog = CatalogConfig::builtin()?;
        catalog.courses[0].layout.action_href = href.to_string();
        catalog.validate()?;

        let course = &catalog.courses[0];
        let mut page = CoursePage::build(course)?;
        assert!(page.load()?);
        let event = page.click_call_to_action()?;

        let section = page.document().get_element_by_id(&href[1..]);
        assert!(section.is_some(), "no section for {}", href);
        assert!(event.default_prevented());
        assert_eq!(page.document().scroll_log().len(), 1, "no scroll for {}", href);
        assert_eq!(Some(page.document().scroll_log()[0].target), section);
    }
    Ok(())
}

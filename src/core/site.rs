use crate::core::page::CoursePage;
use crate::domain::model::Course;
use crate::domain::ports::{ContentSource, Storage};
use crate::utils::error::{Result, TopicsError};
use crate::utils::validation::Validate;
use chrono::{DateTime, Utc};
use serde::Serialize;

pub const MANIFEST_FILE: &str = "manifest.json";

#[derive(Debug, Clone, Serialize)]
pub struct PublishedPage {
    pub slug: String,
    pub name: String,
    pub route: String,
    pub modules: usize,
    pub topics: usize,
    pub output_file: String,
    /// `false` when the file on disk already held identical HTML.
    pub updated: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct SiteReport {
    pub catalog: String,
    pub generated_at: DateTime<Utc>,
    pub dry_run: bool,
    pub pages: Vec<PublishedPage>,
}

impl SiteReport {
    pub fn total_topics(&self) -> usize {
        self.pages.iter().map(|p| p.topics).sum()
    }
}

/// Renders a single course page and returns the finished HTML.
pub fn render_course_html(course: &Course) -> Result<String> {
    let mut page = CoursePage::build(course)?;
    page.load()?;
    Ok(page.to_html())
}

/// Publishes every course in a content source as a static page, plus a
/// `manifest.json` describing what was written.
pub struct SiteEngine<S: Storage, C: ContentSource + Validate> {
    storage: S,
    content: C,
    only: Option<String>,
    dry_run: bool,
}

impl<S: Storage, C: ContentSource + Validate> SiteEngine<S, C> {
    pub fn new(storage: S, content: C) -> Self {
        Self {
            storage,
            content,
            only: None,
            dry_run: false,
        }
    }

    /// Restrict publishing to one course slug.
    pub fn with_only(mut self, slug: Option<String>) -> Self {
        self.only = slug;
        self
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn content(&self) -> &C {
        &self.content
    }

    fn selected_courses(&self) -> Result<Vec<&Course>> {
        match &self.only {
            Some(slug) => {
                let course = self
                    .content
                    .course(slug)
                    .ok_or_else(|| TopicsError::CourseNotFound { slug: slug.clone() })?;
                Ok(vec![course])
            }
            None => Ok(self.content.courses().iter().collect()),
        }
    }

    /// A missing or unreadable file counts as changed.
    async fn is_unchanged(&self, output_file: &str, html: &str) -> bool {
        match self.storage.read_file(output_file).await {
            Ok(existing) => existing == html.as_bytes(),
            Err(e) => {
                tracing::debug!("No previous {}: {}", output_file, e);
                false
            }
        }
    }

    pub async fn run(&self) -> Result<SiteReport> {
        self.content.validate()?;
        let courses = self.selected_courses()?;

        tracing::info!(
            "🚀 Publishing {} course page(s) from catalog '{}'",
            courses.len(),
            self.content.catalog_name()
        );

        let mut pages = Vec::with_capacity(courses.len());
        for course in courses {
            let html = render_course_html(course)?;
            let output_file = course.output_file();

            let updated = if self.dry_run {
                tracing::info!(
                    "🔍 [dry run] {} -> {} ({} bytes)",
                    course.slug,
                    output_file,
                    html.len()
                );
                false
            } else if self.is_unchanged(&output_file, &html).await {
                tracing::info!("⏭️ {} unchanged, skipping {}", course.slug, output_file);
                false
            } else {
                self.storage.write_file(&output_file, html.as_bytes()).await?;
                tracing::info!("📄 {} -> {}", course.slug, output_file);
                true
            };

            pages.push(PublishedPage {
                slug: course.slug.clone(),
                name: course.name.clone(),
                route: course.route.clone(),
                modules: course.modules.len(),
                topics: course.topic_count(),
                output_file,
                updated,
            });
        }

        let report = SiteReport {
            catalog: self.content.catalog_name().to_string(),
            generated_at: Utc::now(),
            dry_run: self.dry_run,
            pages,
        };

        if !self.dry_run {
            let manifest = serde_json::to_vec_pretty(&report)?;
            self.storage.write_file(MANIFEST_FILE, &manifest).await?;
            tracing::debug!("Manifest written to {}", MANIFEST_FILE);
        }

        Ok(report)
    }
}

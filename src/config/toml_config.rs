use crate::domain::model::Course;
use crate::domain::ports::ContentSource;
use crate::utils::error::{Result, TopicsError};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

/// 內建課程目錄，編譯時嵌入
pub const BUILTIN_CATALOG: &str = include_str!("../../catalog/courses.toml");

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    pub catalog: CatalogMeta,
    pub courses: Vec<Course>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogMeta {
    pub name: String,
    pub version: String,
    pub description: Option<String>,
}

impl CatalogConfig {
    /// 從檔案載入目錄，`.json` 以 JSON 解析，其餘皆視為 TOML
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(TopicsError::IoError)?;

        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.eq_ignore_ascii_case("json"))
            .unwrap_or(false);

        if is_json {
            Self::from_json_str(&content)
        } else {
            Self::from_toml_str(&content)
        }
    }

    /// 從 TOML 字串解析目錄
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| TopicsError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 從 JSON 字串解析目錄
    pub fn from_json_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        serde_json::from_str(&processed_content).map_err(|e| TopicsError::ConfigValidationError {
            field: "json_parsing".to_string(),
            message: format!("JSON parsing error: {}", e),
        })
    }

    /// 內建的 Java / Python / C++ 課程目錄
    pub fn builtin() -> Result<Self> {
        Self::from_toml_str(BUILTIN_CATALOG)
    }

    /// 替換環境變數 (例如 ${COURSE_ROUTE_PREFIX})，未定義的變數保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| TopicsError::ConfigValidationError {
            field: "env_substitution".to_string(),
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// 驗證目錄內容
    pub fn validate_config(&self) -> Result<()> {
        validation::validate_non_empty_string("catalog.name", &self.catalog.name)?;

        if self.courses.is_empty() {
            return Err(TopicsError::ConfigValidationError {
                field: "courses".to_string(),
                message: "Catalog must contain at least one course".to_string(),
            });
        }

        let mut seen = HashSet::new();
        for (index, course) in self.courses.iter().enumerate() {
            let prefix = format!("courses[{}]", index);
            Self::validate_course(&prefix, course)?;

            if !seen.insert(course.slug.as_str()) {
                return Err(TopicsError::InvalidConfigValueError {
                    field: format!("{}.slug", prefix),
                    value: course.slug.clone(),
                    reason: "Duplicate course slug".to_string(),
                });
            }
        }

        Ok(())
    }

    fn validate_course(prefix: &str, course: &Course) -> Result<()> {
        validation::validate_slug(&format!("{}.slug", prefix), &course.slug)?;
        validation::validate_non_empty_string(&format!("{}.name", prefix), &course.name)?;
        validation::validate_route(&format!("{}.route", prefix), &course.route)?;

        let layout = &course.layout;
        validation::validate_selector(
            &format!("{}.layout.container_selector", prefix),
            &layout.container_selector,
        )?;
        validation::validate_selector(
            &format!("{}.layout.action_selector", prefix),
            &layout.action_selector,
        )?;
        validation::validate_fragment_href(
            &format!("{}.layout.action_href", prefix),
            &layout.action_href,
        )?;
        validation::validate_non_empty_string(
            &format!("{}.layout.card_class", prefix),
            &layout.card_class,
        )?;

        if course.modules.is_empty() {
            return Err(TopicsError::ConfigValidationError {
                field: format!("{}.modules", prefix),
                message: "A course needs at least one module".to_string(),
            });
        }
        for (index, module) in course.modules.iter().enumerate() {
            validation::validate_non_empty_string(
                &format!("{}.modules[{}].title", prefix, index),
                &module.title,
            )?;
        }

        Ok(())
    }

    /// 依 slug 取得課程
    pub fn get_course(&self, slug: &str) -> Result<&Course> {
        self.course(slug).ok_or_else(|| TopicsError::CourseNotFound {
            slug: slug.to_string(),
        })
    }

    pub fn total_topics(&self) -> usize {
        self.courses.iter().map(Course::topic_count).sum()
    }
}

impl ContentSource for CatalogConfig {
    fn catalog_name(&self) -> &str {
        &self.catalog.name
    }

    fn courses(&self) -> &[Course] {
        &self.courses
    }
}

impl Validate for CatalogConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}

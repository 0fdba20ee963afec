use crate::domain::model::Course;
use crate::utils::error::Result;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

/// Supplies the course content the renderer publishes.
pub trait ContentSource: Send + Sync {
    fn catalog_name(&self) -> &str;
    fn courses(&self) -> &[Course];

    fn course(&self, slug: &str) -> Option<&Course> {
        self.courses().iter().find(|c| c.slug == slug)
    }
}

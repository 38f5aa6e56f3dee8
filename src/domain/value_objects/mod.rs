use std::sync::Arc;

/// Ordered webhook URLs every payload is posted to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DestinationSet {
    urls: Arc<[String]>,
}

impl DestinationSet {
    pub fn new(urls: Vec<String>) -> Self {
        Self { urls: urls.into() }
    }

    pub fn urls(&self) -> &[String] {
        &self.urls
    }
}

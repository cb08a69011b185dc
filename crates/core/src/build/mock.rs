//! Mock builder implementation for testing.

use crate::build::base::{BuildError, BuildLine, BuildStream, Builder};
use async_trait::async_trait;
use sk_protocol::manifest::BuildConfig;
use std::path::Path;

#[derive(Clone)]
pub struct MockBuilder {
    items: Vec<Result<BuildLine, BuildError>>,
}

impl MockBuilder {
    pub fn new(items: Vec<Result<BuildLine, BuildError>>) -> Self {
        Self { items }
    }

    pub fn success() -> Self {
        Self {
            items: vec![
                Ok(BuildLine::Err("   Compiling mock v0.1.0".to_string())),
                Ok(BuildLine::Err("    Finished `release` profile".to_string())),
            ],
        }
    }

    pub fn failing() -> Self {
        Self {
            items: vec![
                Ok(BuildLine::Err("   Compiling mock v0.1.0".to_string())),
                Ok(BuildLine::Err("error[E0425]: cannot find value".to_string())),
                Err(BuildError::Failed("exit code 101".to_string())),
            ],
        }
    }
}

#[async_trait]
impl Builder for MockBuilder {
    async fn build(&self, _root: &Path, _config: &BuildConfig) -> Result<BuildStream, BuildError> {
        let items = self.items.clone();
        Ok(Box::pin(tokio_stream::iter(items)))
    }
}

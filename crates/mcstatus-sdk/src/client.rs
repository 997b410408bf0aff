//! Service seams used by the command interpreter.

use async_trait::async_trait;
use mcstatus_models::{ServerAddress, ServerStatus};

use crate::error::SdkError;

/// Looks up the live status of a Minecraft server.
#[async_trait]
pub trait StatusLookup: Send + Sync {
    /// Fetch and normalize the status of `address`. One attempt per call.
    async fn lookup(&self, address: &ServerAddress) -> Result<ServerStatus, SdkError>;
}

/// Produces a natural-language description of a server.
#[async_trait]
pub trait DescriptionGenerator: Send + Sync {
    /// Describe `status`. The returned text is shown verbatim.
    async fn describe(&self, status: &ServerStatus) -> Result<String, SdkError>;
}

#[async_trait]
impl StatusLookup for Box<dyn StatusLookup> {
    async fn lookup(&self, address: &ServerAddress) -> Result<ServerStatus, SdkError> {
        (**self).lookup(address).await
    }
}

#[async_trait]
impl DescriptionGenerator for Box<dyn DescriptionGenerator> {
    async fn describe(&self, status: &ServerStatus) -> Result<String, SdkError> {
        (**self).describe(status).await
    }
}

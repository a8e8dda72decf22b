//! Application state shared by all handlers.

use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use pixlift_core::Config;
use pixlift_services::EnhancementService;
use pixlift_storage::Storage;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub enhancer: EnhancementService,
    pub storage: Arc<dyn Storage>,
    /// Root cancellation token, fired on graceful shutdown. Handlers derive
    /// child tokens from it so in-flight polling stops with the server.
    pub shutdown: CancellationToken,
}

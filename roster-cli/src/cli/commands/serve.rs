//! `roster serve`

use anyhow::Result;

use super::ServeArgs;
use crate::config::Config;
use crate::server::{AppState, serve};

pub async fn handle_serve_command(args: ServeArgs, config: &Config) -> Result<()> {
    let ingestor = crate::cli::build_ingestor(config).await?;
    let addr = args.addr.unwrap_or_else(|| config.listen_addr.clone());

    log::info!("Storing uploads in {}", config.upload_dir.display());
    if config.delete_uploads {
        log::info!("Uploads are deleted after processing");
    }

    let state = AppState {
        ingestor,
        upload_dir: config.upload_dir.clone(),
    };
    serve(state, &addr, config.max_upload_bytes).await
}

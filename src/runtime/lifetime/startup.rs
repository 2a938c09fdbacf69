use crate::config::AppConfig;
use crate::identity::IdentityClient;
use crate::storage::Storage;
use std::sync::Arc;
use tracing::{debug, info, warn};

pub struct StartupContext {
    pub storage: Arc<dyn Storage>,
    pub identity: IdentityClient,
}

/// 启动时探测 Firestore 是否可达
/// 失败只记录日志，读接口会自行降级
async fn probe_storage(storage: &Arc<dyn Storage>) {
    match storage.list_classes().await {
        Ok(classes) => {
            info!("Firestore reachable, {} class(es) found", classes.len());
        }
        Err(e) => {
            warn!(
                "Firestore probe failed: {}, reads will degrade until it recovers",
                e
            );
        }
    }
}

/// 准备服务器启动的上下文
/// 包括存储和身份认证客户端
pub async fn prepare_server_startup() -> StartupContext {
    rustls::crypto::ring::default_provider()
        .install_default()
        .expect("Failed to install rustls crypto provider");

    let config = AppConfig::get();
    if config.firebase.api_key.is_empty() {
        warn!("Firebase API key is empty, sign-in and registration will fail");
    }

    let storage = crate::storage::create_storage()
        .await
        .expect("Failed to create storage backend");
    warn!(
        "Firestore storage initialized for project {}",
        config.firebase.project_id
    );

    probe_storage(&storage).await;

    let identity =
        IdentityClient::new(&config.firebase).expect("Failed to create identity client");
    debug!("Identity client ready: {}", config.firebase.identity_endpoint);

    StartupContext { storage, identity }
}

use adapt::{
    store::{ConfigStore, NoticeStore},
    MessageLog,
};
use domain::{contact::ContactField, security::NonceKey};
use serve::{registry::ExtensionRegistry, render::Templates};
use std::{path::PathBuf, sync::Arc};

/// Everything a request handler needs; cheap to clone.
#[derive(Clone)]
pub struct AppState {
    pub templates: Arc<Templates>,
    pub registry: Arc<ExtensionRegistry>,
    pub config: Arc<dyn ConfigStore>,
    pub notices: Arc<dyn NoticeStore>,
    pub inbox: Arc<MessageLog>,
    pub nonce: NonceKey,
    /// Contact fields exposed on this deployment, in form order.
    pub fields: Arc<[ContactField]>,
    pub auth_dir: PathBuf,
    pub pages_dir: PathBuf,
}

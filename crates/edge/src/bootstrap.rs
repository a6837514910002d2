// crates/edge/src/bootstrap.rs

use crate::{state::AppState, Error};
use adapt::{
    components::{
        ContactDetailsShortcode, ContactFormShortcode, ContactPanel, NoticesWidget, SupportWidget,
    },
    inbox::MESSAGES_FILE,
    store::{notice::NOTICES_FILE, open_config_store, ConfigStore, JsonNoticeStore, NoticeStore},
    MessageLog, NoticeFeed,
};
use domain::{
    contact::ContactField,
    security::NonceKey,
    setting::Settings,
};
use serve::{
    registry::{ExtensionRegistry, Screen},
    render::{style::DASHBOARD_CSS, ContactPanelRenderer, Templates},
};
use std::{path::Path, sync::Arc};
use uuid::Uuid;

/// Storage handles the registry components are built over.
pub struct Stores {
    pub config: Arc<dyn ConfigStore>,
    pub notices: Arc<dyn NoticeStore>,
}

/// Build application state from settings; relative dirs resolve under `site_dir`.
#[tracing::instrument(skip_all, fields(site = %site_dir.display()))]
pub fn compose(settings: &Settings, site_dir: &Path) -> Result<AppState, Error> {
    let data_dir = site_dir.join(&settings.data.dir);
    let stores = Stores {
        config: open_config_store(&settings.contact, &data_dir),
        notices: Arc::new(JsonNoticeStore::new(data_dir.join(NOTICES_FILE))),
    };
    compose_with(settings, site_dir, stores)
}

/// Like [`compose`] but with caller-supplied stores.
pub fn compose_with(settings: &Settings, site_dir: &Path, stores: Stores) -> Result<AppState, Error> {
    let data_dir = site_dir.join(&settings.data.dir);
    let templates = Arc::new(Templates::new()?);

    let secret = match &settings.forms.nonce_secret {
        Some(s) if !s.is_empty() => s.clone(),
        _ => {
            tracing::info!("no [forms] nonce_secret; contact forms reset on restart");
            Uuid::new_v4().to_string()
        }
    };
    let nonce = NonceKey::new(secret);

    let fields: Vec<ContactField> = ContactField::ALL
        .into_iter()
        .filter(|f| settings.contact.fields.contains(f))
        .collect();

    let panel = ContactPanel::new(
        stores.config.clone(),
        ContactPanelRenderer::new(settings.contact.logo_base.clone()),
        fields.clone(),
    );

    let mut registry = ExtensionRegistry::new();
    registry
        .register_widget(Arc::new(SupportWidget::new(panel.clone())))
        .register_widget(Arc::new(NoticesWidget::new(NoticeFeed::new(
            stores.notices.clone(),
        ))))
        .register_shortcode(Arc::new(ContactDetailsShortcode::new(panel)))
        .register_shortcode(Arc::new(ContactFormShortcode::new(
            templates.clone(),
            nonce.clone(),
        )))
        .register_style(Screen::Dashboard, DASHBOARD_CSS);

    tracing::debug!(widgets = registry.widgets().len(), "registry composed");

    Ok(AppState {
        templates,
        registry: Arc::new(registry),
        config: stores.config,
        notices: stores.notices,
        inbox: Arc::new(MessageLog::new(data_dir.join(MESSAGES_FILE))),
        nonce,
        fields: fields.into(),
        auth_dir: site_dir.join(&settings.auth.dir),
        pages_dir: site_dir.join(&settings.pages.dir),
    })
}

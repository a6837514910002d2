// crates/adapt/src/components.rs

//! Dashboard widgets and shortcodes backed by the stores.

use crate::{feed::NoticeFeed, store::ConfigStore};
use async_trait::async_trait;
use chrono::Utc;
use domain::{
    capability::AccessControl,
    contact::{ContactConfig, ContactField},
    notice::FEED_LIMIT,
    security::NonceKey,
};
use serve::{
    registry::{Shortcode, Widget},
    render::{
        render_notice_feed,
        template::{ContactFormModel, Templates},
        ContactPanelRenderer, PanelContext,
    },
    shortcode::ShortcodeAttrs,
    Error,
};
use std::sync::Arc;

/// Nonce action bound into every contact form.
pub const CONTACT_FORM_ACTION: &str = "custom_contact_form";
/// Where the contact form posts.
pub const CONTACT_FORM_PATH: &str = "/contact";

/// Shared by the support widget and `[contact_details]`.
#[derive(Clone)]
pub struct ContactPanel {
    store: Arc<dyn ConfigStore>,
    renderer: ContactPanelRenderer,
    fields: Vec<ContactField>,
}

impl ContactPanel {
    pub fn new(
        store: Arc<dyn ConfigStore>,
        renderer: ContactPanelRenderer,
        fields: Vec<ContactField>,
    ) -> Self {
        Self {
            store,
            renderer,
            fields,
        }
    }

    async fn current(&self, fields: &[ContactField]) -> Result<ContactConfig, Error> {
        let config = self.store.get().await?;
        Ok(config.restricted_to(fields))
    }

    pub async fn render(&self, context: PanelContext) -> Result<String, Error> {
        let config = self.current(&self.fields).await?;
        Ok(self.renderer.render(&config, context))
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Widgets
// ─────────────────────────────────────────────────────────────────────────────

pub struct SupportWidget {
    panel: ContactPanel,
}

impl SupportWidget {
    pub const ID: &'static str = "support_contact";

    pub fn new(panel: ContactPanel) -> Self {
        Self { panel }
    }
}

#[async_trait]
impl Widget for SupportWidget {
    fn id(&self) -> &str {
        Self::ID
    }

    fn title(&self) -> &str {
        "Support Information"
    }

    async fn render(&self, _viewer: &dyn AccessControl) -> Result<String, Error> {
        self.panel.render(PanelContext::Dashboard).await
    }
}

pub struct NoticesWidget {
    feed: NoticeFeed,
}

impl NoticesWidget {
    pub const ID: &'static str = "admin_notices";

    pub fn new(feed: NoticeFeed) -> Self {
        Self { feed }
    }
}

#[async_trait]
impl Widget for NoticesWidget {
    fn id(&self) -> &str {
        Self::ID
    }

    fn title(&self) -> &str {
        "Admin Notices"
    }

    async fn render(&self, viewer: &dyn AccessControl) -> Result<String, Error> {
        let notices = self.feed.list_recent(FEED_LIMIT).await?;
        render_notice_feed(&notices, viewer)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Shortcodes
// ─────────────────────────────────────────────────────────────────────────────

/// `[contact_details fields="email,phone"]`
pub struct ContactDetailsShortcode {
    panel: ContactPanel,
}

impl ContactDetailsShortcode {
    pub const TAG: &'static str = "contact_details";

    pub fn new(panel: ContactPanel) -> Self {
        Self { panel }
    }

    /// Exposed fields, narrowed by the `fields` attribute when present.
    /// Unknown names in the attribute are ignored.
    fn fields_for(&self, attrs: &ShortcodeAttrs) -> Vec<ContactField> {
        let Some(wanted) = attrs.get("fields") else {
            return self.panel.fields.clone();
        };
        let wanted: Vec<ContactField> = wanted
            .split(',')
            .filter_map(|name| name.parse().ok())
            .collect();
        self.panel
            .fields
            .iter()
            .copied()
            .filter(|f| wanted.contains(f))
            .collect()
    }
}

#[async_trait]
impl Shortcode for ContactDetailsShortcode {
    fn tag(&self) -> &str {
        Self::TAG
    }

    async fn render(&self, attrs: &ShortcodeAttrs) -> Result<String, Error> {
        let fields = self.fields_for(attrs);
        let config = self.panel.current(&fields).await?;
        Ok(self.panel.renderer.render(&config, PanelContext::Embed))
    }
}

/// `[contact_form]`
pub struct ContactFormShortcode {
    templates: Arc<Templates>,
    nonce: NonceKey,
}

impl ContactFormShortcode {
    pub const TAG: &'static str = "contact_form";

    pub fn new(templates: Arc<Templates>, nonce: NonceKey) -> Self {
        Self { templates, nonce }
    }
}

/// Contact form markup with a fresh nonce. `model.nonce` and `model.action`
/// are filled in here.
pub fn render_contact_form(
    templates: &Templates,
    nonce: &NonceKey,
    mut model: ContactFormModel,
) -> Result<String, Error> {
    model.action = CONTACT_FORM_PATH.to_string();
    model.nonce = nonce.create(CONTACT_FORM_ACTION, Utc::now());
    templates.render(Templates::CONTACT_FORM, &model)
}

#[async_trait]
impl Shortcode for ContactFormShortcode {
    fn tag(&self) -> &str {
        Self::TAG
    }

    async fn render(&self, _attrs: &ShortcodeAttrs) -> Result<String, Error> {
        render_contact_form(&self.templates, &self.nonce, ContactFormModel::default())
    }
}

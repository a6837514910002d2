// crates/serve/src/registry.rs

use crate::{
    render::template::WidgetView,
    shortcode::{self, ShortcodeAttrs},
    Error,
};
use async_trait::async_trait;
use domain::capability::AccessControl;
use std::{collections::HashMap, sync::Arc};

/// Admin or public screen a style can be attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Screen {
    Dashboard,
    Settings,
    Notices,
    Public,
}

/// A titled panel on the admin dashboard.
#[async_trait]
pub trait Widget: Send + Sync {
    fn id(&self) -> &str;
    fn title(&self) -> &str;
    async fn render(&self, viewer: &dyn AccessControl) -> Result<String, Error>;
}

/// Handler for a `[tag]` placeholder.
#[async_trait]
pub trait Shortcode: Send + Sync {
    fn tag(&self) -> &str;
    async fn render(&self, attrs: &ShortcodeAttrs) -> Result<String, Error>;
}

/// Explicitly composed set of widgets, shortcodes and screen styles.
#[derive(Default)]
pub struct ExtensionRegistry {
    widgets: Vec<Arc<dyn Widget>>,
    shortcodes: HashMap<String, Arc<dyn Shortcode>>,
    styles: Vec<(Screen, String)>,
}

impl ExtensionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a widget; an existing widget with the same id is replaced in place.
    pub fn register_widget(&mut self, widget: Arc<dyn Widget>) -> &mut Self {
        match self.widgets.iter_mut().find(|w| w.id() == widget.id()) {
            Some(slot) => {
                tracing::warn!(id = widget.id(), "replacing dashboard widget");
                *slot = widget;
            }
            None => self.widgets.push(widget),
        }
        self
    }

    pub fn register_shortcode(&mut self, shortcode: Arc<dyn Shortcode>) -> &mut Self {
        let tag = shortcode.tag().to_ascii_lowercase();
        if self.shortcodes.insert(tag.clone(), shortcode).is_some() {
            tracing::warn!(%tag, "replacing shortcode handler");
        }
        self
    }

    pub fn register_style(&mut self, screen: Screen, css: impl Into<String>) -> &mut Self {
        self.styles.push((screen, css.into()));
        self
    }

    /// Concatenated CSS registered for `screen`.
    pub fn styles_for(&self, screen: Screen) -> String {
        self.styles
            .iter()
            .filter(|(s, _)| *s == screen)
            .map(|(_, css)| css.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn widgets(&self) -> &[Arc<dyn Widget>] {
        &self.widgets
    }

    pub fn has_shortcode(&self, tag: &str) -> bool {
        self.shortcodes.contains_key(&tag.to_ascii_lowercase())
    }

    /// Render every widget for `viewer`. Any failure aborts the whole
    /// dashboard so no partial markup escapes.
    #[tracing::instrument(skip_all)]
    pub async fn render_dashboard(
        &self,
        viewer: &dyn AccessControl,
    ) -> Result<Vec<WidgetView>, Error> {
        let mut out = Vec::with_capacity(self.widgets.len());
        for widget in &self.widgets {
            let html = widget.render(viewer).await?;
            out.push(WidgetView {
                id: widget.id().to_string(),
                title: widget.title().to_string(),
                html,
            });
        }
        Ok(out)
    }

    /// Expand shortcodes in `content`.
    pub async fn expand(&self, content: &str) -> Result<String, Error> {
        shortcode::expand(content, &self.shortcodes).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain::capability::{Anonymous, Capability, Role, Viewer};

    struct Hello(&'static str);

    #[async_trait]
    impl Widget for Hello {
        fn id(&self) -> &str {
            "hello"
        }

        fn title(&self) -> &str {
            self.0
        }

        async fn render(&self, viewer: &dyn AccessControl) -> Result<String, Error> {
            Ok(if viewer.can(Capability::ManageOptions) {
                "<p>admin</p>".into()
            } else {
                "<p>guest</p>".into()
            })
        }
    }

    struct Down;

    #[async_trait]
    impl Widget for Down {
        fn id(&self) -> &str {
            "down"
        }

        fn title(&self) -> &str {
            "Down"
        }

        async fn render(&self, _viewer: &dyn AccessControl) -> Result<String, Error> {
            Err(Error::Unavailable("gone".into()))
        }
    }

    struct Year;

    #[async_trait]
    impl Shortcode for Year {
        fn tag(&self) -> &str {
            "Year"
        }

        async fn render(&self, _attrs: &ShortcodeAttrs) -> Result<String, Error> {
            Ok("2026".into())
        }
    }

    #[tokio::test]
    async fn widgets_render_in_registration_order_per_viewer() {
        let mut reg = ExtensionRegistry::new();
        reg.register_widget(Arc::new(Hello("Hello")));

        let admin = Viewer::new("root", Role::Administrator);
        let views = reg.render_dashboard(&admin).await.unwrap();
        assert_eq!(views.len(), 1);
        assert_eq!(views[0].title, "Hello");
        assert_eq!(views[0].html, "<p>admin</p>");

        let views = reg.render_dashboard(&Anonymous).await.unwrap();
        assert_eq!(views[0].html, "<p>guest</p>");
    }

    #[tokio::test]
    async fn duplicate_widget_id_replaces() {
        let mut reg = ExtensionRegistry::new();
        reg.register_widget(Arc::new(Hello("First")))
            .register_widget(Arc::new(Hello("Second")));
        assert_eq!(reg.widgets().len(), 1);
        assert_eq!(reg.widgets()[0].title(), "Second");
    }

    #[tokio::test]
    async fn failing_widget_fails_dashboard() {
        let mut reg = ExtensionRegistry::new();
        reg.register_widget(Arc::new(Hello("Hello")))
            .register_widget(Arc::new(Down));
        assert!(matches!(
            reg.render_dashboard(&Anonymous).await,
            Err(Error::Unavailable(_))
        ));
    }

    #[test]
    fn styles_are_scoped_to_screens() {
        let mut reg = ExtensionRegistry::new();
        reg.register_style(Screen::Dashboard, ".a{}")
            .register_style(Screen::Dashboard, ".b{}")
            .register_style(Screen::Public, ".p{}");

        assert_eq!(reg.styles_for(Screen::Dashboard), ".a{}\n.b{}");
        assert_eq!(reg.styles_for(Screen::Settings), "");
        assert_eq!(reg.styles_for(Screen::Public), ".p{}");
    }

    #[tokio::test]
    async fn shortcode_tags_are_registered_lowercase() {
        let mut reg = ExtensionRegistry::new();
        reg.register_shortcode(Arc::new(Year));
        assert!(reg.has_shortcode("year"));
        assert_eq!(reg.expand("(c) [year]").await.unwrap(), "(c) 2026");
    }
}

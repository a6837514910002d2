// crates/serve/src/render/contact.rs

use super::escape::{esc_attr, esc_html, esc_url, mailto_href, tel_href};
use domain::contact::{ContactConfig, ContactField};
use std::fmt::Write as _;
use url::Url;

/// Where the panel is shown; decides the markup shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelContext {
    /// Admin dashboard widget.
    Dashboard,
    /// Inline in public content (`[contact_details]`).
    Embed,
}

/// Pure `ContactConfig -> HTML`. Holds only the base for relative logos.
#[derive(Debug, Clone, Default)]
pub struct ContactPanelRenderer {
    logo_base: Option<Url>,
}

/// A link that survived `esc_url`, with its visible text.
struct Link {
    href: String,
    text: String,
    external: bool,
}

impl ContactPanelRenderer {
    pub fn new(logo_base: Option<Url>) -> Self {
        Self { logo_base }
    }

    /// Resolve a stored logo reference into an emit-ready `src`.
    ///
    /// Absolute http(s) URLs pass through. Anything else is a path under
    /// `logo_base` (a leading `/` is still relative to the base), or
    /// root-relative when no base is configured.
    pub fn resolve_logo(&self, logo: &str) -> Option<String> {
        let logo = logo.trim();
        if logo.is_empty() {
            return None;
        }

        if let Ok(url) = Url::parse(logo) {
            return match url.scheme() {
                "http" | "https" => esc_url(url.as_str()),
                _ => None,
            };
        }

        let rel = logo.trim_start_matches('/');
        match &self.logo_base {
            Some(base) => {
                let mut base = base.clone();
                if !base.path().ends_with('/') {
                    let path = format!("{}/", base.path());
                    base.set_path(&path);
                }
                let joined = base.join(rel).ok()?;
                esc_url(joined.as_str())
            }
            None => esc_url(&format!("/{rel}")),
        }
    }

    #[tracing::instrument(skip_all, fields(context = ?context))]
    pub fn render(&self, config: &ContactConfig, context: PanelContext) -> String {
        match context {
            PanelContext::Dashboard => self.render_dashboard(config),
            PanelContext::Embed => self.render_embed(config),
        }
    }

    fn links(config: &ContactConfig) -> Vec<(ContactField, Link)> {
        let mut out = Vec::new();

        if let Some(website) = config.get(ContactField::Website) {
            if let Some(href) = esc_url(website) {
                out.push((
                    ContactField::Website,
                    Link {
                        href,
                        text: website.to_string(),
                        external: true,
                    },
                ));
            }
        }
        if let Some(email) = config.get(ContactField::Email) {
            if let Some(href) = mailto_href(email) {
                out.push((
                    ContactField::Email,
                    Link {
                        href,
                        text: email.to_string(),
                        external: false,
                    },
                ));
            }
        }
        if let Some(phone) = config.get(ContactField::Phone) {
            // an undialable phone still shows, just without a link
            let href = tel_href(phone).unwrap_or_default();
            out.push((
                ContactField::Phone,
                Link {
                    href,
                    text: phone.to_string(),
                    external: false,
                },
            ));
        }

        out
    }

    fn logo_img(&self, config: &ContactConfig) -> Option<String> {
        let src = self.resolve_logo(config.get(ContactField::Logo)?)?;
        let alt = match config.get(ContactField::CompanyName) {
            Some(name) => format!("{name} Logo"),
            None => "Logo".to_string(),
        };
        Some(format!(
            r#"<img src="{}" alt="{}">"#,
            esc_attr(&src),
            esc_attr(&alt)
        ))
    }

    fn anchor(link: &Link) -> String {
        let text = esc_html(&link.text);
        if link.href.is_empty() {
            return format!("<span>{text}</span>");
        }
        let extra = if link.external {
            r#" target="_blank" rel="noopener""#
        } else {
            ""
        };
        format!(r#"<a href="{}"{extra}>{text}</a>"#, esc_attr(&link.href))
    }

    fn render_dashboard(&self, config: &ContactConfig) -> String {
        let logo = self.logo_img(config);
        let company = config.get(ContactField::CompanyName);
        let links = Self::links(config);

        let mut html = String::from(r#"<div class="support-dashboard">"#);
        if logo.is_none() && company.is_none() && links.is_empty() {
            html.push_str("</div>");
            return html;
        }

        html.push_str(r#"<div class="support-header">"#);
        if let Some(img) = logo {
            let _ = write!(html, r#"<div class="support-logo">{img}</div>"#);
        }
        html.push_str(r#"<div class="support-contact">"#);
        if let Some(name) = company {
            let _ = write!(html, "<h2>{}</h2>", esc_html(name));
        }
        if !links.is_empty() {
            html.push_str(r#"<div class="support-details">"#);
            for (field, link) in &links {
                let icon = match field {
                    ContactField::Website => "admin-site",
                    ContactField::Email => "email",
                    _ => "phone",
                };
                let _ = write!(
                    html,
                    r#"<div class="support-item"><span class="dashicons dashicons-{icon}" aria-label="{}"></span>{}</div>"#,
                    esc_attr(field.label()),
                    Self::anchor(link)
                );
            }
            html.push_str("</div>");
        }
        html.push_str("</div></div></div>");
        html
    }

    fn render_embed(&self, config: &ContactConfig) -> String {
        let mut html = String::from(r#"<div class="contact-details">"#);

        if let Some(name) = config.get(ContactField::CompanyName) {
            let _ = write!(html, "<h2>{}</h2>", esc_html(name));
        }
        if let Some(img) = self.logo_img(config) {
            let _ = write!(html, r#"<p class="contact-logo">{img}</p>"#);
        }
        for (field, link) in Self::links(config) {
            let label = match field {
                ContactField::Website => "Website:",
                ContactField::Email => "Email:",
                _ => "Phone:",
            };
            let _ = write!(
                html,
                r#"<p class="contact-item"><strong>{label}</strong> {}</p>"#,
                Self::anchor(&link)
            );
        }

        html.push_str("</div>");
        html
    }
}

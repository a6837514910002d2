pub mod autop;
pub mod contact;
pub mod escape;
pub mod notice;
pub mod sanitize;
pub mod style;
pub mod template;

pub use contact::{ContactPanelRenderer, PanelContext};
pub use notice::render_notice_feed;
pub use sanitize::sanitize_rich_text;
pub use template::Templates;

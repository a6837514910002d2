pub mod capability;
pub mod contact;
pub mod message;
pub mod notice;
pub mod security;
pub mod setting;
pub mod validate;

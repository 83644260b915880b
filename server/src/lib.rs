//! Wadash Server
//!
//! Dashboard backend for the Whapi WhatsApp gateway: validates and forwards
//! outbound sends and group operations, receives gateway webhooks, and
//! mirrors contacts and messages into `PostgreSQL` for the dashboard UI.

pub mod api;
pub mod config;
pub mod error;
pub mod gateway;
pub mod groups;
pub mod messages;
pub mod phone;
pub mod store;
pub mod webhook;

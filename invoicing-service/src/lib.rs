//! Invoicing Service - Invoice composition, PDF export, and AI-assisted drafting.

pub mod config;
pub mod dtos;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;
pub mod startup;

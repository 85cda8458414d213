//! Care Lens - Analysis Orchestration & Configuration Engine
//!
//! This crate turns short recordings of caregiving interactions into
//! structured professional reports through a multimodal generative model,
//! and manages the persona-specific prompt configuration, derived follow-up
//! analyses, anchored chat, and feedback caching built around those reports.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;

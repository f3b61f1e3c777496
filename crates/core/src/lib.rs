//! Core business logic for TIA, the tax and invoice assistant.
//!
//! This crate contains pure business logic with ZERO file or terminal dependencies.
//! All invoice types, validation rules, calculations and layouts live here.
//!
//! # Modules
//!
//! - `invoice` - Line item accumulation, running totals and finalization
//! - `render` - Number formatting, the document model and output writers

pub mod invoice;
pub mod render;

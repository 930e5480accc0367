//! # fellow-core
//!
//! Core types, the follow state machine, and error types for Fellow.
//!
//! This crate provides the foundational types shared across all Fellow crates:
//! - Entity structs for follow edges, user records, content items, and audit entries
//! - Status enums for the edge lifecycle
//! - The pure follow/accept/reject/unfollow transition logic
//! - Collaborator traits for the identity directory and content catalog
//! - Composed profile and search views
//! - Cross-cutting error types

pub mod audit_detail;
pub mod collaborators;
pub mod entities;
pub mod enums;
pub mod errors;
pub mod ids;
pub mod transitions;
pub mod views;

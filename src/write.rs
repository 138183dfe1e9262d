//! Write operations for modifying entities of a table.
//!
//! This module provides:
//! - Creation of entities, generating the key values they leave unset
//! - Updates of attributes of an existing item
//! - Deletion by primary key

/// Deletion by primary key.
pub mod delete_item;

/// Creation of entities.
pub mod put_item;

/// Attribute updates.
pub mod update_item;

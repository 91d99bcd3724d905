//! Infrastructure layer: in-memory registry, moderation adapters and DTOs.

pub mod dto;
pub mod moderation;
pub mod repository;

//! Core types of the mock: policy model, resources, services and errors

pub mod config;
pub mod error;
pub mod iam;
pub mod resource;
pub mod service;
pub mod validation;

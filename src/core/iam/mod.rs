//! IAM policy model and fixture generation
//!
//! Provides:
//! - Policy/Binding documents in the Resource Manager JSON shape
//! - Get/Set request bodies
//! - Seedable random generation of roles, members, bindings and policies

mod generator;
mod policy;

pub use generator::PolicyGenerator;
pub use policy::{Binding, GetIamPolicyRequest, GetPolicyOptions, Policy, SetIamPolicyRequest};

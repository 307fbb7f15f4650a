//! Role-based access control (RBAC) policy.

pub mod policy;

pub use policy::AccessPolicy;

//! Well-known role name constants.
//!
//! These must match the seed data in `20260301000001_create_roles_table.sql`.

pub const ROLE_GUEST: &str = "guest";
pub const ROLE_USER: &str = "user";
pub const ROLE_ADMIN: &str = "admin";

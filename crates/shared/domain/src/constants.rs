//! Domain-level constants.
//!
//! These constants define business rules and accepted filter inputs.

// =============================================================================
// Admin Roles
// =============================================================================

/// Role assigned to administrators created without an explicit role
pub const ROLE_ADMIN: &str = "admin";

// =============================================================================
// Filters
// =============================================================================

/// Filter key selecting a single record by identifier
pub const FILTER_KEY_ID: &str = "id";

/// Filter key selecting records by exact creation timestamp
pub const FILTER_KEY_CREATED_AT: &str = "created_at";

/// Legacy creation timestamp layout accepted by filters alongside RFC 3339
pub const LEGACY_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

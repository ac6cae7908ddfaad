//! Role resolution for signed-in users.
//!
//! A user's role decides which workspace the dashboard opens. Sources are
//! consulted in order and the first recognized role wins:
//!
//! 1. `app_metadata.role` on the auth user
//! 2. `user_metadata.role` on the auth user
//! 3. the `role` column of the user's profile row
//! 4. membership in the mentor table
//!
//! Anyone left over is a client. Lookup failures are logged and skipped, so
//! resolution itself never fails.

use std::fmt;
use std::sync::LazyLock;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::StoreError;
use crate::schema::{EnumSchema, Schema, SchemaLike};

static ROLE_SCHEMA: LazyLock<EnumSchema> =
    LazyLock::new(|| Schema::enum_(Role::ALL.iter().map(|r| r.as_str())));

/// What a user is allowed to see.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// A coaching client; the default.
    Client,
    /// A mentor working with clients.
    Mentor,
    /// Full dashboard access.
    Admin,
}

impl Role {
    /// Every role, in wire order.
    pub const ALL: &'static [Role] = &[Role::Client, Role::Mentor, Role::Admin];

    /// The wire value stored in metadata and the profile table.
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Client => "client",
            Role::Mentor => "mentor",
            Role::Admin => "admin",
        }
    }

    /// Parses a role from untrusted JSON; anything but a known name is `None`.
    pub fn parse(value: &Value) -> Option<Role> {
        let name = ROLE_SCHEMA.safe_parse(value).into_result().ok()?;
        Role::ALL.iter().copied().find(|r| r.as_str() == name)
    }

    /// The workspace this role lands on.
    pub fn workspace(self) -> Workspace {
        match self {
            Role::Client => Workspace::Client,
            Role::Mentor => Workspace::Mentor,
            Role::Admin => Workspace::Admin,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Top-level area of the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Workspace {
    /// Served at `/client`.
    Client,
    /// Served at `/mentor`.
    Mentor,
    /// Served at `/admin`.
    Admin,
}

impl Workspace {
    /// Route the dashboard redirects to.
    pub fn path(self) -> &'static str {
        match self {
            Workspace::Client => "/client",
            Workspace::Mentor => "/mentor",
            Workspace::Admin => "/admin",
        }
    }
}

/// The authenticated user as returned by the auth service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthUser {
    /// Auth user id, also the profile row key.
    pub id: String,
    /// Metadata only the server can write.
    #[serde(default)]
    pub app_metadata: Value,
    /// Metadata the user may edit.
    #[serde(default)]
    pub user_metadata: Value,
}

impl AuthUser {
    /// A user with empty metadata.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            app_metadata: Value::Null,
            user_metadata: Value::Null,
        }
    }

    /// Sets the server-controlled metadata.
    pub fn with_app_metadata(mut self, metadata: Value) -> Self {
        self.app_metadata = metadata;
        self
    }

    /// Sets the user-editable metadata.
    pub fn with_user_metadata(mut self, metadata: Value) -> Self {
        self.user_metadata = metadata;
        self
    }
}

/// Table lookups used when metadata does not carry a role.
pub trait RoleDirectory {
    /// The `role` column of the user's profile row, if there is a row.
    fn profile_role(&self, user_id: &str) -> Result<Option<String>, StoreError>;

    /// Whether the user appears in the mentor table.
    fn is_mentor(&self, user_id: &str) -> Result<bool, StoreError>;
}

/// Where a resolved role came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoleSource {
    /// `app_metadata.role` on the auth user.
    AppMetadata,
    /// `user_metadata.role` on the auth user.
    UserMetadata,
    /// The `role` column of the profile row.
    Profile,
    /// Membership in the mentor table.
    MentorTable,
    /// No source answered.
    Default,
}

/// A resolved role and the source that decided it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoleResolution {
    /// The resolved role.
    pub role: Role,
    /// The source that decided it.
    pub source: RoleSource,
}

impl RoleResolution {
    fn new(role: Role, source: RoleSource) -> Self {
        debug!(role = %role, source = ?source, "role resolved");
        Self { role, source }
    }

    /// The workspace for the resolved role.
    pub fn workspace(&self) -> Workspace {
        self.role.workspace()
    }
}

/// Resolves the user's role, falling back to [`Role::Client`].
pub fn resolve_role<D: RoleDirectory + ?Sized>(user: &AuthUser, directory: &D) -> RoleResolution {
    if let Some(role) = metadata_role(&user.app_metadata) {
        return RoleResolution::new(role, RoleSource::AppMetadata);
    }
    if let Some(role) = metadata_role(&user.user_metadata) {
        return RoleResolution::new(role, RoleSource::UserMetadata);
    }

    match directory.profile_role(&user.id) {
        Ok(Some(name)) => match Role::parse(&Value::String(name)) {
            Some(role) => return RoleResolution::new(role, RoleSource::Profile),
            None => debug!(user_id = %user.id, "ignoring unrecognized profile role"),
        },
        Ok(None) => {}
        Err(err) => warn!(user_id = %user.id, error = %err, "profile role lookup failed"),
    }

    match directory.is_mentor(&user.id) {
        Ok(true) => return RoleResolution::new(Role::Mentor, RoleSource::MentorTable),
        Ok(false) => {}
        Err(err) => warn!(user_id = %user.id, error = %err, "mentor lookup failed"),
    }

    RoleResolution::new(Role::Client, RoleSource::Default)
}

/// Resolves the workspace a signed-in user should land on.
pub fn resolve_workspace<D: RoleDirectory + ?Sized>(user: &AuthUser, directory: &D) -> Workspace {
    resolve_role(user, directory).workspace()
}

fn metadata_role(metadata: &Value) -> Option<Role> {
    metadata.get("role").and_then(Role::parse)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    struct Empty;

    impl RoleDirectory for Empty {
        fn profile_role(&self, _user_id: &str) -> Result<Option<String>, StoreError> {
            Ok(None)
        }

        fn is_mentor(&self, _user_id: &str) -> Result<bool, StoreError> {
            Ok(false)
        }
    }

    #[test]
    fn test_parse_role() {
        assert_eq!(Role::parse(&json!("mentor")), Some(Role::Mentor));
        assert_eq!(Role::parse(&json!("Mentor")), None);
        assert_eq!(Role::parse(&json!(1)), None);
    }

    #[test]
    fn test_workspace_paths() {
        assert_eq!(Role::Client.workspace().path(), "/client");
        assert_eq!(Role::Mentor.workspace().path(), "/mentor");
        assert_eq!(Role::Admin.workspace().path(), "/admin");
    }

    #[test]
    fn test_app_metadata_wins_over_user_metadata() {
        let user = AuthUser::new("u1")
            .with_app_metadata(json!({"role": "admin"}))
            .with_user_metadata(json!({"role": "mentor"}));
        let resolved = resolve_role(&user, &Empty);
        assert_eq!(resolved.role, Role::Admin);
        assert_eq!(resolved.source, RoleSource::AppMetadata);
    }

    #[test]
    fn test_default_is_client() {
        let resolved = resolve_role(&AuthUser::new("u1"), &Empty);
        assert_eq!(resolved.role, Role::Client);
        assert_eq!(resolved.source, RoleSource::Default);
    }

    #[test]
    fn test_auth_user_metadata_defaults() {
        let user: AuthUser = serde_json::from_value(json!({"id": "u1"})).unwrap();
        assert_eq!(user.app_metadata, Value::Null);
        assert_eq!(user.user_metadata, Value::Null);
    }
}

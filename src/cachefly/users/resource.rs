//! cachefly_user resource

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::cachefly::CacheFlyClient;
use crate::provider::state::{decode, encode, require_id};
use crate::provider::{Attribute, AttributeType, Diagnostics, Resource, ResourceState, Schema};

use super::models::{User, UserRequest};

const TYPE_NAME: &str = "cachefly_user";

/// State of a user as seen by the provider
#[derive(Deserialize, Serialize, Debug, Clone, Default)]
#[serde(default)]
pub(super) struct UserModel {
    pub id: Option<String>,
    pub username: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    pub email: Option<String>,
    pub full_name: Option<String>,
    pub phone: Option<String>,
    pub services: Option<Vec<String>>,
    pub permissions: Option<Vec<String>>,
    pub status: Option<String>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

impl From<User> for UserModel {
    fn from(user: User) -> Self {
        Self {
            id: Some(user.id),
            username: user.username,
            password: None,
            email: user.email,
            full_name: user.full_name,
            phone: user.phone,
            services: Some(user.services),
            permissions: Some(user.permissions),
            status: user.status,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

impl UserModel {
    fn request(&self) -> UserRequest {
        UserRequest {
            username: None,
            password: self.password.clone(),
            email: self.email.clone(),
            full_name: self.full_name.clone(),
            phone: self.phone.clone(),
            services: self.services.clone(),
            permissions: self.permissions.clone(),
        }
    }

    fn refreshed(user: User, known: &UserModel) -> Self {
        Self {
            password: known.password.clone(),
            ..Self::from(user)
        }
    }
}

pub(super) fn user_fields() -> Vec<(&'static str, AttributeType)> {
    vec![
        ("id", AttributeType::String),
        ("username", AttributeType::String),
        ("email", AttributeType::String),
        ("full_name", AttributeType::String),
        ("phone", AttributeType::String),
        ("services", AttributeType::list_of(AttributeType::String)),
        ("permissions", AttributeType::list_of(AttributeType::String)),
        ("status", AttributeType::String),
        ("created_at", AttributeType::String),
        ("updated_at", AttributeType::String),
    ]
}

/// Manages a CacheFly account user
pub struct UserResource;

#[async_trait]
impl Resource for UserResource {
    fn type_name(&self) -> &'static str {
        TYPE_NAME
    }

    fn schema(&self) -> Schema {
        let strings = AttributeType::list_of(AttributeType::String);

        Schema::new("A user of the CacheFly account.")
            .attribute("id", Attribute::computed(AttributeType::String, "User ID."))
            .attribute(
                "username",
                Attribute::required(AttributeType::String, "Login name.").requires_replace(),
            )
            .attribute(
                "password",
                Attribute::required(AttributeType::String, "Login password. Write-only.").sensitive(),
            )
            .attribute(
                "email",
                Attribute::required(AttributeType::String, "Email address."),
            )
            .attribute(
                "full_name",
                Attribute::optional_computed(AttributeType::String, "Full name."),
            )
            .attribute(
                "phone",
                Attribute::optional_computed(AttributeType::String, "Phone number."),
            )
            .attribute(
                "services",
                Attribute::optional_computed(strings.clone(), "IDs of services the user may manage."),
            )
            .attribute(
                "permissions",
                Attribute::optional_computed(strings, "Permission names granted to the user."),
            )
            .attribute("status", Attribute::computed(AttributeType::String, "Account status."))
            .attribute(
                "created_at",
                Attribute::computed(AttributeType::String, "Creation timestamp."),
            )
            .attribute(
                "updated_at",
                Attribute::computed(AttributeType::String, "Last update timestamp."),
            )
    }

    async fn create(
        &self,
        client: &CacheFlyClient,
        plan: &Value,
        diags: &mut Diagnostics,
    ) -> Option<Value> {
        let plan: UserModel = decode(plan, "configuration", diags)?;
        let request = UserRequest {
            username: Some(plan.username.clone()),
            ..plan.request()
        };
        let user = diags.check(client.create_user(&request).await, "create", TYPE_NAME)?;
        encode(&UserModel::refreshed(user, &plan), diags)
    }

    async fn read(
        &self,
        client: &CacheFlyClient,
        state: &Value,
        diags: &mut Diagnostics,
    ) -> Option<ResourceState> {
        let id = require_id(state, diags)?;
        let known: UserModel = decode(state, "state", diags)?;
        match diags.check(client.get_user(id).await, "read", TYPE_NAME)? {
            Some(user) => encode(&UserModel::refreshed(user, &known), diags).map(ResourceState::Present),
            None => Some(ResourceState::Removed),
        }
    }

    async fn update(
        &self,
        client: &CacheFlyClient,
        prior: &Value,
        plan: &Value,
        diags: &mut Diagnostics,
    ) -> Option<Value> {
        let id = require_id(prior, diags)?;
        let prior: UserModel = decode(prior, "state", diags)?;
        let plan: UserModel = decode(plan, "configuration", diags)?;

        let mut request = plan.request();
        // Only send the password when it changed
        if prior.password == plan.password {
            request.password = None;
        }

        let user = diags.check(client.update_user(id, &request).await, "update", TYPE_NAME)?;
        encode(&UserModel::refreshed(user, &plan), diags)
    }

    async fn delete(
        &self,
        client: &CacheFlyClient,
        state: &Value,
        diags: &mut Diagnostics,
    ) -> Option<()> {
        let id = require_id(state, diags)?;
        diags.check(client.delete_user(id).await, "delete", TYPE_NAME)?;
        Some(())
    }
}

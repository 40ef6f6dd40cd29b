//! cachefly_users data source

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;

use crate::cachefly::{CacheFlyClient, ListFilters};
use crate::provider::list::{list_state, with_paging, PageConfig};
use crate::provider::state::decode;
use crate::provider::{Attribute, AttributeType, DataSource, Diagnostics, Schema};

use super::resource::{user_fields, UserModel};

/// Lists account users
pub struct UsersDataSource;

#[derive(Deserialize, Debug, Default)]
#[serde(default)]
struct UsersConfig {
    #[serde(flatten)]
    page: PageConfig,
    search: Option<String>,
}

#[async_trait]
impl DataSource for UsersDataSource {
    fn type_name(&self) -> &'static str {
        "cachefly_users"
    }

    fn schema(&self) -> Schema {
        with_paging(Schema::new("List users of the CacheFly account."))
            .attribute(
                "search",
                Attribute::optional(AttributeType::String, "Free-text search on user names."),
            )
            .attribute(
                "users",
                Attribute::computed(
                    AttributeType::list_of(AttributeType::object(&user_fields())),
                    "Matching users.",
                ),
            )
    }

    async fn read(
        &self,
        client: &CacheFlyClient,
        config: &Value,
        diags: &mut Diagnostics,
    ) -> Option<Value> {
        let parsed: UsersConfig = decode(config, "configuration", diags)?;
        let options = parsed.page.list_options(ListFilters {
            search: parsed.search,
            ..ListFilters::default()
        });

        let collected = diags.check(client.get_users(&options).await, "read", self.type_name())?;
        let users: Vec<UserModel> = collected.items.into_iter().map(UserModel::from).collect();
        list_state(config, "users", &users, collected.total, diags)
    }
}

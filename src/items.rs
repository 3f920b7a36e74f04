//! Catalog items: record shape, status lifecycle, request inputs, and list filters.
//!
//! Items move `draft → active → archived`, but the store does not guard the transitions; a
//! partial update may set any status. Archiving is a logical retirement that keeps the record.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::store::{Patch, Record, ResourceStore, StoreError};
use crate::validation::{Normalize, trim, trim_all, trim_opt};

/// Store holding every catalog item.
pub type ItemStore = ResourceStore<Item>;

/// Lifecycle status of an item.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ItemStatus {
    /// Not yet visible in the catalog.
    #[default]
    Draft,
    /// Visible in the catalog.
    Active,
    /// Retired and hidden from normal listings.
    Archived,
}

/// A stored catalog item.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct Item {
    /// Unique item identifier.
    #[schema(example = 1)]
    pub id: u64,
    /// Item name.
    #[schema(example = "Premium Widget")]
    pub name: String,
    /// Optional long description.
    pub description: Option<String>,
    /// Price with two-place precision.
    #[schema(example = 29.99)]
    pub price: Decimal,
    /// Lifecycle status.
    pub status: ItemStatus,
    /// Ordered tags.
    pub tags: Vec<String>,
    /// Owning user. Not checked against the user store.
    #[schema(example = 1)]
    pub owner_id: u64,
    /// Creation time; never changes.
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    /// Time of the most recent update, `null` until the first one.
    #[serde(with = "time::serde::rfc3339::option")]
    pub updated_at: Option<OffsetDateTime>,
}

/// Creation payload for a new item.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct NewItem {
    /// Item name (1-200 characters).
    #[validate(length(min = 1, max = 200))]
    #[schema(example = "Premium Widget", min_length = 1, max_length = 200)]
    pub name: String,
    /// Optional description (at most 2000 characters).
    #[serde(default)]
    #[validate(length(max = 2000))]
    #[schema(max_length = 2000)]
    pub description: Option<String>,
    /// Price (>= 0, at most two decimal places).
    #[validate(custom(function = "crate::validation::price"))]
    #[schema(example = 29.99, minimum = 0)]
    pub price: Decimal,
    /// Initial status; defaults to `draft`.
    #[serde(default)]
    pub status: ItemStatus,
    /// Tags (at most 10).
    #[serde(default)]
    #[validate(length(max = 10))]
    #[schema(max_items = 10)]
    pub tags: Vec<String>,
    /// Owning user identifier.
    #[validate(range(min = 1))]
    #[schema(example = 1, minimum = 1)]
    pub owner_id: u64,
}

impl Normalize for NewItem {
    fn normalize(self) -> Self {
        Self {
            name: trim(self.name),
            description: trim_opt(self.description),
            tags: trim_all(self.tags),
            ..self
        }
    }
}

/// Partial update for an item; only supplied fields change.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct ItemChanges {
    /// New name.
    #[serde(default)]
    #[validate(custom(function = "crate::validation::item_name_patch"))]
    #[schema(value_type = String, required = false, min_length = 1, max_length = 200)]
    pub name: Patch<String>,
    /// New description; `null` clears it.
    #[serde(default)]
    #[validate(custom(function = "crate::validation::description_patch"))]
    #[schema(value_type = Option<String>, required = false, max_length = 2000)]
    pub description: Patch<Option<String>>,
    /// New price.
    #[serde(default)]
    #[validate(custom(function = "crate::validation::price_patch"))]
    #[schema(value_type = f64, required = false, minimum = 0)]
    pub price: Patch<Decimal>,
    /// New status.
    #[serde(default)]
    #[schema(value_type = ItemStatus, required = false)]
    pub status: Patch<ItemStatus>,
    /// Replacement tag list.
    #[serde(default)]
    #[validate(custom(function = "crate::validation::tags_patch"))]
    #[schema(value_type = Vec<String>, required = false, max_items = 10)]
    pub tags: Patch<Vec<String>>,
}

impl Normalize for ItemChanges {
    fn normalize(self) -> Self {
        Self {
            name: self.name.map(trim),
            description: self.description.map(trim_opt),
            tags: self.tags.map(trim_all),
            ..self
        }
    }
}

/// Optional predicates for listing items; present ones are combined with AND.
#[derive(Debug, Clone, Default, Deserialize, Validate, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ItemFilter {
    /// Only items with this status.
    pub status: Option<ItemStatus>,
    /// Only items owned by this user.
    #[validate(range(min = 1))]
    pub owner_id: Option<u64>,
    /// Only items priced at or above this value.
    #[validate(custom(function = "crate::validation::non_negative"))]
    #[param(value_type = Option<f64>)]
    pub min_price: Option<Decimal>,
    /// Only items priced at or below this value.
    #[validate(custom(function = "crate::validation::non_negative"))]
    #[param(value_type = Option<f64>)]
    pub max_price: Option<Decimal>,
    /// Only items carrying this tag.
    #[validate(length(min = 1, max = 50))]
    pub tag: Option<String>,
}

impl Normalize for ItemFilter {
    fn normalize(self) -> Self {
        self
    }
}

impl Record for Item {
    type Draft = NewItem;
    type Changes = ItemChanges;
    type Criteria = ItemFilter;

    const KIND: &'static str = "Item";

    fn id(&self) -> u64 {
        self.id
    }

    fn create(id: u64, draft: NewItem, created_at: OffsetDateTime) -> Self {
        Self {
            id,
            name: draft.name,
            description: draft.description,
            price: draft.price,
            status: draft.status,
            tags: draft.tags,
            owner_id: draft.owner_id,
            created_at,
            updated_at: None,
        }
    }

    fn apply(&mut self, changes: ItemChanges) {
        changes.name.apply_to(&mut self.name);
        changes.description.apply_to(&mut self.description);
        changes.price.apply_to(&mut self.price);
        changes.status.apply_to(&mut self.status);
        changes.tags.apply_to(&mut self.tags);
    }

    fn touch(&mut self, updated_at: OffsetDateTime) {
        self.updated_at = Some(updated_at);
    }

    fn matches(&self, criteria: &ItemFilter) -> bool {
        criteria.status.is_none_or(|status| self.status == status)
            && criteria.owner_id.is_none_or(|owner| self.owner_id == owner)
            && criteria.min_price.is_none_or(|min| self.price >= min)
            && criteria.max_price.is_none_or(|max| self.price <= max)
            && criteria
                .tag
                .as_ref()
                .is_none_or(|tag| self.tags.contains(tag))
    }
}

impl ItemStore {
    /// Retire an item without deleting it: set `status = archived` and stamp `updated_at`.
    pub async fn archive(&self, id: u64) -> Result<Item, StoreError> {
        let item = self
            .modify(id, |item| item.status = ItemStatus::Archived)
            .await?;
        tracing::debug!(id, "Archived item");
        Ok(item)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::str::FromStr;

    pub(crate) fn price(value: &str) -> Decimal {
        Decimal::from_str(value).expect("decimal literal")
    }

    pub(crate) fn new_item(name: &str, value: &str, owner_id: u64) -> NewItem {
        NewItem {
            name: name.into(),
            description: None,
            price: price(value),
            status: ItemStatus::default(),
            tags: Vec::new(),
            owner_id,
        }
    }

    #[tokio::test]
    async fn create_then_archive_keeps_record() {
        let store = ItemStore::new();
        let created = store
            .insert(new_item("Widget", "9.99", 1))
            .await
            .expect("insert");
        assert_eq!(created.id, 1);
        assert_eq!(created.status, ItemStatus::Draft);
        assert!(created.updated_at.is_none());

        let archived = store.archive(created.id).await.expect("archive");
        assert_eq!(archived.status, ItemStatus::Archived);
        assert!(archived.updated_at.is_some());
        assert_eq!(archived.created_at, created.created_at);
        assert_eq!(store.get(created.id).await.expect("get"), archived);
    }

    #[tokio::test]
    async fn archive_missing_item_is_not_found() {
        let store = ItemStore::new();
        assert_eq!(
            store.archive(3).await,
            Err(StoreError::NotFound { kind: "Item", id: 3 })
        );
    }

    #[tokio::test]
    async fn status_transitions_are_not_guarded() {
        let store = ItemStore::new();
        let created = store
            .insert(new_item("Widget", "9.99", 1))
            .await
            .expect("insert");
        store.archive(created.id).await.expect("archive");
        let changes = ItemChanges {
            status: Patch::Present(ItemStatus::Active),
            ..ItemChanges::default()
        };
        let revived = store.update(created.id, changes).await.expect("update");
        assert_eq!(revived.status, ItemStatus::Active);
    }

    #[tokio::test]
    async fn partial_update_leaves_other_fields() {
        let store = ItemStore::new();
        let mut draft = new_item("Widget", "9.99", 1);
        draft.description = Some("Small".into());
        draft.tags = vec!["tools".into()];
        let created = store.insert(draft).await.expect("insert");

        let changes = ItemChanges {
            price: Patch::Present(price("24.99")),
            description: Patch::Present(None),
            ..ItemChanges::default()
        };
        let updated = store.update(created.id, changes).await.expect("update");
        assert_eq!(updated.price, price("24.99"));
        assert!(updated.description.is_none());
        assert_eq!(updated.name, "Widget");
        assert_eq!(updated.tags, vec!["tools".to_string()]);
    }

    #[tokio::test]
    async fn filters_combine_with_inclusive_price_bounds() {
        let store = ItemStore::new();
        let mut cheap = new_item("Cheap", "10.00", 1);
        cheap.tags = vec!["sale".into()];
        store.insert(cheap).await.expect("insert");
        let mut mid = new_item("Mid", "50.00", 1);
        mid.status = ItemStatus::Active;
        mid.tags = vec!["sale".into(), "electronics".into()];
        store.insert(mid).await.expect("insert");
        store
            .insert(new_item("Pricey", "100.00", 2))
            .await
            .expect("insert");

        let bounded = ItemFilter {
            min_price: Some(price("10")),
            max_price: Some(price("50")),
            ..ItemFilter::default()
        };
        let page = store.list(&bounded, 0, 10).await;
        assert_eq!(page.total, 2);
        assert_eq!(page.items[0].name, "Cheap");
        assert_eq!(page.items[1].name, "Mid");

        let tagged_active = ItemFilter {
            status: Some(ItemStatus::Active),
            tag: Some("sale".into()),
            ..ItemFilter::default()
        };
        let page = store.list(&tagged_active, 0, 10).await;
        assert_eq!(page.total, 1);
        assert_eq!(page.items[0].name, "Mid");

        let owner = ItemFilter {
            owner_id: Some(2),
            ..ItemFilter::default()
        };
        assert_eq!(store.list(&owner, 0, 10).await.items[0].name, "Pricey");
    }

    #[tokio::test]
    async fn paging_over_matching_items() {
        let store = ItemStore::new();
        for index in 0..25 {
            store
                .insert(new_item(&format!("Item {index}"), "1.00", 1))
                .await
                .expect("insert");
        }
        let page = store.list(&ItemFilter::default(), 0, 10).await;
        assert_eq!(page.total, 25);
        assert_eq!(page.items.len(), 10);
        assert_eq!(page.items[0].id, 1);
        assert_eq!(page.items[9].id, 10);
    }

    #[test]
    fn new_item_validation_rules() {
        assert!(new_item("Widget", "9.99", 1).validate().is_ok());
        assert!(new_item("", "9.99", 1).validate().is_err());
        assert!(new_item("Widget", "-1", 1).validate().is_err());
        assert!(new_item("Widget", "1.001", 1).validate().is_err());
        assert!(new_item("Widget", "9.99", 0).validate().is_err());
        let mut tagged = new_item("Widget", "9.99", 1);
        tagged.tags = vec!["t".to_string(); 11];
        assert!(tagged.validate().is_err());
    }
}

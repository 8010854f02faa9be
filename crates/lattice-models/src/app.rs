//! # Apps and App Types
//!
//! An [`App`] is an installable application; each [`AppType`] it declares
//! binds a named entity set template to an entity type.

use lattice_core::{fields, Fqn, FqnSource, Model, ModelBuilder, ObjectReader, UniqueSet, UuidInput, ValidationError};
use serde::Serialize;
use serde_json::Value;
use uuid::Uuid;

// ─── App ─────────────────────────────────────────────────────────────

/// An installable application.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct App {
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<Uuid>,
    name: String,
    title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    url: String,
    app_type_ids: UniqueSet<Uuid>,
}

impl App {
    /// Server-assigned id, if known.
    pub fn id(&self) -> Option<Uuid> {
        self.id
    }

    /// Unique machine name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Display title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Free-text description.
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Where the app is served.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// The app types it declares.
    pub fn app_type_ids(&self) -> &UniqueSet<Uuid> {
        &self.app_type_ids
    }
}

/// Builder for [`App`].
#[derive(Debug, Clone, Default)]
pub struct AppBuilder {
    id: Option<Uuid>,
    name: Option<String>,
    title: Option<String>,
    description: Option<String>,
    url: Option<String>,
    app_type_ids: Option<UniqueSet<Uuid>>,
}

impl AppBuilder {
    /// An empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the id. The empty string leaves it unset.
    pub fn set_id(mut self, id: impl UuidInput) -> Result<Self, ValidationError> {
        if let Some(id) = fields::optional_uuid("id", id)? {
            self.id = Some(id);
        }
        Ok(self)
    }

    /// Set the machine name.
    pub fn set_name(mut self, name: impl Into<String>) -> Result<Self, ValidationError> {
        self.name = Some(fields::non_empty_string("name", name)?);
        Ok(self)
    }

    /// Set the title.
    pub fn set_title(mut self, title: impl Into<String>) -> Result<Self, ValidationError> {
        self.title = Some(fields::non_empty_string("title", title)?);
        Ok(self)
    }

    /// Set the description. The empty string leaves it unset.
    pub fn set_description(mut self, description: impl Into<String>) -> Result<Self, ValidationError> {
        if let Some(description) = fields::optional_string("description", description)? {
            self.description = Some(description);
        }
        Ok(self)
    }

    /// Set the url.
    pub fn set_url(mut self, url: impl Into<String>) -> Result<Self, ValidationError> {
        self.url = Some(fields::non_empty_string("url", url)?);
        Ok(self)
    }

    /// Set the declared app type ids. Duplicates are dropped.
    pub fn set_app_type_ids<I>(mut self, ids: I) -> Result<Self, ValidationError>
    where
        I: IntoIterator,
        I::Item: UuidInput,
    {
        self.app_type_ids = Some(fields::uuid_set("appTypeIds", ids)?);
        Ok(self)
    }
}

impl From<&App> for AppBuilder {
    fn from(app: &App) -> Self {
        Self {
            id: app.id,
            name: Some(app.name.clone()),
            title: Some(app.title.clone()),
            description: app.description.clone(),
            url: Some(app.url.clone()),
            app_type_ids: Some(app.app_type_ids.clone()),
        }
    }
}

impl ModelBuilder for AppBuilder {
    type Model = App;

    fn from_value(value: &Value) -> Result<Self, ValidationError> {
        let obj = ObjectReader::new(App::NAME, value)?;
        let mut builder = Self::new();
        if let Some(id) = obj.str("id")? {
            builder = builder.set_id(id)?;
        }
        if let Some(name) = obj.str("name")? {
            builder = builder.set_name(name)?;
        }
        if let Some(title) = obj.str("title")? {
            builder = builder.set_title(title)?;
        }
        if let Some(description) = obj.str("description")? {
            builder = builder.set_description(description)?;
        }
        if let Some(url) = obj.str("url")? {
            builder = builder.set_url(url)?;
        }
        if let Some(ids) = obj.str_array("appTypeIds")? {
            builder = builder.set_app_type_ids(ids)?;
        }
        Ok(builder)
    }

    fn build(&self) -> Result<App, ValidationError> {
        Ok(App {
            id: self.id,
            name: self.name.clone().ok_or(ValidationError::missing("name"))?,
            title: self.title.clone().ok_or(ValidationError::missing("title"))?,
            description: self.description.clone(),
            url: self.url.clone().ok_or(ValidationError::missing("url"))?,
            app_type_ids: self.app_type_ids.clone().unwrap_or_default(),
        })
    }
}

model_contract!(App, AppBuilder, is_valid_app);

// ─── AppType ─────────────────────────────────────────────────────────

/// An entity set template declared by an app.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppType {
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<Uuid>,
    #[serde(rename = "type")]
    type_fqn: Fqn,
    title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    entity_type_id: Uuid,
}

impl AppType {
    /// Server-assigned id, if known.
    pub fn id(&self) -> Option<Uuid> {
        self.id
    }

    /// The app type's name.
    pub fn type_fqn(&self) -> &Fqn {
        &self.type_fqn
    }

    /// Display title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Free-text description.
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// The entity type backing this app type.
    pub fn entity_type_id(&self) -> Uuid {
        self.entity_type_id
    }
}

/// Builder for [`AppType`].
#[derive(Debug, Clone, Default)]
pub struct AppTypeBuilder {
    id: Option<Uuid>,
    type_fqn: Option<Fqn>,
    title: Option<String>,
    description: Option<String>,
    entity_type_id: Option<Uuid>,
}

impl AppTypeBuilder {
    /// An empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the id. The empty string leaves it unset.
    pub fn set_id(mut self, id: impl UuidInput) -> Result<Self, ValidationError> {
        if let Some(id) = fields::optional_uuid("id", id)? {
            self.id = Some(id);
        }
        Ok(self)
    }

    /// Set the name, in any FQN source shape.
    pub fn set_type(mut self, fqn: impl Into<FqnSource>) -> Result<Self, ValidationError> {
        self.type_fqn = Some(fields::fqn("type", fqn)?);
        Ok(self)
    }

    /// Set the title.
    pub fn set_title(mut self, title: impl Into<String>) -> Result<Self, ValidationError> {
        self.title = Some(fields::non_empty_string("title", title)?);
        Ok(self)
    }

    /// Set the description. The empty string leaves it unset.
    pub fn set_description(mut self, description: impl Into<String>) -> Result<Self, ValidationError> {
        if let Some(description) = fields::optional_string("description", description)? {
            self.description = Some(description);
        }
        Ok(self)
    }

    /// Set the backing entity type.
    pub fn set_entity_type_id(mut self, id: impl UuidInput) -> Result<Self, ValidationError> {
        self.entity_type_id = Some(fields::uuid("entityTypeId", id)?);
        Ok(self)
    }
}

impl From<&AppType> for AppTypeBuilder {
    fn from(app_type: &AppType) -> Self {
        Self {
            id: app_type.id,
            type_fqn: Some(app_type.type_fqn.clone()),
            title: Some(app_type.title.clone()),
            description: app_type.description.clone(),
            entity_type_id: Some(app_type.entity_type_id),
        }
    }
}

impl ModelBuilder for AppTypeBuilder {
    type Model = AppType;

    fn from_value(value: &Value) -> Result<Self, ValidationError> {
        let obj = ObjectReader::new(AppType::NAME, value)?;
        let mut builder = Self::new();
        if let Some(id) = obj.str("id")? {
            builder = builder.set_id(id)?;
        }
        if let Some(fqn) = obj.get("type") {
            builder = builder.set_type(fqn)?;
        }
        if let Some(title) = obj.str("title")? {
            builder = builder.set_title(title)?;
        }
        if let Some(description) = obj.str("description")? {
            builder = builder.set_description(description)?;
        }
        if let Some(id) = obj.str("entityTypeId")? {
            builder = builder.set_entity_type_id(id)?;
        }
        Ok(builder)
    }

    fn build(&self) -> Result<AppType, ValidationError> {
        Ok(AppType {
            id: self.id,
            type_fqn: self.type_fqn.clone().ok_or(ValidationError::missing("type"))?,
            title: self.title.clone().ok_or(ValidationError::missing("title"))?,
            description: self.description.clone(),
            entity_type_id: self
                .entity_type_id
                .ok_or(ValidationError::missing("entityTypeId"))?,
        })
    }
}

model_contract!(AppType, AppTypeBuilder, is_valid_app_type);

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const A: &str = "00000000-0000-0000-0000-00000000000a";
    const B: &str = "00000000-0000-0000-0000-00000000000b";

    fn app(ids: &[&str]) -> App {
        AppBuilder::new()
            .set_name("chronicle")
            .unwrap()
            .set_title("Chronicle")
            .unwrap()
            .set_url("https://openlattice.com/chronicle")
            .unwrap()
            .set_app_type_ids(ids.iter().copied())
            .unwrap()
            .build()
            .unwrap()
    }

    #[test]
    fn app_type_ids_dedup_in_first_occurrence_order() {
        let app = app(&[A, A, B]);
        let ids: Vec<String> = app.app_type_ids().iter().map(Uuid::to_string).collect();
        assert_eq!(ids, vec![A.to_string(), B.to_string()]);
    }

    #[test]
    fn app_type_id_order_does_not_affect_equality() {
        assert_eq!(app(&[A, B]), app(&[B, A]));
        assert_eq!(
            app(&[A, B]).canonical_key().unwrap(),
            app(&[B, A, B]).canonical_key().unwrap()
        );
    }

    #[test]
    fn app_required_fields() {
        let missing_url = AppBuilder::new()
            .set_name("n")
            .unwrap()
            .set_title("t")
            .unwrap()
            .build();
        assert_eq!(missing_url.unwrap_err(), ValidationError::missing("url"));
        assert!(!is_valid_app(&json!({"name": "n", "url": "u"})));
        assert!(is_valid_app(&json!({"name": "n", "title": "t", "url": "u"})));
    }

    #[test]
    fn app_type_accepts_every_fqn_shape() {
        let from_str = AppTypeBuilder::new().set_type("app.people").unwrap();
        let from_pair = AppTypeBuilder::new().set_type(("app", "people")).unwrap();
        let from_obj = AppTypeBuilder::new()
            .set_type(json!({"namespace": "app", "name": "people"}))
            .unwrap();
        for builder in [from_str, from_pair, from_obj] {
            let built = builder
                .set_title("People")
                .unwrap()
                .set_entity_type_id(A)
                .unwrap()
                .build()
                .unwrap();
            assert_eq!(built.type_fqn().to_string(), "app.people");
        }
    }

    #[test]
    fn app_type_rejects_bad_fqn() {
        let err = AppTypeBuilder::new().set_type("people").unwrap_err();
        assert_eq!(err.field(), Some("type"));
        assert!(!is_valid_app_type(&json!({
            "type": {"namespace": "app"},
            "title": "People",
            "entityTypeId": A
        })));
    }

    #[test]
    fn app_type_round_trips_through_builder() {
        let value = json!({
            "id": B,
            "type": {"namespace": "app", "name": "people"},
            "title": "People",
            "description": "everyone",
            "entityTypeId": A
        });
        let app_type = AppType::try_from_value(&value).unwrap();
        assert_eq!(app_type.to_wire_object().unwrap(), value);
        assert_eq!(app_type.to_builder().build().unwrap(), app_type);
    }
}

//! Collection schema: the set of fields a predicate may reference.

use crate::access::DataType;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable identifier of one field of a collection
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct FieldId(pub i64);

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// First id handed out to user-defined fields; lower ids are reserved for system fields
pub const START_USER_FIELD_ID: i64 = 100;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldMeta {
    pub field_id: FieldId,
    pub name: String,
    pub data_type: DataType,
    pub is_primary_key: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Schema {
    fields: Vec<FieldMeta>,
}

impl Schema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a field and return its id. Ids are assigned sequentially from
    /// [`START_USER_FIELD_ID`].
    pub fn add_field(&mut self, name: impl Into<String>, data_type: DataType) -> FieldId {
        self.push_field(name.into(), data_type, false)
    }

    pub fn add_primary_key(&mut self, name: impl Into<String>, data_type: DataType) -> FieldId {
        self.push_field(name.into(), data_type, true)
    }

    fn push_field(&mut self, name: String, data_type: DataType, is_primary_key: bool) -> FieldId {
        let field_id = FieldId(START_USER_FIELD_ID + self.fields.len() as i64);
        self.fields.push(FieldMeta {
            field_id,
            name,
            data_type,
            is_primary_key,
        });
        field_id
    }

    pub fn get(&self, field_id: FieldId) -> Option<&FieldMeta> {
        self.fields.iter().find(|f| f.field_id == field_id)
    }

    pub fn contains(&self, field_id: FieldId) -> bool {
        self.get(field_id).is_some()
    }

    pub fn field_by_name(&self, name: &str) -> Option<&FieldMeta> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn fields(&self) -> &[FieldMeta] {
        &self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

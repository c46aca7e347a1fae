use crate::config::MalformedRecordPolicy;
use crate::core::{DeckError, Location, Result, User};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

// ============================================================================
// Raw Record Schema
// ============================================================================

/// A record as delivered by the directory.
///
/// Every field is optional so that deserialization itself never fails on
/// absent data; required nested fields are checked by the `User` conversion.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawRecord {
    pub id: Option<RawId>,
    pub name: Option<RawName>,
    pub email: Option<String>,
    pub gender: Option<String>,
    pub picture: Option<RawPicture>,
    pub location: Option<RawLocation>,
    pub dob: Option<RawDob>,
    pub phone: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawId {
    pub name: Option<String>,
    pub value: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawName {
    pub title: Option<String>,
    pub first: Option<String>,
    pub last: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawPicture {
    pub large: Option<String>,
    pub medium: Option<String>,
    pub thumbnail: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawLocation {
    pub street: Option<RawStreet>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub country: Option<String>,
    /// Numeric or textual depending on the country.
    pub postcode: Option<Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawStreet {
    pub number: Option<Value>,
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawDob {
    pub date: Option<String>,
    pub age: Option<u32>,
}

// ============================================================================
// Transform
// ============================================================================

/// Upper-cases the first character and lower-cases the rest.
pub fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.as_str().to_lowercase().chars())
            .collect(),
        None => String::new(),
    }
}

fn scalar_to_string(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

impl TryFrom<RawRecord> for User {
    type Error = DeckError;

    fn try_from(raw: RawRecord) -> Result<Self> {
        let id = raw.id.ok_or(DeckError::missing("id"))?;
        let name = raw.name.ok_or(DeckError::missing("name"))?;
        let first = name.first.ok_or(DeckError::missing("name.first"))?;
        let last = name.last.ok_or(DeckError::missing("name.last"))?;
        let picture = raw.picture.ok_or(DeckError::missing("picture"))?;
        let location = raw.location.ok_or(DeckError::missing("location"))?;
        let street = location
            .street
            .ok_or(DeckError::missing("location.street"))?;
        let dob = raw.dob.ok_or(DeckError::missing("dob"))?;

        Ok(User {
            id: id.value.unwrap_or_default(),
            first_name: capitalize_first(&first),
            last_name: capitalize_first(&last),
            email: raw.email.unwrap_or_default(),
            gender: raw.gender.unwrap_or_default(),
            thumbnail: picture.thumbnail.unwrap_or_default(),
            picture: picture.large.unwrap_or_default(),
            location: Location {
                country: location.country.unwrap_or_default(),
                city: location.city.unwrap_or_default(),
                street: format!(
                    "{} {}",
                    scalar_to_string(street.number.as_ref()),
                    street.name.unwrap_or_default()
                ),
                postcode: scalar_to_string(location.postcode.as_ref()),
            },
            age: dob.age.unwrap_or(0),
            phone: raw.phone.unwrap_or_default(),
            is_favorite: false,
            tags: Vec::new(),
        })
    }
}

/// Checks one undecoded record against the schema and builds the user.
///
/// A record whose fields have the wrong type fails with
/// [`DeckError::MalformedPayload`]; a missing required field with
/// [`DeckError::MalformedRecord`].
pub fn parse_record(value: Value) -> Result<User> {
    let raw: RawRecord = serde_json::from_value(value).map_err(|e| {
        DeckError::MalformedPayload(format!("Record does not match the directory schema: {}", e))
    })?;
    User::try_from(raw)
}

/// Converts a fetched page according to `policy`.
///
/// With [`MalformedRecordPolicy::FailPage`] the first bad record fails the
/// whole page; with [`MalformedRecordPolicy::SkipRecord`] bad records are
/// dropped and the rest keep their order.
pub fn transform_page(records: Vec<Value>, policy: MalformedRecordPolicy) -> Result<Vec<User>> {
    match policy {
        MalformedRecordPolicy::FailPage => records.into_iter().map(parse_record).collect(),
        MalformedRecordPolicy::SkipRecord => Ok(records
            .into_iter()
            .enumerate()
            .filter_map(|(index, record)| match parse_record(record) {
                Ok(user) => Some(user),
                Err(err) => {
                    warn!(index, error = %err, "skipping malformed record");
                    None
                }
            })
            .collect()),
    }
}

//! Reshaping between stored rows and the records of the storage contract.
//!
//! A row is a model serialized to a JSON object. Reading takes the core
//! fields out by name and keeps every remaining column as attributes; writing
//! spreads the attributes back next to the core fields.

use chrono::DateTime;
use sea_orm::prelude::DateTimeWithTimeZone;
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use time::OffsetDateTime;
use tracing::warn;

use crate::adapter::{Attributes, DatabaseSession, DatabaseUser};
use crate::error::{Error, Result};
use crate::table::UserId;

/// Names of the core columns of a session row.
#[derive(Debug, Clone, Copy)]
pub(crate) struct SessionKeys<'a> {
    pub id: &'a str,
    pub user_id: &'a str,
    pub expires_at: &'a str,
}

impl SessionKeys<'_> {
    fn is_core(&self, key: &str) -> bool {
        key == self.id || key == self.user_id || key == self.expires_at
    }
}

pub(crate) fn into_database_session<I: UserId>(
    row: Value,
    keys: &SessionKeys<'_>,
) -> Result<DatabaseSession<I>> {
    let mut attributes = into_object(row)?;
    let id = take_field(&mut attributes, keys.id)?;
    let user_id = take_field(&mut attributes, keys.user_id)?;
    let expires_at: DateTimeWithTimeZone = take_field(&mut attributes, keys.expires_at)?;

    Ok(DatabaseSession {
        id,
        user_id,
        expires_at: from_db_timestamp(expires_at)?,
        attributes,
    })
}

pub(crate) fn into_database_user<I: UserId>(row: Value, id_key: &str) -> Result<DatabaseUser<I>> {
    let mut attributes = into_object(row)?;
    let id = take_field(&mut attributes, id_key)?;

    Ok(DatabaseUser { id, attributes })
}

pub(crate) fn from_database_session<I: UserId>(
    session: &DatabaseSession<I>,
    keys: &SessionKeys<'_>,
) -> Result<Value> {
    let mut row = Attributes::new();
    for (key, value) in &session.attributes {
        if keys.is_core(key) {
            warn!(session_id = %session.id, attribute = %key, "ignoring attribute named after a core column");
            continue;
        }
        row.insert(key.clone(), value.clone());
    }

    row.insert(keys.id.to_owned(), Value::String(session.id.clone()));
    row.insert(keys.user_id.to_owned(), encode(&session.user_id)?);
    row.insert(
        keys.expires_at.to_owned(),
        encode(&to_db_timestamp(session.expires_at)?)?,
    );

    Ok(Value::Object(row))
}

/// Serializes a model into the row shape the transformations work on.
pub(crate) fn into_row<M: Serialize>(model: &M) -> Result<Value> {
    serde_json::to_value(model).map_err(|e| Error::Decode(e.to_string()))
}

// Converts time::OffsetDateTime to sea_orm::prelude::DateTimeWithTimeZone (chrono)
pub(crate) fn to_db_timestamp(time: OffsetDateTime) -> Result<DateTimeWithTimeZone> {
    DateTime::from_timestamp(time.unix_timestamp(), time.nanosecond())
        .map(Into::into)
        .ok_or_else(|| Error::Encode(format!("timestamp {time:?} is out of range")))
}

pub(crate) fn from_db_timestamp(datetime: DateTimeWithTimeZone) -> Result<OffsetDateTime> {
    let nanos = i128::from(datetime.timestamp()) * 1_000_000_000
        + i128::from(datetime.timestamp_subsec_nanos());

    OffsetDateTime::from_unix_timestamp_nanos(nanos).map_err(|e| Error::Decode(e.to_string()))
}

fn into_object(row: Value) -> Result<Attributes> {
    match row {
        Value::Object(map) => Ok(map),
        other => Err(Error::Decode(format!("expected a row object, got {other}"))),
    }
}

fn take_field<T: DeserializeOwned>(row: &mut Attributes, key: &str) -> Result<T> {
    let value = row
        .remove(key)
        .ok_or_else(|| Error::Decode(format!("missing column `{key}`")))?;

    serde_json::from_value(value).map_err(|e| Error::Decode(format!("column `{key}`: {e}")))
}

fn encode<T: Serialize>(value: &T) -> Result<Value> {
    serde_json::to_value(value).map_err(|e| Error::Encode(e.to_string()))
}

//! Diesel support for Postgres.
//!
//! `Text` columns store the canonical string, `Uuid` columns store the raw value and lose
//! the prefix; the identifier type is then only known from the Rust side.  Loading NULL
//! into a non-optional identifier fails with `Error::NullValue` instead of producing the
//! nil identifier.

use std::io::Write;

use diesel::deserialize::{self, FromSql};
use diesel::pg::{Pg, PgValue};
use diesel::serialize::{self, IsNull, Output, ToSql};
use diesel::sql_types::{Text, Uuid as SqlUuid};
use uuid::Uuid;

use crate::processor::Kind;
use crate::{Error, Prefix, TypedId};

fn null_value<K: Kind, P: Prefix>() -> Box<dyn std::error::Error + Send + Sync> {
    tracing::debug!(prefix = P::prefix(), "unexpected NULL for identifier column");
    Box::new(Error::NullValue)
}

impl<K: Kind, P: Prefix> ToSql<Text, Pg> for TypedId<K, P> {
    fn to_sql(&self, out: &mut Output<'_, '_, Pg>) -> serialize::Result {
        write!(out, "{}", self)?;
        Ok(IsNull::No)
    }
}

impl<K: Kind, P: Prefix> FromSql<Text, Pg> for TypedId<K, P> {
    fn from_sql(bytes: PgValue<'_>) -> deserialize::Result<Self> {
        let encoded = <String as FromSql<Text, Pg>>::from_sql(bytes)?;
        Ok(Self::parse(&encoded)?)
    }

    fn from_nullable_sql(bytes: Option<PgValue<'_>>) -> deserialize::Result<Self> {
        match bytes {
            Some(bytes) => <Self as FromSql<Text, Pg>>::from_sql(bytes),
            None => Err(null_value::<K, P>()),
        }
    }
}

impl<K: Kind, P: Prefix> ToSql<SqlUuid, Pg> for TypedId<K, P> {
    fn to_sql(&self, out: &mut Output<'_, '_, Pg>) -> serialize::Result {
        out.write_all(self.as_bytes())?;
        Ok(IsNull::No)
    }
}

impl<K: Kind, P: Prefix> FromSql<SqlUuid, Pg> for TypedId<K, P> {
    fn from_sql(bytes: PgValue<'_>) -> deserialize::Result<Self> {
        let uuid = <Uuid as FromSql<SqlUuid, Pg>>::from_sql(bytes)?;
        Ok(Self::from_uuid(uuid)?)
    }

    fn from_nullable_sql(bytes: Option<PgValue<'_>>) -> deserialize::Result<Self> {
        match bytes {
            Some(bytes) => <Self as FromSql<SqlUuid, Pg>>::from_sql(bytes),
            None => Err(null_value::<K, P>()),
        }
    }
}

// Building a non-NULL `PgValue` needs a live connection, so the decoding paths below are only
// exercised against a database; the conversions they delegate to are covered in `id.rs`.
#[cfg(test)]
mod tests {
    use super::*;
    use crate::id::tests::{AccountId, UserId};

    fn assert_null_value(err: Box<dyn std::error::Error + Send + Sync>) {
        assert!(matches!(err.downcast_ref::<Error>(), Some(Error::NullValue)));
    }

    #[test]
    fn test_null_text() {
        let result = <UserId as FromSql<Text, Pg>>::from_nullable_sql(None);
        assert_null_value(result.unwrap_err());

        let result = <AccountId as FromSql<Text, Pg>>::from_nullable_sql(None);
        assert_null_value(result.unwrap_err());
    }

    #[test]
    fn test_null_uuid() {
        let result = <UserId as FromSql<SqlUuid, Pg>>::from_nullable_sql(None);
        assert_null_value(result.unwrap_err());
    }

    // Both column types are implemented for the same identifier type; each nullable entry
    // point must resolve to its own column type.
    fn load_text<T: FromSql<Text, Pg>>(bytes: Option<PgValue<'_>>) -> deserialize::Result<T> {
        T::from_nullable_sql(bytes)
    }

    fn load_uuid<T: FromSql<SqlUuid, Pg>>(bytes: Option<PgValue<'_>>) -> deserialize::Result<T> {
        T::from_nullable_sql(bytes)
    }

    #[test]
    fn test_null_through_both_column_types() {
        assert_null_value(load_text::<AccountId>(None).unwrap_err());
        assert_null_value(load_uuid::<AccountId>(None).unwrap_err());
    }
}

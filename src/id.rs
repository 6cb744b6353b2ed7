use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;
use std::str::FromStr;

use diesel::deserialize::FromSqlRow;
use diesel::expression::AsExpression;
use diesel::sql_types::{Text, Uuid as SqlUuid};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use uuid::Uuid;

use crate::codec::VALUE_LEN;
use crate::grammar::{self, validate_prefix, Prefix};
use crate::processor::{Kind, RandomKind, SortableKind};
use crate::{BoxError, Error};

/// An entirely random identifier.  The value is a UUIDv4 and the suffix is upper case,
/// e.g. `user_01HCJF4N2RER3R6SZHBPFENHVA`.
pub type Random<P> = TypedId<RandomKind, P>;

/// A k-sortable identifier.  The value is a UUIDv7 and the suffix is lower case,
/// e.g. `user_01hf98sp99fs2b4qf2jm11hse4`.
pub type Sortable<P> = TypedId<SortableKind, P>;

/// A generic type-safe identifier (a wrapped UUID).
///
/// The canonical string form is the prefix defined by the `P` marker, an underscore and
/// the value encoded in 26 characters of Crockford base32.  With an empty prefix the
/// string is just the 26 character suffix.  The kind `K` selects the suffix case and how
/// new values are generated; use the [`Random`] and [`Sortable`] aliases.
///
/// Serde uses the canonical string.  For Diesel, identifiers map to Postgres `Text`
/// columns as strings and to `Uuid` columns as raw values.
///
/// # Examples
///
/// ```
/// use typeid_rs::{Prefix, Sortable};
///
/// #[derive(Debug)]
/// pub struct UserPrefix;
/// impl Prefix for UserPrefix {
///     fn prefix() -> &'static str { "user" }
/// }
///
/// type UserId = Sortable<UserPrefix>;
///
/// let id = UserId::new().unwrap();
/// let parsed: UserId = id.to_string().parse().unwrap();
/// assert_eq!(id, parsed);
///
/// assert_eq!(UserId::nil().to_string(), "user_00000000000000000000000000");
/// ```
#[derive(AsExpression, FromSqlRow)]
#[diesel(sql_type = Text)]
#[diesel(sql_type = SqlUuid)]
pub struct TypedId<K: Kind, P: Prefix> {
    uuid: Uuid,
    _marker: PhantomData<fn() -> (K, P)>,
}

impl<K: Kind, P: Prefix> TypedId<K, P> {
    const fn from_raw(uuid: Uuid) -> Self {
        TypedId {
            uuid,
            _marker: PhantomData,
        }
    }

    /// Generates a new identifier with the generator of kind `K`.
    pub fn new() -> Result<Self, Error> {
        Self::new_with(K::processor().generator())
    }

    /// Generates a new identifier with a caller supplied value generator.  The generator is
    /// called once, after the prefix has been validated; its error is returned as
    /// `Error::Generate`.
    ///
    /// ```
    /// use typeid_rs::{Prefix, Random, Uuid};
    ///
    /// #[derive(Debug)]
    /// struct OrderPrefix;
    /// impl Prefix for OrderPrefix {
    ///     fn prefix() -> &'static str { "order" }
    /// }
    ///
    /// let id = Random::<OrderPrefix>::new_with(|| Ok::<_, std::io::Error>(Uuid::max())).unwrap();
    /// assert_eq!(id.to_string(), "order_7ZZZZZZZZZZZZZZZZZZZZZZZZZ");
    /// ```
    pub fn new_with<F, E>(generate: F) -> Result<Self, Error>
    where
        F: FnOnce() -> Result<Uuid, E>,
        E: Into<BoxError>,
    {
        validate_prefix(P::prefix())?;
        let uuid = generate().map_err(|err| {
            let err = err.into();
            tracing::debug!(prefix = P::prefix(), error = %err, "value generator failed");
            Error::Generate(err)
        })?;
        Ok(Self::from_raw(uuid))
    }

    /// Generates a new identifier, panicking on failure.  Intended for tests and
    /// initialization code.
    ///
    /// # Panics
    ///
    /// If the prefix is invalid or the generator fails.
    #[track_caller]
    pub fn must_new() -> Self {
        match Self::new() {
            Ok(id) => id,
            Err(err) => panic!("generate {} identifier: {}", P::prefix(), err),
        }
    }

    /// Parses an identifier from its canonical string form.  Same as `str::parse`.
    pub fn parse(s: &str) -> Result<Self, Error> {
        let bytes = grammar::parse(s, P::prefix(), K::processor().alphabet())?;
        Ok(Self::from_raw(Uuid::from_bytes(bytes)))
    }

    /// Parses an identifier, panicking on failure.  Intended for tests and initialization
    /// code.
    ///
    /// # Panics
    ///
    /// If `s` is not a valid identifier of this type.
    #[track_caller]
    pub fn must_parse(s: &str) -> Self {
        match Self::parse(s) {
            Ok(id) => id,
            Err(err) => panic!("parse identifier `{}`: {}", s, err),
        }
    }

    /// Wraps an existing UUID.  Only the prefix is validated; the UUID version is not
    /// checked.
    pub fn from_uuid(uuid: Uuid) -> Result<Self, Error> {
        validate_prefix(P::prefix())?;
        Ok(Self::from_raw(uuid))
    }

    /// Wraps a UUID given in its hyphenated (or any other `uuid` crate supported) string
    /// form.
    pub fn from_uuid_str(s: &str) -> Result<Self, Error> {
        Self::from_uuid(Uuid::parse_str(s)?)
    }

    /// Wraps a UUID given as exactly 16 big-endian bytes.
    pub fn from_uuid_bytes(bytes: &[u8]) -> Result<Self, Error> {
        Self::from_uuid(Uuid::from_slice(bytes)?)
    }

    /// Returns the nil identifier, whose UUID bytes are all zero.
    pub const fn nil() -> Self {
        Self::from_raw(Uuid::nil())
    }

    /// Returns true for the nil identifier.
    pub fn is_nil(&self) -> bool {
        self.uuid.is_nil()
    }

    /// Returns the prefix of this identifier type.
    pub fn prefix(&self) -> &'static str {
        P::prefix()
    }

    /// Returns the underlying UUID.
    pub fn uuid(&self) -> Uuid {
        self.uuid
    }

    /// Returns the underlying UUID bytes.
    pub fn as_bytes(&self) -> &[u8; VALUE_LEN] {
        self.uuid.as_bytes()
    }
}

impl<K: Kind, P: Prefix> Default for TypedId<K, P> {
    fn default() -> Self {
        Self::nil()
    }
}

impl<K: Kind, P: Prefix> Clone for TypedId<K, P> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K: Kind, P: Prefix> Copy for TypedId<K, P> {}

impl<K: Kind, P: Prefix> PartialEq for TypedId<K, P> {
    fn eq(&self, other: &Self) -> bool {
        self.uuid == other.uuid
    }
}

impl<K: Kind, P: Prefix> Eq for TypedId<K, P> {}

impl<K: Kind, P: Prefix> Hash for TypedId<K, P> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.uuid.hash(state);
    }
}

impl<K: Kind, P: Prefix> PartialOrd for TypedId<K, P> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<K: Kind, P: Prefix> Ord for TypedId<K, P> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.uuid.cmp(&other.uuid)
    }
}

impl<K: Kind, P: Prefix> From<TypedId<K, P>> for Uuid {
    /// Returns the raw `Uuid` value.
    fn from(id: TypedId<K, P>) -> Self {
        id.uuid
    }
}

impl<K: Kind, P: Prefix> fmt::Display for TypedId<K, P> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        grammar::compose(
            f,
            P::prefix(),
            self.uuid.as_bytes(),
            K::processor().alphabet(),
        )
    }
}

impl<K: Kind, P: Prefix> fmt::Debug for TypedId<K, P> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_tuple("TypedId")
            .field(&format_args!("{}", self))
            .finish()
    }
}

impl<K: Kind, P: Prefix> FromStr for TypedId<K, P> {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl<K: Kind, P: Prefix> Serialize for TypedId<K, P> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de, K: Kind, P: Prefix> Deserialize<'de> for TypedId<K, P> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let encoded = String::deserialize(deserializer)?;
        Self::parse(&encoded).map_err(serde::de::Error::custom)
    }
}

//! Diesel mapping for [`daybook_calendar::Date`].
//!
//! A date is written as its `YYYY-MM-DD` text form. On read, a native
//! `DATE`, `TIMESTAMP` or `TIMESTAMPTZ` is truncated to its date, text is
//! parsed, and SQL `NULL` becomes [`Date::ZERO`].

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use daybook_calendar::Date;
use daybook_calendar::date::TEXT_YEARS;
use diesel::deserialize::{self, FromSql, FromSqlRow};
use diesel::expression::AsExpression;
use diesel::pg::{Pg, PgValue};
use diesel::serialize::{self, IsNull, Output, ToSql};
use diesel::sql_types::{self, Nullable, Text, Timestamp, Timestamptz};
use std::io::Write;

use crate::error::{DbError, DbResult};

/// Wrapper giving [`Date`] its Diesel traits.
///
/// Use it in row structs; convert with `From`/`Into` or [`SqlDate::into_inner`].
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    AsExpression,
    FromSqlRow,
)]
#[diesel(sql_type = Text)]
pub struct SqlDate(pub Date);

impl SqlDate {
    #[must_use]
    pub const fn into_inner(self) -> Date {
        self.0
    }
}

impl From<Date> for SqlDate {
    fn from(date: Date) -> Self {
        Self(date)
    }
}

impl From<SqlDate> for Date {
    fn from(date: SqlDate) -> Self {
        date.0
    }
}

/// ## Summary
/// Reads a date from the raw bytes of a text column; `None` is SQL `NULL`.
///
/// ## Errors
/// Returns `DbError::Scan` if the bytes are not UTF-8 or not a `YYYY-MM-DD` date.
pub fn scan_text(value: Option<&[u8]>) -> DbResult<Date> {
    let Some(bytes) = value else {
        return Ok(Date::ZERO);
    };

    let text = std::str::from_utf8(bytes)
        .map_err(|e| DbError::Scan(format!("value is not UTF-8 text: {e}")))?;

    Date::parse(text).map_err(|e| {
        tracing::debug!(value = %text, error = %e, "Rejected stored date");
        DbError::Scan(e.to_string())
    })
}

/// ## Summary
/// Returns the text written for `date`.
///
/// ## Errors
/// Returns `DbError::Unrepresentable` if the year is outside `0000..=9999`,
/// since [`scan_text`] could not read the result back.
pub fn text_form(date: Date) -> DbResult<String> {
    if TEXT_YEARS.contains(&date.year) {
        Ok(date.to_string())
    } else {
        Err(DbError::Unrepresentable(date))
    }
}

/// Reads a native value with `read`, mapping SQL `NULL` to [`Date::ZERO`].
fn null_as_zero<V>(
    bytes: Option<V>,
    read: impl FnOnce(V) -> deserialize::Result<SqlDate>,
) -> deserialize::Result<SqlDate> {
    bytes.map_or(Ok(SqlDate(Date::ZERO)), read)
}

impl ToSql<Text, Pg> for SqlDate {
    fn to_sql<'b>(&'b self, out: &mut Output<'b, '_, Pg>) -> serialize::Result {
        out.write_all(text_form(self.0)?.as_bytes())?;
        Ok(IsNull::No)
    }
}

impl FromSql<Text, Pg> for SqlDate {
    fn from_sql(bytes: PgValue<'_>) -> deserialize::Result<Self> {
        Ok(Self(scan_text(Some(bytes.as_bytes()))?))
    }

    fn from_nullable_sql(bytes: Option<PgValue<'_>>) -> deserialize::Result<Self> {
        Ok(Self(scan_text(bytes.as_ref().map(PgValue::as_bytes))?))
    }
}

impl FromSql<Nullable<Text>, Pg> for SqlDate {
    fn from_sql(bytes: PgValue<'_>) -> deserialize::Result<Self> {
        <Self as FromSql<Text, Pg>>::from_sql(bytes)
    }

    fn from_nullable_sql(bytes: Option<PgValue<'_>>) -> deserialize::Result<Self> {
        <Self as FromSql<Text, Pg>>::from_nullable_sql(bytes)
    }
}

impl FromSql<sql_types::Date, Pg> for SqlDate {
    fn from_sql(bytes: PgValue<'_>) -> deserialize::Result<Self> {
        let date = <NaiveDate as FromSql<sql_types::Date, Pg>>::from_sql(bytes)?;
        Ok(Self(Date::from(date)))
    }

    fn from_nullable_sql(bytes: Option<PgValue<'_>>) -> deserialize::Result<Self> {
        null_as_zero(bytes, <Self as FromSql<sql_types::Date, Pg>>::from_sql)
    }
}

impl FromSql<Timestamp, Pg> for SqlDate {
    fn from_sql(bytes: PgValue<'_>) -> deserialize::Result<Self> {
        let time = <NaiveDateTime as FromSql<Timestamp, Pg>>::from_sql(bytes)?;
        Ok(Self(Date::from(time)))
    }

    fn from_nullable_sql(bytes: Option<PgValue<'_>>) -> deserialize::Result<Self> {
        null_as_zero(bytes, <Self as FromSql<Timestamp, Pg>>::from_sql)
    }
}

impl FromSql<Timestamptz, Pg> for SqlDate {
    fn from_sql(bytes: PgValue<'_>) -> deserialize::Result<Self> {
        let time = <DateTime<Utc> as FromSql<Timestamptz, Pg>>::from_sql(bytes)?;
        Ok(Self(Date::from_datetime(&time)))
    }

    fn from_nullable_sql(bytes: Option<PgValue<'_>>) -> deserialize::Result<Self> {
        null_as_zero(bytes, <Self as FromSql<Timestamptz, Pg>>::from_sql)
    }
}

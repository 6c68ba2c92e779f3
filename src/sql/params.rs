//! Bind `FieldValue` parameters to PostgreSQL queries.

use crate::value::FieldValue;
use sqlx::encode::{Encode, IsNull};
use sqlx::error::BoxDynError;
use sqlx::postgres::{PgArguments, PgTypeInfo, Postgres};
use sqlx::query::Query;
use sqlx::{Database, Type};

impl<'q> Encode<'q, Postgres> for FieldValue {
    fn encode_by_ref(
        &self,
        buf: &mut <Postgres as Database>::ArgumentBuffer<'q>,
    ) -> Result<IsNull, BoxDynError> {
        match self {
            FieldValue::Null => Ok(IsNull::Yes),
            FieldValue::Bool(b) => <bool as Encode<Postgres>>::encode_by_ref(b, buf),
            FieldValue::Int(n) => <i64 as Encode<Postgres>>::encode_by_ref(n, buf),
            FieldValue::Float(n) => <f64 as Encode<Postgres>>::encode_by_ref(n, buf),
            FieldValue::String(s) => <&str as Encode<Postgres>>::encode_by_ref(&s.as_str(), buf),
        }
    }

    /// Declared type follows the variant; the SQL side casts to the column type.
    fn produces(&self) -> Option<PgTypeInfo> {
        Some(match self {
            FieldValue::Null | FieldValue::String(_) => <String as Type<Postgres>>::type_info(),
            FieldValue::Bool(_) => <bool as Type<Postgres>>::type_info(),
            FieldValue::Int(_) => <i64 as Type<Postgres>>::type_info(),
            FieldValue::Float(_) => <f64 as Type<Postgres>>::type_info(),
        })
    }
}

impl Type<Postgres> for FieldValue {
    fn type_info() -> PgTypeInfo {
        <String as Type<Postgres>>::type_info()
    }
}

/// Bind every parameter in order.
pub fn bind_params<'q>(
    mut query: Query<'q, Postgres, PgArguments>,
    params: &[FieldValue],
) -> Query<'q, Postgres, PgArguments> {
    for p in params {
        query = query.bind(p.clone());
    }
    query
}

//! Coupons Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{
    Encode, FromRow, PgConnection, Postgres, QueryBuilder, Row, Type, postgres::PgRow, query_as,
};
use uuid::Uuid;

use crate::domain::coupons::{
    data::NewCoupon,
    filter::{Clause, Predicate},
    records::{CouponRecord, CouponUuid},
    update::{FieldSet, LAST_MODIFIED_COLUMN, SparseUpdate},
};

const SELECT_COUPONS_SQL: &str = include_str!("sql/select_coupons.sql");
const FIND_COUPONS_BY_UUIDS_SQL: &str = include_str!("sql/find_coupons_by_uuids.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgCouponsRepository;

impl PgCouponsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    /// Insert all coupons in one statement; `created_at` comes from the store clock.
    pub(crate) async fn create_coupons(
        &self,
        conn: &mut PgConnection,
        coupons: &[(CouponUuid, NewCoupon)],
    ) -> Result<u64, sqlx::Error> {
        let mut builder = QueryBuilder::<Postgres>::new(
            "INSERT INTO coupons (uuid, name, brand, value, expiry, created_at, last_modified) ",
        );

        builder.push_values(coupons, |mut row, (uuid, coupon)| {
            row.push_bind(uuid.into_uuid())
                .push_bind(coupon.name.clone())
                .push_bind(coupon.brand.clone())
                .push_bind(coupon.value)
                .push_bind(SqlxTimestamp::from(coupon.expiry))
                .push("now()")
                .push("now()");
        });

        let rows_affected = builder.build().execute(conn).await?.rows_affected();

        Ok(rows_affected)
    }

    pub(crate) async fn update_coupon(
        &self,
        conn: &mut PgConnection,
        update: &SparseUpdate,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = update_query(update)
            .build()
            .execute(conn)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    pub(crate) async fn find_coupons_by_uuids(
        &self,
        conn: &mut PgConnection,
        uuids: &[CouponUuid],
    ) -> Result<Vec<CouponRecord>, sqlx::Error> {
        let uuids: Vec<Uuid> = uuids.iter().map(|uuid| uuid.into_uuid()).collect();

        query_as::<Postgres, CouponRecord>(FIND_COUPONS_BY_UUIDS_SQL)
            .bind(uuids)
            .fetch_all(conn)
            .await
    }

    pub(crate) async fn search_coupons(
        &self,
        conn: &mut PgConnection,
        predicate: &Predicate,
    ) -> Result<Vec<CouponRecord>, sqlx::Error> {
        search_query(predicate)
            .build_query_as::<CouponRecord>()
            .fetch_all(conn)
            .await
    }
}

fn update_query(update: &SparseUpdate) -> QueryBuilder<'static, Postgres> {
    let mut builder = QueryBuilder::<Postgres>::new("UPDATE coupons SET ");

    for field in &update.fields {
        builder.push(field.column()).push(" = ");

        match field {
            FieldSet::Name(text) | FieldSet::Brand(text) => builder.push_bind(text.clone()),
            FieldSet::Value(value) => builder.push_bind(*value),
            FieldSet::Expiry(expiry) => builder.push_bind(SqlxTimestamp::from(*expiry)),
        };

        builder.push(", ");
    }

    builder
        .push(LAST_MODIFIED_COLUMN)
        .push(" = now() WHERE uuid = ")
        .push_bind(update.uuid.into_uuid());

    builder
}

fn search_query(predicate: &Predicate) -> QueryBuilder<'static, Postgres> {
    let mut builder = QueryBuilder::<Postgres>::new(SELECT_COUPONS_SQL.trim_end());

    builder.push(" WHERE TRUE");

    for clause in predicate.clauses() {
        match clause {
            Clause::IdIn(uuids) => {
                let uuids: Vec<Uuid> = uuids.iter().map(|uuid| uuid.into_uuid()).collect();

                builder.push(" AND uuid = ANY(").push_bind(uuids).push(")");
            }
            Clause::Value(bounds) => push_bounds(&mut builder, "value", bounds.from, bounds.to),
            Clause::NameContains(text) => {
                builder
                    .push(" AND name LIKE ")
                    .push_bind(format!("%{}%", escape_like(text)))
                    .push(r" ESCAPE '\'");
            }
            Clause::BrandEquals(brand) => {
                builder.push(" AND brand = ").push_bind(brand.clone());
            }
            Clause::Expiry(bounds) => push_bounds(
                &mut builder,
                "expiry",
                bounds.from.map(SqlxTimestamp::from),
                bounds.to.map(SqlxTimestamp::from),
            ),
            Clause::CreatedAt(bounds) => push_bounds(
                &mut builder,
                "created_at",
                bounds.from.map(SqlxTimestamp::from),
                bounds.to.map(SqlxTimestamp::from),
            ),
        }
    }

    builder.push(" ORDER BY created_at, uuid");

    builder
}

fn push_bounds<'args, T>(
    builder: &mut QueryBuilder<'args, Postgres>,
    column: &str,
    from: Option<T>,
    to: Option<T>,
) where
    T: 'args + Encode<'args, Postgres> + Type<Postgres>,
{
    if let Some(from) = from {
        builder.push(" AND ").push(column).push(" >= ").push_bind(from);
    }

    if let Some(to) = to {
        builder.push(" AND ").push(column).push(" <= ").push_bind(to);
    }
}

/// Escape `LIKE` metacharacters so caller text matches literally.
fn escape_like(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());

    for ch in text.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            escaped.push('\\');
        }

        escaped.push(ch);
    }

    escaped
}

impl<'r> FromRow<'r, PgRow> for CouponRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: CouponUuid::from_uuid(row.try_get("uuid")?),
            name: row.try_get("name")?,
            brand: row.try_get("brand")?,
            value: row.try_get("value")?,
            expiry: row.try_get::<SqlxTimestamp, _>("expiry")?.to_jiff(),
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            last_modified: row
                .try_get::<SqlxTimestamp, _>("last_modified")?
                .to_jiff(),
        })
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use smallvec::smallvec;
    use testresult::TestResult;

    use crate::domain::coupons::{data::CouponFilter, filter::compile};

    use super::*;

    #[test]
    fn escape_like_escapes_metacharacters() {
        assert_eq!(escape_like("50%_off\\"), "50\\%\\_off\\\\");
        assert_eq!(escape_like("Save £1"), "Save £1");
    }

    #[test]
    fn empty_predicate_selects_everything() {
        let builder = search_query(&Predicate::default());

        assert!(
            builder
                .sql()
                .ends_with("FROM coupons WHERE TRUE ORDER BY created_at, uuid"),
            "unexpected sql: {}",
            builder.sql()
        );
    }

    #[test]
    fn value_range_renders_both_bounds() -> TestResult {
        let predicate = compile(Some(&CouponFilter {
            value_from: Some(Decimal::ONE),
            value_to: Some(Decimal::TWO),
            ..CouponFilter::default()
        }))?;

        let builder = search_query(&predicate);

        assert!(
            builder
                .sql()
                .contains("WHERE TRUE AND value >= $1 AND value <= $2 ORDER BY"),
            "unexpected sql: {}",
            builder.sql()
        );

        Ok(())
    }

    #[test]
    fn every_clause_renders_in_order() -> TestResult {
        let predicate = compile(Some(&CouponFilter {
            id_in: vec![CouponUuid::new().to_string()],
            name_contains: Some("Save".to_string()),
            brand_equal: Some("Tesco".to_string()),
            expiry_to: Some("2020-01-01T00:00:00Z".parse()?),
            created_at_from: Some("2019-01-01T00:00:00Z".parse()?),
            ..CouponFilter::default()
        }))?;

        let builder = search_query(&predicate);

        assert!(
            builder.sql().contains(
                "WHERE TRUE AND uuid = ANY($1) AND name LIKE $2 ESCAPE '\\' \
                 AND brand = $3 AND expiry <= $4 AND created_at >= $5"
            ),
            "unexpected sql: {}",
            builder.sql()
        );

        Ok(())
    }

    #[test]
    fn update_matches_by_own_uuid_and_touches_last_modified() {
        let builder = update_query(&SparseUpdate {
            uuid: CouponUuid::new(),
            fields: smallvec![],
        });

        assert_eq!(
            builder.sql(),
            "UPDATE coupons SET last_modified = now() WHERE uuid = $1"
        );
    }

    #[test]
    fn update_sets_only_present_fields() {
        let builder = update_query(&SparseUpdate {
            uuid: CouponUuid::new(),
            fields: smallvec![FieldSet::Name("Renamed".to_string()), FieldSet::Value(Decimal::ZERO)],
        });

        assert_eq!(
            builder.sql(),
            "UPDATE coupons SET name = $1, value = $2, last_modified = now() WHERE uuid = $3"
        );
    }
}

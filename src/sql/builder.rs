//! Builds parameterized INSERT, SELECT, UPDATE, DELETE for the advertisements table.

use crate::model::{AdvertisementPatch, NewAdvertisement};
use chrono::{DateTime, Utc};

pub const TABLE: &str = "advertisements";

const COLUMNS: [&str; 5] = ["id", "headline", "description", "time_create", "owner"];

/// A value bound to a positional parameter.
#[derive(Clone, Debug, PartialEq)]
pub enum BindValue {
    Int(i64),
    Text(String),
    Timestamp(DateTime<Utc>),
}

#[derive(Debug)]
pub struct QueryBuf {
    pub sql: String,
    pub params: Vec<BindValue>,
}

impl QueryBuf {
    fn new() -> Self {
        QueryBuf {
            sql: String::new(),
            params: Vec::new(),
        }
    }

    fn push_param(&mut self, v: BindValue) -> u32 {
        let n = self.params.len() as u32 + 1;
        self.params.push(v);
        n
    }
}

/// Quote identifier for PostgreSQL.
fn quoted(s: &str) -> String {
    format!("\"{}\"", s.replace('"', "\"\""))
}

fn select_column_list() -> String {
    COLUMNS.iter().map(|c| quoted(c)).collect::<Vec<_>>().join(", ")
}

/// DDL for the table, run on startup.
pub fn create_table() -> String {
    format!(
        r#"CREATE TABLE IF NOT EXISTS {} (
    "id" BIGSERIAL PRIMARY KEY,
    "headline" TEXT NOT NULL,
    "description" TEXT NOT NULL,
    "time_create" TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    "owner" TEXT NOT NULL
)"#,
        quoted(TABLE)
    )
}

/// SELECT by primary key. With `for_update` the row is locked for the rest of the transaction.
pub fn select_by_id(id: i64, for_update: bool) -> QueryBuf {
    let mut q = QueryBuf::new();
    let n = q.push_param(BindValue::Int(id));
    q.sql = format!(
        "SELECT {} FROM {} WHERE \"id\" = ${}{}",
        select_column_list(),
        quoted(TABLE),
        n,
        if for_update { " FOR UPDATE" } else { "" }
    );
    q
}

/// INSERT one row with an explicit creation time. RETURNING the full row.
pub fn insert(ad: &NewAdvertisement, created_at: DateTime<Utc>) -> QueryBuf {
    let mut q = QueryBuf::new();
    let values = [
        BindValue::Text(ad.headline.clone()),
        BindValue::Text(ad.description.clone()),
        BindValue::Timestamp(created_at),
        BindValue::Text(ad.owner.clone()),
    ];
    let placeholders: Vec<String> = values
        .into_iter()
        .map(|v| format!("${}", q.push_param(v)))
        .collect();
    q.sql = format!(
        "INSERT INTO {} ({}) VALUES ({}) RETURNING {}",
        quoted(TABLE),
        COLUMNS[1..].iter().map(|c| quoted(c)).collect::<Vec<_>>().join(", "),
        placeholders.join(", "),
        select_column_list()
    );
    q
}

/// UPDATE only the columns present in the patch. An empty patch becomes a plain SELECT.
pub fn update(id: i64, patch: &AdvertisementPatch) -> QueryBuf {
    let fields = [
        ("headline", &patch.headline),
        ("description", &patch.description),
        ("owner", &patch.owner),
    ];
    if patch.is_empty() {
        return select_by_id(id, false);
    }
    let mut q = QueryBuf::new();
    let mut sets = Vec::new();
    for (col, value) in fields {
        if let Some(v) = value {
            let n = q.push_param(BindValue::Text(v.clone()));
            sets.push(format!("{} = ${}", quoted(col), n));
        }
    }
    let id_n = q.push_param(BindValue::Int(id));
    q.sql = format!(
        "UPDATE {} SET {} WHERE \"id\" = ${} RETURNING {}",
        quoted(TABLE),
        sets.join(", "),
        id_n,
        select_column_list()
    );
    q
}

/// DELETE by primary key. RETURNING id so the caller can tell whether a row existed.
pub fn delete(id: i64) -> QueryBuf {
    let mut q = QueryBuf::new();
    let n = q.push_param(BindValue::Int(id));
    q.sql = format!("DELETE FROM {} WHERE \"id\" = ${} RETURNING \"id\"", quoted(TABLE), n);
    q
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn select_by_id_binds_single_param() {
        let q = select_by_id(3, false);
        assert_eq!(
            q.sql,
            r#"SELECT "id", "headline", "description", "time_create", "owner" FROM "advertisements" WHERE "id" = $1"#
        );
        assert_eq!(q.params, vec![BindValue::Int(3)]);
        assert!(select_by_id(3, true).sql.ends_with("FOR UPDATE"));
    }

    #[test]
    fn insert_lists_columns_in_param_order() {
        let ad = NewAdvertisement {
            headline: "H".into(),
            description: "D".into(),
            owner: "O".into(),
        };
        let now = Utc::now();
        let q = insert(&ad, now);
        assert!(q.sql.starts_with(
            r#"INSERT INTO "advertisements" ("headline", "description", "time_create", "owner") VALUES ($1, $2, $3, $4) RETURNING"#
        ));
        assert_eq!(q.params[2], BindValue::Timestamp(now));
        assert_eq!(q.params[3], BindValue::Text("O".into()));
    }

    #[test]
    fn update_sets_only_present_columns() {
        let patch = AdvertisementPatch {
            owner: Some("bob".into()),
            ..Default::default()
        };
        let q = update(9, &patch);
        assert!(q.sql.starts_with(r#"UPDATE "advertisements" SET "owner" = $1 WHERE "id" = $2 RETURNING"#));
        assert_eq!(q.params, vec![BindValue::Text("bob".into()), BindValue::Int(9)]);
    }

    #[test]
    fn empty_update_is_a_select() {
        let q = update(9, &AdvertisementPatch::default());
        assert!(q.sql.starts_with("SELECT"));
    }

    #[test]
    fn delete_returns_id() {
        let q = delete(4);
        assert_eq!(q.sql, r#"DELETE FROM "advertisements" WHERE "id" = $1 RETURNING "id""#);
    }
}

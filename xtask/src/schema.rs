// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Schema introspection and comparison for `verify-migrations`.
//!
//! Both migration trees are applied to real databases and read back into a
//! [`Schema`]. Column types are reduced to a backend-neutral family, and
//! primary-key columns count as `NOT NULL` on both sides (`SQLite` reports
//! `INTEGER PRIMARY KEY` columns as nullable). `CHECK` constraints are not
//! introspected.

use std::collections::{BTreeMap, BTreeSet};

use color_eyre::{Result, eyre::Context};
use diesel::sql_types::{BigInt, Integer, Text};
use diesel::{MysqlConnection, QueryableByName, RunQueryDsl, SqliteConnection};

/// Tables keyed by name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Schema {
    pub tables: BTreeMap<String, Table>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    pub columns: BTreeMap<String, Column>,
    pub primary_key: BTreeSet<String>,
    pub foreign_keys: BTreeSet<ForeignKey>,
    pub unique: BTreeSet<Vec<String>>,
    /// Non-unique indexes by column list. Names differ between trees.
    pub indexes: BTreeSet<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    pub family: TypeFamily,
    pub nullable: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct ForeignKey {
    pub column: String,
    pub references_table: String,
    pub references_column: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeFamily {
    Integer,
    Real,
    Text,
    Blob,
}

impl TypeFamily {
    /// Classifies a declared `SQLite` type by its affinity rules.
    pub fn from_sqlite(declared: &str) -> Self {
        let upper = declared.to_ascii_uppercase();
        if upper.contains("INT") {
            Self::Integer
        } else if upper.contains("CHAR") || upper.contains("CLOB") || upper.contains("TEXT") {
            Self::Text
        } else if upper.contains("BLOB") {
            Self::Blob
        } else if upper.contains("REAL") || upper.contains("FLOA") || upper.contains("DOUB") {
            Self::Real
        } else {
            Self::Text
        }
    }

    /// Classifies an `information_schema.columns.data_type` value.
    pub fn from_mysql(data_type: &str) -> Self {
        match data_type.to_ascii_lowercase().as_str() {
            "tinyint" | "smallint" | "mediumint" | "int" | "integer" | "bigint" => Self::Integer,
            "decimal" | "numeric" | "float" | "double" | "real" => Self::Real,
            "binary" | "varbinary" | "tinyblob" | "blob" | "mediumblob" | "longblob" => {
                Self::Blob
            }
            _ => Self::Text,
        }
    }
}

/// Reads the schema of a migrated `SQLite` database.
pub fn introspect_sqlite(conn: &mut SqliteConnection) -> Result<Schema> {
    #[derive(QueryableByName)]
    struct TableName {
        #[diesel(sql_type = Text)]
        name: String,
    }

    #[derive(QueryableByName)]
    struct ColumnInfo {
        #[diesel(sql_type = Text)]
        name: String,
        #[diesel(sql_type = Text)]
        r#type: String,
        #[diesel(sql_type = Integer)]
        notnull: i32,
        #[diesel(sql_type = Integer)]
        pk: i32,
    }

    #[derive(QueryableByName)]
    struct ForeignKeyInfo {
        #[diesel(sql_type = Text)]
        table: String,
        #[diesel(sql_type = Text)]
        from: String,
        #[diesel(sql_type = Text)]
        to: String,
    }

    #[derive(QueryableByName)]
    struct IndexInfo {
        #[diesel(sql_type = Text)]
        name: String,
        #[diesel(sql_type = Integer)]
        unique: i32,
        #[diesel(sql_type = Text)]
        origin: String,
    }

    #[derive(QueryableByName)]
    struct IndexColumn {
        #[diesel(sql_type = Text)]
        name: String,
    }

    let names: Vec<TableName> = diesel::sql_query(
        "SELECT name FROM sqlite_master \
         WHERE type = 'table' AND name NOT LIKE 'sqlite_%' \
         AND name != '__diesel_schema_migrations'",
    )
    .load(conn)
    .wrap_err("Failed to list SQLite tables")?;

    let mut schema = Schema::default();
    for TableName { name: table_name } in names {
        let mut table = Table::default();

        let columns: Vec<ColumnInfo> = diesel::sql_query(format!("PRAGMA table_info({table_name})"))
            .load(conn)
            .wrap_err_with(|| format!("Failed to read columns of {table_name}"))?;
        for column in columns {
            let in_primary_key: bool = column.pk > 0;
            if in_primary_key {
                table.primary_key.insert(column.name.clone());
            }
            table.columns.insert(
                column.name,
                Column {
                    family: TypeFamily::from_sqlite(&column.r#type),
                    nullable: column.notnull == 0 && !in_primary_key,
                },
            );
        }

        let foreign_keys: Vec<ForeignKeyInfo> =
            diesel::sql_query(format!("PRAGMA foreign_key_list({table_name})"))
                .load(conn)
                .wrap_err_with(|| format!("Failed to read foreign keys of {table_name}"))?;
        table
            .foreign_keys
            .extend(foreign_keys.into_iter().map(|fk| ForeignKey {
                column: fk.from,
                references_table: fk.table,
                references_column: fk.to,
            }));

        let indexes: Vec<IndexInfo> = diesel::sql_query(format!("PRAGMA index_list({table_name})"))
            .load(conn)
            .wrap_err_with(|| format!("Failed to read indexes of {table_name}"))?;
        for index in indexes {
            // Primary key indexes are covered by `primary_key`.
            if index.origin == "pk" {
                continue;
            }
            let columns: Vec<IndexColumn> =
                diesel::sql_query(format!("PRAGMA index_info({})", index.name))
                    .load(conn)
                    .wrap_err_with(|| format!("Failed to read columns of index {}", index.name))?;
            let columns: Vec<String> = columns.into_iter().map(|c| c.name).collect();
            if index.unique != 0 {
                table.unique.insert(columns);
            } else {
                table.indexes.insert(columns);
            }
        }

        schema.tables.insert(table_name, table);
    }

    Ok(schema)
}

/// Reads the schema of the connection's current `MySQL` database.
#[allow(clippy::too_many_lines)]
pub fn introspect_mysql(conn: &mut MysqlConnection) -> Result<Schema> {
    #[derive(QueryableByName)]
    struct TableName {
        #[diesel(sql_type = Text)]
        table_name: String,
    }

    #[derive(QueryableByName)]
    struct ColumnInfo {
        #[diesel(sql_type = Text)]
        column_name: String,
        #[diesel(sql_type = Text)]
        data_type: String,
        #[diesel(sql_type = Text)]
        is_nullable: String,
        #[diesel(sql_type = Text)]
        column_key: String,
    }

    #[derive(QueryableByName)]
    struct ForeignKeyInfo {
        #[diesel(sql_type = Text)]
        column_name: String,
        #[diesel(sql_type = Text)]
        referenced_table: String,
        #[diesel(sql_type = Text)]
        referenced_column: String,
    }

    #[derive(QueryableByName)]
    struct IndexColumn {
        #[diesel(sql_type = Text)]
        index_name: String,
        #[diesel(sql_type = Text)]
        column_name: String,
        #[diesel(sql_type = BigInt)]
        non_unique: i64,
    }

    // Labels are aliased because MySQL reports information_schema columns
    // in upper case.
    let names: Vec<TableName> = diesel::sql_query(
        "SELECT table_name AS table_name FROM information_schema.tables \
         WHERE table_schema = DATABASE() AND table_name != '__diesel_schema_migrations'",
    )
    .load(conn)
    .wrap_err("Failed to list MySQL tables")?;

    let mut schema = Schema::default();
    for TableName { table_name } in names {
        let mut table = Table::default();

        let columns: Vec<ColumnInfo> = diesel::sql_query(
            "SELECT column_name AS column_name, data_type AS data_type, \
             is_nullable AS is_nullable, column_key AS column_key \
             FROM information_schema.columns \
             WHERE table_schema = DATABASE() AND table_name = ?",
        )
        .bind::<Text, _>(&table_name)
        .load(conn)
        .wrap_err_with(|| format!("Failed to read columns of {table_name}"))?;
        for column in columns {
            if column.column_key == "PRI" {
                table.primary_key.insert(column.column_name.clone());
            }
            table.columns.insert(
                column.column_name,
                Column {
                    family: TypeFamily::from_mysql(&column.data_type),
                    nullable: column.is_nullable == "YES",
                },
            );
        }

        let foreign_keys: Vec<ForeignKeyInfo> = diesel::sql_query(
            "SELECT column_name AS column_name, \
             referenced_table_name AS referenced_table, \
             referenced_column_name AS referenced_column \
             FROM information_schema.key_column_usage \
             WHERE table_schema = DATABASE() AND table_name = ? \
             AND referenced_table_name IS NOT NULL",
        )
        .bind::<Text, _>(&table_name)
        .load(conn)
        .wrap_err_with(|| format!("Failed to read foreign keys of {table_name}"))?;
        table
            .foreign_keys
            .extend(foreign_keys.into_iter().map(|fk| ForeignKey {
                column: fk.column_name,
                references_table: fk.referenced_table,
                references_column: fk.referenced_column,
            }));

        let index_columns: Vec<IndexColumn> = diesel::sql_query(
            "SELECT index_name AS index_name, column_name AS column_name, \
             CAST(non_unique AS SIGNED) AS non_unique \
             FROM information_schema.statistics \
             WHERE table_schema = DATABASE() AND table_name = ? AND index_name != 'PRIMARY' \
             ORDER BY index_name, seq_in_index",
        )
        .bind::<Text, _>(&table_name)
        .load(conn)
        .wrap_err_with(|| format!("Failed to read indexes of {table_name}"))?;

        let mut grouped: BTreeMap<String, (bool, Vec<String>)> = BTreeMap::new();
        for column in index_columns {
            grouped
                .entry(column.index_name)
                .or_insert_with(|| (column.non_unique == 0, Vec::new()))
                .1
                .push(column.column_name);
        }
        for (unique, columns) in grouped.into_values() {
            if unique {
                table.unique.insert(columns);
            } else {
                table.indexes.insert(columns);
            }
        }

        schema.tables.insert(table_name, table);
    }

    Ok(schema)
}

/// Lists every difference between the two schemas. Empty means parity.
///
/// `InnoDB` creates an index for each foreign key that no existing index
/// starts with, so `MySQL` may carry extra single-column indexes on foreign
/// key columns.
pub fn compare(sqlite: &Schema, mysql: &Schema) -> Vec<String> {
    let mut mismatches: Vec<String> = Vec::new();

    for name in sqlite.tables.keys() {
        if !mysql.tables.contains_key(name) {
            mismatches.push(format!("table '{name}' exists only in SQLite"));
        }
    }
    for name in mysql.tables.keys() {
        if !sqlite.tables.contains_key(name) {
            mismatches.push(format!("table '{name}' exists only in MySQL"));
        }
    }

    for (name, left) in &sqlite.tables {
        if let Some(right) = mysql.tables.get(name) {
            compare_table(name, left, right, &mut mismatches);
        }
    }

    mismatches
}

fn compare_table(name: &str, sqlite: &Table, mysql: &Table, mismatches: &mut Vec<String>) {
    for (column, left) in &sqlite.columns {
        match mysql.columns.get(column) {
            None => mismatches.push(format!("{name}.{column} exists only in SQLite")),
            Some(right) if left.family != right.family => mismatches.push(format!(
                "{name}.{column} type differs: SQLite {:?}, MySQL {:?}",
                left.family, right.family
            )),
            Some(right) if left.nullable != right.nullable => mismatches.push(format!(
                "{name}.{column} nullability differs: SQLite {}, MySQL {}",
                left.nullable, right.nullable
            )),
            Some(_) => {}
        }
    }
    for column in mysql.columns.keys() {
        if !sqlite.columns.contains_key(column) {
            mismatches.push(format!("{name}.{column} exists only in MySQL"));
        }
    }

    if sqlite.primary_key != mysql.primary_key {
        mismatches.push(format!(
            "{name} primary key differs: SQLite {:?}, MySQL {:?}",
            sqlite.primary_key, mysql.primary_key
        ));
    }
    if sqlite.foreign_keys != mysql.foreign_keys {
        mismatches.push(format!(
            "{name} foreign keys differ: SQLite {:?}, MySQL {:?}",
            sqlite.foreign_keys, mysql.foreign_keys
        ));
    }
    if sqlite.unique != mysql.unique {
        mismatches.push(format!(
            "{name} unique constraints differ: SQLite {:?}, MySQL {:?}",
            sqlite.unique, mysql.unique
        ));
    }

    for columns in sqlite.indexes.difference(&mysql.indexes) {
        mismatches.push(format!("{name} index on {columns:?} missing in MySQL"));
    }
    for columns in mysql.indexes.difference(&sqlite.indexes) {
        let implicit_fk_index: bool = columns.len() == 1
            && mysql.foreign_keys.iter().any(|fk| fk.column == columns[0]);
        if !implicit_fk_index {
            mismatches.push(format!("{name} index on {columns:?} exists only in MySQL"));
        }
    }
}

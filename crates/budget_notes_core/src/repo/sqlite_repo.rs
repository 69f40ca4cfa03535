//! SQLite-backed document store.
//!
//! # Invariants
//! - `(collection, id)` is the primary key; inserts never overwrite.
//! - Read paths reject undecodable bodies instead of masking them.

use crate::repo::document_repo::{DocumentRepository, RepoError, RepoResult};
use rusqlite::{params, Connection, ErrorCode, OptionalExtension};
use serde_json::Value;

/// Document repository over the `documents` table.
pub struct SqliteDocumentRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteDocumentRepository<'conn> {
    /// Constructs a repository from a migrated connection.
    ///
    /// # Errors
    /// - `InvalidData` when the `documents` table is missing.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        if !documents_table_exists(conn)? {
            return Err(RepoError::InvalidData(
                "required table `documents` is missing; open the store via open_db".to_string(),
            ));
        }
        Ok(Self { conn })
    }

    /// Lists documents of one collection in insertion order.
    ///
    /// Ordered by `rowid`, which SQLite assigns monotonically per insert
    /// as long as rows are never deleted from `documents`.
    pub fn list_documents(&self, collection: &str) -> RepoResult<Vec<(String, Value)>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, body
             FROM documents
             WHERE collection = ?1
             ORDER BY rowid ASC;",
        )?;
        let mut rows = stmt.query([collection])?;
        let mut documents = Vec::new();
        while let Some(row) = rows.next()? {
            let id: String = row.get("id")?;
            let body: String = row.get("body")?;
            let value = decode_body(collection, &id, &body)?;
            documents.push((id, value));
        }
        Ok(documents)
    }
}

impl DocumentRepository for SqliteDocumentRepository<'_> {
    fn get_document(&self, collection: &str, id: &str) -> RepoResult<Option<Value>> {
        let body: Option<String> = self
            .conn
            .query_row(
                "SELECT body FROM documents WHERE collection = ?1 AND id = ?2;",
                params![collection, id],
                |row| row.get(0),
            )
            .optional()?;

        body.map(|text| decode_body(collection, id, &text))
            .transpose()
    }

    fn create_document(&self, collection: &str, id: &str, document: &Value) -> RepoResult<()> {
        let body = serde_json::to_string(document)?;
        let inserted = self.conn.execute(
            "INSERT INTO documents (collection, id, body) VALUES (?1, ?2, ?3);",
            params![collection, id, body],
        );

        match inserted {
            Ok(_) => Ok(()),
            Err(rusqlite::Error::SqliteFailure(err, _))
                if err.code == ErrorCode::ConstraintViolation =>
            {
                Err(RepoError::DuplicateId {
                    collection: collection.to_string(),
                    id: id.to_string(),
                })
            }
            Err(err) => Err(err.into()),
        }
    }
}

fn decode_body(collection: &str, id: &str, body: &str) -> RepoResult<Value> {
    serde_json::from_str(body).map_err(|err| {
        RepoError::InvalidData(format!("document `{collection}/{id}` is not valid JSON: {err}"))
    })
}

fn documents_table_exists(conn: &Connection) -> RepoResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = 'documents'
        );",
        [],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

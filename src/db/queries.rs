//! SQL query constants
//!
//! Contains all SQL used against the `gender` table. The `"isActive"` column
//! is quoted so PostgreSQL keeps its mixed-case name.

/// Bootstrap the `gender` table if it does not exist yet
pub const CREATE_GENDER_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS gender (
        id SERIAL PRIMARY KEY,
        name VARCHAR(255) NOT NULL,
        "isActive" BOOLEAN NOT NULL DEFAULT true
    )
"#;

/// List records by activity flag, in storage order
pub const LIST_GENDERS_BY_ACTIVE: &str = r#"
    SELECT id, name, "isActive"
    FROM gender
    WHERE "isActive" = $1
"#;

/// Insert a record and return it with its generated id
pub const INSERT_GENDER: &str = r#"
    INSERT INTO gender (name, "isActive")
    VALUES ($1, $2)
    RETURNING id, name, "isActive"
"#;

/// Fetch one record regardless of its activity flag
pub const GET_GENDER_BY_ID: &str = r#"
    SELECT id, name, "isActive"
    FROM gender
    WHERE id = $1
"#;

/// Overwrite name and activity flag
pub const UPDATE_GENDER: &str = r#"
    UPDATE gender
    SET name = $1, "isActive" = $2
    WHERE id = $3
"#;

/// Flip only the activity flag (soft delete)
pub const SET_GENDER_ACTIVE: &str = r#"
    UPDATE gender
    SET "isActive" = $1
    WHERE id = $2
"#;

/// Connectivity check
pub const PING: &str = "SELECT 1";

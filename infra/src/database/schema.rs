//! Table definitions, applied in order at startup

pub const STATEMENTS: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS users (
        id            TEXT PRIMARY KEY NOT NULL,
        username      TEXT NOT NULL UNIQUE,
        email         TEXT UNIQUE,
        password_hash TEXT NOT NULL,
        name          TEXT,
        role          TEXT NOT NULL DEFAULT 'viewer',
        created_at    TEXT NOT NULL,
        updated_at    TEXT NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS verification_tokens (
        identifier TEXT NOT NULL,
        token      TEXT NOT NULL,
        expires    TEXT NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS oauth_accounts (
        provider            TEXT NOT NULL,
        provider_account_id TEXT NOT NULL,
        user_id             TEXT NOT NULL REFERENCES users (id) ON DELETE CASCADE,
        created_at          TEXT NOT NULL,
        PRIMARY KEY (provider, provider_account_id)
    )
    "#,
    "CREATE INDEX IF NOT EXISTS idx_verification_tokens_lookup ON verification_tokens (identifier, token)",
    r#"
    CREATE TABLE IF NOT EXISTS content_items (
        id         TEXT PRIMARY KEY NOT NULL,
        kind       TEXT NOT NULL,
        payload    TEXT NOT NULL,
        created_at TEXT NOT NULL,
        updated_at TEXT NOT NULL
    )
    "#,
    "CREATE INDEX IF NOT EXISTS idx_content_items_kind ON content_items (kind, created_at)",
];

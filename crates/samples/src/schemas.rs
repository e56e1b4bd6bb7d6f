//! Sample documents submitted by the runners.

/// Avro `com.example.User` record with `id` and `username`.
pub const USER_SCHEMA_V1: &str = include_str!("../schemas/user-v1.avsc.json");

/// `USER_SCHEMA_V1` plus an optional `email` field.
pub const USER_SCHEMA_V2: &str = include_str!("../schemas/user-v2.avsc.json");

/// Pet Store API 1.0.0: list and create pets.
pub const PETSTORE_V1: &str = include_str!("../schemas/petstore-v1.openapi.json");

/// Pet Store API 2.0.0: adds get and delete by id.
pub const PETSTORE_V2: &str = include_str!("../schemas/petstore-v2.openapi.json");

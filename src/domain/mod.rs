// ============================================================
// Layer 3 — Domain Layer
// ============================================================
// Pure Rust structs and traits that define the core concepts
// of the system. Rules for this layer:
//   - NO Burn framework types allowed here
//   - NO file I/O
//   - Only plain Rust structs and traits
//
// Keeping this layer pure means it is unit-testable without a
// backend and every other layer can depend on it safely.

// One feature row with its class id
pub mod sample;

// Mapping between class ids and human-readable sign names
pub mod label_codec;

// Core abstractions (traits) that other layers implement
pub mod traits;

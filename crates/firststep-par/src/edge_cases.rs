//! Edge case tests for firststep-par — spec.md §8 property 3 (operator
//! precedence/associativity), property 2 (grammar agreement: print then
//! reparse must round-trip), and parser corners the per-tier unit tests
//! in `parser/expr.rs` don't already cover.

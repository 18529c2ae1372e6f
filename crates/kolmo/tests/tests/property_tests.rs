#[path = "property/chunk_coverage.rs"]
mod chunk_coverage;

#[path = "property/condense_invariants.rs"]
mod condense_invariants;

#[path = "property/energy_and_acceptance.rs"]
mod energy_and_acceptance;

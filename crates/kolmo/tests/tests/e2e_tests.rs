#[path = "e2e/corpus_pipeline.rs"]
mod corpus_pipeline;

#[path = "e2e/prompt_annealing.rs"]
mod prompt_annealing;
